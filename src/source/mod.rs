use crate::model::Listen;
use async_trait::async_trait;

/// What the host orchestrator can ask of a playback data source.
#[async_trait(?Send)]
pub trait DataSource {
    fn name(&self) -> &'static str;
    fn domain(&self) -> &'static str;
    fn can_search_and_play_tracks(&self) -> bool;
    /// Whether the service submits listens on its own, so the host must not.
    fn records_listens(&self) -> bool;
    fn is_listen_from_this_service(&self, listen: &Listen) -> bool;

    async fn play_listen(&mut self, listen: &Listen);
    fn play_by_id(&mut self, id_or_url: &str);
    fn toggle_pause(&mut self);
    fn seek(&mut self, position_ms: u64);
}
