use crate::youtube::Thumbnail;
use async_trait::async_trait;

pub const MUSIC_SERVICES_SETTINGS_PATH: &str = "/settings/music-services/details/";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrackInfo {
    pub title: String,
    pub url: String,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub thumbnails: Vec<Thumbnail>,
}

/// A message for the user. Warnings carrying a link stay until dismissed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
    pub link: Option<String>,
}

impl Notice {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            link: None,
        }
    }

    pub fn link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }
}

/// The playback orchestrator the adapter reports to. Times are in milliseconds.
pub trait Host {
    fn on_track_info_changed(&self, track_info: TrackInfo);
    fn on_duration_changed(&self, duration_ms: u64);
    fn on_progress_changed(&self, progress_ms: u64);
    fn on_paused_changed(&self, paused: bool);
    fn on_track_ended(&self);
    fn on_track_not_found(&self);
    fn on_error(&self, notice: Notice);
    fn on_warning(&self, notice: Notice);
}

#[async_trait(?Send)]
pub trait TokenRefresher {
    /// Returns a fresh access token for the linked provider account.
    async fn refresh_token(&self) -> anyhow::Result<String>;
}
