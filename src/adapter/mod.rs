use crate::config::Credentials;
use crate::host::{Host, Notice, TokenRefresher, TrackInfo, MUSIC_SERVICES_SETTINGS_PATH};
use crate::model::Listen;
use crate::source::DataSource;
use crate::widget::{ErrorCode, PlayerEvent, PlayerState, Widget};
use crate::youtube::search::{self, VideoSearcher};
use crate::youtube::{thumbnails, video_id_from_listen, ToSearchQuery, VideoId};
use async_trait::async_trait;
use log::{debug, error, info, warn};
use std::time::Duration;
use url::Url;

/// The widget fills in the video title some time after the video starts loading.
pub const TITLE_RETRY_DELAY: Duration = Duration::from_secs(2);

/// A pending second attempt at reading the video title. The host waits for it
/// outside the adapter, then hands it to [`Adapter::retry_track_info`].
#[must_use]
#[derive(Debug, PartialEq, Eq)]
pub struct TitleRetry {
    load: u64,
}

impl TitleRetry {
    pub async fn elapsed(self) -> Self {
        tokio::time::sleep(TITLE_RETRY_DELAY).await;
        self
    }
}

const PLAYER_ERROR_TITLE: &str = "YouTube player error";
const SEARCH_ERROR_TITLE: &str = "YouTube search error";
const INVALID_VIDEO_TITLE: &str = "Invalid YouTube video";
const ACCOUNT_REQUIRED_TITLE: &str = "YouTube account required";
const ACCOUNT_REQUIRED_MESSAGE: &str = "In order to search for and play tracks on YouTube, \
     you need to link your YouTube (Google) account in the music services settings.";

struct Session<W: Widget> {
    widget: W,
    video_id: Option<VideoId>,
    /// The listen the current video was chosen for, if any.
    listen: Option<Listen>,
    paused: bool,
    expanded: bool,
}

impl<W: Widget> Session<W> {
    fn new(widget: W) -> Self {
        Self {
            widget,
            video_id: None,
            listen: None,
            paused: true,
            expanded: false,
        }
    }

    fn track_info(&self) -> Option<TrackInfo> {
        let video_id = self.video_id.as_ref()?;

        let (title, artist, album) = match self
            .listen
            .as_ref()
            .and_then(|listen| listen.track_name().map(|track_name| (listen, track_name)))
        {
            Some((listen, track_name)) => (
                track_name.to_owned(),
                listen.artist_name().map(str::to_owned),
                listen.release_name().map(str::to_owned),
            ),
            None => {
                let video_title = self
                    .widget
                    .video_title()
                    .filter(|video_title| !video_title.trim().is_empty())?;
                let (title, artist) = split_video_title(&video_title);
                (title, artist, None)
            }
        };

        Some(TrackInfo {
            title,
            url: video_id.url(),
            artist,
            album,
            thumbnails: thumbnails(video_id),
        })
    }
}

/// Plays listens through the embedded YouTube player and reports back to the host.
pub struct Adapter<W: Widget, H: Host, S: VideoSearcher> {
    host: H,
    searcher: S,
    credentials: Credentials,
    token_refresher: Option<Box<dyn TokenRefresher>>,
    session: Option<Session<W>>,
    /// Bumped whenever the loaded video changes, across sessions.
    load: u64,
}

impl<W: Widget, H: Host, S: VideoSearcher> Adapter<W, H, S> {
    pub fn new(host: H, searcher: S, credentials: Credentials) -> Self {
        Self {
            host,
            searcher,
            credentials,
            token_refresher: None,
            session: None,
            load: 0,
        }
    }

    pub fn with_token_refresher(mut self, token_refresher: Box<dyn TokenRefresher>) -> Self {
        self.token_refresher = Some(token_refresher);
        self
    }

    pub fn set_credentials(&mut self, credentials: Credentials) {
        self.credentials = credentials;
    }

    /// Starts a new session on the widget, replacing any previous one.
    pub fn mount(&mut self, widget: W) {
        debug!("Mounting the YouTube player.");
        self.load += 1;
        self.session = Some(Session::new(widget));
    }

    /// Ends the session and hands the widget back for teardown.
    pub fn unmount(&mut self) -> Option<W> {
        debug!("Unmounting the YouTube player.");
        self.session.take().map(|session| session.widget)
    }

    pub fn is_mounted(&self) -> bool {
        self.session.is_some()
    }

    pub fn current_video_id(&self) -> Option<&VideoId> {
        self.session.as_ref()?.video_id.as_ref()
    }

    pub fn is_paused(&self) -> Option<bool> {
        self.session.as_ref().map(|session| session.paused)
    }

    pub fn is_expanded(&self) -> Option<bool> {
        self.session.as_ref().map(|session| session.expanded)
    }

    pub fn toggle_expanded(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.expanded = !session.expanded;
        }
    }

    /// Returns a retry when the title was missing; the adapter stays usable meanwhile.
    pub fn handle_event(&mut self, event: PlayerEvent) -> Option<TitleRetry> {
        if self.session.is_none() {
            return None;
        }

        match event {
            PlayerEvent::Ready => self.on_ready(),
            PlayerEvent::StateChange(player_state) => return self.on_state_change(player_state),
            PlayerEvent::Error(error_code) => self.on_error(error_code),
        }
        None
    }

    /// Dropped when another video was loaded since the retry was issued.
    pub fn retry_track_info(&mut self, title_retry: TitleRetry) {
        if self.session.is_none() || title_retry.load != self.load {
            debug!("Dropping a title retry for a video that is no longer loaded.");
            return;
        }

        if !self.report_track_info() {
            warn!("The video title is still not available.");
        }
    }

    pub fn report_progress(&self) {
        if let Some(session) = &self.session {
            self.host
                .on_progress_changed(seconds_to_ms(session.widget.current_time()));
        }
    }

    fn report_duration(&self) {
        if let Some(session) = &self.session {
            self.host
                .on_duration_changed(seconds_to_ms(session.widget.duration()));
        }
    }

    /// Returns whether the track info could be reported.
    fn report_track_info(&self) -> bool {
        match self.session.as_ref().and_then(Session::track_info) {
            None => false,
            Some(track_info) => {
                self.host.on_track_info_changed(track_info);
                true
            }
        }
    }

    fn on_ready(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        if let Some(video_id) = &session.video_id {
            debug!("The player is ready, reloading the video {video_id}.");
            session.widget.load_video_by_id(video_id);
        }
    }

    fn on_state_change(&mut self, player_state: PlayerState) -> Option<TitleRetry> {
        match player_state {
            PlayerState::Unstarted => {
                if self.report_track_info() {
                    return None;
                }

                debug!("The video title is not available yet, retrying later.");
                return Some(TitleRetry { load: self.load });
            }
            PlayerState::Ended => self.host.on_track_ended(),
            PlayerState::Playing => {
                self.set_paused(false);
                self.report_duration();
                self.host.on_paused_changed(false);
                self.report_track_info();
                self.report_progress();
            }
            PlayerState::Paused => {
                self.set_paused(true);
                self.host.on_paused_changed(true);
                self.report_progress();
            }
            PlayerState::Buffering => {
                self.report_duration();
                self.report_progress();
            }
            PlayerState::Cued => {}
        }
        None
    }

    fn on_error(&mut self, error_code: ErrorCode) {
        let message = error_code.message();
        error!("{message}");

        self.host.on_error(Notice::new(PLAYER_ERROR_TITLE, message));
        self.host.on_track_not_found();
    }

    fn set_paused(&mut self, paused: bool) {
        if let Some(session) = self.session.as_mut() {
            session.paused = paused;
        }
    }

    fn load_video(&mut self, video_id: VideoId) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        info!("Loading the video {video_id}.");
        session.widget.load_video_by_id(&video_id);
        session.video_id = Some(video_id);
        self.load += 1;
    }

    async fn search_and_play(&mut self, listen: &Listen) {
        let Some(query) = listen.to_search_query() else {
            warn!("The listen has neither a track nor a release name to search for.");
            self.host.on_track_not_found();
            return;
        };

        if !self.credentials.is_present() {
            self.report_account_required();
            return;
        }

        match self.search(&query).await {
            Ok(video_ids) => match video_ids.into_iter().next() {
                Some(video_id) => self.load_video(video_id),
                None => {
                    info!("No video was found for \"{query}\".");
                    self.host.on_track_not_found();
                }
            },
            Err(search::Error::Unauthorized) => self.report_account_required(),
            Err(error) => {
                error!("{error}");
                self.host.on_error(Notice::new(
                    SEARCH_ERROR_TITLE,
                    format!("Could not search for \"{query}\"."),
                ));
                self.host.on_track_not_found();
            }
        }
    }

    /// Refreshes the access token once if the search is rejected.
    async fn search(&mut self, query: &str) -> Result<Vec<VideoId>, search::Error> {
        let result = self.searcher.search(query, &self.credentials).await;
        match result {
            Err(search::Error::Unauthorized) => {
                let Some(token_refresher) = &self.token_refresher else {
                    return Err(search::Error::Unauthorized);
                };

                let access_token = match token_refresher.refresh_token().await {
                    Ok(access_token) => access_token,
                    Err(error) => {
                        error!("on refreshing the YouTube access token: {error}");
                        return Err(search::Error::Unauthorized);
                    }
                };
                self.credentials.set_access_token(access_token);

                self.searcher.search(query, &self.credentials).await
            }
            result => result,
        }
    }

    fn report_account_required(&self) {
        warn!("Cannot search YouTube without a linked account.");
        self.host.on_warning(
            Notice::new(ACCOUNT_REQUIRED_TITLE, ACCOUNT_REQUIRED_MESSAGE)
                .link(MUSIC_SERVICES_SETTINGS_PATH),
        );
        self.host.on_track_not_found();
    }
}

#[async_trait(?Send)]
impl<W: Widget, H: Host, S: VideoSearcher> DataSource for Adapter<W, H, S> {
    fn name(&self) -> &'static str {
        "youtube"
    }

    fn domain(&self) -> &'static str {
        "youtube.com"
    }

    fn can_search_and_play_tracks(&self) -> bool {
        true
    }

    fn records_listens(&self) -> bool {
        false
    }

    fn is_listen_from_this_service(&self, listen: &Listen) -> bool {
        let additional_info = &listen.track_metadata.additional_info;
        let mentions_youtube = |field: &Option<String>| {
            field
                .as_deref()
                .is_some_and(|value| value.to_lowercase().contains("youtube"))
        };

        mentions_youtube(&additional_info.music_service)
            || mentions_youtube(&additional_info.listening_from)
            || additional_info
                .origin_url
                .as_deref()
                .and_then(VideoId::from_url)
                .is_some()
    }

    async fn play_listen(&mut self, listen: &Listen) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.listen = Some(listen.clone());
        if session.video_id.take().is_some() {
            self.load += 1;
        }

        match video_id_from_listen(listen) {
            Some(video_id) => self.load_video(video_id),
            None => self.search_and_play(listen).await,
        }
    }

    fn play_by_id(&mut self, id_or_url: &str) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.listen = None;

        match VideoId::parse(id_or_url) {
            Ok(video_id) => self.load_video(video_id),
            Err(_) if Url::parse(id_or_url.trim()).is_ok() => {
                info!("Loading the video at {id_or_url}.");
                session.video_id = None;
                session.widget.load_video_by_url(id_or_url.trim());
                self.load += 1;
            }
            Err(error) => {
                warn!("{error}");
                self.host.on_error(Notice::new(
                    INVALID_VIDEO_TITLE,
                    format!("\"{id_or_url}\" is neither a YouTube video ID nor a URL."),
                ));
                self.host.on_track_not_found();
            }
        }
    }

    fn toggle_pause(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        if session.paused {
            session.widget.play_video();
        } else {
            session.widget.pause_video();
        }
        session.paused = !session.paused;
        self.host.on_paused_changed(session.paused);
    }

    fn seek(&mut self, position_ms: u64) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        session.widget.seek_to(position_ms as f64 / 1000.0, true);
        session.widget.play_video();
    }
}

/// Splits an "Artist - Title" video title.
fn split_video_title(video_title: &str) -> (String, Option<String>) {
    match video_title.split_once(" - ") {
        Some((artist, title)) if !artist.trim().is_empty() && !title.trim().is_empty() => {
            (title.trim().to_owned(), Some(artist.trim().to_owned()))
        }
        _ => (video_title.trim().to_owned(), None),
    }
}

fn seconds_to_ms(seconds: f64) -> u64 {
    (seconds.max(0.0) * 1000.0).round() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_artist_from_video_title() {
        assert_eq!(
            split_video_title("Daft Punk - Around the World (Official Video)"),
            (
                "Around the World (Official Video)".to_owned(),
                Some("Daft Punk".to_owned())
            )
        );
        assert_eq!(split_video_title("Around the World"), ("Around the World".to_owned(), None));
        assert_eq!(split_video_title(" - Intro"), ("- Intro".to_owned(), None));
    }

    #[test]
    fn converts_seconds_to_milliseconds() {
        assert_eq!(seconds_to_ms(212.4567), 212_457);
        assert_eq!(seconds_to_ms(0.0), 0);
        assert_eq!(seconds_to_ms(-1.0), 0);
        assert_eq!(seconds_to_ms(f64::NAN), 0);
    }
}
