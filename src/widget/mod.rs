use crate::youtube::VideoId;
use serde::Serialize;
use url::Url;

const EMBED_URL_BASE: &str = "https://www.youtube.com/embed/";

/// States reported by the IFrame player, with their numeric values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerState {
    Unstarted,
    Ended,
    Playing,
    Paused,
    Buffering,
    Cued,
}

impl TryFrom<i32> for PlayerState {
    type Error = i32;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Ok(match value {
            -1 => Self::Unstarted,
            0 => Self::Ended,
            1 => Self::Playing,
            2 => Self::Paused,
            3 => Self::Buffering,
            5 => Self::Cued,
            value => Err(value)?,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCode {
    InvalidParameter,
    Html5Player,
    VideoNotFound,
    EmbeddingNotAllowed,
    Other(i32),
}

impl From<i32> for ErrorCode {
    fn from(code: i32) -> Self {
        match code {
            2 => Self::InvalidParameter,
            5 => Self::Html5Player,
            100 => Self::VideoNotFound,
            // 150 is the same as 101, in disguise.
            101 | 150 => Self::EmbeddingNotAllowed,
            code => Self::Other(code),
        }
    }
}

impl ErrorCode {
    pub fn message(&self) -> String {
        match self {
            Self::InvalidParameter => {
                "The request contains an invalid parameter value. The video ID might be malformed."
                    .to_owned()
            }
            Self::Html5Player => {
                "The requested content cannot be played in an HTML5 player or another error related to the HTML5 player has occurred."
                    .to_owned()
            }
            Self::VideoNotFound => {
                "The video requested was not found. It has been removed or marked as private."
                    .to_owned()
            }
            Self::EmbeddingNotAllowed => {
                "The owner of the requested video does not allow it to be played in embedded players."
                    .to_owned()
            }
            Self::Other(code) => format!("An unknown error occurred (code {}).", code),
        }
    }
}

/// An event fired by the widget towards the adapter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerEvent {
    Ready,
    StateChange(PlayerState),
    Error(ErrorCode),
}

/// The embedded IFrame player instance. Times are in seconds, as the provider uses them.
pub trait Widget {
    fn load_video_by_id(&mut self, video_id: &VideoId);
    fn load_video_by_url(&mut self, url: &str);
    fn play_video(&mut self);
    fn pause_video(&mut self);
    fn seek_to(&mut self, seconds: f64, allow_seek_ahead: bool);
    fn duration(&self) -> f64;
    fn current_time(&self) -> f64;
    /// Empty until the widget has fetched the video metadata.
    fn video_title(&self) -> Option<String>;
}

/// The `playerVars` the widget is created with.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EmbedOptions {
    pub autoplay: u8,
    pub controls: u8,
    pub modestbranding: u8,
    pub rel: u8,
    pub playsinline: u8,
    pub enablejsapi: u8,
    pub origin: Option<String>,
}

impl Default for EmbedOptions {
    fn default() -> Self {
        Self {
            autoplay: 1,
            controls: 0,
            modestbranding: 1,
            rel: 0,
            playsinline: 1,
            enablejsapi: 1,
            origin: None,
        }
    }
}

impl EmbedOptions {
    pub fn embed_url(&self, video_id: &VideoId) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(&format!("{}{}", EMBED_URL_BASE, video_id))?;

        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("autoplay", &self.autoplay.to_string())
                .append_pair("controls", &self.controls.to_string())
                .append_pair("modestbranding", &self.modestbranding.to_string())
                .append_pair("rel", &self.rel.to_string())
                .append_pair("playsinline", &self.playsinline.to_string())
                .append_pair("enablejsapi", &self.enablejsapi.to_string());
            if let Some(origin) = &self.origin {
                query.append_pair("origin", origin);
            }
        }

        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_player_states() {
        assert_eq!(PlayerState::try_from(-1), Ok(PlayerState::Unstarted));
        assert_eq!(PlayerState::try_from(0), Ok(PlayerState::Ended));
        assert_eq!(PlayerState::try_from(1), Ok(PlayerState::Playing));
        assert_eq!(PlayerState::try_from(2), Ok(PlayerState::Paused));
        assert_eq!(PlayerState::try_from(3), Ok(PlayerState::Buffering));
        assert_eq!(PlayerState::try_from(5), Ok(PlayerState::Cued));
        assert_eq!(PlayerState::try_from(4), Err(4));
    }

    #[test]
    fn error_code_150_means_embedding_not_allowed() {
        assert_eq!(ErrorCode::from(150), ErrorCode::EmbeddingNotAllowed);
        assert_eq!(ErrorCode::from(101), ErrorCode::EmbeddingNotAllowed);
        assert!(ErrorCode::from(150)
            .message()
            .contains("does not allow it to be played in embedded players"));
    }

    #[test]
    fn error_code_100_means_video_not_found() {
        assert_eq!(ErrorCode::from(100), ErrorCode::VideoNotFound);
        assert!(ErrorCode::from(100).message().contains("not found"));
    }

    #[test]
    fn unknown_error_code_keeps_the_code() {
        assert_eq!(ErrorCode::from(42), ErrorCode::Other(42));
        assert!(ErrorCode::from(42).message().contains("42"));
    }

    #[test]
    fn embed_url_hides_controls_and_branding() {
        let video_id = VideoId::parse("dQw4w9WgXcQ").unwrap();
        let embed_options = EmbedOptions {
            origin: Some("https://listenbrainz.org".to_owned()),
            ..Default::default()
        };

        assert_eq!(
            embed_options.embed_url(&video_id).unwrap().as_str(),
            "https://www.youtube.com/embed/dQw4w9WgXcQ?autoplay=1&controls=0&modestbranding=1&rel=0&playsinline=1&enablejsapi=1&origin=https%3A%2F%2Flistenbrainz.org"
        );
    }
}
