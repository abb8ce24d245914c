use crate::model::Listen;
use amplify_derive::Display;
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;
use thiserror::Error;

const VIDEO_URL_BASE: &str = "https://www.youtube.com/watch?v=";

#[derive(Error, Display, Debug, PartialEq, Eq)]
#[display(Debug)]
pub struct ParseError(pub String);

/// A YouTube video identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct VideoId(String);

impl VideoId {
    /// Accepts either a bare identifier or any URL shape known to carry one.
    pub fn parse(id_or_url: impl AsRef<str>) -> Result<Self, ParseError> {
        let id_or_url = id_or_url.as_ref().trim();
        if bare_id_regex().is_match(id_or_url) {
            return Ok(Self(id_or_url.to_owned()));
        }

        Self::from_url(id_or_url).ok_or_else(|| ParseError(id_or_url.to_owned()))
    }

    pub fn from_url(url: impl AsRef<str>) -> Option<Self> {
        url_regex()
            .captures(url.as_ref())
            .and_then(|captures| captures.get(1))
            .map(|id| Self(id.as_str().to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn url(&self) -> String {
        format!("{}{}", VIDEO_URL_BASE, self.0)
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

/// The stored identifier wins over one parsed from the origin URL. A stored
/// identifier is taken as is, without validating its shape.
pub fn video_id_from_listen(listen: &Listen) -> Option<VideoId> {
    let additional_info = &listen.track_metadata.additional_info;

    if let Some(youtube_id) = additional_info
        .youtube_id
        .as_deref()
        .map(str::trim)
        .filter(|youtube_id| !youtube_id.is_empty())
    {
        return Some(VideoId(youtube_id.to_owned()));
    }

    additional_info
        .origin_url
        .as_deref()
        .and_then(VideoId::from_url)
}

fn bare_id_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]{11}$").unwrap())
}

fn url_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(concat!(
            r"(?i)(?:^|//)(?:(?:www|m|music)\.)?",
            r"(?:youtube(?:-nocookie)?\.com/(?:watch\?(?:[^#]*&)?v=|embed/|v/|shorts/|live/)",
            r"|youtu\.be/)",
            r"([A-Za-z0-9_-]{11})(?:[^A-Za-z0-9_-]|$)",
        ))
        .unwrap()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AdditionalInfo, TrackMetadata};

    fn listen(youtube_id: Option<&str>, origin_url: Option<&str>) -> Listen {
        Listen {
            track_metadata: TrackMetadata {
                additional_info: AdditionalInfo {
                    youtube_id: youtube_id.map(str::to_owned),
                    origin_url: origin_url.map(str::to_owned),
                    ..Default::default()
                },
                ..Default::default()
            },
        }
    }

    #[test]
    fn stored_id_is_returned_unchanged() {
        let listen = listen(Some("not-a-normal-id"), None);
        assert_eq!(
            video_id_from_listen(&listen).unwrap().as_str(),
            "not-a-normal-id"
        );
    }

    #[test]
    fn stored_id_wins_over_origin_url() {
        let listen = listen(
            Some("dQw4w9WgXcQ"),
            Some("https://www.youtube.com/watch?v=9bZkp7q19f0"),
        );
        assert_eq!(video_id_from_listen(&listen).unwrap().as_str(), "dQw4w9WgXcQ");
    }

    #[test]
    fn empty_stored_id_falls_back_to_origin_url() {
        let listen = listen(Some(""), Some("https://youtu.be/9bZkp7q19f0"));
        assert_eq!(video_id_from_listen(&listen).unwrap().as_str(), "9bZkp7q19f0");
    }

    #[test]
    fn extracts_id_from_known_url_shapes() {
        let urls = [
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://youtube.com/watch?feature=share&v=dQw4w9WgXcQ&t=42",
            "https://m.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://music.youtube.com/watch?v=dQw4w9WgXcQ&list=RDAMVM",
            "https://youtu.be/dQw4w9WgXcQ?si=abc",
            "https://www.youtube.com/embed/dQw4w9WgXcQ",
            "https://www.youtube-nocookie.com/embed/dQw4w9WgXcQ?autoplay=1",
            "https://www.youtube.com/v/dQw4w9WgXcQ",
            "https://www.youtube.com/shorts/dQw4w9WgXcQ",
            "https://www.youtube.com/live/dQw4w9WgXcQ?feature=shared",
        ];

        for url in urls {
            let listen = listen(None, Some(url));
            assert_eq!(
                video_id_from_listen(&listen).map(|id| id.to_string()),
                Some("dQw4w9WgXcQ".to_owned()),
                "{url}"
            );
        }
    }

    #[test]
    fn no_id_without_stored_id_or_matching_url() {
        assert_eq!(video_id_from_listen(&listen(None, None)), None);
        assert_eq!(
            video_id_from_listen(&listen(None, Some("https://open.spotify.com/track/abc"))),
            None
        );
        assert_eq!(
            video_id_from_listen(&listen(None, Some("https://notyoutube.com/watch?v=dQw4w9WgXcQ"))),
            None
        );
        assert_eq!(
            video_id_from_listen(&listen(None, Some("https://www.youtube.com/watch?v=short"))),
            None
        );
    }

    #[test]
    fn parses_bare_id_or_url() {
        assert_eq!(VideoId::parse("dQw4w9WgXcQ").unwrap().as_str(), "dQw4w9WgXcQ");
        assert_eq!(
            VideoId::parse(" https://youtu.be/dQw4w9WgXcQ ").unwrap().as_str(),
            "dQw4w9WgXcQ"
        );
        assert_eq!(
            VideoId::parse("https://example.org/video.mp4"),
            Err(ParseError("https://example.org/video.mp4".to_owned()))
        );
    }

    #[test]
    fn builds_watch_url() {
        assert_eq!(
            VideoId::parse("dQw4w9WgXcQ").unwrap().url(),
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ"
        );
    }
}
