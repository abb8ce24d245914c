use crate::config::Credentials;
use crate::model::Listen;
use crate::youtube::VideoId;
use amplify_derive::Display;
use async_trait::async_trait;
use log::debug;
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

const SEARCH_URL: &str = "https://www.googleapis.com/youtube/v3/search";

#[derive(Error, Display, Debug)]
#[display(Debug)]
#[allow(dead_code)]
pub enum Error {
    Unauthorized,
    Request(reqwest::Error),
    UnexpectedStatus(StatusCode),
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        Self::Request(error)
    }
}

#[async_trait(?Send)]
pub trait VideoSearcher {
    /// Returns matching embeddable videos, best match first.
    async fn search(&self, query: &str, credentials: &Credentials) -> Result<Vec<VideoId>, Error>;
}

pub trait ToSearchQuery {
    fn title(&self) -> Option<&str>;
    fn artist_name(&self) -> Option<&str>;
    fn release_name(&self) -> Option<&str>;

    fn to_search_query(&self) -> Option<String> {
        match (self.title(), self.artist_name()) {
            (Some(title), Some(artist_name)) => Some(format!("{} {}", title, artist_name)),
            (Some(title), None) => Some(title.to_owned()),
            (None, _) => self.release_name().map(str::to_owned),
        }
    }
}

impl ToSearchQuery for Listen {
    fn title(&self) -> Option<&str> {
        self.track_name()
    }

    fn artist_name(&self) -> Option<&str> {
        Listen::artist_name(self)
    }

    fn release_name(&self) -> Option<&str> {
        Listen::release_name(self)
    }
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Deserialize)]
struct SearchItem {
    id: SearchItemId,
}

#[derive(Deserialize)]
struct SearchItemId {
    #[serde(rename = "videoId")]
    video_id: Option<String>,
}

impl From<SearchResponse> for Vec<VideoId> {
    fn from(search_response: SearchResponse) -> Self {
        search_response
            .items
            .into_iter()
            .filter_map(|item| item.id.video_id)
            .filter_map(|video_id| VideoId::parse(video_id).ok())
            .collect()
    }
}

/// Client of the YouTube Data API search endpoint.
pub struct Searcher {
    http_client: reqwest::Client,
    max_results: u32,
}

impl Searcher {
    pub fn new(http_client: reqwest::Client, max_results: u32) -> Self {
        Self {
            http_client,
            max_results,
        }
    }
}

#[async_trait(?Send)]
impl VideoSearcher for Searcher {
    async fn search(&self, query: &str, credentials: &Credentials) -> Result<Vec<VideoId>, Error> {
        let max_results = self.max_results.to_string();
        let mut request = self.http_client.get(SEARCH_URL).query(&[
            ("part", "snippet"),
            ("type", "video"),
            ("videoEmbeddable", "true"),
            ("maxResults", max_results.as_str()),
            ("q", query),
        ]);
        request = match (credentials.access_token(), credentials.api_key()) {
            (Some(access_token), _) => request.bearer_auth(access_token),
            (None, Some(api_key)) => request.query(&[("key", api_key)]),
            (None, None) => return Err(Error::Unauthorized),
        };

        let response = request.send().await?;
        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => return Err(Error::Unauthorized),
            status if !status.is_success() => return Err(Error::UnexpectedStatus(status)),
            _ => {}
        }

        let video_ids: Vec<VideoId> = response.json::<SearchResponse>().await?.into();
        debug!("The search for \"{query}\" returned {} videos.", video_ids.len());

        Ok(video_ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TrackMetadata;

    fn listen(track_name: Option<&str>, artist_name: Option<&str>, release_name: Option<&str>) -> Listen {
        Listen {
            track_metadata: TrackMetadata {
                track_name: track_name.map(str::to_owned),
                artist_name: artist_name.map(str::to_owned),
                release_name: release_name.map(str::to_owned),
                ..Default::default()
            },
        }
    }

    #[test]
    fn query_is_track_and_artist() {
        assert_eq!(
            listen(Some("Hyperballad"), Some("Björk"), Some("Post")).to_search_query(),
            Some("Hyperballad Björk".to_owned())
        );
        assert_eq!(
            listen(Some("Hyperballad"), None, None).to_search_query(),
            Some("Hyperballad".to_owned())
        );
    }

    #[test]
    fn query_falls_back_to_release_name() {
        assert_eq!(
            listen(None, Some("Björk"), Some("Post")).to_search_query(),
            Some("Post".to_owned())
        );
        assert_eq!(listen(None, Some("Björk"), None).to_search_query(), None);
    }

    #[test]
    fn collects_video_ids_from_response() {
        let search_response: SearchResponse = serde_json::from_str(
            r#"{
                "kind": "youtube#searchListResponse",
                "items": [
                    {"id": {"kind": "youtube#video", "videoId": "dQw4w9WgXcQ"}, "snippet": {}},
                    {"id": {"kind": "youtube#channel", "channelId": "UC123"}},
                    {"id": {"kind": "youtube#video", "videoId": "9bZkp7q19f0"}}
                ]
            }"#,
        )
        .unwrap();

        let video_ids: Vec<VideoId> = search_response.into();
        assert_eq!(
            video_ids.iter().map(VideoId::as_str).collect::<Vec<_>>(),
            ["dQw4w9WgXcQ", "9bZkp7q19f0"]
        );
    }

    #[test]
    fn empty_response_has_no_videos() {
        let search_response: SearchResponse = serde_json::from_str("{}").unwrap();
        assert!(Vec::<VideoId>::from(search_response).is_empty());
    }
}
