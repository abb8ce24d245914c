use serde::Deserialize;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Listen {
    #[serde(default)]
    pub track_metadata: TrackMetadata,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct TrackMetadata {
    pub track_name: Option<String>,
    pub artist_name: Option<String>,
    pub release_name: Option<String>,
    #[serde(default)]
    pub additional_info: AdditionalInfo,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct AdditionalInfo {
    pub youtube_id: Option<String>,
    pub origin_url: Option<String>,
    pub music_service: Option<String>,
    pub listening_from: Option<String>,
    pub duration_ms: Option<u64>,
}

impl Listen {
    pub fn track_name(&self) -> Option<&str> {
        non_empty(self.track_metadata.track_name.as_deref())
    }

    pub fn artist_name(&self) -> Option<&str> {
        non_empty(self.track_metadata.artist_name.as_deref())
    }

    pub fn release_name(&self) -> Option<&str> {
        non_empty(self.track_metadata.release_name.as_deref())
    }
}

/// A track of a JSPF playlist.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PlaylistTrack {
    pub title: Option<String>,
    pub creator: Option<String>,
    pub album: Option<String>,
    #[serde(default)]
    pub location: Vec<String>,
}

impl From<PlaylistTrack> for Listen {
    fn from(playlist_track: PlaylistTrack) -> Self {
        Self {
            track_metadata: TrackMetadata {
                track_name: playlist_track.title,
                artist_name: playlist_track.creator,
                release_name: playlist_track.album,
                additional_info: AdditionalInfo {
                    origin_url: playlist_track.location.into_iter().next(),
                    ..Default::default()
                },
            },
        }
    }
}

fn non_empty(text: Option<&str>) -> Option<&str> {
    text.map(str::trim).filter(|text| !text.is_empty())
}
