use std::fmt;

use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Long-lived client credentials used to mint access tokens.
#[derive(Clone, Default)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .finish()
    }
}

/// Short-lived bearer token. Obtained fresh for every poll cycle.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        AccessToken(token.into())
    }

    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Track {
    pub name: String,
    pub artist_name: String,
    pub album_name: String,
    pub album_art_url: Option<String>,
    pub external_url: Option<String>,
    pub duration_ms: u64,
    pub is_advertisement: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Playback {
    pub track: Track,
    pub progress_ms: u64,
    /// Client-observed time of the fetch, in milliseconds since the epoch.
    pub timestamp_ms: i64,
}

/// One snapshot of the player, validated at the API boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PlaybackState {
    Empty,
    Playing(Playback),
    Paused(Playback),
}

impl PlaybackState {
    pub fn is_playing(&self) -> bool {
        matches!(self, PlaybackState::Playing(_))
    }

    pub fn playback(&self) -> Option<&Playback> {
        match self {
            PlaybackState::Empty => None,
            PlaybackState::Playing(p) | PlaybackState::Paused(p) => Some(p),
        }
    }

    pub fn track(&self) -> Option<&Track> {
        self.playback().map(|p| &p.track)
    }

    pub fn progress_ms(&self) -> u64 {
        self.playback().map(|p| p.progress_ms).unwrap_or(0)
    }

    pub fn timestamp_ms(&self) -> Option<i64> {
        self.playback().map(|p| p.timestamp_ms)
    }
}

/// Content of the shared observation slot.
///
/// `sequence` is the number of the poll cycle that produced `state`. A `state`
/// of `None` means no cycle has published yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Observation {
    pub sequence: u64,
    pub state: Option<PlaybackState>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurrentlyPlayingResponse {
    #[serde(default)]
    pub is_playing: bool,
    #[serde(default)]
    pub progress_ms: Option<u64>,
    #[serde(default)]
    pub currently_playing_type: Option<String>,
    #[serde(default)]
    pub item: Option<TrackObject>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackObject {
    pub name: String,
    #[serde(default)]
    pub artists: Vec<ArtistObject>,
    #[serde(default)]
    pub album: Option<AlbumObject>,
    #[serde(default)]
    pub external_urls: Option<ExternalUrls>,
    pub duration_ms: u64,
    #[serde(default)]
    pub is_ad: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtistObject {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlbumObject {
    pub name: String,
    #[serde(default)]
    pub images: Vec<ImageObject>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageObject {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExternalUrls {
    pub spotify: Option<String>,
}

#[derive(Tabled)]
pub struct NowPlayingTableRow {
    pub status: String,
    pub track: String,
    pub artist: String,
    pub album: String,
    pub progress: String,
}

/// State shared with the widget server's handlers.
#[derive(Debug, Clone)]
pub struct WidgetState {
    pub observations: tokio::sync::watch::Receiver<Observation>,
    pub display_name: String,
    pub refresh_secs: u64,
}
