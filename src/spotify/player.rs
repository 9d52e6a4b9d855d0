use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::{
    config,
    spotify::SpotifyError,
    types::{AccessToken, CurrentlyPlayingResponse, Playback, PlaybackState, Track},
    utils,
};

/// Client for the "current playback state" resource.
#[derive(Debug, Clone)]
pub struct PlayerApi {
    client: Client,
    api_url: String,
}

impl PlayerApi {
    pub fn new(client: Client, api_url: impl Into<String>) -> Self {
        PlayerApi {
            client,
            api_url: api_url.into(),
        }
    }

    pub fn from_config(client: Client) -> Self {
        Self::new(client, config::spotify_apiurl())
    }

    /// Fetches `GET /me/player` with the given bearer token.
    ///
    /// A `204 No Content` or an empty body means no active device and maps to
    /// [`PlaybackState::Empty`]. Any other 2xx body must validate as a playback
    /// response. The snapshot is stamped with the client-observed fetch time.
    pub async fn currently_playing(
        &self,
        token: &AccessToken,
    ) -> Result<PlaybackState, SpotifyError> {
        let api_url = format!("{uri}/me/player", uri = self.api_url.trim_end_matches('/'));

        let res = self
            .client
            .get(&api_url)
            .bearer_auth(token.secret())
            .send()
            .await?;

        let status = res.status();
        let body = res.bytes().await?;

        if !status.is_success() {
            return Err(SpotifyError::PlaybackQuery(error_message(status, &body)));
        }

        parse_playback(&body, utils::now_ms())
    }
}

/// Validates a 2xx body from the player endpoint into a [`PlaybackState`].
pub fn parse_playback(body: &[u8], timestamp_ms: i64) -> Result<PlaybackState, SpotifyError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(PlaybackState::Empty);
    }

    let response: CurrentlyPlayingResponse = serde_json::from_slice(body).map_err(|e| {
        SpotifyError::PlaybackQuery(format!("malformed playback response: {}", e))
    })?;

    Ok(into_state(response, timestamp_ms))
}

fn into_state(response: CurrentlyPlayingResponse, timestamp_ms: i64) -> PlaybackState {
    let Some(item) = response.item else {
        return PlaybackState::Empty;
    };

    let is_advertisement =
        item.is_ad || response.currently_playing_type.as_deref() == Some("ad");
    let (album_name, album_art_url) = match item.album {
        Some(album) => (album.name, album.images.into_iter().next().map(|i| i.url)),
        None => (String::new(), None),
    };

    let track = Track {
        name: item.name,
        artist_name: item
            .artists
            .into_iter()
            .next()
            .map(|a| a.name)
            .unwrap_or_default(),
        album_name,
        album_art_url,
        external_url: item.external_urls.and_then(|u| u.spotify),
        duration_ms: item.duration_ms,
        is_advertisement,
    };

    let playback = Playback {
        track,
        progress_ms: response.progress_ms.unwrap_or(0),
        timestamp_ms,
    };

    if response.is_playing {
        PlaybackState::Playing(playback)
    } else {
        PlaybackState::Paused(playback)
    }
}

// Web API errors come as {"error": {"status", "message"}}; the accounts
// service uses {"error": "..."}.
fn error_message(status: StatusCode, body: &[u8]) -> String {
    let json: Option<Value> = serde_json::from_slice(body).ok();
    json.as_ref()
        .and_then(|j| {
            j["error"]["message"]
                .as_str()
                .or_else(|| j["error"].as_str())
        })
        .filter(|msg| !msg.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("player endpoint returned {}", status))
}
