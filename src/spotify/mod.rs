//! # Spotify Integration Module
//!
//! This module is the integration layer between the widget and the Spotify Web
//! API. It covers the two calls every poll cycle makes:
//!
//! ```text
//! PlaybackPoller tick
//!          ↓
//! auth::TokenBroker     POST /api/token  (refresh_token grant, HTTP Basic)
//!          ↓
//! player::PlayerApi     GET  /me/player  (Bearer access token)
//!          ↓
//! PlaybackState
//! ```
//!
//! ## Token Strategy
//!
//! Tokens are never cached. Every cycle exchanges the long-lived refresh token
//! for a new access token, so an expired or revoked token can only ever affect
//! a single cycle.
//!
//! ## Error Handling
//!
//! Both clients return [`SpotifyError`]:
//! - **`TokenRefresh`** - the token endpoint answered non-2xx or without an
//!   `access_token`; carries the service-reported `error` or a generic message
//! - **`PlaybackQuery`** - the player endpoint answered non-2xx or with a body
//!   that does not validate as a playback state
//! - **`Network`** - transport-level failure of either call
//!
//! Neither client retries. The poller decides what a failure means.

use std::{fmt, time::Duration};

use reqwest::Client;

pub mod auth;
pub mod player;

pub use auth::TokenBroker;
pub use player::PlayerApi;

#[derive(Debug)]
pub enum SpotifyError {
    TokenRefresh(String),
    PlaybackQuery(String),
    Network(reqwest::Error),
}

impl fmt::Display for SpotifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpotifyError::TokenRefresh(msg) => write!(f, "token refresh failed: {}", msg),
            SpotifyError::PlaybackQuery(msg) => write!(f, "playback query failed: {}", msg),
            SpotifyError::Network(err) => write!(f, "network error: {}", err),
        }
    }
}

impl std::error::Error for SpotifyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SpotifyError::Network(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for SpotifyError {
    fn from(err: reqwest::Error) -> Self {
        SpotifyError::Network(err)
    }
}

/// Builds the HTTP client shared by the token broker and the player API.
///
/// The timeout bounds how long an in-flight cycle can outlive its tick.
pub fn http_client(timeout: Duration) -> Result<Client, SpotifyError> {
    Ok(Client::builder().timeout(timeout).build()?)
}
