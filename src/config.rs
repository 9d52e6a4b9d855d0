//! Configuration management for the now-playing widget.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. Spotify credentials, endpoint overrides, server
//! settings and the poll cadence are all read from here.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults
//!
//! Unlike endpoint settings, the Spotify credentials have no meaningful default.
//! Missing credentials fall back to empty strings and surface as a token refresh
//! error on the first poll instead of aborting at startup.

use std::{env, path::PathBuf, time::Duration};

use crate::types::Credentials;

pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8080";
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_DISPLAY_NAME: &str = "Someone";

/// Loads environment variables from a `.env` file in the local data directory.
///
/// The function looks for the `.env` file in:
/// - Linux: `~/.local/share/spotnow/.env`
/// - macOS: `~/Library/Application Support/spotnow/.env`
/// - Windows: `%LOCALAPPDATA%/spotnow/.env`
///
/// A missing file is not an error, since every value can also come from the
/// process environment. Variables already set in the environment win over the
/// file.
///
/// # Errors
///
/// This function will return an error if:
/// - The parent directory cannot be created
/// - The `.env` file exists but cannot be read or parsed
pub async fn load_env() -> Result<(), String> {
    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

/// Location of the `.env` file read by [`load_env`].
pub fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotnow/.env");
    path
}

/// Returns the Spotify application client ID (`CLIENT_ID`), or an empty string.
pub fn client_id() -> String {
    env::var("CLIENT_ID").unwrap_or_default()
}

/// Returns the Spotify application client secret (`CLIENT_SECRET`), or an empty string.
///
/// # Security Note
///
/// The client secret should be kept confidential and never exposed in logs
/// or version control.
pub fn client_secret() -> String {
    env::var("CLIENT_SECRET").unwrap_or_default()
}

/// Returns the long-lived refresh token (`REFRESH_TOKEN`), or an empty string.
pub fn refresh_token() -> String {
    env::var("REFRESH_TOKEN").unwrap_or_default()
}

/// Bundles the three credential variables.
pub fn credentials() -> Credentials {
    Credentials {
        client_id: client_id(),
        client_secret: client_secret(),
        refresh_token: refresh_token(),
    }
}

/// Returns the Spotify OAuth token URL (`SPOTIFY_API_TOKEN_URL`).
///
/// # Example
///
/// ```
/// let token_url = spotify_apitoken_url(); // e.g., "https://accounts.spotify.com/api/token"
/// ```
pub fn spotify_apitoken_url() -> String {
    env::var("SPOTIFY_API_TOKEN_URL").unwrap_or_else(|_| DEFAULT_TOKEN_URL.to_string())
}

/// Returns the Spotify Web API base URL (`SPOTIFY_API_URL`).
///
/// # Example
///
/// ```
/// let api_url = spotify_apiurl(); // e.g., "https://api.spotify.com/v1"
/// ```
pub fn spotify_apiurl() -> String {
    env::var("SPOTIFY_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string())
}

/// Returns the address the widget server binds to (`SERVER_ADDRESS`).
pub fn server_addr() -> String {
    env::var("SERVER_ADDRESS").unwrap_or_else(|_| DEFAULT_SERVER_ADDRESS.to_string())
}

/// Returns the poll cadence (`POLL_INTERVAL_MS`).
///
/// Unparseable or zero values fall back to the default of one second.
pub fn poll_interval() -> Duration {
    Duration::from_millis(parse_millis(
        env::var("POLL_INTERVAL_MS").ok(),
        DEFAULT_POLL_INTERVAL_MS,
    ))
}

/// Returns the per-request timeout of the HTTP client (`REQUEST_TIMEOUT_MS`).
pub fn request_timeout() -> Duration {
    Duration::from_millis(parse_millis(
        env::var("REQUEST_TIMEOUT_MS").ok(),
        DEFAULT_REQUEST_TIMEOUT_MS,
    ))
}

/// Returns the name shown in the widget's social-preview metadata (`DISPLAY_NAME`).
pub fn display_name() -> String {
    env::var("DISPLAY_NAME")
        .ok()
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_DISPLAY_NAME.to_string())
}

pub fn parse_millis(value: Option<String>, default: u64) -> u64 {
    value
        .and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|ms| *ms > 0)
        .unwrap_or(default)
}
