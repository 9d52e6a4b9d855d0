use base64::{Engine, engine::general_purpose::STANDARD};
use reqwest::{Client, header::AUTHORIZATION};
use serde_json::Value;

use crate::{
    config,
    spotify::SpotifyError,
    types::{AccessToken, Credentials},
};

/// Message reported when the token endpoint gives no usable error of its own.
pub const TOKEN_FALLBACK_ERROR: &str = "Failed to get access token";

/// Exchanges the long-lived refresh token for a short-lived access token.
///
/// The broker holds no token state. Every call to [`TokenBroker::refresh`]
/// performs a full round trip to the token endpoint.
#[derive(Debug, Clone)]
pub struct TokenBroker {
    client: Client,
    token_url: String,
}

impl TokenBroker {
    pub fn new(client: Client, token_url: impl Into<String>) -> Self {
        TokenBroker {
            client,
            token_url: token_url.into(),
        }
    }

    pub fn from_config(client: Client) -> Self {
        Self::new(client, config::spotify_apitoken_url())
    }

    /// Requests a fresh access token using the "refresh_token" grant.
    ///
    /// The client ID and secret are sent as HTTP Basic credentials and the
    /// refresh token as a form-encoded body.
    ///
    /// # Errors
    ///
    /// - `SpotifyError::TokenRefresh` with the body's `error` field when the
    ///   endpoint answers non-2xx, or [`TOKEN_FALLBACK_ERROR`] if the body has
    ///   none. A 2xx body without `access_token` fails the same way.
    /// - `SpotifyError::Network` on transport failure.
    ///
    /// Empty credentials are sent as-is; the service rejects them.
    pub async fn refresh(&self, credentials: &Credentials) -> Result<AccessToken, SpotifyError> {
        let res = self
            .client
            .post(&self.token_url)
            .header(
                AUTHORIZATION,
                basic_auth_header(&credentials.client_id, &credentials.client_secret),
            )
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", credentials.refresh_token.as_str()),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.bytes().await?;
        let json: Option<Value> = serde_json::from_slice(&body).ok();

        if status.is_success() {
            return json
                .as_ref()
                .and_then(|j| j["access_token"].as_str())
                .map(AccessToken::new)
                .ok_or_else(|| SpotifyError::TokenRefresh(TOKEN_FALLBACK_ERROR.to_string()));
        }

        let message = json
            .as_ref()
            .and_then(|j| j["error"].as_str())
            .filter(|msg| !msg.is_empty())
            .unwrap_or(TOKEN_FALLBACK_ERROR);
        Err(SpotifyError::TokenRefresh(message.to_string()))
    }
}

/// Value of the `Authorization` header for the token request.
pub fn basic_auth_header(client_id: &str, client_secret: &str) -> String {
    let raw = format!("{}:{}", client_id, client_secret);
    format!("Basic {}", STANDARD.encode(raw))
}
