#![allow(dead_code)]

use std::{
    collections::VecDeque,
    net::SocketAddr,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use axum::{
    Router,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use reqwest::Client;
use serde_json::json;
use spotnow::{
    management::PlaybackPoller,
    spotify::{PlayerApi, TokenBroker},
    types::Credentials,
};

#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub body: String,
    pub delay: Duration,
}

impl MockResponse {
    pub fn json(status: u16, body: impl Into<String>) -> Self {
        MockResponse {
            status,
            body: body.into(),
            delay: Duration::ZERO,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecordedTokenRequest {
    pub authorization: String,
    pub content_type: String,
    pub body: String,
}

pub struct MockState {
    pub token_requests: AtomicUsize,
    pub playback_requests: AtomicUsize,
    pub token_response: Mutex<MockResponse>,
    pub playback_queue: Mutex<VecDeque<MockResponse>>,
    pub playback_default: Mutex<MockResponse>,
    pub last_token_request: Mutex<Option<RecordedTokenRequest>>,
    pub last_bearer: Mutex<Option<String>>,
}

impl Default for MockState {
    fn default() -> Self {
        MockState {
            token_requests: AtomicUsize::new(0),
            playback_requests: AtomicUsize::new(0),
            token_response: Mutex::new(MockResponse::json(200, r#"{"access_token":"T1"}"#)),
            playback_queue: Mutex::new(VecDeque::new()),
            playback_default: Mutex::new(MockResponse::json(204, "")),
            last_token_request: Mutex::new(None),
            last_bearer: Mutex::new(None),
        }
    }
}

/// In-process stand-in for the Spotify accounts and Web API endpoints.
pub struct MockSpotify {
    pub addr: SocketAddr,
    pub state: Arc<MockState>,
}

impl MockSpotify {
    pub async fn start() -> Self {
        let state = Arc::new(MockState::default());
        let app = Router::new()
            .route("/api/token", post(token))
            .route("/v1/me/player", get(player))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        MockSpotify { addr, state }
    }

    pub fn token_url(&self) -> String {
        format!("http://{}/api/token", self.addr)
    }

    pub fn api_url(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    pub fn broker(&self) -> TokenBroker {
        TokenBroker::new(Client::new(), self.token_url())
    }

    pub fn player(&self) -> PlayerApi {
        PlayerApi::new(Client::new(), self.api_url())
    }

    pub fn poller(&self, period: Duration) -> PlaybackPoller {
        PlaybackPoller::new(self.broker(), self.player(), credentials(), period)
    }

    pub fn set_token_response(&self, response: MockResponse) {
        *self.state.token_response.lock().unwrap() = response;
    }

    pub fn push_playback(&self, response: MockResponse) {
        self.state.playback_queue.lock().unwrap().push_back(response);
    }

    pub fn set_playback_default(&self, response: MockResponse) {
        *self.state.playback_default.lock().unwrap() = response;
    }

    pub fn token_requests(&self) -> usize {
        self.state.token_requests.load(Ordering::SeqCst)
    }

    pub fn playback_requests(&self) -> usize {
        self.state.playback_requests.load(Ordering::SeqCst)
    }

    pub fn last_token_request(&self) -> Option<RecordedTokenRequest> {
        self.state.last_token_request.lock().unwrap().clone()
    }

    pub fn last_bearer(&self) -> Option<String> {
        self.state.last_bearer.lock().unwrap().clone()
    }
}

pub fn credentials() -> Credentials {
    Credentials {
        client_id: "client".to_string(),
        client_secret: "secret".to_string(),
        refresh_token: "refresh-me".to_string(),
    }
}

pub fn playback_body(name: &str, is_playing: bool, progress_ms: u64, is_ad: bool) -> String {
    json!({
        "is_playing": is_playing,
        "progress_ms": progress_ms,
        "timestamp": 1_700_000_000_000_i64,
        "currently_playing_type": "track",
        "item": {
            "name": name,
            "artists": [{ "name": "Artist" }],
            "album": {
                "name": "Album",
                "images": [{ "url": "https://i.scdn.co/image/cover" }]
            },
            "external_urls": { "spotify": "https://open.spotify.com/track/abc" },
            "duration_ms": 200_000,
            "is_ad": is_ad
        }
    })
    .to_string()
}

async fn token(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    body: String,
) -> Response {
    state.token_requests.fetch_add(1, Ordering::SeqCst);

    let header_value = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string()
    };
    *state.last_token_request.lock().unwrap() = Some(RecordedTokenRequest {
        authorization: header_value(header::AUTHORIZATION),
        content_type: header_value(header::CONTENT_TYPE),
        body,
    });

    let response = state.token_response.lock().unwrap().clone();
    respond(response).await
}

async fn player(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    state.playback_requests.fetch_add(1, Ordering::SeqCst);

    *state.last_bearer.lock().unwrap() = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let queued = state.playback_queue.lock().unwrap().pop_front();
    let response = queued.unwrap_or_else(|| state.playback_default.lock().unwrap().clone());
    respond(response).await
}

async fn respond(response: MockResponse) -> Response {
    if !response.delay.is_zero() {
        tokio::time::sleep(response.delay).await;
    }

    let status = StatusCode::from_u16(response.status).unwrap();
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        response.body,
    )
        .into_response()
}

/// A poller pointing at a closed port, for tests that never poll.
pub fn poller_without_server() -> PlaybackPoller {
    PlaybackPoller::new(
        TokenBroker::new(Client::new(), "http://127.0.0.1:9/api/token"),
        PlayerApi::new(Client::new(), "http://127.0.0.1:9/v1"),
        credentials(),
        Duration::from_secs(60),
    )
}
