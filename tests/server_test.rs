use std::{net::SocketAddr, sync::Arc};

use serde_json::Value;
use spotnow::{
    server::router,
    types::{Observation, Playback, PlaybackState, Track, WidgetState},
};
use tokio::sync::watch;

async fn serve(observation: Observation) -> (SocketAddr, watch::Sender<Observation>) {
    let (tx, rx) = watch::channel(observation);
    let state = Arc::new(WidgetState {
        observations: rx,
        display_name: "L RMN".to_string(),
        refresh_secs: 1,
    });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router(state)).await.unwrap();
    });

    (addr, tx)
}

fn playing(name: &str) -> PlaybackState {
    PlaybackState::Playing(Playback {
        track: Track {
            name: name.to_string(),
            artist_name: "Artist".to_string(),
            album_name: "Album".to_string(),
            album_art_url: Some("https://i.scdn.co/image/cover".to_string()),
            external_url: Some("https://open.spotify.com/track/abc".to_string()),
            duration_ms: 200_000,
            is_advertisement: false,
        },
        progress_ms: 5_000,
        timestamp_ms: 0,
    })
}

#[tokio::test]
async fn test_health() {
    let (addr, _tx) = serve(Observation::default()).await;

    let body: Value = reqwest::get(format!("http://{}/health", addr))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(body["has_snapshot"], false);
}

#[tokio::test]
async fn test_now_playing_json_follows_slot() {
    let (addr, tx) = serve(Observation::default()).await;
    let url = format!("http://{}/api/now-playing", addr);

    let body: Value = reqwest::get(&url).await.unwrap().json().await.unwrap();
    assert_eq!(body["sequence"], 0);
    assert!(body["state"].is_null());

    tx.send_replace(Observation {
        sequence: 7,
        state: Some(playing("Song")),
    });

    let body: Value = reqwest::get(&url).await.unwrap().json().await.unwrap();
    assert_eq!(body["sequence"], 7);
    assert_eq!(body["state"]["status"], "playing");
    assert_eq!(body["state"]["track"]["name"], "Song");
    assert_eq!(body["state"]["progress_ms"], 5000);
}

#[tokio::test]
async fn test_widget_page() {
    let (addr, tx) = serve(Observation::default()).await;
    let url = format!("http://{}/", addr);

    let html = reqwest::get(&url).await.unwrap().text().await.unwrap();
    assert!(html.contains("<title>Listening to: Not listening to anything</title>"));
    assert!(html.contains("Not listening to anything right now"));

    tx.send_replace(Observation {
        sequence: 1,
        state: Some(playing("Song")),
    });

    let html = reqwest::get(&url).await.unwrap().text().await.unwrap();
    assert!(html.contains("<title>Listening to: Song</title>"));
    assert!(html.contains("L RMN is currently listening to Song by Artist"));
    assert!(html.contains("<meta name=\"og:image\" content=\"https://i.scdn.co/image/cover\">"));
    assert!(html.contains("<p>3:20</p>"));
}
