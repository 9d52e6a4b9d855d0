use spotnow::config::parse_millis;
use spotnow::types::{Playback, PlaybackState, Track};
use spotnow::utils::*;

// Helper function to create a test track
fn create_test_track(duration_ms: u64) -> Track {
    Track {
        name: "Song".to_string(),
        artist_name: "Artist".to_string(),
        album_name: "Album".to_string(),
        album_art_url: None,
        external_url: None,
        duration_ms,
        is_advertisement: false,
    }
}

// Helper function to create a test playback snapshot
fn create_test_playback(duration_ms: u64, progress_ms: u64, timestamp_ms: i64) -> Playback {
    Playback {
        track: create_test_track(duration_ms),
        progress_ms,
        timestamp_ms,
    }
}

#[test]
fn test_format_duration() {
    assert_eq!(format_duration(0), "0:00");
    assert_eq!(format_duration(999), "0:00");
    assert_eq!(format_duration(5_000), "0:05");
    assert_eq!(format_duration(65_000), "1:05");
    assert_eq!(format_duration(200_000), "3:20");
    assert_eq!(format_duration(599_999), "9:59");

    // Minutes are not wrapped into hours
    assert_eq!(format_duration(3_725_000), "62:05");
}

#[test]
fn test_estimated_progress_playing_advances() {
    let state = PlaybackState::Playing(create_test_playback(200_000, 5_000, 1_000));

    assert_eq!(estimated_progress_ms(&state, 1_000), Some(5_000));
    assert_eq!(estimated_progress_ms(&state, 3_500), Some(7_500));

    // A clock behind the snapshot does not move the playhead backwards
    assert_eq!(estimated_progress_ms(&state, 0), Some(5_000));
}

#[test]
fn test_estimated_progress_paused_is_frozen() {
    let state = PlaybackState::Paused(create_test_playback(200_000, 5_000, 1_000));

    assert_eq!(estimated_progress_ms(&state, 60_000), Some(5_000));
}

#[test]
fn test_estimated_progress_empty() {
    assert_eq!(estimated_progress_ms(&PlaybackState::Empty, 1_000), None);
}

#[test]
fn test_progress_fraction() {
    let state = PlaybackState::Playing(create_test_playback(200_000, 50_000, 0));
    assert_eq!(progress_fraction(&state, 0), 0.25);
    assert_eq!(progress_fraction(&state, 50_000), 0.5);
}

#[test]
fn test_progress_fraction_is_clamped() {
    let state = PlaybackState::Playing(create_test_playback(200_000, 190_000, 0));
    assert_eq!(progress_fraction(&state, 60_000), 1.0);

    let zero_length = PlaybackState::Playing(create_test_playback(0, 1_000, 0));
    assert_eq!(progress_fraction(&zero_length, 0), 0.0);

    assert_eq!(progress_fraction(&PlaybackState::Empty, 0), 0.0);
}

#[test]
fn test_now_ms_is_recent() {
    // 2020-01-01T00:00:00Z
    assert!(now_ms() > 1_577_836_800_000);
}

#[test]
fn test_parse_millis() {
    assert_eq!(parse_millis(Some("250".to_string()), 1000), 250);
    assert_eq!(parse_millis(Some(" 2000 ".to_string()), 1000), 2000);
    assert_eq!(parse_millis(Some("0".to_string()), 1000), 1000);
    assert_eq!(parse_millis(Some("fast".to_string()), 1000), 1000);
    assert_eq!(parse_millis(None, 1000), 1000);
}
