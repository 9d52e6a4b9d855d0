use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    error, info,
    types::{NowPlayingTableRow, PlaybackState},
    utils, warning,
    widget::status_label,
};

/// Runs one poll cycle and prints the result.
pub async fn now() {
    let poller = super::build_poller(None);

    let pb = ProgressBar::new_spinner();
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message("Fetching current playback...");
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );

    let result = poller.poll_once().await;
    pb.finish_and_clear();

    if let Err(e) = result {
        error!("Cannot fetch current playback. Err: {}", e);
    }

    match poller.current() {
        Some(PlaybackState::Empty) => info!("Not listening to anything right now."),
        Some(state) => println!("{}", Table::new(vec![table_row(&state)])),
        None => warning!("No playback state was published."),
    }
}

fn table_row(state: &PlaybackState) -> NowPlayingTableRow {
    let track = state.track();
    let progress = track
        .map(|t| {
            let elapsed = utils::estimated_progress_ms(state, utils::now_ms())
                .unwrap_or(0)
                .min(t.duration_ms);
            format!(
                "{} / {}",
                utils::format_duration(elapsed),
                utils::format_duration(t.duration_ms)
            )
        })
        .unwrap_or_default();

    NowPlayingTableRow {
        status: status_label(state).to_string(),
        track: track.map(|t| t.name.clone()).unwrap_or_default(),
        artist: track.map(|t| t.artist_name.clone()).unwrap_or_default(),
        album: track.map(|t| t.album_name.clone()).unwrap_or_default(),
        progress,
    }
}
