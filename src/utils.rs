use chrono::Utc;

use crate::types::PlaybackState;

/// Current wall-clock time in milliseconds since the epoch.
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Formats a duration as `m:ss`. Minutes are not wrapped into hours.
pub fn format_duration(duration_ms: u64) -> String {
    let minutes = duration_ms / 60_000;
    let seconds = (duration_ms % 60_000) / 1000;
    format!("{}:{:02}", minutes, seconds)
}

/// Position of the playhead at `now_ms`, extrapolated from the snapshot.
///
/// A paused snapshot does not advance. Returns `None` when nothing is playing.
pub fn estimated_progress_ms(state: &PlaybackState, now_ms: i64) -> Option<u64> {
    let playback = state.playback()?;
    if !state.is_playing() {
        return Some(playback.progress_ms);
    }

    let elapsed = (now_ms - playback.timestamp_ms).max(0) as u64;
    Some(playback.progress_ms.saturating_add(elapsed))
}

/// Fraction of the track already played at `now_ms`, clamped to `[0, 1]`.
///
/// Returns `0.0` when nothing is playing or the track has no duration.
pub fn progress_fraction(state: &PlaybackState, now_ms: i64) -> f64 {
    let (Some(track), Some(progress)) = (state.track(), estimated_progress_ms(state, now_ms))
    else {
        return 0.0;
    };

    if track.duration_ms == 0 {
        return 0.0;
    }

    (progress as f64 / track.duration_ms as f64).clamp(0.0, 1.0)
}
