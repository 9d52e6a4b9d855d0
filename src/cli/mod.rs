//! # CLI Module
//!
//! User-facing commands of spotnow. Each command builds a
//! [`PlaybackPoller`] from the environment configuration and consumes its
//! observation slot in a different way:
//!
//! - [`serve`] - Polls continuously and serves the widget over HTTP
//! - [`watch`] - Polls continuously and prints a line whenever the displayed
//!   track or the play/pause state changes
//! - [`now`] - Runs a single poll cycle and prints the snapshot as a table
//!
//! ## Usage Patterns
//!
//! ```bash
//! spotnow serve                    # widget on http://127.0.0.1:8080
//! spotnow --interval 2000 serve    # poll every two seconds
//! spotnow watch                    # follow playback in the terminal
//! spotnow now                      # one-shot lookup
//! ```
//!
//! ## Error Handling
//!
//! Setup failures (HTTP client, server bind) terminate with `error!`. Failed
//! poll cycles only print a warning; the last snapshot stays on display until
//! a later cycle succeeds.

use std::time::Duration;

use crate::{error, management::PlaybackPoller};

mod now;
mod serve;
mod watch;

pub use now::now;
pub use serve::serve;
pub use watch::watch;

fn build_poller(interval: Option<Duration>) -> PlaybackPoller {
    let poller = match PlaybackPoller::from_config() {
        Ok(p) => p,
        Err(e) => error!("Cannot create Spotify client. Err: {}", e),
    };

    match interval {
        Some(period) if !period.is_zero() => poller.with_interval(period),
        _ => poller,
    }
}
