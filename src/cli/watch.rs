use std::time::Duration;

use crate::{info, success, widget::status_line};

/// Follows playback in the terminal until Ctrl-C.
///
/// Only changes of the printed line are reported, not every tick.
pub async fn watch(interval: Option<Duration>) {
    let poller = super::build_poller(interval);
    let mut observations = poller.subscribe();

    info!(
        "Watching playback every {} ms. Press Ctrl-C to stop.",
        poller.interval().as_millis()
    );
    poller.start();

    let mut last_line: Option<String> = None;
    loop {
        tokio::select! {
            changed = observations.changed() => {
                if changed.is_err() {
                    break;
                }

                let line = status_line(observations.borrow_and_update().state.as_ref());
                if last_line.as_deref() != Some(line.as_str()) {
                    info!("{}", line);
                    last_line = Some(line);
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    poller.stop();
    success!("Stopped watching.");
}
