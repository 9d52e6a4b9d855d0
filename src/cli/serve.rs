use std::sync::Arc;

use crate::{config, error, info, server, success, types::WidgetState};

/// Starts the poller and serves the widget until Ctrl-C.
pub async fn serve(interval: Option<std::time::Duration>) {
    let poller = super::build_poller(interval);

    let period = poller.interval();
    let state = Arc::new(WidgetState {
        observations: poller.subscribe(),
        display_name: config::display_name(),
        refresh_secs: period.as_millis().div_ceil(1000).max(1) as u64,
    });

    info!("Polling Spotify every {} ms", period.as_millis());
    poller.start();

    let shutdown = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    if let Err(e) = server::start_api_server(state, shutdown).await {
        poller.stop();
        error!("Widget server failed. Err: {}", e);
    }

    poller.stop();
    success!("Stopped polling.");
}
