use axum::{Extension, Router, routing::get};
use std::{future::Future, net::SocketAddr, str::FromStr, sync::Arc};

use crate::{Res, api, config, success, types::WidgetState};

pub fn router(state: Arc<WidgetState>) -> Router {
    Router::new()
        .route("/", get(api::widget))
        .route("/api/now-playing", get(api::now_playing))
        .route("/health", get(api::health))
        .layer(Extension(state))
}

/// Serves the widget on `SERVER_ADDRESS` until `shutdown` resolves.
pub async fn start_api_server<F>(state: Arc<WidgetState>, shutdown: F) -> Res<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = SocketAddr::from_str(&config::server_addr())
        .map_err(|e| format!("Failed to parse server address: {}", e))?;

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    success!("Widget available at http://{}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}
