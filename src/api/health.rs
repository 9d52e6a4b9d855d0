use std::sync::Arc;

use axum::{Extension, response::Json};
use serde_json::{Value, json};

use crate::types::WidgetState;

pub async fn health(Extension(state): Extension<Arc<WidgetState>>) -> Json<Value> {
    let observation = state.observations.borrow();
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "sequence": observation.sequence,
        "has_snapshot": observation.state.is_some()
    }))
}
