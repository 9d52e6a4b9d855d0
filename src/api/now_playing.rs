use std::sync::Arc;

use axum::{Extension, response::Json};

use crate::types::{Observation, WidgetState};

pub async fn now_playing(Extension(state): Extension<Arc<WidgetState>>) -> Json<Observation> {
    Json(state.observations.borrow().clone())
}
