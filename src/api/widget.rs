use std::sync::Arc;

use axum::{Extension, response::Html};

use crate::{types::WidgetState, utils, widget::render_page};

pub async fn widget(Extension(state): Extension<Arc<WidgetState>>) -> Html<String> {
    let observation = state.observations.borrow().clone();
    Html(render_page(
        observation.state.as_ref(),
        &state.display_name,
        state.refresh_secs,
        utils::now_ms(),
    ))
}
