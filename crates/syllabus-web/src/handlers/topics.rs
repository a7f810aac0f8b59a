use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::sync::Arc;

use crate::handlers::{error_response, query_error_response};
use crate::state::AppState;

pub async fn co_topics(
    State(state): State<Arc<AppState>>,
    Path(co_code): Path<String>,
) -> Response {
    let Some(syllabus) = state.store.snapshot() else {
        return error_response(StatusCode::NOT_FOUND, "No syllabus loaded");
    };

    match syllabus.co_topics(&co_code) {
        Ok(topics) => Json(topics).into_response(),
        Err(e) => query_error_response(e),
    }
}
