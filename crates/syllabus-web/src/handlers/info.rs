use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::sync::Arc;

use crate::models::MessageBody;
use crate::state::AppState;

pub async fn syllabus_info(State(state): State<Arc<AppState>>) -> Response {
    match state.store.snapshot() {
        Some(syllabus) => Json(syllabus.summary()).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(MessageBody {
                message: "No syllabus loaded".to_string(),
            }),
        )
            .into_response(),
    }
}
