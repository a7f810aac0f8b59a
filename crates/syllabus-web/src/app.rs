use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;

use crate::handlers;
use crate::state::AppState;

pub fn router(state: Arc<AppState>, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/upload-pdf", post(handlers::upload::upload))
        .route("/ask-question", post(handlers::ask::ask))
        .route("/get-syllabus-info", get(handlers::info::syllabus_info))
        .route("/get-co-topics/{co_code}", get(handlers::topics::co_topics))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
