use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::sync::Arc;

use crate::handlers::error_response;
use crate::models::{CourseInfo, UploadResponse};
use crate::state::AppState;
use crate::upload::parse_multipart;

pub async fn upload(State(state): State<Arc<AppState>>, multipart: Multipart) -> Response {
    let pdf = match parse_multipart(multipart).await {
        Ok(pdf) => pdf,
        Err(msg) => return error_response(StatusCode::BAD_REQUEST, msg),
    };
    tracing::info!(filename = %pdf.filename, bytes = pdf.data.len(), "syllabus upload received");

    // MuPDF work is CPU-bound; keep it off the async workers.
    let worker = Arc::clone(&state);
    let result = tokio::task::spawn_blocking(move || {
        worker
            .extractor
            .extract_bytes_via_backend(&pdf.data, worker.backend.as_ref())
    })
    .await;

    let syllabus = match result {
        Ok(Ok(syllabus)) => syllabus,
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "syllabus extraction failed, keeping previous document");
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error processing PDF: {}", e),
            );
        }
        Err(e) => {
            tracing::error!(error = %e, "extraction task panicked");
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error processing PDF: {}", e),
            );
        }
    };

    let syllabus = state.store.publish(syllabus);
    let metadata = &syllabus.document().metadata;

    Json(UploadResponse {
        message: "Syllabus uploaded successfully".to_string(),
        available_cos: syllabus.available_cos(),
        course_info: CourseInfo {
            course_code: metadata.course_code.clone(),
            course_name: metadata.course_name.clone(),
            total_units: syllabus.document().total_units,
        },
    })
    .into_response()
}
