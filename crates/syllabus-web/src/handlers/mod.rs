pub mod ask;
pub mod info;
pub mod topics;
pub mod upload;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use syllabus_core::QueryError;

use crate::models::ErrorBody;

pub(crate) fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorBody::new(message))).into_response()
}

/// Map a failed CO lookup to its HTTP response. Unknown codes get a 404
/// listing the codes that do exist.
pub(crate) fn query_error_response(err: QueryError) -> Response {
    let message = err.to_string();
    match err {
        QueryError::NoSyllabus | QueryError::InvalidCoCode(_) => {
            error_response(StatusCode::BAD_REQUEST, message)
        }
        QueryError::CoNotFound { available, .. } => (
            StatusCode::NOT_FOUND,
            Json(ErrorBody {
                error: message,
                available_cos: Some(available),
            }),
        )
            .into_response(),
    }
}
