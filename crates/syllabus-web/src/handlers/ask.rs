use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::sync::Arc;

use syllabus_core::generate_answer;

use crate::handlers::{error_response, query_error_response};
use crate::models::{AskRequest, AskResponse, ContextInfo};
use crate::state::AppState;

/// Treat absent and blank fields alike.
fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

pub async fn ask(
    State(state): State<Arc<AppState>>,
    body: Result<Json<AskRequest>, JsonRejection>,
) -> Response {
    // Snapshot once so a concurrent upload cannot swap the document mid-request.
    let syllabus = match state.store.current() {
        Ok(syllabus) => syllabus,
        Err(e) => return query_error_response(e),
    };

    let req = match body {
        Ok(Json(req)) => req,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "rejected ask body");
            return error_response(StatusCode::BAD_REQUEST, "No data provided");
        }
    };

    let Some(co_code) = required(req.course_outcome) else {
        return error_response(StatusCode::BAD_REQUEST, "course_outcome is required");
    };
    let Some(prompt) = required(req.prompt) else {
        return error_response(StatusCode::BAD_REQUEST, "prompt is required");
    };

    let context = match syllabus.question_context(&co_code, &prompt) {
        Ok(context) => context,
        Err(e) => return query_error_response(e),
    };

    tracing::info!(
        co = %context.course_outcome,
        unit = %context.unit_id,
        generator = state.generator.name(),
        "generating questions"
    );
    let answer =
        generate_answer(state.generator.as_ref(), &context.system_message, &context.prompt).await;

    Json(AskResponse {
        course_outcome: context.course_outcome,
        unit: context.unit_title,
        question: prompt,
        answer,
        context_info: ContextInfo {
            unit_id: context.unit_id,
            topics_covered: context.topics_covered,
        },
    })
    .into_response()
}
