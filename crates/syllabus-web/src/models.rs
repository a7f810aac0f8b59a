use serde::{Deserialize, Serialize};

// ── Requests ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct AskRequest {
    #[serde(default)]
    pub course_outcome: Option<String>,
    #[serde(default)]
    pub prompt: Option<String>,
}

// ── Responses ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_cos: Option<Vec<String>>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            available_cos: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageBody {
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CourseInfo {
    pub course_code: Option<String>,
    pub course_name: Option<String>,
    pub total_units: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub available_cos: Vec<String>,
    pub course_info: CourseInfo,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContextInfo {
    pub unit_id: String,
    pub topics_covered: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AskResponse {
    pub course_outcome: String,
    /// Title of the unit backing the course outcome.
    pub unit: String,
    pub question: String,
    pub answer: String,
    pub context_info: ContextInfo,
}
