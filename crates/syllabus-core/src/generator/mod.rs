//! Question generation backends (hosted chat-completion models).

pub mod chat;
pub mod mock;

use std::future::Future;
use std::pin::Pin;

use thiserror::Error;

pub use chat::ChatCompletionsClient;

/// Failure of the outbound model call.
///
/// The `Display` text is what the service puts in the answer field, so it
/// reads as a user-facing message.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Error connecting to AI service: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Error connecting to AI service: HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Error: No response from AI model.")]
    EmptyResponse,
    #[error("Error processing AI response: {0}")]
    Decode(String),
}

/// A model that turns a system message and a user prompt into free text.
pub trait QuestionGenerator: Send + Sync {
    /// Short name for logs (e.g. the model id).
    fn name(&self) -> &str;

    /// Run a single completion. No retries are attempted.
    fn generate<'a>(
        &'a self,
        system_message: &'a str,
        prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, GenerationError>> + Send + 'a>>;
}

/// Call `generator` and fold any failure into the answer text.
///
/// A failed call never affects stored syllabus state; the caller just gets
/// the error message back as the answer.
pub async fn generate_answer(
    generator: &dyn QuestionGenerator,
    system_message: &str,
    prompt: &str,
) -> String {
    match generator.generate(system_message, prompt).await {
        Ok(answer) => answer,
        Err(e) => {
            tracing::warn!(generator = generator.name(), error = %e, "question generation failed");
            e.to_string()
        }
    }
}
