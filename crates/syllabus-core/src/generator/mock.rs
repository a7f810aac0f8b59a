//! Mock question generator for testing.

use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{GenerationError, QuestionGenerator};

/// A configurable response for [`MockGenerator`].
#[derive(Clone, Debug)]
pub enum MockReply {
    /// Return this text as the answer.
    Answer(String),
    /// Simulate a model returning no choices.
    Empty,
    /// Simulate an HTTP error status.
    Status(u16),
}

/// A hand-rolled mock implementing [`QuestionGenerator`] for tests.
///
/// Records the last system message and prompt it was called with.
pub struct MockGenerator {
    reply: MockReply,
    last_call: Mutex<Option<(String, String)>>,
    call_count: AtomicUsize,
}

impl MockGenerator {
    pub fn new(reply: MockReply) -> Self {
        Self {
            reply,
            last_call: Mutex::new(None),
            call_count: AtomicUsize::new(0),
        }
    }

    pub fn answering(text: impl Into<String>) -> Self {
        Self::new(MockReply::Answer(text.into()))
    }

    /// How many times `generate()` has been called.
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// `(system_message, prompt)` of the most recent call.
    pub fn last_call(&self) -> Option<(String, String)> {
        self.last_call.lock().ok().and_then(|c| c.clone())
    }
}

impl QuestionGenerator for MockGenerator {
    fn name(&self) -> &str {
        "mock"
    }

    fn generate<'a>(
        &'a self,
        system_message: &'a str,
        prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, GenerationError>> + Send + 'a>> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_call.lock() {
            *last = Some((system_message.to_string(), prompt.to_string()));
        }
        let reply = self.reply.clone();

        Box::pin(async move {
            match reply {
                MockReply::Answer(text) => Ok(text),
                MockReply::Empty => Err(GenerationError::EmptyResponse),
                MockReply::Status(status) => Err(GenerationError::Status {
                    status,
                    body: String::new(),
                }),
            }
        })
    }
}
