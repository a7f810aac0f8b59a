use std::sync::Arc;

use syllabus_core::{PdfBackend, QuestionGenerator, SyllabusStore};
use syllabus_parsing::SyllabusExtractor;

/// Shared application state accessible from all handlers.
pub struct AppState {
    /// The currently published syllabus, replaced wholesale on each upload.
    pub store: SyllabusStore,
    pub extractor: SyllabusExtractor,
    pub backend: Arc<dyn PdfBackend>,
    pub generator: Arc<dyn QuestionGenerator>,
}

impl AppState {
    pub fn new(backend: Arc<dyn PdfBackend>, generator: Arc<dyn QuestionGenerator>) -> Self {
        Self {
            store: SyllabusStore::new(),
            extractor: SyllabusExtractor::new(),
            backend,
            generator,
        }
    }
}
