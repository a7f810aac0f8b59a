use std::path::Path;

use syllabus_core::PdfBackend;
use thiserror::Error;

pub mod assessment;
pub mod config;
pub mod correlation;
pub mod extractor;
pub mod metadata;
pub mod normalize;
pub mod periods;
pub mod references;
pub mod units;

pub use assessment::extract_assessment;
pub use config::{DEFAULT_UNIT_TERMINAL_ANCHORS, ListOverride, ParsingConfig, ParsingConfigBuilder};
pub use correlation::extract_correlation_table;
pub use extractor::SyllabusExtractor;
pub use metadata::extract_metadata;
pub use normalize::normalize;
pub use periods::extract_total_periods;
pub use references::extract_references;
pub use units::extract_units;
// Re-export domain types from core (canonical definitions live there)
pub use syllabus_core::{Syllabus, SyllabusDocument};

#[derive(Error, Debug)]
pub enum ParsingError {
    #[error(transparent)]
    Backend(#[from] syllabus_core::BackendError),
    #[error("invalid extractor pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// Assemble a syllabus from already-extracted text with the default
/// configuration.
///
/// Pipeline:
/// 1. Normalize line endings, ligatures and non-breaking spaces
/// 2. Run the metadata, unit, reference, correlation, assessment and
///    period extractors over the same text
/// 3. Derive the CO→Unit index from the units
pub fn assemble(text: &str) -> Syllabus {
    SyllabusExtractor::new().assemble(text)
}

/// Extract text from a PDF file using `backend` and assemble the syllabus.
pub fn extract_syllabus(pdf_path: &Path, backend: &dyn PdfBackend) -> Result<Syllabus, ParsingError> {
    SyllabusExtractor::new().extract_via_backend(pdf_path, backend)
}
