use std::io::Write;
use std::path::Path;

use thiserror::Error;

/// Failure of the PDF decoding collaborator. The only error that aborts
/// syllabus assembly.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("failed to open PDF: {0}")]
    OpenError(String),
    #[error("failed to extract text: {0}")]
    ExtractionError(String),
    #[error("not a PDF document")]
    NotPdf,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Trait for PDF text extraction backends.
///
/// Implementors decode the PDF and return the text of every page, in page
/// order, joined with `\n`. Everything after that (section detection, unit
/// segmentation, table parsing) lives in `syllabus_parsing`.
pub trait PdfBackend: Send + Sync {
    /// Extract the full text content of a PDF file.
    fn extract_text(&self, path: &Path) -> Result<String, BackendError>;

    /// Extract text from an in-memory upload.
    ///
    /// The bytes are spilled to a temporary file that is removed on return.
    fn extract_text_from_bytes(&self, data: &[u8]) -> Result<String, BackendError> {
        if !data.starts_with(b"%PDF-") {
            return Err(BackendError::NotPdf);
        }
        let mut file = tempfile::Builder::new().suffix(".pdf").tempfile()?;
        file.write_all(data)?;
        file.flush()?;
        self.extract_text(file.path())
    }
}
