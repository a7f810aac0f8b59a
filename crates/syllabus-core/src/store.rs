//! Single-slot holder for the most recently uploaded syllabus.

use std::sync::Arc;

use arc_swap::ArcSwapOption;

use crate::Syllabus;
use crate::query::QueryError;

/// The current syllabus, replaced wholesale on each successful upload.
///
/// A [`Syllabus`] is fully assembled (document and index) before it is
/// published, and readers take an `Arc` snapshot, so a query never sees a
/// document from one upload paired with the index of another.
#[derive(Default)]
pub struct SyllabusStore {
    current: ArcSwapOption<Syllabus>,
}

impl SyllabusStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically replace the current syllabus.
    pub fn publish(&self, syllabus: Syllabus) -> Arc<Syllabus> {
        let syllabus = Arc::new(syllabus);
        self.current.store(Some(Arc::clone(&syllabus)));
        tracing::info!(
            course_code = syllabus.document().metadata.course_code.as_deref().unwrap_or("-"),
            units = syllabus.document().total_units,
            cos = syllabus.index().len(),
            "published syllabus"
        );
        syllabus
    }

    pub fn snapshot(&self) -> Option<Arc<Syllabus>> {
        self.current.load_full()
    }

    /// Like [`snapshot`](Self::snapshot) but reports the empty store as
    /// [`QueryError::NoSyllabus`].
    pub fn current(&self) -> Result<Arc<Syllabus>, QueryError> {
        self.snapshot().ok_or(QueryError::NoSyllabus)
    }

    pub fn is_loaded(&self) -> bool {
        self.current.load().is_some()
    }
}

impl std::fmt::Debug for SyllabusStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyllabusStore")
            .field("loaded", &self.is_loaded())
            .finish()
    }
}
