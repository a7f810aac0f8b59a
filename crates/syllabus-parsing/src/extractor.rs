use std::path::Path;

use syllabus_core::{
    AssessmentBreakdown, CorrelationTable, CourseMetadata, PdfBackend, PeriodSummary,
    ReferenceSet, Syllabus, SyllabusDocument, Unit,
};

use crate::config::ParsingConfig;
use crate::{assessment, correlation, metadata, normalize, periods, references, units};
use crate::ParsingError;

/// A configurable syllabus extraction pipeline.
///
/// Holds a [`ParsingConfig`] and exposes each extractor as a method. The
/// extractors are independent of each other and never fail; only text
/// extraction from the PDF itself can return an error.
pub struct SyllabusExtractor {
    config: ParsingConfig,
}

impl Default for SyllabusExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl SyllabusExtractor {
    /// Create an extractor with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParsingConfig::default(),
        }
    }

    /// Create an extractor with a custom configuration.
    pub fn with_config(config: ParsingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParsingConfig {
        &self.config
    }

    pub fn metadata(&self, text: &str) -> CourseMetadata {
        metadata::extract_metadata(text)
    }

    pub fn units(&self, text: &str) -> Vec<Unit> {
        units::extract_units_with_config(text, &self.config)
    }

    pub fn references(&self, text: &str) -> ReferenceSet {
        references::extract_references(text)
    }

    pub fn correlation_table(&self, text: &str) -> Option<CorrelationTable> {
        correlation::extract_correlation_table_with_config(text, &self.config)
    }

    pub fn assessment(&self, text: &str) -> Option<AssessmentBreakdown> {
        assessment::extract_assessment_with_config(text, &self.config)
    }

    pub fn total_periods(&self, text: &str) -> Option<PeriodSummary> {
        periods::extract_total_periods(text)
    }

    /// Run every extractor over `text` and assemble the document and its
    /// CO→Unit index.
    pub fn assemble(&self, text: &str) -> Syllabus {
        let text = normalize::normalize(text);

        let units = self.units(&text);
        let document = SyllabusDocument {
            metadata: self.metadata(&text),
            total_units: units.len(),
            unit_periods: units.first().map(|u| u.periods),
            units,
            total_periods: self.total_periods(&text),
            assessment: self.assessment(&text),
            references: self.references(&text),
            correlation_table: self.correlation_table(&text),
        };

        let syllabus = Syllabus::new(document);
        tracing::debug!(
            course_code = syllabus.document().metadata.course_code.as_deref().unwrap_or("-"),
            units = syllabus.document().total_units,
            outcomes = syllabus.document().metadata.course_outcomes.len(),
            indexed_cos = syllabus.index().len(),
            "assembled syllabus"
        );
        syllabus
    }

    /// Extract text from the PDF at `path` via `backend` and assemble it.
    pub fn extract_via_backend(
        &self,
        path: &Path,
        backend: &dyn PdfBackend,
    ) -> Result<Syllabus, ParsingError> {
        let text = backend.extract_text(path)?;
        Ok(self.assemble(&text))
    }

    /// Same as [`extract_via_backend`](Self::extract_via_backend) for an
    /// in-memory upload.
    pub fn extract_bytes_via_backend(
        &self,
        bytes: &[u8],
        backend: &dyn PdfBackend,
    ) -> Result<Syllabus, ParsingError> {
        let text = backend.extract_text_from_bytes(bytes)?;
        Ok(self.assemble(&text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_units() {
        let syllabus = SyllabusExtractor::new().assemble("Course Code XYZ9\nno units here");
        let doc = syllabus.document();
        assert_eq!(doc.total_units, 0);
        assert_eq!(doc.unit_periods, None);
        assert!(doc.units.is_empty());
        assert!(syllabus.index().is_empty());
        assert_eq!(doc.metadata.course_code.as_deref(), Some("XYZ9"));
    }

    #[test]
    fn test_unit_periods_from_first_unit() {
        let text = "UNIT-I A Periods: 8\nTopics: Alpha CO1\nUNIT-II B Periods: 12\nTopics: Beta CO2";
        let syllabus = SyllabusExtractor::new().assemble(text);
        assert_eq!(syllabus.document().total_units, 2);
        assert_eq!(syllabus.document().unit_periods, Some(8));
        assert_eq!(syllabus.available_cos(), vec!["CO1", "CO2"]);
    }

    #[test]
    fn test_normalizes_before_extracting() {
        let text = "UNIT-I Intro Periods: 9\r\nTopics: De\u{FB01}nitions - Notation\r\nCO1";
        let syllabus = SyllabusExtractor::new().assemble(text);
        let unit = &syllabus.document().units[0];
        assert_eq!(
            unit.topics.get("Topics").unwrap(),
            &["Definitions", "Notation"]
        );
    }
}
