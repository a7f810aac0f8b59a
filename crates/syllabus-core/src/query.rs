//! Read-side operations the service exposes over an assembled syllabus.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;

use crate::context::{CoContext, build_question_prompt, build_system_message};
use crate::{Syllabus, TopicMap};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("No syllabus loaded. Please upload a PDF first.")]
    NoSyllabus,
    #[error("Invalid CO format '{0}'. Use format like 'CO1', 'CO2', etc.")]
    InvalidCoCode(String),
    #[error("CO '{code}' not found in syllabus.")]
    CoNotFound { code: String, available: Vec<String> },
}

/// Validate a user-supplied CO code and bring it to canonical `CO{n}` form.
///
/// Matching is case-insensitive: `"co1"` and `" CO1 "` both become `"CO1"`.
pub fn normalize_co_code(input: &str) -> Result<String, QueryError> {
    static RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^CO\d+$").unwrap());

    let trimmed = input.trim();
    if RE.is_match(trimmed) {
        Ok(trimmed.to_uppercase())
    } else {
        Err(QueryError::InvalidCoCode(input.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitSummary {
    pub unit_id: String,
    pub title: String,
    pub course_outcome: Option<String>,
    pub periods: u32,
}

/// Course header fields plus one line per unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyllabusSummary {
    pub course_code: Option<String>,
    pub course_name: Option<String>,
    pub department: Option<String>,
    pub semester: Option<String>,
    pub total_units: usize,
    pub available_cos: Vec<String>,
    pub units: Vec<UnitSummary>,
}

/// The unit topic mapping behind one course outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoTopics {
    pub course_outcome: String,
    pub unit_id: String,
    pub unit_title: String,
    pub topics: TopicMap,
    pub periods: u32,
}

/// Everything needed to call the question generator for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionContext {
    pub course_outcome: String,
    pub unit_id: String,
    pub unit_title: String,
    pub topics_covered: Vec<String>,
    pub context: CoContext,
    pub system_message: String,
    pub prompt: String,
}

impl Syllabus {
    /// CO codes present in the index, in index order.
    pub fn available_cos(&self) -> Vec<String> {
        self.index().codes()
    }

    pub fn summary(&self) -> SyllabusSummary {
        let doc = self.document();
        SyllabusSummary {
            course_code: doc.metadata.course_code.clone(),
            course_name: doc.metadata.course_name.clone(),
            department: doc.metadata.department.clone(),
            semester: doc.metadata.semester.clone(),
            total_units: doc.total_units,
            available_cos: self.available_cos(),
            units: doc
                .units
                .iter()
                .map(|u| UnitSummary {
                    unit_id: u.unit_id.clone(),
                    title: u.title.clone(),
                    course_outcome: u.course_outcome.clone(),
                    periods: u.periods,
                })
                .collect(),
        }
    }

    pub fn co_topics(&self, co_code: &str) -> Result<CoTopics, QueryError> {
        let code = normalize_co_code(co_code)?;
        let entry = self.index().get(&code).ok_or_else(|| self.not_found(&code))?;
        let unit = self.unit_for(entry);

        Ok(CoTopics {
            course_outcome: code,
            unit_id: entry.unit_id.clone(),
            unit_title: entry.unit_title.clone(),
            topics: unit.topics.clone(),
            periods: unit.periods,
        })
    }

    /// Resolve context for `co_code` and assemble the generator prompt around
    /// `user_prompt`.
    pub fn question_context(
        &self,
        co_code: &str,
        user_prompt: &str,
    ) -> Result<QuestionContext, QueryError> {
        let code = normalize_co_code(co_code)?;
        let entry = self.index().get(&code).ok_or_else(|| self.not_found(&code))?;
        let context = self
            .resolve_context(&code)
            .ok_or_else(|| self.not_found(&code))?;

        Ok(QuestionContext {
            unit_id: entry.unit_id.clone(),
            unit_title: entry.unit_title.clone(),
            topics_covered: self.unit_for(entry).topics.headings(),
            system_message: build_system_message(Some(&context.topics)),
            prompt: build_question_prompt(user_prompt),
            course_outcome: code,
            context,
        })
    }

    fn not_found(&self, code: &str) -> QueryError {
        QueryError::CoNotFound {
            code: code.to_string(),
            available: self.available_cos(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CourseMetadata, ReferenceSet, SyllabusDocument, Unit};

    fn sample() -> Syllabus {
        let mut topics = TopicMap::new();
        topics.insert("Topics", vec!["Arrays".into(), "Linked Lists".into()]);
        let units = vec![Unit {
            unit_id: "UNIT-I".into(),
            title: "Introduction".into(),
            periods: 9,
            topics,
            course_outcome: Some("CO1".into()),
        }];
        Syllabus::new(SyllabusDocument {
            metadata: CourseMetadata {
                course_code: Some("ABC101".into()),
                course_name: Some("Data Structures".into()),
                ..CourseMetadata::default()
            },
            total_units: 1,
            unit_periods: Some(9),
            units,
            total_periods: None,
            assessment: None,
            references: ReferenceSet::default(),
            correlation_table: None,
        })
    }

    #[test]
    fn test_normalize_co_code() {
        assert_eq!(normalize_co_code("co1").unwrap(), "CO1");
        assert_eq!(normalize_co_code(" Co12 ").unwrap(), "CO12");
        assert!(matches!(
            normalize_co_code("CO"),
            Err(QueryError::InvalidCoCode(_))
        ));
        assert!(normalize_co_code("unit1").is_err());
        assert!(normalize_co_code("CO1a").is_err());
    }

    #[test]
    fn test_co_topics_case_insensitive() {
        let s = sample();
        assert_eq!(s.co_topics("co1").unwrap(), s.co_topics("CO1").unwrap());
        assert_eq!(s.co_topics("co1").unwrap().unit_id, "UNIT-I");
    }

    #[test]
    fn test_co_topics_not_found_lists_codes() {
        let err = sample().co_topics("CO9").unwrap_err();
        assert_eq!(
            err,
            QueryError::CoNotFound {
                code: "CO9".into(),
                available: vec!["CO1".into()],
            }
        );
    }

    #[test]
    fn test_summary() {
        let summary = sample().summary();
        assert_eq!(summary.course_code.as_deref(), Some("ABC101"));
        assert_eq!(summary.total_units, 1);
        assert_eq!(summary.available_cos, vec!["CO1"]);
        assert_eq!(summary.units[0].course_outcome.as_deref(), Some("CO1"));
    }

    #[test]
    fn test_question_context() {
        let ctx = sample()
            .question_context("co1", "Generate 2 mark questions")
            .unwrap();
        assert_eq!(ctx.course_outcome, "CO1");
        assert_eq!(ctx.unit_title, "Introduction");
        assert_eq!(ctx.topics_covered, vec!["Topics"]);
        assert!(ctx.system_message.contains("  - Linked Lists"));
        assert!(ctx.prompt.contains("Generate 2 mark questions"));
    }
}
