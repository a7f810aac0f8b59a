use std::collections::BTreeMap;

use serde::Serialize;

pub mod backend;
pub mod bloom;
pub mod config_file;
pub mod context;
pub mod generator;
pub mod index;
pub mod query;
pub mod store;
pub mod topics;

// Re-export for convenience
pub use backend::{BackendError, PdfBackend};
pub use bloom::BloomLevel;
pub use config_file::{ConfigError, ConfigFile, ServiceConfig};
pub use context::{CoContext, build_question_prompt, build_system_message};
pub use generator::{ChatCompletionsClient, GenerationError, QuestionGenerator, generate_answer};
pub use index::{CoIndex, CoIndexEntry, render_topic_text};
pub use query::{CoTopics, QueryError, QuestionContext, SyllabusSummary, UnitSummary, normalize_co_code};
pub use store::SyllabusStore;
pub use topics::TopicMap;

/// Lecture/tutorial/practical/credit allocation from the "Periods/Week" row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PeriodAllocation {
    pub lecture: u32,
    pub tutorial: u32,
    pub practical: u32,
    pub credits: u32,
}

/// Marks split from the "Maximum Marks" row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MarksDistribution {
    pub continuous_assessment: u32,
    pub end_semester_exam: u32,
    pub total_marks: u32,
}

/// A course outcome as listed in the syllabus header, e.g. `CO1 ... K2`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseOutcome {
    pub code: String,
    pub description: String,
    /// Raw Bloom code as written (`K1`..`K6`). See [`BloomLevel::from_code`].
    pub blooms_level: String,
}

/// Course-level fields. Every field is independently optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CourseMetadata {
    pub course_name: Option<String>,
    pub course_code: Option<String>,
    pub semester: Option<String>,
    pub department: Option<String>,
    pub programme: Option<String>,
    pub prerequisite: Option<String>,
    pub periods: Option<PeriodAllocation>,
    pub marks_distribution: Option<MarksDistribution>,
    pub course_outcomes: Vec<CourseOutcome>,
}

/// One syllabus unit block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Unit {
    pub unit_id: String,
    pub title: String,
    pub periods: u32,
    pub topics: TopicMap,
    pub course_outcome: Option<String>,
}

/// Period totals from the "Lecture Periods ... Total Periods" footer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PeriodSummary {
    pub lecture_periods: Option<u32>,
    pub tutorial_periods: Option<u32>,
    pub practical_periods: Option<u32>,
    pub total_periods: Option<u32>,
}

/// Text books, reference books and web references, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReferenceSet {
    pub text_books: Vec<String>,
    pub reference_books: Vec<String>,
    pub web_references: Vec<String>,
}

/// Correlation strength labels used by the CO/PO/PSO table.
pub const CORRELATION_SCALE: [(&str, &str); 3] = [("1", "Low"), ("2", "Medium"), ("3", "High")];

/// Positional correlation values for one outcome family (`PO` or `PSO`).
///
/// Serializes as an ordered map `{"PO1": 3, "PO2": null, ...}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutcomeColumns {
    prefix: &'static str,
    values: Vec<Option<u8>>,
}

impl OutcomeColumns {
    pub fn new(prefix: &'static str, values: Vec<Option<u8>>) -> Self {
        Self { prefix, values }
    }

    /// Value for a column key such as `"PO3"`; `None` when unset or unknown.
    pub fn get(&self, key: &str) -> Option<u8> {
        let n: usize = key.strip_prefix(self.prefix)?.parse().ok()?;
        self.values.get(n.checked_sub(1)?).copied().flatten()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (String, Option<u8>)> + '_ {
        self.values
            .iter()
            .enumerate()
            .map(|(i, v)| (format!("{}{}", self.prefix, i + 1), *v))
    }
}

impl Serialize for OutcomeColumns {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/// One row of the CO/PO/PSO table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CorrelationRow {
    pub co: String,
    pub pos: OutcomeColumns,
    pub psos: OutcomeColumns,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CorrelationTable {
    pub scale: BTreeMap<String, String>,
    pub mapping: Vec<CorrelationRow>,
}

impl CorrelationTable {
    pub fn new(mapping: Vec<CorrelationRow>) -> Self {
        let scale = CORRELATION_SCALE
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self { scale, mapping }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssessmentComponent {
    pub component: String,
    pub marks: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssessmentBreakdown {
    pub components: Vec<AssessmentComponent>,
    pub total_marks: Option<u32>,
}

/// The assembled syllabus record. Built once per upload, never patched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyllabusDocument {
    pub metadata: CourseMetadata,
    pub total_units: usize,
    /// Periods of the first unit, if any.
    pub unit_periods: Option<u32>,
    pub units: Vec<Unit>,
    pub total_periods: Option<PeriodSummary>,
    pub assessment: Option<AssessmentBreakdown>,
    pub references: ReferenceSet,
    pub correlation_table: Option<CorrelationTable>,
}

/// A document together with the CO→Unit index derived from its units.
///
/// The index is only ever built here, so the two cannot drift apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Syllabus {
    document: SyllabusDocument,
    index: CoIndex,
}

impl Syllabus {
    pub fn new(document: SyllabusDocument) -> Self {
        let index = CoIndex::build(&document.units);
        Self { document, index }
    }

    pub fn document(&self) -> &SyllabusDocument {
        &self.document
    }

    pub fn index(&self) -> &CoIndex {
        &self.index
    }

    /// The unit an index entry was built from.
    pub fn unit_for(&self, entry: &CoIndexEntry) -> &Unit {
        &self.document.units[entry.unit_position()]
    }

    pub fn into_document(self) -> SyllabusDocument {
        self.document
    }
}
