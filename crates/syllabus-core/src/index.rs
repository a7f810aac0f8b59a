//! CO→Unit index: which unit's topics back each course outcome.

use crate::Unit;
use crate::topics::TopicMap;

/// One index entry, built from the unit that claims `course_outcome`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoIndexEntry {
    pub course_outcome: String,
    pub unit_id: String,
    pub unit_title: String,
    /// [`render_topic_text`] of the unit's topics, used verbatim as model context.
    pub topic_text: String,
    unit_position: usize,
}

impl CoIndexEntry {
    /// Position of the owning unit in `SyllabusDocument::units`.
    pub fn unit_position(&self) -> usize {
        self.unit_position
    }
}

/// Ordered CO code → entry mapping.
///
/// When two units claim the same CO, the later unit's data wins while the
/// code keeps the position of its first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoIndex {
    entries: Vec<CoIndexEntry>,
}

impl CoIndex {
    pub fn build(units: &[Unit]) -> Self {
        let mut entries: Vec<CoIndexEntry> = Vec::new();

        for (position, unit) in units.iter().enumerate() {
            let Some(code) = unit.course_outcome.as_ref() else {
                continue;
            };
            let topic_text = render_topic_text(&unit.topics);
            if topic_text.is_empty() {
                continue;
            }

            let entry = CoIndexEntry {
                course_outcome: code.clone(),
                unit_id: unit.unit_id.clone(),
                unit_title: unit.title.clone(),
                topic_text,
                unit_position: position,
            };

            match entries.iter_mut().find(|e| e.course_outcome == *code) {
                Some(existing) => {
                    tracing::debug!(
                        co = %code,
                        previous = %existing.unit_id,
                        replacement = %entry.unit_id,
                        "course outcome claimed by more than one unit, keeping the later unit"
                    );
                    *existing = entry;
                }
                None => entries.push(entry),
            }
        }

        Self { entries }
    }

    /// Exact-code lookup. Callers normalize input with [`crate::normalize_co_code`].
    pub fn get(&self, code: &str) -> Option<&CoIndexEntry> {
        self.entries.iter().find(|e| e.course_outcome == code)
    }

    pub fn codes(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|e| e.course_outcome.clone())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CoIndexEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Render a topic mapping as heading lines with indented phrases:
///
/// ```text
/// Heading:
///   - first topic
///   - second topic
/// ```
pub fn render_topic_text(topics: &TopicMap) -> String {
    let mut out = String::new();
    for (heading, items) in topics.iter() {
        out.push_str(heading);
        out.push_str(":\n");
        for item in items {
            out.push_str("  - ");
            out.push_str(item);
            out.push('\n');
        }
    }
    out
}
