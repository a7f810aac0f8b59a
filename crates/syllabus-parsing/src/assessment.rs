use once_cell::sync::Lazy;
use regex::Regex;

use syllabus_core::{AssessmentBreakdown, AssessmentComponent};

use crate::config::ParsingConfig;

/// The assessment table follows the correlation legend.
const SECTION_ANCHOR: &str = "Correlation Level";

static DEFAULT_BLOCK_RE: Lazy<Regex> = Lazy::new(|| block_regex(1).unwrap());
static BLANK_LINE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").unwrap());
static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w+\b").unwrap());
static INT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d+\b").unwrap());
static TOTAL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"Total Marks\s+(\d+)").unwrap());

/// `Assessment` line, `skip_lines` skipped lines, the components line, and
/// one more skipped line. The values start where the match ends.
pub(crate) fn block_regex(skip_lines: usize) -> Result<Regex, regex::Error> {
    Regex::new(&format!(
        r"(?s)Assessment\s*\n{}(.*?)\n.*?\n",
        ".*?\n".repeat(skip_lines)
    ))
}

/// Parse the assessment weighting block with the default layout.
pub fn extract_assessment(text: &str) -> Option<AssessmentBreakdown> {
    extract_assessment_with_config(text, &ParsingConfig::default())
}

/// Config-aware version of [`extract_assessment`].
pub(crate) fn extract_assessment_with_config(
    text: &str,
    config: &ParsingConfig,
) -> Option<AssessmentBreakdown> {
    let block_re = config.assessment_re.as_ref().unwrap_or(&DEFAULT_BLOCK_RE);

    let start = text.find(SECTION_ANCHOR)?;
    let section = &text[start..];
    let caps = block_re.captures(section)?;
    let components_line = caps.get(1)?.as_str();
    let rest = &section[caps.get(0)?.end()..];
    let values_span = match BLANK_LINE_RE.find(rest) {
        Some(m) => &rest[..m.start()],
        None => rest,
    };

    // Surplus names or values on either side are dropped.
    let components: Vec<AssessmentComponent> = WORD_RE
        .find_iter(components_line)
        .zip(INT_RE.find_iter(values_span))
        .filter_map(|(name, value)| {
            Some(AssessmentComponent {
                component: name.as_str().to_string(),
                marks: value.as_str().parse().ok()?,
            })
        })
        .collect();

    tracing::debug!(components = components.len(), "parsed assessment block");
    if components.is_empty() {
        return None;
    }

    let total_marks = TOTAL_RE
        .captures(values_span)
        .and_then(|c| c[1].parse().ok());
    Some(AssessmentBreakdown {
        components,
        total_marks,
    })
}
