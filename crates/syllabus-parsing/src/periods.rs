use once_cell::sync::Lazy;
use regex::Regex;

use syllabus_core::PeriodSummary;

static LECTURE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Lecture Periods\s*[:–]\s*(\d+)").unwrap());
static TUTORIAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Tutorial Periods\s*[:–]\s*(\d+|[-–])").unwrap());
static PRACTICAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Practical Periods\s*[:–]\s*(\d+|[-–])").unwrap());
static TOTAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Total Periods\s*[:–]\s*(\d+)").unwrap());

/// Extract the `Lecture / Tutorial / Practical / Total Periods` footer.
///
/// A dash in place of the tutorial or practical count means zero. Returns
/// `None` when no label is present at all.
pub fn extract_total_periods(text: &str) -> Option<PeriodSummary> {
    let summary = PeriodSummary {
        lecture_periods: count(&LECTURE_RE, text),
        tutorial_periods: count(&TUTORIAL_RE, text),
        practical_periods: count(&PRACTICAL_RE, text),
        total_periods: count(&TOTAL_RE, text),
    };
    tracing::debug!(
        lecture = ?summary.lecture_periods,
        total = ?summary.total_periods,
        "extracted period footer"
    );
    (summary != PeriodSummary::default()).then_some(summary)
}

fn count(re: &Regex, text: &str) -> Option<u32> {
    let caps = re.captures(text)?;
    Some(caps[1].parse().unwrap_or(0))
}
