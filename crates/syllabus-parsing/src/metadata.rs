use once_cell::sync::Lazy;
use regex::Regex;

use syllabus_core::{CourseMetadata, CourseOutcome, MarksDistribution, PeriodAllocation};

/// Any labeled header field. A single-line value stops at the next one.
static FIELD_ANCHOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:Course\s+Name|Course\s+Code|Semester|Department|Programme|Periods/Week|Maximum\s+Marks|Prerequisites?|Course\s+Outcomes)\b",
    )
    .unwrap()
});

/// Extract course-level fields. Each field is independently optional.
pub fn extract_metadata(text: &str) -> CourseMetadata {
    let metadata = CourseMetadata {
        course_name: extract_course_name(text),
        course_code: extract_course_code(text),
        semester: extract_semester(text),
        department: extract_department(text),
        programme: extract_programme(text),
        prerequisite: extract_prerequisite(text),
        periods: extract_periods(text),
        marks_distribution: extract_marks(text),
        course_outcomes: extract_course_outcomes(text),
    };
    tracing::debug!(
        course_code = metadata.course_code.as_deref().unwrap_or("-"),
        has_name = metadata.course_name.is_some(),
        has_periods = metadata.periods.is_some(),
        has_marks = metadata.marks_distribution.is_some(),
        outcomes = metadata.course_outcomes.len(),
        "extracted course metadata"
    );
    metadata
}

fn extract_course_name(text: &str) -> Option<String> {
    static RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bCourse\s+Name[\s:]*").unwrap());
    // Credits or period counts often share the line with the name.
    static NUMERIC_TAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s\d").unwrap());

    let value = line_field(text, &RE)?;
    let cut = NUMERIC_TAIL_RE
        .find(&value)
        .map_or(value.len(), |m| m.start());
    non_empty(&value[..cut])
}

fn extract_course_code(text: &str) -> Option<String> {
    static RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"Course Code[\s:]+([^\s:]\S*)").unwrap());
    RE.captures(text).map(|c| c[1].to_string())
}

fn extract_semester(text: &str) -> Option<String> {
    static RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"Semester[\s:]+([IVX\d]+)\b").unwrap());
    RE.captures(text).map(|c| c[1].to_string())
}

fn extract_department(text: &str) -> Option<String> {
    static RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bDepartment[\s:]+").unwrap());
    line_field(text, &RE)
}

fn extract_programme(text: &str) -> Option<String> {
    static RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bProgramme[\s:]+").unwrap());
    line_field(text, &RE)
}

/// The prerequisite may wrap over several lines; it runs until the course
/// outcomes block (or the next labeled field).
fn extract_prerequisite(text: &str) -> Option<String> {
    static RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bPrerequisites?[\s:]+").unwrap());
    static END_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"(?i)Course\s+Outcomes|On\s+completion").unwrap());

    let start = RE.find(text)?.end();
    let rest = &text[start..];
    let end = [END_RE.find(rest), FIELD_ANCHOR_RE.find(rest)]
        .into_iter()
        .flatten()
        .map(|m| m.start())
        .min()
        .unwrap_or_else(|| rest.find('\n').unwrap_or(rest.len()));
    non_empty(&collapse_whitespace(&rest[..end]))
}

/// `Periods/Week L T P C` header followed by four integers on the next line.
fn extract_periods(text: &str) -> Option<PeriodAllocation> {
    static RE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(
            r"Periods/Week\s+L\s+T\s+P\s+C\b[^\n]*\n[ \t]*(\d+)[ \t]+(\d+)[ \t]+(\d+)[ \t]+(\d+)",
        )
        .unwrap()
    });
    let caps = RE.captures(text)?;
    Some(PeriodAllocation {
        lecture: caps[1].parse().ok()?,
        tutorial: caps[2].parse().ok()?,
        practical: caps[3].parse().ok()?,
        credits: caps[4].parse().ok()?,
    })
}

/// `Maximum Marks` header, then CA / ESE / total after the period row.
///
/// The row is the first line with digits among the two that follow the
/// period row (the other one holds the labels). Anything but three integers
/// there leaves the field unset.
fn extract_marks(text: &str) -> Option<MarksDistribution> {
    static ANCHOR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"Maximum Marks").unwrap());
    static ROW_RE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"^(?:.*\s)?(\d+)[ \t]+(\d+)[ \t]+(\d+)[ \t]*$").unwrap()
    });

    let anchor = ANCHOR_RE.find(text)?;
    let row = text[anchor.end()..]
        .lines()
        // rest of the anchor line, then the period row
        .skip(2)
        .take(2)
        .find(|line| line.bytes().any(|b| b.is_ascii_digit()))?;
    let caps = ROW_RE.captures(row)?;
    Some(MarksDistribution {
        continuous_assessment: caps[1].parse().ok()?,
        end_semester_exam: caps[2].parse().ok()?,
        total_marks: caps[3].parse().ok()?,
    })
}

/// `COn <description> Kn` triples between "Course Outcomes" and the first unit.
fn extract_course_outcomes(text: &str) -> Vec<CourseOutcome> {
    static CO_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"(?s)\b(CO\d+)\s+(.*?)\s+(K[1-6])\b").unwrap());

    let Some(start) = text.find("Course Outcomes") else {
        return Vec::new();
    };
    let section = &text[start..];
    let section = match section.find("UNIT") {
        Some(end) => &section[..end],
        None => section,
    };

    CO_RE
        .captures_iter(section)
        .map(|caps| CourseOutcome {
            code: caps[1].to_string(),
            description: collapse_whitespace(&caps[2]),
            blooms_level: caps[3].to_string(),
        })
        .collect()
}

/// Rest of the line after `anchor`, cut at the next labeled field.
fn line_field(text: &str, anchor: &Regex) -> Option<String> {
    let start = anchor.find(text)?.end();
    let rest = &text[start..];
    let line = rest.split('\n').next().unwrap_or_default();
    let end = FIELD_ANCHOR_RE.find(line).map_or(line.len(), |m| m.start());
    non_empty(&line[..end])
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

pub(crate) fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "\
Department Computer Science and Engineering Programme: B.Tech
Semester III Course Code 23CS301
Course Name Data Structures 3 0 0 3
Prerequisite Programming in C,
basic discrete mathematics
Periods/Week L T P C Maximum Marks
3 0 0 3
CAM ESE TM
25 75 100
Course Outcomes
On completion of the course, the students will be able to
CO1 Explain the basic concepts of
linear data structures K2
CO2 Apply stacks and queues to solve problems K3
CO3 Analyze tree traversal algorithms K4
UNIT-I INTRODUCTION Periods: 9
";

    #[test]
    fn test_scenario_code_and_name() {
        let meta = extract_metadata("Course Code ABC101\nCourse Name Data Structures\n...");
        assert_eq!(meta.course_code.as_deref(), Some("ABC101"));
        assert_eq!(meta.course_name.as_deref(), Some("Data Structures"));
    }

    #[test]
    fn test_header_fields() {
        let meta = extract_metadata(HEADER);
        assert_eq!(meta.course_name.as_deref(), Some("Data Structures"));
        assert_eq!(meta.course_code.as_deref(), Some("23CS301"));
        assert_eq!(meta.semester.as_deref(), Some("III"));
        assert_eq!(
            meta.department.as_deref(),
            Some("Computer Science and Engineering")
        );
        assert_eq!(meta.programme.as_deref(), Some("B.Tech"));
        assert_eq!(
            meta.prerequisite.as_deref(),
            Some("Programming in C, basic discrete mathematics")
        );
    }

    #[test]
    fn test_periods_and_marks() {
        let meta = extract_metadata(HEADER);
        assert_eq!(
            meta.periods,
            Some(PeriodAllocation {
                lecture: 3,
                tutorial: 0,
                practical: 0,
                credits: 3
            })
        );
        assert_eq!(
            meta.marks_distribution,
            Some(MarksDistribution {
                continuous_assessment: 25,
                end_semester_exam: 75,
                total_marks: 100
            })
        );
    }

    #[test]
    fn test_malformed_period_row_is_unset() {
        let meta = extract_metadata("Periods/Week L T P C\n3 0 x 3\n");
        assert!(meta.periods.is_none());
    }

    #[test]
    fn test_period_row_split_across_lines_is_unset() {
        let meta = extract_metadata("Periods/Week L T P C\n3 0\n0 3\n");
        assert!(meta.periods.is_none());

        let meta = extract_metadata("Periods/Week L T P C\n3 1 0 4\n");
        assert_eq!(meta.periods.map(|p| p.credits), Some(4));
    }

    #[test]
    fn test_malformed_marks_row_is_unset() {
        // The mapping table further down must not be mistaken for the marks.
        let text = HEADER.replace("25 75 100", "25 75 -")
            + "COs/POs/PSOs Mapping\n1 3 2 1 - 2\n";
        let meta = extract_metadata(&text);
        assert!(meta.marks_distribution.is_none());
        assert!(meta.periods.is_some());
    }

    #[test]
    fn test_marks_without_label_line_gap() {
        let meta = extract_metadata("Periods/Week L T P C Maximum Marks\n3 0 0 3\nCAM ESE TM 40 60 100\n");
        assert_eq!(
            meta.marks_distribution,
            Some(MarksDistribution {
                continuous_assessment: 40,
                end_semester_exam: 60,
                total_marks: 100
            })
        );
    }

    #[test]
    fn test_course_outcomes() {
        let cos = extract_metadata(HEADER).course_outcomes;
        assert_eq!(cos.len(), 3);
        assert_eq!(cos[0].code, "CO1");
        assert_eq!(
            cos[0].description,
            "Explain the basic concepts of linear data structures"
        );
        assert_eq!(cos[0].blooms_level, "K2");
        assert_eq!(cos[2].code, "CO3");
        assert_eq!(cos[2].blooms_level, "K4");
    }

    #[test]
    fn test_course_outcomes_stop_at_first_unit() {
        let text = "Course Outcomes\nCO1 Define terms K1\nUNIT-I Intro Periods: 9\nTopics: CO2 Misc K3\n";
        let cos = extract_metadata(text).course_outcomes;
        assert_eq!(cos.len(), 1);
        assert_eq!(cos[0].code, "CO1");
    }

    #[test]
    fn test_missing_everything() {
        let meta = extract_metadata("lorem ipsum dolor sit amet");
        assert_eq!(meta, CourseMetadata::default());
    }
}
