use once_cell::sync::Lazy;
use regex::Regex;

use syllabus_core::{CorrelationRow, CorrelationTable, OutcomeColumns};

use crate::config::ParsingConfig;

const MAPPING_ANCHOR: &str = "COs/POs/PSOs Mapping";

/// A blank line followed by a capitalized line ends the table.
static TABLE_END_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n\s*[A-Z]").unwrap());

static ROW_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d\s+").unwrap());

/// Parse the CO × (PO, PSO) correlation matrix with default column counts.
pub fn extract_correlation_table(text: &str) -> Option<CorrelationTable> {
    extract_correlation_table_with_config(text, &ParsingConfig::default())
}

/// Config-aware version of [`extract_correlation_table`].
pub(crate) fn extract_correlation_table_with_config(
    text: &str,
    config: &ParsingConfig,
) -> Option<CorrelationTable> {
    let start = text.find(MAPPING_ANCHOR)?;
    let section = &text[start..];
    let section = match TABLE_END_RE.find(section) {
        Some(m) => &section[..m.start()],
        None => section,
    };

    let rows: Vec<CorrelationRow> = section
        .lines()
        .map(str::trim)
        .filter(|line| ROW_RE.is_match(line))
        .map(|line| parse_row(line, config))
        .collect();

    tracing::debug!(rows = rows.len(), "parsed correlation table");
    if rows.is_empty() {
        return None;
    }
    Some(CorrelationTable::new(rows))
}

/// One `n v1 v2 ...` row. Values are taken by position; anything that is not
/// a correlation level (1-3) counts as no correlation.
fn parse_row(line: &str, config: &ParsingConfig) -> CorrelationRow {
    let mut tokens = line.split_whitespace();
    let ordinal = tokens.next().unwrap_or_default();
    let values: Vec<Option<u8>> = tokens.map(correlation_level).collect();

    let column = |i: usize| values.get(i).copied().flatten();
    let pos = (0..config.po_count).map(column).collect();
    let psos = (config.po_count..config.po_count + config.pso_count)
        .map(column)
        .collect();

    CorrelationRow {
        co: format!("CO{ordinal}"),
        pos: OutcomeColumns::new("PO", pos),
        psos: OutcomeColumns::new("PSO", psos),
    }
}

fn correlation_level(token: &str) -> Option<u8> {
    match token.parse::<u8>() {
        Ok(level @ 1..=3) => Some(level),
        _ => None,
    }
}
