use once_cell::sync::Lazy;
use regex::Regex;

use syllabus_core::{TopicMap, Unit};

use crate::config::{DEFAULT_UNIT_TERMINAL_ANCHORS, ParsingConfig};

/// Unit header: id, title, and the `Periods: N` declarator.
static UNIT_HEAD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)(UNIT\s*[-–\s]*[IVX\d]+)\b\s+(.*?)\s+Periods\s*[:–]\s*(\d+)").unwrap()
});

static DEFAULT_TERMINAL_RE: Lazy<Regex> = Lazy::new(|| {
    let anchors: Vec<String> = DEFAULT_UNIT_TERMINAL_ANCHORS
        .iter()
        .map(|s| s.to_string())
        .collect();
    terminal_regex(&anchors).unwrap()
});

static PERIOD_FOOTER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)Lecture Periods.*?Total Periods:\d+").unwrap());

/// A line that opens a new topic block, e.g. `LINKED LISTS:`.
static BLOCK_HEADING_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z][^a-z]*:").unwrap());

static CO_TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bCO\d+\b").unwrap());

static TOPIC_DELIMITER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[–—\-•\n.]+").unwrap());

static TRAILING_PUNCT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[,.:;]+$").unwrap());

/// Build the regex that ends a unit's content span: the next unit header or
/// any of `anchors` (matched literally, case-insensitive).
pub(crate) fn terminal_regex(anchors: &[String]) -> Result<Regex, regex::Error> {
    let mut alternatives = vec![r"UNIT\s*[-–\s]*[IVX\d]+\b".to_string()];
    alternatives.extend(anchors.iter().map(|a| regex::escape(a)));
    Regex::new(&format!("(?i){}", alternatives.join("|")))
}

/// Split the document into unit blocks with the default configuration.
pub fn extract_units(text: &str) -> Vec<Unit> {
    extract_units_with_config(text, &ParsingConfig::default())
}

/// Config-aware version of [`extract_units`].
pub(crate) fn extract_units_with_config(text: &str, config: &ParsingConfig) -> Vec<Unit> {
    let terminal_re = config
        .unit_terminal_re
        .as_ref()
        .unwrap_or(&DEFAULT_TERMINAL_RE);

    let mut units = Vec::new();
    let mut pos = 0;

    while let Some(caps) = UNIT_HEAD_RE.captures_at(text, pos) {
        let head_end = caps.get(0).map_or(pos, |m| m.end());
        let content_end = terminal_re
            .find_at(text, head_end)
            .map_or(text.len(), |m| m.start());

        let unit_id = caps[1].trim().to_string();
        let title = caps[2].trim().to_string();
        let Ok(periods) = caps[3].parse::<u32>() else {
            pos = head_end;
            continue;
        };

        let content = PERIOD_FOOTER_RE.replace_all(text[head_end..content_end].trim(), "");
        let topics = parse_topics(&content, config);
        let course_outcome = CO_TOKEN_RE.find(&content).map(|m| m.as_str().to_string());

        units.push(Unit {
            unit_id,
            title,
            periods,
            topics,
            course_outcome,
        });
        pos = content_end;
    }

    tracing::debug!(units = units.len(), "segmented units");
    units
}

/// Turn a unit's content span into an ordered heading → topics mapping.
fn parse_topics(content: &str, config: &ParsingConfig) -> TopicMap {
    let delimiter_re = config
        .topic_delimiter_re
        .as_ref()
        .unwrap_or(&TOPIC_DELIMITER_RE);

    let mut topics = TopicMap::new();
    for block in split_blocks(content) {
        let block = block.trim();
        let Some((heading, body)) = block.split_once(':') else {
            continue;
        };
        let body = CO_TOKEN_RE.replace_all(body, "");

        let items: Vec<String> = delimiter_re
            .split(body.trim())
            .filter_map(|raw| {
                let phrase = TRAILING_PUNCT_RE.replace(raw.trim(), "");
                let phrase = phrase.trim_end();
                let keep = !phrase.is_empty() && phrase.chars().count() >= config.min_topic_chars;
                keep.then(|| phrase.to_string())
            })
            .collect();

        if !items.is_empty() {
            topics.insert(heading.trim(), items);
        }
    }
    topics
}

/// Split at each newline whose next line starts a new heading. The heading
/// line stays at the start of its block.
fn split_blocks(content: &str) -> Vec<&str> {
    let mut blocks = Vec::new();
    let mut start = 0;
    for (i, _) in content.match_indices('\n') {
        if BLOCK_HEADING_RE.is_match(&content[i + 1..]) {
            blocks.push(&content[start..i]);
            start = i + 1;
        }
    }
    blocks.push(&content[start..]);
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParsingConfigBuilder;

    #[test]
    fn test_single_unit_block() {
        let units = extract_units("UNIT-I Introduction Periods: 9\nTopics: Arrays - Linked Lists - Stacks\nCO1");
        assert_eq!(units.len(), 1);
        let unit = &units[0];
        assert_eq!(unit.unit_id, "UNIT-I");
        assert_eq!(unit.title, "Introduction");
        assert_eq!(unit.periods, 9);
        assert_eq!(
            unit.topics.get("Topics").unwrap(),
            &["Arrays", "Linked Lists", "Stacks"]
        );
        assert_eq!(unit.topics.len(), 1);
        assert_eq!(unit.course_outcome.as_deref(), Some("CO1"));
    }

    #[test]
    fn test_multiple_units_and_headings() {
        let text = "\
UNIT I LINEAR STRUCTURES Periods: 9
Arrays: Representation – Operations. CO1
LINKED LISTS: Singly linked – Doubly linked • Circular
UNIT - II TREES Periods: 10
Binary Trees: Traversals – Expression trees CO2
Text Books
1. Weiss, Data Structures";
        let units = extract_units(text);
        assert_eq!(units.len(), 2);

        assert_eq!(units[0].unit_id, "UNIT I");
        assert_eq!(units[0].title, "LINEAR STRUCTURES");
        assert_eq!(
            units[0].topics.headings(),
            vec!["Arrays".to_string(), "LINKED LISTS".to_string()]
        );
        assert_eq!(
            units[0].topics.get("Arrays").unwrap(),
            &["Representation", "Operations"]
        );
        assert_eq!(
            units[0].topics.get("LINKED LISTS").unwrap(),
            &["Singly linked", "Doubly linked", "Circular"]
        );

        assert_eq!(units[1].unit_id, "UNIT - II");
        assert_eq!(units[1].periods, 10);
        assert_eq!(units[1].course_outcome.as_deref(), Some("CO2"));
        // The text-books section is not part of the last unit.
        assert!(units[1].topics.get("Binary Trees").is_some());
        assert_eq!(units[1].topics.len(), 1);
    }

    #[test]
    fn test_short_and_empty_phrases_dropped() {
        let units = extract_units("UNIT-III Misc Periods: 6\nTopics: A - - Graphs;\nEMPTY: -\n");
        let topics = &units[0].topics;
        assert_eq!(topics.get("Topics").unwrap(), &["Graphs"]);
        assert!(topics.get("EMPTY").is_none());
        assert!(units[0].course_outcome.is_none());
    }

    #[test]
    fn test_zero_min_chars_still_drops_empty_phrases() {
        let config = crate::config::ParsingConfigBuilder::new()
            .min_topic_chars(0)
            .build()
            .unwrap();
        let units =
            extract_units_with_config("UNIT-I Basics Periods: 6\nTopics: Arrays -- Stacks. CO1\n", &config);
        assert_eq!(units[0].topics.get("Topics").unwrap(), &["Arrays", "Stacks"]);
    }

    #[test]
    fn test_period_footer_stripped() {
        let config = ParsingConfigBuilder::new()
            .set_unit_terminal_anchors(vec!["Text Books".to_string()])
            .build()
            .unwrap();
        let text = "UNIT-V Graphs Periods: 9\nTopics: BFS - DFS\nLecture Periods: 45 Tutorial Periods: - Total Periods:45\nText Books";
        let units = extract_units_with_config(text, &config);
        assert_eq!(units[0].topics.get("Topics").unwrap(), &["BFS", "DFS"]);
        assert_eq!(units[0].topics.len(), 1);
    }

    #[test]
    fn test_header_without_periods_is_skipped() {
        assert!(extract_units("UNIT-I Introduction\nTopics: Arrays").is_empty());
    }

    #[test]
    fn test_split_blocks_keeps_heading() {
        let blocks = split_blocks("Intro: a\nSORTING: b\nnot a heading: c");
        assert_eq!(blocks, vec!["Intro: a", "SORTING: b\nnot a heading: c"]);
    }
}
