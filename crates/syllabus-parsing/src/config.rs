use regex::Regex;

/// Anchors that end a unit's content span (besides the next unit header).
pub const DEFAULT_UNIT_TERMINAL_ANCHORS: &[&str] = &[
    "COs/POs/PSOs Mapping",
    "Text Books",
    "Reference Books",
    "Web References",
    "Lecture Periods",
];

/// Controls how a list of values is overridden from its defaults.
#[derive(Debug, Clone, Default)]
pub enum ListOverride<T> {
    /// Use the built-in defaults.
    #[default]
    Default,
    /// Completely replace the defaults with these values.
    Replace(Vec<T>),
    /// Append these values to the defaults.
    Extend(Vec<T>),
}

impl<T: Clone> ListOverride<T> {
    /// Resolve this override against the given defaults.
    pub fn resolve(&self, defaults: &[T]) -> Vec<T> {
        match self {
            ListOverride::Default => defaults.to_vec(),
            ListOverride::Replace(v) => v.clone(),
            ListOverride::Extend(v) => {
                let mut result = defaults.to_vec();
                result.extend(v.iter().cloned());
                result
            }
        }
    }
}

/// Tuning knobs for the syllabus extractors.
///
/// Regex fields are `Option<Regex>`; `None` means "use the built-in default".
/// Use [`ParsingConfigBuilder`] to construct with string patterns.
#[derive(Debug, Clone)]
pub struct ParsingConfig {
    // ── units.rs ──
    /// Compiled terminator for unit content spans, when the anchors differ
    /// from [`DEFAULT_UNIT_TERMINAL_ANCHORS`].
    pub(crate) unit_terminal_re: Option<Regex>,
    /// Delimiters between topic phrases inside a heading's body.
    pub(crate) topic_delimiter_re: Option<Regex>,
    /// Minimum length of a topic phrase, in characters (default: 2).
    pub(crate) min_topic_chars: usize,

    // ── assessment.rs ──
    /// Lines between the `Assessment` line and the components line (default: 1).
    pub(crate) assessment_skip_lines: usize,
    pub(crate) assessment_re: Option<Regex>,

    // ── correlation.rs ──
    pub(crate) po_count: usize,
    pub(crate) pso_count: usize,
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self {
            unit_terminal_re: None,
            topic_delimiter_re: None,
            min_topic_chars: 2,
            assessment_skip_lines: 1,
            assessment_re: None,
            po_count: 12,
            pso_count: 3,
        }
    }
}

impl ParsingConfig {
    pub fn min_topic_chars(&self) -> usize {
        self.min_topic_chars
    }

    pub fn assessment_skip_lines(&self) -> usize {
        self.assessment_skip_lines
    }

    pub fn po_count(&self) -> usize {
        self.po_count
    }

    pub fn pso_count(&self) -> usize {
        self.pso_count
    }
}

/// Builder for [`ParsingConfig`].
///
/// Accepts string patterns that are compiled to `Regex` in [`build()`](Self::build).
/// Fails fast with `regex::Error` if any pattern is invalid.
#[derive(Debug, Clone, Default)]
pub struct ParsingConfigBuilder {
    unit_terminal_anchors: ListOverride<String>,
    topic_delimiter_re: Option<String>,
    min_topic_chars: Option<usize>,
    assessment_skip_lines: Option<usize>,
    po_count: Option<usize>,
    pso_count: Option<usize>,
}

impl ParsingConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Unit terminal anchors ──

    pub fn set_unit_terminal_anchors(mut self, anchors: Vec<String>) -> Self {
        self.unit_terminal_anchors = ListOverride::Replace(anchors);
        self
    }

    pub fn add_unit_terminal_anchor(mut self, anchor: String) -> Self {
        match &mut self.unit_terminal_anchors {
            ListOverride::Extend(v) => v.push(anchor),
            _ => self.unit_terminal_anchors = ListOverride::Extend(vec![anchor]),
        }
        self
    }

    // ── Topics ──

    pub fn topic_delimiter_regex(mut self, pattern: &str) -> Self {
        self.topic_delimiter_re = Some(pattern.to_string());
        self
    }

    pub fn min_topic_chars(mut self, n: usize) -> Self {
        self.min_topic_chars = Some(n);
        self
    }

    // ── Tables ──

    pub fn assessment_skip_lines(mut self, n: usize) -> Self {
        self.assessment_skip_lines = Some(n);
        self
    }

    pub fn po_count(mut self, n: usize) -> Self {
        self.po_count = Some(n);
        self
    }

    pub fn pso_count(mut self, n: usize) -> Self {
        self.pso_count = Some(n);
        self
    }

    /// Compile all string patterns into regexes and produce a [`ParsingConfig`].
    pub fn build(self) -> Result<ParsingConfig, regex::Error> {
        let defaults = ParsingConfig::default();

        let unit_terminal_re = match self.unit_terminal_anchors {
            ListOverride::Default => None,
            anchors => {
                let defaults: Vec<String> = DEFAULT_UNIT_TERMINAL_ANCHORS
                    .iter()
                    .map(|s| s.to_string())
                    .collect();
                Some(crate::units::terminal_regex(&anchors.resolve(&defaults))?)
            }
        };

        let topic_delimiter_re = self
            .topic_delimiter_re
            .map(|p| Regex::new(&p))
            .transpose()?;

        let assessment_skip_lines = self
            .assessment_skip_lines
            .unwrap_or(defaults.assessment_skip_lines);
        let assessment_re = if assessment_skip_lines == defaults.assessment_skip_lines {
            None
        } else {
            Some(crate::assessment::block_regex(assessment_skip_lines)?)
        };

        Ok(ParsingConfig {
            unit_terminal_re,
            topic_delimiter_re,
            min_topic_chars: self.min_topic_chars.unwrap_or(defaults.min_topic_chars),
            assessment_skip_lines,
            assessment_re,
            po_count: self.po_count.unwrap_or(defaults.po_count),
            pso_count: self.pso_count.unwrap_or(defaults.pso_count),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ParsingConfig::default();
        assert_eq!(config.min_topic_chars(), 2);
        assert_eq!(config.assessment_skip_lines(), 1);
        assert_eq!(config.po_count(), 12);
        assert_eq!(config.pso_count(), 3);
        assert!(config.unit_terminal_re.is_none());
    }

    #[test]
    fn test_builder_basic() {
        let config = ParsingConfigBuilder::new()
            .min_topic_chars(3)
            .po_count(10)
            .pso_count(2)
            .build()
            .unwrap();
        assert_eq!(config.min_topic_chars(), 3);
        assert_eq!(config.po_count(), 10);
        assert_eq!(config.pso_count(), 2);
        assert!(config.assessment_re.is_none());
    }

    #[test]
    fn test_builder_compiles_overrides() {
        let config = ParsingConfigBuilder::new()
            .add_unit_terminal_anchor("Mode of Evaluation".to_string())
            .assessment_skip_lines(2)
            .topic_delimiter_regex(r"[,;\n]+")
            .build()
            .unwrap();
        let term = config.unit_terminal_re.unwrap();
        assert!(term.is_match("text books"));
        assert!(term.is_match("MODE OF EVALUATION"));
        assert!(config.assessment_re.is_some());
        assert!(config.topic_delimiter_re.is_some());
    }

    #[test]
    fn test_builder_invalid_regex() {
        let result = ParsingConfigBuilder::new()
            .topic_delimiter_regex(r"[invalid")
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_list_override_resolve() {
        let defaults = vec!["a".to_string(), "b".to_string()];

        let d: ListOverride<String> = ListOverride::Default;
        assert_eq!(d.resolve(&defaults), defaults);

        let r: ListOverride<String> = ListOverride::Replace(vec!["x".to_string()]);
        assert_eq!(r.resolve(&defaults), vec!["x".to_string()]);

        let e: ListOverride<String> = ListOverride::Extend(vec!["c".to_string()]);
        assert_eq!(
            e.resolve(&defaults),
            vec!["a".to_string(), "b".to_string(), "c".to_string()]
        );
    }
}
