use std::fmt;

use serde::Serialize;

/// Bloom's taxonomy tier, encoded in syllabi as `K1`..`K6`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum BloomLevel {
    #[default]
    Remember,
    Understand,
    Apply,
    Analyze,
    Evaluate,
    Create,
}

impl BloomLevel {
    pub const ALL: [BloomLevel; 6] = [
        BloomLevel::Remember,
        BloomLevel::Understand,
        BloomLevel::Apply,
        BloomLevel::Analyze,
        BloomLevel::Evaluate,
        BloomLevel::Create,
    ];

    /// Parse a `K1`..`K6` code. Anything else is `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "K1" => Some(Self::Remember),
            "K2" => Some(Self::Understand),
            "K3" => Some(Self::Apply),
            "K4" => Some(Self::Analyze),
            "K5" => Some(Self::Evaluate),
            "K6" => Some(Self::Create),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Remember => "K1",
            Self::Understand => "K2",
            Self::Apply => "K3",
            Self::Analyze => "K4",
            Self::Evaluate => "K5",
            Self::Create => "K6",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Remember => "Remember",
            Self::Understand => "Understand",
            Self::Apply => "Apply",
            Self::Analyze => "Analyze",
            Self::Evaluate => "Evaluate",
            Self::Create => "Create",
        }
    }
}

impl fmt::Display for BloomLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip() {
        for level in BloomLevel::ALL {
            assert_eq!(BloomLevel::from_code(level.code()), Some(level));
        }
    }

    #[test]
    fn test_unknown_codes() {
        assert_eq!(BloomLevel::from_code("K7"), None);
        assert_eq!(BloomLevel::from_code("k1"), None);
        assert_eq!(BloomLevel::from_code(""), None);
    }

    #[test]
    fn test_labels() {
        assert_eq!(BloomLevel::Analyze.to_string(), "Analyze");
        assert_eq!(BloomLevel::default(), BloomLevel::Remember);
    }
}
