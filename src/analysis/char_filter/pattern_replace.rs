use std::borrow::Cow;

use regex::{NoExpand, Regex};

use super::CharFilter;
use crate::error::{Result, WakachiError};

/// A char filter that replaces every match of a regex pattern with a literal string.
#[derive(Debug, Clone)]
pub struct PatternReplaceCharFilter {
    pattern: Regex,
    replacement: String,
}

impl PatternReplaceCharFilter {
    /// Create a new pattern replace char filter.
    pub fn new(pattern: &str, replacement: &str) -> Result<Self> {
        let pattern = Regex::new(pattern).map_err(|e| {
            WakachiError::invalid_configuration(format!("Invalid regex pattern: {e}"))
        })?;
        Ok(Self {
            pattern,
            replacement: replacement.to_string(),
        })
    }

    /// Whether the pattern occurs anywhere in `input`.
    pub fn is_match(&self, input: &str) -> bool {
        self.pattern.is_match(input)
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

impl CharFilter for PatternReplaceCharFilter {
    fn filter<'a>(&self, input: &'a str) -> Cow<'a, str> {
        self.pattern
            .replace_all(input, NoExpand(self.replacement.as_str()))
    }

    fn name(&self) -> &'static str {
        "pattern_replace"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_replace() {
        let filter = PatternReplaceCharFilter::new(r"(\d+)", "NUM").unwrap();
        assert_eq!(filter.filter("Year 2024"), "Year NUM");
    }

    #[test]
    fn test_replacement_is_literal() {
        let filter = PatternReplaceCharFilter::new(r"\d", "$1").unwrap();
        assert_eq!(filter.filter("a1"), "a$1");
    }

    #[test]
    fn test_anchored_pattern() {
        let filter = PatternReplaceCharFilter::new(r"^#", "＃").unwrap();
        assert_eq!(filter.filter("#tag #tag"), "＃tag #tag");
        assert!(matches!(filter.filter("no hash"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_whitespace_runs() {
        let filter = PatternReplaceCharFilter::new(r"\s+", "_").unwrap();
        assert_eq!(filter.filter("a  b\u{3000}c\td"), "a_b_c_d");
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(PatternReplaceCharFilter::new(r"(", "").is_err());
    }
}
