//! Lowercase filter implementation.
//!
//! Case is pinned for protected tokens: a token whose text equals a member of
//! the never-split set is passed through even when lower-casing is enabled.

use crate::analysis::token_filter::Filter;
use crate::special_tokens::SpecialTokenSet;

/// A filter that converts non-protected tokens to lowercase.
///
/// Matching against the never-split set uses the token text as produced by
/// the engine, after normalization.
#[derive(Clone, Debug, Default)]
pub struct LowercaseFilter;

impl LowercaseFilter {
    /// Create a new lowercase filter.
    pub fn new() -> Self {
        LowercaseFilter
    }

    /// Lower-case a single token unless it is protected.
    pub fn apply(token: String, protected: &SpecialTokenSet) -> String {
        if protected.contains(&token) {
            token
        } else {
            token.to_lowercase()
        }
    }
}

impl Filter for LowercaseFilter {
    fn filter(&self, tokens: Vec<String>, protected: &SpecialTokenSet) -> Vec<String> {
        tokens
            .into_iter()
            .map(|token| Self::apply(token, protected))
            .collect()
    }

    fn name(&self) -> &'static str {
        "lowercase"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase_filter() {
        let filter = LowercaseFilter::new();
        let protected: SpecialTokenSet = ["[CLS]", "NASA"].into_iter().collect();
        let tokens = vec![
            "Hello".to_string(),
            "WORLD".to_string(),
            "[CLS]".to_string(),
            "NASA".to_string(),
            "Ｅｘａｍｐｌｅ".to_string(),
        ];

        let result = filter.filter(tokens, &protected);

        assert_eq!(result, vec!["hello", "world", "[CLS]", "NASA", "ｅｘａｍｐｌｅ"]);
    }

    #[test]
    fn test_protection_is_exact_match() {
        let protected: SpecialTokenSet = ["[MASK]"].into_iter().collect();
        assert_eq!(LowercaseFilter::apply("[MASK]x".to_string(), &protected), "[mask]x");
    }

    #[test]
    fn test_filter_name() {
        assert_eq!(LowercaseFilter::new().name(), "lowercase");
    }
}
