//! Stop filter implementation.
//!
//! Removes tokens that are exactly one of a fixed set of strings, and
//! optionally tokens made only of whitespace.

use ahash::AHashSet;

use crate::analysis::token_filter::Filter;
use crate::special_tokens::SpecialTokenSet;

/// A filter that drops placeholder tokens.
#[derive(Clone, Debug, Default)]
pub struct StopFilter {
    stop_words: AHashSet<String>,
    remove_blank: bool,
}

impl StopFilter {
    /// Create a filter removing the given exact strings.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            stop_words: words.into_iter().map(Into::into).collect(),
            remove_blank: false,
        }
    }

    /// Also remove empty tokens and tokens made only of whitespace.
    pub fn remove_blank(mut self, remove: bool) -> Self {
        self.remove_blank = remove;
        self
    }

    fn is_stopped(&self, token: &str) -> bool {
        self.stop_words.contains(token)
            || (self.remove_blank && token.chars().all(char::is_whitespace))
    }
}

impl Filter for StopFilter {
    fn filter(&self, tokens: Vec<String>, protected: &SpecialTokenSet) -> Vec<String> {
        tokens
            .into_iter()
            .filter(|token| protected.contains(token) || !self.is_stopped(token))
            .collect()
    }

    fn name(&self) -> &'static str {
        "stop"
    }
}
