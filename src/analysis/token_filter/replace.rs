//! Character replacement filter.

use crate::analysis::token_filter::Filter;
use crate::special_tokens::SpecialTokenSet;

/// Replaces every occurrence of one character inside each token.
#[derive(Clone, Debug)]
pub struct CharReplaceFilter {
    from: char,
    to: char,
}

impl CharReplaceFilter {
    pub fn new(from: char, to: char) -> Self {
        Self { from, to }
    }
}

impl Filter for CharReplaceFilter {
    fn filter(&self, tokens: Vec<String>, protected: &SpecialTokenSet) -> Vec<String> {
        tokens
            .into_iter()
            .map(|token| {
                if protected.contains(&token) || !token.contains(self.from) {
                    token
                } else {
                    token.replace(self.from, self.to.encode_utf8(&mut [0; 4]))
                }
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "char_replace"
    }
}
