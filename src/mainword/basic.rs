//! Rule-based word tokenizer.
//!
//! Splits on whitespace, then splits punctuation into separate tokens.
//! Punctuation is every Unicode `P*` character plus the ASCII symbol
//! ranges (`$`, `+`, `^` and the like). CJK ideographs are not separated.
//! When lower-casing is enabled, accents are stripped too. Members of the
//! never-split set pass through whole.

use regex::Regex;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::analysis::char_filter::CharFilter;
use crate::analysis::char_filter::unicode_normalize::{
    NormalizationForm, UnicodeNormalizationCharFilter,
};
use crate::error::{Result, WakachiError};
use crate::mainword::MainWordTokenizer;
use crate::special_tokens::SpecialTokenSet;

const PUNCTUATION: &str = r"[\p{P}\x21-\x2F\x3A-\x40\x5B-\x60\x7B-\x7E]";

/// Whitespace and punctuation tokenizer.
#[derive(Clone, Debug)]
pub struct BasicTokenizer {
    do_lower_case: bool,
    nfc: UnicodeNormalizationCharFilter,
    punctuation: Regex,
}

impl BasicTokenizer {
    pub fn new(do_lower_case: bool) -> Result<Self> {
        let punctuation = Regex::new(PUNCTUATION).map_err(|e| {
            WakachiError::invalid_configuration(format!("Invalid punctuation pattern: {e}"))
        })?;
        Ok(Self {
            do_lower_case,
            nfc: UnicodeNormalizationCharFilter::new(NormalizationForm::NFC),
            punctuation,
        })
    }

    fn clean_text(text: &str) -> String {
        text.chars()
            .filter_map(|c| {
                if c == '\0' || c == '\u{fffd}' {
                    None
                } else if c.is_whitespace() {
                    Some(' ')
                } else if c.is_control() {
                    None
                } else {
                    Some(c)
                }
            })
            .collect()
    }

    fn strip_accents(text: &str) -> String {
        text.nfd().filter(|c| !is_combining_mark(*c)).collect()
    }

    /// Every punctuation character becomes its own token.
    fn split_on_punctuation(&self, word: &str, tokens: &mut Vec<String>) {
        let mut last = 0;
        for found in self.punctuation.find_iter(word) {
            if found.start() > last {
                tokens.push(word[last..found.start()].to_string());
            }
            tokens.push(found.as_str().to_string());
            last = found.end();
        }
        if last < word.len() {
            tokens.push(word[last..].to_string());
        }
    }
}

impl MainWordTokenizer for BasicTokenizer {
    fn tokenize(&self, text: &str, never_split: &SpecialTokenSet) -> Result<Vec<String>> {
        let text = Self::clean_text(&self.nfc.filter(text));

        let mut tokens = Vec::new();
        for word in text.split_whitespace() {
            if never_split.contains(word) {
                tokens.push(word.to_string());
                continue;
            }
            if self.do_lower_case {
                let folded = Self::strip_accents(&word.to_lowercase());
                self.split_on_punctuation(&folded, &mut tokens);
            } else {
                self.split_on_punctuation(word, &mut tokens);
            }
        }

        Ok(tokens)
    }

    fn name(&self) -> &'static str {
        "basic"
    }
}
