//! WordPiece subword segmentation.
//!
//! Each whitespace-separated word is split greedily into the longest
//! vocabulary prefix, then the longest `##`-prefixed continuation, until the
//! word is consumed. A word with no complete decomposition, or longer than
//! `max_input_chars_per_word` characters, becomes a single unknown token.

use std::sync::Arc;

use crate::error::Result;
use crate::subword::SubwordTokenizer;
use crate::vocab::Vocabulary;

/// The continuation prefix for WordPiece subwords.
pub const CONTINUATION_PREFIX: &str = "##";

/// Default word length limit, in characters.
pub const DEFAULT_MAX_INPUT_CHARS_PER_WORD: usize = 100;

/// Greedy longest-match-first tokenizer against a fixed vocabulary.
#[derive(Debug, Clone)]
pub struct WordpieceTokenizer {
    vocab: Arc<Vocabulary>,
    unk_token: String,
    max_input_chars_per_word: usize,
}

impl WordpieceTokenizer {
    pub fn new<S: Into<String>>(vocab: Arc<Vocabulary>, unk_token: S) -> Self {
        Self {
            vocab,
            unk_token: unk_token.into(),
            max_input_chars_per_word: DEFAULT_MAX_INPUT_CHARS_PER_WORD,
        }
    }

    pub fn with_max_input_chars_per_word(mut self, max: usize) -> Self {
        self.max_input_chars_per_word = max;
        self
    }

    pub fn shared_vocabulary(&self) -> Arc<Vocabulary> {
        self.vocab.clone()
    }

    /// Split one word, or `None` when some position matches no piece.
    fn split_word(&self, chars: &[char]) -> Option<Vec<String>> {
        let mut pieces = Vec::new();
        let mut start = 0;

        while start < chars.len() {
            let mut end = chars.len();
            let mut found = None;

            while start < end {
                let mut candidate: String = chars[start..end].iter().collect();
                if start > 0 {
                    candidate.insert_str(0, CONTINUATION_PREFIX);
                }
                if self.vocab.contains(&candidate) {
                    found = Some(candidate);
                    break;
                }
                end -= 1;
            }

            pieces.push(found?);
            start = end;
        }

        Some(pieces)
    }
}

impl SubwordTokenizer for WordpieceTokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<String>> {
        let mut output = Vec::new();

        for word in text.split_whitespace() {
            let chars: Vec<char> = word.chars().collect();
            if chars.len() > self.max_input_chars_per_word {
                output.push(self.unk_token.clone());
                continue;
            }
            match self.split_word(&chars) {
                Some(pieces) => output.extend(pieces),
                None => output.push(self.unk_token.clone()),
            }
        }

        Ok(output)
    }

    fn vocabulary(&self) -> &Vocabulary {
        &self.vocab
    }

    fn name(&self) -> &'static str {
        "wordpiece"
    }
}
