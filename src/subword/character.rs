//! Character-level subword segmentation.
//!
//! Whitespace characters are skipped rather than mapped to the unknown
//! token, so tokenizing a text whole or word by word gives the same pieces.

use std::sync::Arc;

use crate::analysis::char_filter::CharFilter;
use crate::analysis::char_filter::unicode_normalize::UnicodeNormalizationCharFilter;
use crate::error::Result;
use crate::subword::SubwordTokenizer;
use crate::vocab::Vocabulary;

/// Emits every non-whitespace character as a piece, or the unknown token
/// when the character is not in the vocabulary.
#[derive(Debug, Clone)]
pub struct CharacterTokenizer {
    vocab: Arc<Vocabulary>,
    unk_token: String,
    normalizer: Option<UnicodeNormalizationCharFilter>,
}

impl CharacterTokenizer {
    pub fn new<S: Into<String>>(vocab: Arc<Vocabulary>, unk_token: S) -> Self {
        Self {
            vocab,
            unk_token: unk_token.into(),
            normalizer: Some(UnicodeNormalizationCharFilter::nfkc()),
        }
    }

    pub fn shared_vocabulary(&self) -> Arc<Vocabulary> {
        self.vocab.clone()
    }

    /// Turn the NFKC pass off.
    pub fn without_normalization(mut self) -> Self {
        self.normalizer = None;
        self
    }
}

impl SubwordTokenizer for CharacterTokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<String>> {
        let text = match &self.normalizer {
            Some(normalizer) => normalizer.filter(text),
            None => text.into(),
        };

        let mut buffer = [0; 4];
        Ok(text
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| {
                let piece: &str = c.encode_utf8(&mut buffer);
                if self.vocab.contains(piece) {
                    piece.to_string()
                } else {
                    self.unk_token.clone()
                }
            })
            .collect())
    }

    fn vocabulary(&self) -> &Vocabulary {
        &self.vocab
    }

    fn name(&self) -> &'static str {
        "character"
    }
}
