//! Subword tokenizers: the second pipeline stage.
//!
//! # Available Tokenizers
//!
//! - [`wordpiece::WordpieceTokenizer`] - Greedy longest match with `##` continuation pieces
//! - [`character::CharacterTokenizer`] - One piece per character
//! - [`sentencepiece::SentencepieceTokenizer`] - Subword model pieces with digit/comma regrouping
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use wakachi::subword::SubwordTokenizer;
//! use wakachi::subword::wordpiece::WordpieceTokenizer;
//! use wakachi::vocab::Vocabulary;
//!
//! let vocab = Vocabulary::from_pieces(["[UNK]", "今日", "##も"]).unwrap();
//! let tokenizer = WordpieceTokenizer::new(Arc::new(vocab), "[UNK]");
//! assert_eq!(tokenizer.tokenize("今日も").unwrap(), vec!["今日", "##も"]);
//! ```

use crate::error::Result;
use crate::vocab::Vocabulary;

pub mod character;
pub mod sentencepiece;
pub mod wordpiece;

/// Trait for second-stage subword tokenizers.
pub trait SubwordTokenizer: Send + Sync {
    /// Split `text` into vocabulary pieces.
    fn tokenize(&self, text: &str) -> Result<Vec<String>>;

    /// The piece vocabulary, ids in model order.
    fn vocabulary(&self) -> &Vocabulary;

    /// Number of pieces the tokenizer can produce.
    fn piece_count(&self) -> usize {
        self.vocabulary().len()
    }

    /// Get the name of this tokenizer.
    fn name(&self) -> &'static str;
}
