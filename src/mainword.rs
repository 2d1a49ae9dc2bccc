//! Main-word tokenizers: the first pipeline stage.
//!
//! A main-word tokenizer turns raw text into an ordered sequence of words.
//! All variants share the same option handling: NFKC normalization of the
//! whole input when `normalize_text` is set, and per-token lower-casing when
//! `do_lower_case` is set. Tokens that exactly equal a member of the
//! never-split set keep their case.
//!
//! # Available Tokenizers
//!
//! - [`normalizer::NormalizerTokenizer`] - Normalization only, one token per call
//! - [`basic::BasicTokenizer`] - Whitespace and punctuation rules
//! - [`mecab::MecabTokenizer`] - MeCab-format dictionary segmentation
//! - [`juman::JumanTokenizer`] - Juman-style analysis with the quote/whitespace retry
//! - [`spacy_luw::SpacyLuwTokenizer`] - Statistical long-unit words
//! - [`sudachi::SudachiTokenizer`] - Selectable split granularity
//!
//! # Examples
//!
//! ```
//! use wakachi::mainword::MainWordTokenizer;
//! use wakachi::mainword::normalizer::NormalizerTokenizer;
//! use wakachi::mainword::WordOptions;
//! use wakachi::special_tokens::SpecialTokenSet;
//!
//! let tokenizer = NormalizerTokenizer::new(WordOptions::new(true, true));
//! let tokens = tokenizer.tokenize("ＡＢＣ", &SpecialTokenSet::new()).unwrap();
//! assert_eq!(tokens, vec!["abc"]);
//! ```

use std::borrow::Cow;

use log::{debug, warn};

use crate::analysis::char_filter::CharFilter;
use crate::analysis::char_filter::unicode_normalize::UnicodeNormalizationCharFilter;
use crate::analysis::token_filter::Filter;
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::config::{TokenizerConfig, WordTokenizerKind};
use crate::engine::{Engines, SudachiSettings};
use crate::error::Result;
use crate::special_tokens::SpecialTokenSet;

pub mod basic;
pub mod juman;
pub mod mecab;
pub mod normalizer;
pub mod spacy_luw;
pub mod sudachi;

/// Trait for first-stage word tokenizers.
pub trait MainWordTokenizer: Send + Sync {
    /// Split `text` into words.
    ///
    /// `never_split` holds strings exempt from case folding (and, for the
    /// rule-based tokenizer, from punctuation splitting).
    fn tokenize(&self, text: &str, never_split: &SpecialTokenSet) -> Result<Vec<String>>;

    /// Get the name of this tokenizer.
    fn name(&self) -> &'static str;
}

/// Normalization and case options shared by every main-word tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordOptions {
    pub do_lower_case: bool,
    pub normalize_text: bool,
}

impl Default for WordOptions {
    fn default() -> Self {
        Self {
            do_lower_case: false,
            normalize_text: true,
        }
    }
}

impl WordOptions {
    pub fn new(do_lower_case: bool, normalize_text: bool) -> Self {
        Self {
            do_lower_case,
            normalize_text,
        }
    }

    pub fn from_config(config: &TokenizerConfig) -> Self {
        Self::new(config.do_lower_case, config.normalize_text)
    }

    /// NFKC-normalize the input when enabled.
    pub fn normalize<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if self.normalize_text {
            UnicodeNormalizationCharFilter::nfkc().filter(text)
        } else {
            Cow::Borrowed(text)
        }
    }

    /// Lower-case unprotected tokens when enabled.
    pub fn fold_case(&self, tokens: Vec<String>, never_split: &SpecialTokenSet) -> Vec<String> {
        if self.do_lower_case {
            LowercaseFilter::new().filter(tokens, never_split)
        } else {
            tokens
        }
    }
}

/// Construct the word tokenizer selected by `config`.
///
/// Returns `None` when the word stage is disabled. Engines are resolved
/// here so a missing dependency fails at construction, not at tokenize time.
pub fn build_word_tokenizer(
    config: &TokenizerConfig,
    engines: &Engines,
) -> Result<Option<Box<dyn MainWordTokenizer>>> {
    let options = WordOptions::from_config(config);

    let tokenizer: Box<dyn MainWordTokenizer> = match config.word_tokenizer {
        WordTokenizerKind::Disabled => return Ok(None),
        WordTokenizerKind::Normalizer => Box::new(normalizer::NormalizerTokenizer::new(options)),
        WordTokenizerKind::Basic => {
            if config.normalize_text {
                warn!("normalize_text is ignored by the basic word tokenizer");
            }
            Box::new(basic::BasicTokenizer::new(config.do_lower_case)?)
        }
        WordTokenizerKind::Mecab => {
            let analyzer = engines.mecab(&config.engine)?;
            Box::new(mecab::MecabTokenizer::new(options, analyzer))
        }
        WordTokenizerKind::Juman => {
            let analyzer = engines.juman(&config.engine)?;
            Box::new(juman::JumanTokenizer::new(
                options,
                analyzer,
                config.ignore_max_byte_error,
            )?)
        }
        WordTokenizerKind::SpacyLuw => {
            let segmenter = engines.long_unit_segmenter()?;
            Box::new(spacy_luw::SpacyLuwTokenizer::new(options, segmenter))
        }
        WordTokenizerKind::Sudachi => {
            let segmenter = engines.split_segmenter(&SudachiSettings::from_options(&config.engine))?;
            Box::new(sudachi::SudachiTokenizer::new(
                options,
                segmenter,
                config.engine.sudachi_split_mode,
                config.engine.sudachi_word_form,
            ))
        }
    };

    debug!(
        "word tokenizer '{}' ({}) ready",
        config.word_tokenizer,
        tokenizer.name()
    );
    Ok(Some(tokenizer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WakachiError;

    #[test]
    fn test_disabled_builds_nothing() {
        let config = TokenizerConfig::new().with_word_tokenizer(WordTokenizerKind::Disabled);
        assert!(build_word_tokenizer(&config, &Engines::new()).unwrap().is_none());
    }

    #[test]
    fn test_build_normalizer_and_basic() {
        let config = TokenizerConfig::new().with_word_tokenizer(WordTokenizerKind::Normalizer);
        let tokenizer = build_word_tokenizer(&config, &Engines::new()).unwrap().unwrap();
        assert_eq!(tokenizer.name(), "normalizer");

        let config = TokenizerConfig::new();
        let tokenizer = build_word_tokenizer(&config, &Engines::new()).unwrap().unwrap();
        assert_eq!(tokenizer.name(), "basic");
    }

    #[test]
    fn test_missing_engine_fails_at_construction() {
        let config = TokenizerConfig::new().with_word_tokenizer(WordTokenizerKind::SpacyLuw);
        assert!(matches!(
            build_word_tokenizer(&config, &Engines::new()),
            Err(WakachiError::UnavailableEngine(_))
        ));

        let config = TokenizerConfig::new().with_word_tokenizer(WordTokenizerKind::Sudachi);
        assert!(matches!(
            build_word_tokenizer(&config, &Engines::new()),
            Err(WakachiError::UnavailableEngine(_))
        ));
    }

    #[test]
    fn test_fold_case_respects_never_split() {
        let options = WordOptions::new(true, false);
        let protected: SpecialTokenSet = ["[UNK]"].into_iter().collect();
        let tokens = vec!["[UNK]".to_string(), "ABC".to_string()];
        assert_eq!(options.fold_case(tokens, &protected), vec!["[UNK]", "abc"]);
    }
}
