//! Two-stage tokenization pipeline.
//!
//! [`PipelineTokenizer`] runs the configured word tokenizer, then feeds each
//! word (or the space-joined words, when `do_subword_by_word` is off) to the
//! subword tokenizer. Special tokens are cut out of the input first and
//! never reach either stage.
//!
//! # Examples
//!
//! ```no_run
//! use wakachi::config::{TokenizerConfig, WordTokenizerKind};
//! use wakachi::engine::Engines;
//! use wakachi::pipeline::PipelineTokenizer;
//! use wakachi::special_tokens::SpecialTokens;
//!
//! let config = TokenizerConfig::new()
//!     .with_vocab_file("vocab.txt")
//!     .with_word_tokenizer(WordTokenizerKind::Normalizer);
//! let tokenizer = PipelineTokenizer::new(config, SpecialTokens::default(), &Engines::new()).unwrap();
//!
//! let tokens = tokenizer.tokenize("[CLS] 今日も晴れです [SEP]").unwrap();
//! let ids = tokenizer.convert_tokens_to_ids(&tokens).unwrap();
//! ```

use std::sync::Arc;

use log::{debug, warn};
use rayon::prelude::*;
use regex::Regex;

use crate::config::{SubwordTokenizerKind, TokenizerConfig};
use crate::engine::{Engines, PieceModel};
use crate::error::{Result, WakachiError};
use crate::mainword::{MainWordTokenizer, build_word_tokenizer};
use crate::pretrained::LoadedSubword;
use crate::special_tokens::{SpecialTokenSet, SpecialTokens};
use crate::subword::SubwordTokenizer;
use crate::subword::character::CharacterTokenizer;
use crate::subword::sentencepiece::SentencepieceTokenizer;
use crate::subword::wordpiece::WordpieceTokenizer;
use crate::vocab::Vocabulary;

/// The concrete subword tokenizer of a pipeline.
pub enum SubwordStage {
    Wordpiece(WordpieceTokenizer),
    Character(CharacterTokenizer),
    Sentencepiece(SentencepieceTokenizer),
}

impl SubwordStage {
    pub fn kind(&self) -> SubwordTokenizerKind {
        match self {
            SubwordStage::Wordpiece(_) => SubwordTokenizerKind::Wordpiece,
            SubwordStage::Character(_) => SubwordTokenizerKind::Character,
            SubwordStage::Sentencepiece(_) => SubwordTokenizerKind::Sentencepiece,
        }
    }

    /// The vocabulary handle shared with the pipeline.
    pub fn shared_vocabulary(&self) -> Arc<Vocabulary> {
        match self {
            SubwordStage::Wordpiece(tokenizer) => tokenizer.shared_vocabulary(),
            SubwordStage::Character(tokenizer) => tokenizer.shared_vocabulary(),
            SubwordStage::Sentencepiece(tokenizer) => tokenizer.shared_vocabulary(),
        }
    }

    pub fn tokenizer(&self) -> &dyn SubwordTokenizer {
        match self {
            SubwordStage::Wordpiece(tokenizer) => tokenizer,
            SubwordStage::Character(tokenizer) => tokenizer,
            SubwordStage::Sentencepiece(tokenizer) => tokenizer,
        }
    }

    fn from_vocabulary(
        kind: SubwordTokenizerKind,
        vocab: Arc<Vocabulary>,
        config: &TokenizerConfig,
        special_tokens: &SpecialTokens,
    ) -> Result<Self> {
        let unk = special_tokens.unk_token.as_str();
        match kind {
            SubwordTokenizerKind::Wordpiece => Ok(SubwordStage::Wordpiece(
                WordpieceTokenizer::new(vocab, unk)
                    .with_max_input_chars_per_word(config.engine.max_input_chars_per_word),
            )),
            SubwordTokenizerKind::Character => {
                Ok(SubwordStage::Character(CharacterTokenizer::new(vocab, unk)))
            }
            SubwordTokenizerKind::Sentencepiece => Err(WakachiError::invalid_configuration(
                "A sentencepiece subword tokenizer needs a subword model, not a vocabulary",
            )),
        }
    }
}

/// How the subword stage is obtained.
enum ConstructionMode {
    /// Read `vocab_file` from the configuration.
    Files,
    /// Attach a subword tokenizer resolved by a pretrained loader.
    FromRegistry(LoadedSubword),
}

/// Word stage plus subword stage with special-token protection.
pub struct PipelineTokenizer {
    config: TokenizerConfig,
    special_tokens: SpecialTokens,
    never_split: SpecialTokenSet,
    special_pattern: Option<Regex>,
    word_tokenizer: Option<Box<dyn MainWordTokenizer>>,
    subword: Option<SubwordStage>,
    vocab: Arc<Vocabulary>,
}

impl PipelineTokenizer {
    /// Build a pipeline from the files named in `config`.
    ///
    /// `config.vocab_file` must exist: a newline-delimited vocabulary for
    /// the wordpiece and character kinds, a subword model file for
    /// sentencepiece.
    pub fn new(config: TokenizerConfig, special_tokens: SpecialTokens, engines: &Engines) -> Result<Self> {
        Self::build(config, special_tokens, engines, ConstructionMode::Files)
    }

    /// Build a sentencepiece pipeline around an already-loaded model.
    pub fn from_piece_model(
        config: TokenizerConfig,
        special_tokens: SpecialTokens,
        model: Arc<dyn PieceModel>,
        engines: &Engines,
    ) -> Result<Self> {
        Self::build(
            config,
            special_tokens,
            engines,
            ConstructionMode::FromRegistry(LoadedSubword::PieceModel(model)),
        )
    }

    /// Build a pipeline whose subword stage was resolved by a pretrained loader.
    pub(crate) fn from_loaded(
        config: TokenizerConfig,
        special_tokens: SpecialTokens,
        subword: LoadedSubword,
        engines: &Engines,
    ) -> Result<Self> {
        Self::build(
            config,
            special_tokens,
            engines,
            ConstructionMode::FromRegistry(subword),
        )
    }

    fn build(
        config: TokenizerConfig,
        special_tokens: SpecialTokens,
        engines: &Engines,
        mode: ConstructionMode,
    ) -> Result<Self> {
        let mut pipeline = Self::init_config(config, special_tokens);
        pipeline.init_word_tokenizer(engines)?;
        match mode {
            ConstructionMode::Files => pipeline.init_subword_from_files(engines)?,
            ConstructionMode::FromRegistry(subword) => pipeline.attach_subword(subword)?,
        }
        pipeline.init_special_token_protection()?;

        debug!(
            "pipeline ready: word={} subword={} by_word={} vocab={}",
            pipeline.config.word_tokenizer,
            pipeline.config.subword_tokenizer,
            pipeline.config.do_subword_by_word,
            pipeline.vocab.len()
        );
        Ok(pipeline)
    }

    fn init_config(config: TokenizerConfig, special_tokens: SpecialTokens) -> Self {
        Self {
            config,
            special_tokens,
            never_split: SpecialTokenSet::new(),
            special_pattern: None,
            word_tokenizer: None,
            subword: None,
            vocab: Arc::new(Vocabulary::new()),
        }
    }

    fn init_word_tokenizer(&mut self, engines: &Engines) -> Result<()> {
        self.word_tokenizer = build_word_tokenizer(&self.config, engines)?;
        Ok(())
    }

    fn init_subword_from_files(&mut self, engines: &Engines) -> Result<()> {
        let path = match &self.config.vocab_file {
            Some(path) if path.is_file() => path.clone(),
            other => {
                let shown = other
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default();
                return Err(WakachiError::vocabulary_not_found(format!(
                    "Can't find a vocabulary file at path '{shown}'"
                )));
            }
        };

        let stage = match self.config.subword_tokenizer {
            SubwordTokenizerKind::Sentencepiece => {
                let model = engines.piece_model(Some(&path), &self.config.engine)?;
                SubwordStage::Sentencepiece(SentencepieceTokenizer::from_model(model)?)
            }
            kind => {
                let vocab = Arc::new(Vocabulary::from_file(&path)?);
                SubwordStage::from_vocabulary(kind, vocab, &self.config, &self.special_tokens)?
            }
        };
        self.install_subword(stage);
        Ok(())
    }

    /// Install a subword tokenizer and vocabulary resolved elsewhere,
    /// bypassing file-based construction.
    fn attach_subword(&mut self, subword: LoadedSubword) -> Result<()> {
        let stage = match subword {
            LoadedSubword::PieceModel(model) => {
                SubwordStage::Sentencepiece(SentencepieceTokenizer::from_model(model)?)
            }
            LoadedSubword::Vocabulary { kind, vocabulary } => SubwordStage::from_vocabulary(
                kind,
                Arc::new(vocabulary),
                &self.config,
                &self.special_tokens,
            )?,
        };
        self.config.subword_tokenizer = stage.kind();
        self.install_subword(stage);
        Ok(())
    }

    fn install_subword(&mut self, stage: SubwordStage) {
        self.vocab = stage.shared_vocabulary();
        self.subword = Some(stage);
    }

    fn init_special_token_protection(&mut self) -> Result<()> {
        let specials = self.special_tokens.to_set();

        if self.config.do_subword_tokenize {
            for token in specials.iter() {
                if !self.vocab.contains(token) {
                    warn!("special token '{token}' is not in the vocabulary");
                }
            }
        }

        let mut alternatives: Vec<&str> = specials.iter().collect();
        alternatives.sort_by_key(|token| std::cmp::Reverse(token.len()));
        self.special_pattern = if alternatives.is_empty() {
            None
        } else {
            let pattern = alternatives
                .iter()
                .map(|token| regex::escape(token))
                .collect::<Vec<_>>()
                .join("|");
            Some(Regex::new(&pattern).map_err(|e| {
                WakachiError::invalid_configuration(format!("Invalid special tokens: {e}"))
            })?)
        };

        self.never_split = specials.union(&self.config.never_split.iter().map(String::as_str).collect());
        Ok(())
    }

    /// Tokenize text, keeping special tokens intact.
    pub fn tokenize(&self, text: &str) -> Result<Vec<String>> {
        let Some(pattern) = &self.special_pattern else {
            return self.tokenize_segment(text.trim());
        };

        let mut tokens = Vec::new();
        let mut last = 0;
        for found in pattern.find_iter(text) {
            self.tokenize_segment_into(&text[last..found.start()], &mut tokens)?;
            tokens.push(found.as_str().to_string());
            last = found.end();
        }
        self.tokenize_segment_into(&text[last..], &mut tokens)?;
        Ok(tokens)
    }

    /// Tokenize many texts in parallel, preserving input order.
    ///
    /// Fails with the first error in input order.
    pub fn tokenize_batch<S: AsRef<str> + Sync>(&self, texts: &[S]) -> Result<Vec<Vec<String>>> {
        texts
            .par_iter()
            .map(|text| self.tokenize(text.as_ref()))
            .collect()
    }

    fn tokenize_segment_into(&self, segment: &str, tokens: &mut Vec<String>) -> Result<()> {
        let segment = segment.trim();
        if !segment.is_empty() {
            tokens.extend(self.tokenize_segment(segment)?);
        }
        Ok(())
    }

    /// Run both stages on text that contains no special tokens.
    pub fn tokenize_segment(&self, text: &str) -> Result<Vec<String>> {
        let words = match &self.word_tokenizer {
            Some(tokenizer) => tokenizer.tokenize(text, &self.never_split)?,
            None => vec![text.to_string()],
        };

        let subword = match &self.subword {
            Some(stage) if self.config.do_subword_tokenize => stage.tokenizer(),
            _ => return Ok(words),
        };

        if self.config.do_subword_by_word {
            let mut tokens = Vec::with_capacity(words.len());
            for word in &words {
                tokens.extend(subword.tokenize(word)?);
            }
            Ok(tokens)
        } else {
            subword.tokenize(&words.join(" "))
        }
    }

    /// Join tokens back into text.
    pub fn convert_tokens_to_string(&self, tokens: &[String]) -> Result<String> {
        match &self.subword {
            Some(SubwordStage::Sentencepiece(tokenizer)) => tokenizer.decode(tokens),
            Some(SubwordStage::Wordpiece(_)) | Some(SubwordStage::Character(_)) => {
                let joined = tokens.join(" ").replace(" ##", "");
                Ok(clean_up_tokenization(joined.trim()))
            }
            None => Err(WakachiError::invalid_configuration(format!(
                "Unsupported subword tokenizer '{}' for detokenization",
                self.config.subword_tokenizer
            ))),
        }
    }

    fn unk_id(&self) -> Option<u32> {
        self.vocab.id(&self.special_tokens.unk_token)
    }

    /// Map tokens to ids; tokens outside the vocabulary map to the unknown token id.
    pub fn convert_tokens_to_ids<S: AsRef<str>>(&self, tokens: &[S]) -> Result<Vec<u32>> {
        tokens
            .iter()
            .map(|token| {
                let token = token.as_ref();
                self.vocab.id(token).or_else(|| self.unk_id()).ok_or_else(|| {
                    WakachiError::invalid_configuration(format!(
                        "'{token}' is not in the vocabulary and neither is '{}'",
                        self.special_tokens.unk_token
                    ))
                })
            })
            .collect()
    }

    /// Map ids to tokens; ids outside the vocabulary map to the unknown token.
    pub fn convert_ids_to_tokens(&self, ids: &[u32]) -> Vec<String> {
        ids.iter()
            .map(|&id| {
                self.vocab
                    .piece(id)
                    .unwrap_or(self.special_tokens.unk_token.as_str())
                    .to_string()
            })
            .collect()
    }

    /// Tokenize and map to ids, framing with the cls and sep ids when requested.
    pub fn encode(&self, text: &str, add_special_tokens: bool) -> Result<Vec<u32>> {
        let tokens = self.tokenize(text)?;
        let ids = self.convert_tokens_to_ids(&tokens)?;
        if !add_special_tokens {
            return Ok(ids);
        }

        let frame = self.convert_tokens_to_ids(&[
            self.special_tokens.cls_token.as_str(),
            self.special_tokens.sep_token.as_str(),
        ])?;
        let mut framed = Vec::with_capacity(ids.len() + 2);
        framed.push(frame[0]);
        framed.extend(ids);
        framed.push(frame[1]);
        Ok(framed)
    }

    /// Map ids back to text.
    pub fn decode(&self, ids: &[u32], skip_special_tokens: bool) -> Result<String> {
        let specials = self.special_tokens.to_set();
        let tokens: Vec<String> = self
            .convert_ids_to_tokens(ids)
            .into_iter()
            .filter(|token| !(skip_special_tokens && specials.contains(token)))
            .collect();
        self.convert_tokens_to_string(&tokens)
    }

    pub fn vocab_size(&self) -> usize {
        self.vocab.len()
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocab
    }

    pub fn special_tokens(&self) -> &SpecialTokens {
        &self.special_tokens
    }

    /// Strings protected from splitting and case folding.
    pub fn never_split(&self) -> &SpecialTokenSet {
        &self.never_split
    }

    pub fn config(&self) -> &TokenizerConfig {
        &self.config
    }

    pub fn word_tokenizer(&self) -> Option<&dyn MainWordTokenizer> {
        self.word_tokenizer.as_deref()
    }

    pub fn subword_stage(&self) -> Option<&SubwordStage> {
        self.subword.as_ref()
    }
}

/// Remove the spaces a whitespace join leaves before punctuation and in
/// English contractions.
pub fn clean_up_tokenization(text: &str) -> String {
    text.replace(" .", ".")
        .replace(" ?", "?")
        .replace(" !", "!")
        .replace(" ,", ",")
        .replace(" ' ", "'")
        .replace(" n't", "n't")
        .replace(" 'm", "'m")
        .replace(" 's", "'s")
        .replace(" 've", "'ve")
        .replace(" 're", "'re")
}
