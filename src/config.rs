//! Pipeline configuration.
//!
//! [`TokenizerConfig`] selects which word tokenizer and which subword
//! tokenizer a [`PipelineTokenizer`](crate::pipeline::PipelineTokenizer) runs
//! and how the two stages are combined. [`ConfigOverrides`] is the partial
//! form used by the model registry and by callers of
//! [`from_registry`](crate::pretrained::from_registry).
//!
//! Kind enums parse from the legacy configuration spellings:
//!
//! ```
//! use wakachi::config::{SubwordTokenizerKind, WordTokenizerKind};
//!
//! assert_eq!("spacy-luw".parse::<WordTokenizerKind>().unwrap(), WordTokenizerKind::SpacyLuw);
//! assert_eq!("none".parse::<WordTokenizerKind>().unwrap(), WordTokenizerKind::Normalizer);
//! assert_eq!("".parse::<WordTokenizerKind>().unwrap(), WordTokenizerKind::Disabled);
//! assert!("kytea".parse::<WordTokenizerKind>().is_err());
//! assert_eq!(SubwordTokenizerKind::Sentencepiece.to_string(), "sentencepiece");
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, WakachiError};

/// Which main-word tokenizer runs in the first stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WordTokenizerKind {
    /// No word stage; the whole text goes to the subword stage.
    #[serde(rename = "disabled", alias = "")]
    Disabled,
    /// Normalization and lower-casing only, no segmentation.
    #[serde(rename = "none")]
    Normalizer,
    /// Whitespace and punctuation rules.
    #[serde(rename = "basic")]
    Basic,
    /// MeCab-format dictionary segmentation.
    #[serde(rename = "mecab")]
    Mecab,
    /// Juman-style morphological analysis.
    #[serde(rename = "juman")]
    Juman,
    /// Statistical long-unit-word segmentation.
    #[serde(rename = "spacy-luw")]
    SpacyLuw,
    /// Sudachi-style segmentation with selectable split granularity.
    #[serde(rename = "sudachi")]
    Sudachi,
}

impl WordTokenizerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WordTokenizerKind::Disabled => "",
            WordTokenizerKind::Normalizer => "none",
            WordTokenizerKind::Basic => "basic",
            WordTokenizerKind::Mecab => "mecab",
            WordTokenizerKind::Juman => "juman",
            WordTokenizerKind::SpacyLuw => "spacy-luw",
            WordTokenizerKind::Sudachi => "sudachi",
        }
    }
}

impl FromStr for WordTokenizerKind {
    type Err = WakachiError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "" | "disabled" => Ok(WordTokenizerKind::Disabled),
            "none" => Ok(WordTokenizerKind::Normalizer),
            "basic" => Ok(WordTokenizerKind::Basic),
            "mecab" => Ok(WordTokenizerKind::Mecab),
            "juman" => Ok(WordTokenizerKind::Juman),
            "spacy-luw" => Ok(WordTokenizerKind::SpacyLuw),
            "sudachi" => Ok(WordTokenizerKind::Sudachi),
            other => Err(WakachiError::invalid_configuration(format!(
                "Invalid word_tokenizer_type '{other}' is specified."
            ))),
        }
    }
}

impl fmt::Display for WordTokenizerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which subword tokenizer runs in the second stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubwordTokenizerKind {
    /// Greedy longest-match against a vocabulary, `##` continuation pieces.
    Wordpiece,
    /// One piece per character.
    Character,
    /// Byte-pair/unigram model pieces with the digit-regrouping pass.
    Sentencepiece,
}

impl SubwordTokenizerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubwordTokenizerKind::Wordpiece => "wordpiece",
            SubwordTokenizerKind::Character => "character",
            SubwordTokenizerKind::Sentencepiece => "sentencepiece",
        }
    }

    /// Whether pieces come from a plain vocabulary rather than a model file.
    pub fn is_vocabulary_based(&self) -> bool {
        !matches!(self, SubwordTokenizerKind::Sentencepiece)
    }
}

impl FromStr for SubwordTokenizerKind {
    type Err = WakachiError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "wordpiece" => Ok(SubwordTokenizerKind::Wordpiece),
            "character" => Ok(SubwordTokenizerKind::Character),
            "sentencepiece" => Ok(SubwordTokenizerKind::Sentencepiece),
            other => Err(WakachiError::invalid_configuration(format!(
                "Invalid subword_tokenizer '{other}' is specified."
            ))),
        }
    }
}

impl fmt::Display for SubwordTokenizerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sudachi split granularity, coarsest (`C`) to finest (`A`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SplitMode {
    #[default]
    A,
    B,
    C,
}

impl FromStr for SplitMode {
    type Err = WakachiError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "A" | "a" => Ok(SplitMode::A),
            "B" | "b" => Ok(SplitMode::B),
            "C" | "c" => Ok(SplitMode::C),
            other => Err(WakachiError::invalid_configuration(format!(
                "Invalid split mode '{other}', expected A, B or C"
            ))),
        }
    }
}

impl fmt::Display for SplitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SplitMode::A => "A",
            SplitMode::B => "B",
            SplitMode::C => "C",
        };
        f.write_str(s)
    }
}

/// Sudachi system dictionary size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SudachiDictType {
    Small,
    #[default]
    Core,
    Full,
}

impl FromStr for SudachiDictType {
    type Err = WakachiError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "small" => Ok(SudachiDictType::Small),
            "core" => Ok(SudachiDictType::Core),
            "full" => Ok(SudachiDictType::Full),
            other => Err(WakachiError::invalid_configuration(format!(
                "Invalid sudachi dictionary type '{other}'"
            ))),
        }
    }
}

impl fmt::Display for SudachiDictType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SudachiDictType::Small => "small",
            SudachiDictType::Core => "core",
            SudachiDictType::Full => "full",
        };
        f.write_str(s)
    }
}

/// Which form of a Sudachi morpheme becomes the output token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordForm {
    #[default]
    Surface,
    Dictionary,
    Normalized,
}

impl FromStr for WordForm {
    type Err = WakachiError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "surface" => Ok(WordForm::Surface),
            "dictionary" => Ok(WordForm::Dictionary),
            "normalized" => Ok(WordForm::Normalized),
            other => Err(WakachiError::invalid_configuration(format!(
                "Invalid word form '{other}'"
            ))),
        }
    }
}

/// The pretrained tokenizer family a model ships with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenizerClass {
    BertJapaneseTokenizer,
    BertTokenizer,
    AlbertTokenizer,
    DebertaV2Tokenizer,
    T5Tokenizer,
}

/// Capability tag distinguishing how a tokenizer family stores its pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubwordFamily {
    /// A binary subword model (`spiece.model`, `spm.model`).
    PieceModel,
    /// A newline-delimited vocabulary (`vocab.txt`).
    Vocabulary,
}

impl TokenizerClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenizerClass::BertJapaneseTokenizer => "BertJapaneseTokenizer",
            TokenizerClass::BertTokenizer => "BertTokenizer",
            TokenizerClass::AlbertTokenizer => "AlbertTokenizer",
            TokenizerClass::DebertaV2Tokenizer => "DebertaV2Tokenizer",
            TokenizerClass::T5Tokenizer => "T5Tokenizer",
        }
    }

    pub fn family(&self) -> SubwordFamily {
        match self {
            TokenizerClass::BertJapaneseTokenizer | TokenizerClass::BertTokenizer => {
                SubwordFamily::Vocabulary
            }
            TokenizerClass::AlbertTokenizer
            | TokenizerClass::DebertaV2Tokenizer
            | TokenizerClass::T5Tokenizer => SubwordFamily::PieceModel,
        }
    }
}

impl FromStr for TokenizerClass {
    type Err = WakachiError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "BertJapaneseTokenizer" => Ok(TokenizerClass::BertJapaneseTokenizer),
            "BertTokenizer" => Ok(TokenizerClass::BertTokenizer),
            "AlbertTokenizer" => Ok(TokenizerClass::AlbertTokenizer),
            "DebertaV2Tokenizer" => Ok(TokenizerClass::DebertaV2Tokenizer),
            "T5Tokenizer" => Ok(TokenizerClass::T5Tokenizer),
            other => Err(WakachiError::invalid_configuration(format!(
                "Unsupported tokenizer_class '{other}'"
            ))),
        }
    }
}

impl fmt::Display for TokenizerClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options consumed only by specific engines.
///
/// Fields belonging to an inactive kind are carried but never validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    /// MeCab dictionary name ("ipadic", "unidic_lite", "unidic").
    pub mecab_dic: Option<String>,
    /// MeCab command-line style options (`-d DIR`, `-u FILE`).
    pub mecab_option: Option<String>,
    pub sudachi_split_mode: SplitMode,
    pub sudachi_config_path: Option<PathBuf>,
    pub sudachi_resource_dir: Option<PathBuf>,
    pub sudachi_dict_type: SudachiDictType,
    pub sudachi_word_form: WordForm,
    /// Extra arguments for the subword model engine.
    pub sp_model_kwargs: BTreeMap<String, serde_json::Value>,
    /// Words longer than this many characters become the unknown token.
    pub max_input_chars_per_word: usize,
    /// Executable used by the Juman subprocess engine.
    pub jumanpp_command: String,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            mecab_dic: Some("ipadic".to_string()),
            mecab_option: None,
            sudachi_split_mode: SplitMode::A,
            sudachi_config_path: None,
            sudachi_resource_dir: None,
            sudachi_dict_type: SudachiDictType::Core,
            sudachi_word_form: WordForm::Surface,
            sp_model_kwargs: BTreeMap::new(),
            max_input_chars_per_word: 100,
            jumanpp_command: "jumanpp".to_string(),
        }
    }
}

/// Complete configuration of a two-stage tokenization pipeline.
///
/// Immutable once handed to a pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenizerConfig {
    /// Vocabulary or subword model file for file-based construction.
    pub vocab_file: Option<PathBuf>,
    pub word_tokenizer: WordTokenizerKind,
    pub subword_tokenizer: SubwordTokenizerKind,
    pub do_subword_tokenize: bool,
    pub do_lower_case: bool,
    pub normalize_text: bool,
    /// Skip analysis of oversized input instead of calling the analyzer.
    pub ignore_max_byte_error: bool,
    /// Run the subword stage per word instead of on the re-joined text.
    pub do_subword_by_word: bool,
    /// Extra strings protected from splitting and case folding.
    pub never_split: Vec<String>,
    pub engine: EngineOptions,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            vocab_file: None,
            word_tokenizer: WordTokenizerKind::Basic,
            subword_tokenizer: SubwordTokenizerKind::Wordpiece,
            do_subword_tokenize: true,
            do_lower_case: false,
            normalize_text: true,
            ignore_max_byte_error: false,
            do_subword_by_word: true,
            never_split: Vec::new(),
            engine: EngineOptions::default(),
        }
    }
}

impl TokenizerConfig {
    /// Create a configuration with legacy defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from a JSON file. Missing fields keep their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            WakachiError::invalid_configuration(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Whether the word stage runs.
    pub fn do_word_tokenize(&self) -> bool {
        self.word_tokenizer != WordTokenizerKind::Disabled
    }

    pub fn with_vocab_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.vocab_file = Some(path.into());
        self
    }

    pub fn with_word_tokenizer(mut self, kind: WordTokenizerKind) -> Self {
        self.word_tokenizer = kind;
        self
    }

    pub fn with_subword_tokenizer(mut self, kind: SubwordTokenizerKind) -> Self {
        self.subword_tokenizer = kind;
        self
    }

    pub fn with_subword_tokenize(mut self, enabled: bool) -> Self {
        self.do_subword_tokenize = enabled;
        self
    }

    pub fn with_lower_case(mut self, lower_case: bool) -> Self {
        self.do_lower_case = lower_case;
        self
    }

    pub fn with_normalize_text(mut self, normalize: bool) -> Self {
        self.normalize_text = normalize;
        self
    }

    pub fn with_ignore_max_byte_error(mut self, ignore: bool) -> Self {
        self.ignore_max_byte_error = ignore;
        self
    }

    pub fn with_subword_by_word(mut self, by_word: bool) -> Self {
        self.do_subword_by_word = by_word;
        self
    }

    pub fn with_never_split<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.never_split = tokens.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_engine_options(mut self, engine: EngineOptions) -> Self {
        self.engine = engine;
        self
    }
}

/// Partial configuration; every unset field keeps its fallback.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigOverrides {
    #[serde(alias = "word_tokenizer_type")]
    pub word_tokenizer: Option<WordTokenizerKind>,
    pub tokenizer_class: Option<TokenizerClass>,
    #[serde(alias = "subword_tokenizer_type")]
    pub subword_tokenizer: Option<SubwordTokenizerKind>,
    pub do_lower_case: Option<bool>,
    pub do_word_tokenize: Option<bool>,
    pub do_subword_by_word: Option<bool>,
    pub normalize_text: Option<bool>,
    pub ignore_max_byte_error: Option<bool>,
    pub never_split: Option<Vec<String>>,
    pub mecab_dic: Option<String>,
    pub mecab_option: Option<String>,
    pub sudachi_split_mode: Option<SplitMode>,
    pub sudachi_config_path: Option<PathBuf>,
    pub sudachi_resource_dir: Option<PathBuf>,
    pub sudachi_dict_type: Option<SudachiDictType>,
    pub sp_model_kwargs: Option<BTreeMap<String, serde_json::Value>>,
}

impl ConfigOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_word_tokenizer(mut self, kind: WordTokenizerKind) -> Self {
        self.word_tokenizer = Some(kind);
        self
    }

    pub fn with_tokenizer_class(mut self, class: TokenizerClass) -> Self {
        self.tokenizer_class = Some(class);
        self
    }

    pub fn with_subword_tokenizer(mut self, kind: SubwordTokenizerKind) -> Self {
        self.subword_tokenizer = Some(kind);
        self
    }

    pub fn with_lower_case(mut self, lower_case: bool) -> Self {
        self.do_lower_case = Some(lower_case);
        self
    }

    pub fn with_word_tokenize(mut self, enabled: bool) -> Self {
        self.do_word_tokenize = Some(enabled);
        self
    }

    pub fn with_subword_by_word(mut self, by_word: bool) -> Self {
        self.do_subword_by_word = Some(by_word);
        self
    }

    pub fn with_mecab_dic<S: Into<String>>(mut self, dic: S) -> Self {
        self.mecab_dic = Some(dic.into());
        self
    }

    /// Lay `self` over `fallback`: fields set here win, unset fields come from `fallback`.
    pub fn overlay(&self, fallback: &ConfigOverrides) -> ConfigOverrides {
        ConfigOverrides {
            word_tokenizer: self.word_tokenizer.or(fallback.word_tokenizer),
            tokenizer_class: self.tokenizer_class.or(fallback.tokenizer_class),
            subword_tokenizer: self.subword_tokenizer.or(fallback.subword_tokenizer),
            do_lower_case: self.do_lower_case.or(fallback.do_lower_case),
            do_word_tokenize: self.do_word_tokenize.or(fallback.do_word_tokenize),
            do_subword_by_word: self.do_subword_by_word.or(fallback.do_subword_by_word),
            normalize_text: self.normalize_text.or(fallback.normalize_text),
            ignore_max_byte_error: self.ignore_max_byte_error.or(fallback.ignore_max_byte_error),
            never_split: self.never_split.clone().or_else(|| fallback.never_split.clone()),
            mecab_dic: self.mecab_dic.clone().or_else(|| fallback.mecab_dic.clone()),
            mecab_option: self
                .mecab_option
                .clone()
                .or_else(|| fallback.mecab_option.clone()),
            sudachi_split_mode: self.sudachi_split_mode.or(fallback.sudachi_split_mode),
            sudachi_config_path: self
                .sudachi_config_path
                .clone()
                .or_else(|| fallback.sudachi_config_path.clone()),
            sudachi_resource_dir: self
                .sudachi_resource_dir
                .clone()
                .or_else(|| fallback.sudachi_resource_dir.clone()),
            sudachi_dict_type: self.sudachi_dict_type.or(fallback.sudachi_dict_type),
            sp_model_kwargs: self
                .sp_model_kwargs
                .clone()
                .or_else(|| fallback.sp_model_kwargs.clone()),
        }
    }

    /// Materialize a full configuration for the given subword kind.
    ///
    /// `do_word_tokenize = false` forces the word stage off regardless of
    /// the word tokenizer kind.
    pub fn to_config(&self, subword: SubwordTokenizerKind) -> TokenizerConfig {
        let mut config = TokenizerConfig::default().with_subword_tokenizer(subword);
        if let Some(kind) = self.word_tokenizer {
            config.word_tokenizer = kind;
        }
        if self.do_word_tokenize == Some(false) {
            config.word_tokenizer = WordTokenizerKind::Disabled;
        }
        if let Some(lower_case) = self.do_lower_case {
            config.do_lower_case = lower_case;
        }
        if let Some(by_word) = self.do_subword_by_word {
            config.do_subword_by_word = by_word;
        }
        if let Some(normalize) = self.normalize_text {
            config.normalize_text = normalize;
        }
        if let Some(ignore) = self.ignore_max_byte_error {
            config.ignore_max_byte_error = ignore;
        }
        if let Some(never_split) = &self.never_split {
            config.never_split = never_split.clone();
        }
        if let Some(dic) = &self.mecab_dic {
            config.engine.mecab_dic = Some(dic.clone());
        }
        if let Some(option) = &self.mecab_option {
            config.engine.mecab_option = Some(option.clone());
        }
        if let Some(mode) = self.sudachi_split_mode {
            config.engine.sudachi_split_mode = mode;
        }
        if let Some(path) = &self.sudachi_config_path {
            config.engine.sudachi_config_path = Some(path.clone());
        }
        if let Some(dir) = &self.sudachi_resource_dir {
            config.engine.sudachi_resource_dir = Some(dir.clone());
        }
        if let Some(dict_type) = self.sudachi_dict_type {
            config.engine.sudachi_dict_type = dict_type;
        }
        if let Some(kwargs) = &self.sp_model_kwargs {
            config.engine.sp_model_kwargs = kwargs.clone();
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TokenizerConfig::default();
        assert_eq!(config.word_tokenizer, WordTokenizerKind::Basic);
        assert_eq!(config.subword_tokenizer, SubwordTokenizerKind::Wordpiece);
        assert!(config.normalize_text);
        assert!(config.do_subword_by_word);
        assert!(!config.do_lower_case);
        assert!(!config.ignore_max_byte_error);
        assert_eq!(config.engine.max_input_chars_per_word, 100);
    }

    #[test]
    fn test_kind_round_trip_through_strings() {
        for kind in [
            WordTokenizerKind::Disabled,
            WordTokenizerKind::Normalizer,
            WordTokenizerKind::Basic,
            WordTokenizerKind::Mecab,
            WordTokenizerKind::Juman,
            WordTokenizerKind::SpacyLuw,
            WordTokenizerKind::Sudachi,
        ] {
            assert_eq!(kind.to_string().parse::<WordTokenizerKind>().unwrap(), kind);
        }
        assert!("wordpiece".parse::<SubwordTokenizerKind>().is_ok());
        assert!(matches!(
            "bpe".parse::<SubwordTokenizerKind>(),
            Err(WakachiError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_split_mode_parse() {
        assert_eq!("B".parse::<SplitMode>().unwrap(), SplitMode::B);
        assert_eq!("c".parse::<SplitMode>().unwrap(), SplitMode::C);
        assert!("D".parse::<SplitMode>().is_err());
    }

    #[test]
    fn test_config_from_json() {
        let json = r#"{
            "word_tokenizer": "juman",
            "subword_tokenizer": "sentencepiece",
            "do_subword_by_word": false,
            "engine": { "sudachi_split_mode": "C" }
        }"#;
        let config: TokenizerConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.word_tokenizer, WordTokenizerKind::Juman);
        assert_eq!(config.subword_tokenizer, SubwordTokenizerKind::Sentencepiece);
        assert!(!config.do_subword_by_word);
        assert!(config.normalize_text);
        assert_eq!(config.engine.sudachi_split_mode, SplitMode::C);
        assert_eq!(config.engine.mecab_dic.as_deref(), Some("ipadic"));
    }

    #[test]
    fn test_overlay_prefers_self() {
        let registry = ConfigOverrides::new()
            .with_word_tokenizer(WordTokenizerKind::Juman)
            .with_subword_by_word(false);
        let caller = ConfigOverrides::new()
            .with_word_tokenizer(WordTokenizerKind::Mecab)
            .with_lower_case(true);

        let merged = registry.overlay(&caller);
        assert_eq!(merged.word_tokenizer, Some(WordTokenizerKind::Juman));
        assert_eq!(merged.do_subword_by_word, Some(false));
        assert_eq!(merged.do_lower_case, Some(true));
        assert_eq!(merged.tokenizer_class, None);
    }

    #[test]
    fn test_to_config_disables_word_stage() {
        let overrides = ConfigOverrides::new()
            .with_word_tokenizer(WordTokenizerKind::Mecab)
            .with_word_tokenize(false);
        let config = overrides.to_config(SubwordTokenizerKind::Sentencepiece);
        assert_eq!(config.word_tokenizer, WordTokenizerKind::Disabled);
        assert!(!config.do_word_tokenize());
        assert_eq!(config.subword_tokenizer, SubwordTokenizerKind::Sentencepiece);
    }

    #[test]
    fn test_overrides_accept_legacy_keys() {
        let json = r#"{"word_tokenizer_type": "", "tokenizer_class": "T5Tokenizer", "do_word_tokenize": false}"#;
        let overrides: ConfigOverrides = serde_json::from_str(json).unwrap();
        assert_eq!(overrides.word_tokenizer, Some(WordTokenizerKind::Disabled));
        assert_eq!(overrides.tokenizer_class, Some(TokenizerClass::T5Tokenizer));
        assert_eq!(overrides.do_word_tokenize, Some(false));
    }

    #[test]
    fn test_tokenizer_class_family() {
        assert_eq!(
            TokenizerClass::BertJapaneseTokenizer.family(),
            SubwordFamily::Vocabulary
        );
        assert_eq!(
            TokenizerClass::DebertaV2Tokenizer.family(),
            SubwordFamily::PieceModel
        );
        assert!("GPT2Tokenizer".parse::<TokenizerClass>().is_err());
    }
}
