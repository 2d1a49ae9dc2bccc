//! Building pipelines for named pretrained models.
//!
//! [`from_registry`] resolves a model name through the registry, asks a
//! [`PretrainedLoader`] for the model's subword resources, and attaches them
//! to a new [`PipelineTokenizer`]. The loader decides the subword kind from
//! what it actually loaded: a binary piece model or a piece list.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::debug;
use serde_json::Value;

use crate::config::{ConfigOverrides, SubwordFamily, SubwordTokenizerKind, TokenizerClass};
use crate::engine::{Engines, PieceModel, load_piece_model};
use crate::error::{Result, WakachiError};
use crate::pipeline::PipelineTokenizer;
use crate::registry;
use crate::special_tokens::SpecialTokens;
use crate::vocab::Vocabulary;

/// Subword resources of a loaded model, tagged by how they are stored.
pub enum LoadedSubword {
    PieceModel(Arc<dyn PieceModel>),
    Vocabulary {
        kind: SubwordTokenizerKind,
        vocabulary: Vocabulary,
    },
}

impl LoadedSubword {
    pub fn kind(&self) -> SubwordTokenizerKind {
        match self {
            LoadedSubword::PieceModel(_) => SubwordTokenizerKind::Sentencepiece,
            LoadedSubword::Vocabulary { kind, .. } => *kind,
        }
    }
}

/// Everything a loader hands back for one model.
pub struct LoadedTokenizer {
    pub special_tokens: SpecialTokens,
    pub subword: LoadedSubword,
}

/// Source of pretrained tokenizer resources.
pub trait PretrainedLoader: Send + Sync {
    /// Load the resources of `name` as a tokenizer of `class`.
    ///
    /// `overrides` are the resolved settings, registry entry included.
    fn load(
        &self,
        name: &str,
        class: TokenizerClass,
        overrides: &ConfigOverrides,
    ) -> Result<LoadedTokenizer>;
}

/// Construct a pipeline for a named model.
///
/// Known names take their registry settings, with `overrides` filling the
/// fields the registry leaves unset. Unknown names must supply both the word
/// tokenizer kind and the tokenizer class.
pub fn from_registry(
    name: &str,
    overrides: &ConfigOverrides,
    loader: &dyn PretrainedLoader,
    engines: &Engines,
) -> Result<PipelineTokenizer> {
    if registry::is_unsupported(name) {
        return Err(WakachiError::unsupported_model(format!(
            "'{name}' is not supported; its tokenizer is published with the model itself"
        )));
    }

    let resolved = match registry::resolve(name) {
        Some(entry) => {
            debug!("model '{name}' found in registry");
            entry.overlay(overrides)
        }
        None => {
            debug!("model '{name}' not in registry, using caller settings");
            if overrides.word_tokenizer.is_none() || overrides.tokenizer_class.is_none() {
                return Err(WakachiError::invalid_configuration(format!(
                    "'{name}' is not a registered model; word_tokenizer_type and tokenizer_class are required"
                )));
            }
            overrides.clone()
        }
    };

    let class = resolved.tokenizer_class.ok_or_else(|| {
        WakachiError::invalid_configuration(format!("No tokenizer_class for '{name}'"))
    })?;
    let loaded = loader.load(name, class, &resolved)?;
    let config = resolved.to_config(loaded.subword.kind());

    debug!(
        "model '{name}' resolved: class={class} word={} subword={}",
        config.word_tokenizer, config.subword_tokenizer
    );
    PipelineTokenizer::from_loaded(config, loaded.special_tokens, loaded.subword, engines)
}

/// Reads models laid out as `<root>/<model name>/`.
///
/// The directory holds an optional `tokenizer_config.json` and either
/// `vocab.txt` (BERT classes), `spm.model` (DeBERTa-v2) or `spiece.model`
/// (ALBERT, T5).
#[derive(Debug, Clone)]
pub struct LocalLoader {
    root: PathBuf,
}

impl LocalLoader {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn model_dir(&self, name: &str) -> Result<PathBuf> {
        let dir = self.root.join(name);
        if !dir.is_dir() {
            return Err(WakachiError::vocabulary_not_found(format!(
                "No model directory at '{}'",
                dir.display()
            )));
        }
        Ok(dir)
    }

    fn read_tokenizer_config(dir: &Path) -> Result<Value> {
        let path = dir.join("tokenizer_config.json");
        if !path.is_file() {
            return Ok(Value::Null);
        }
        let content = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

fn required_file(dir: &Path, file_name: &str) -> Result<PathBuf> {
    let path = dir.join(file_name);
    if path.is_file() {
        Ok(path)
    } else {
        Err(WakachiError::vocabulary_not_found(format!(
            "Can't find '{}'",
            path.display()
        )))
    }
}

/// The special tokens a tokenizer class uses when its config names none.
pub fn default_special_tokens(class: TokenizerClass) -> SpecialTokens {
    match class {
        TokenizerClass::T5Tokenizer => SpecialTokens::new()
            .with_unk_token("<unk>")
            .with_sep_token("</s>")
            .with_pad_token("<pad>"),
        TokenizerClass::AlbertTokenizer => SpecialTokens::new()
            .with_unk_token("<unk>")
            .with_pad_token("<pad>"),
        TokenizerClass::BertJapaneseTokenizer
        | TokenizerClass::BertTokenizer
        | TokenizerClass::DebertaV2Tokenizer => SpecialTokens::new(),
    }
}

/// A token entry is either a plain string or an object with `content`.
fn token_value(value: &Value) -> Option<String> {
    match value {
        Value::String(token) => Some(token.clone()),
        Value::Object(map) => map.get("content").and_then(Value::as_str).map(str::to_string),
        _ => None,
    }
}

fn special_tokens_from(config: &Value, class: TokenizerClass) -> SpecialTokens {
    let mut tokens = default_special_tokens(class);
    let slots: [(&str, &mut String); 5] = [
        ("unk_token", &mut tokens.unk_token),
        ("sep_token", &mut tokens.sep_token),
        ("pad_token", &mut tokens.pad_token),
        ("cls_token", &mut tokens.cls_token),
        ("mask_token", &mut tokens.mask_token),
    ];
    for (key, slot) in slots {
        if let Some(token) = config.get(key).and_then(token_value) {
            *slot = token;
        }
    }
    if let Some(Value::Array(additional)) = config.get("additional_special_tokens") {
        tokens.additional.extend(additional.iter().filter_map(token_value));
    }
    tokens
}

impl PretrainedLoader for LocalLoader {
    fn load(
        &self,
        name: &str,
        class: TokenizerClass,
        overrides: &ConfigOverrides,
    ) -> Result<LoadedTokenizer> {
        let dir = self.model_dir(name)?;
        let config = Self::read_tokenizer_config(&dir)?;
        let special_tokens = special_tokens_from(&config, class);

        let subword = match class.family() {
            SubwordFamily::PieceModel => {
                let file_name = match class {
                    TokenizerClass::DebertaV2Tokenizer => "spm.model",
                    _ => "spiece.model",
                };
                let path = required_file(&dir, file_name)?;
                let options = overrides.to_config(SubwordTokenizerKind::Sentencepiece).engine;
                LoadedSubword::PieceModel(load_piece_model(&path, &options)?)
            }
            SubwordFamily::Vocabulary => {
                let kind = match overrides.subword_tokenizer {
                    Some(kind) => kind,
                    None => match config.get("subword_tokenizer_type").and_then(Value::as_str) {
                        Some(kind) => kind.parse()?,
                        None => SubwordTokenizerKind::Wordpiece,
                    },
                };
                if kind == SubwordTokenizerKind::Sentencepiece {
                    return Err(WakachiError::invalid_configuration(format!(
                        "{class} stores a vocabulary and cannot use a sentencepiece subword tokenizer"
                    )));
                }
                let path = required_file(&dir, "vocab.txt")?;
                LoadedSubword::Vocabulary {
                    kind,
                    vocabulary: Vocabulary::from_file(&path)?,
                }
            }
        };

        debug!("loaded '{name}' from {} as {}", dir.display(), subword.kind());
        Ok(LoadedTokenizer {
            special_tokens,
            subword,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::config::WordTokenizerKind;

    /// Records what it was asked for and returns a fixed piece list.
    struct FakeLoader {
        pieces: Vec<&'static str>,
        requests: Mutex<Vec<(String, TokenizerClass, ConfigOverrides)>>,
    }

    impl FakeLoader {
        fn new() -> Self {
            Self {
                pieces: vec!["[PAD]", "[UNK]", "[CLS]", "[SEP]", "[MASK]", "今日", "##も", "天気"],
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    impl PretrainedLoader for FakeLoader {
        fn load(
            &self,
            name: &str,
            class: TokenizerClass,
            overrides: &ConfigOverrides,
        ) -> Result<LoadedTokenizer> {
            self.requests
                .lock()
                .unwrap()
                .push((name.to_string(), class, overrides.clone()));
            Ok(LoadedTokenizer {
                special_tokens: SpecialTokens::default(),
                subword: LoadedSubword::Vocabulary {
                    kind: overrides.subword_tokenizer.unwrap_or(SubwordTokenizerKind::Wordpiece),
                    vocabulary: Vocabulary::from_pieces(self.pieces.iter().copied())?,
                },
            })
        }
    }

    #[test]
    fn test_unsupported_model_rejected() {
        let loader = FakeLoader::new();
        let result = from_registry(
            "ku-nlp/roberta-base-japanese-char-wwm",
            &ConfigOverrides::new(),
            &loader,
            &Engines::new(),
        );
        assert!(matches!(result, Err(WakachiError::UnsupportedModel(_))));
        assert!(loader.requests.lock().unwrap().is_empty());
    }

    #[test]
    fn test_unknown_model_requires_overrides() {
        let loader = FakeLoader::new();
        let result = from_registry(
            "someone/unknown-model",
            &ConfigOverrides::new().with_word_tokenizer(WordTokenizerKind::Normalizer),
            &loader,
            &Engines::new(),
        );
        assert!(matches!(result, Err(WakachiError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_unknown_model_with_overrides() {
        let loader = FakeLoader::new();
        let overrides = ConfigOverrides::new()
            .with_word_tokenizer(WordTokenizerKind::Disabled)
            .with_tokenizer_class(TokenizerClass::BertJapaneseTokenizer);
        let tokenizer =
            from_registry("someone/unknown-model", &overrides, &loader, &Engines::new()).unwrap();
        assert_eq!(tokenizer.tokenize("今日も").unwrap(), vec!["今日", "##も"]);
    }

    #[test]
    fn test_registry_fields_win() {
        let loader = FakeLoader::new();
        let caller = ConfigOverrides::new()
            .with_word_tokenizer(WordTokenizerKind::Basic)
            .with_lower_case(true);
        // The loader fails the build later (mecab needs an engine), but the
        // request it receives shows the merged settings.
        let _ = from_registry("cl-tohoku/bert-base-japanese", &caller, &loader, &Engines::new());

        let requests = loader.requests.lock().unwrap();
        let (name, class, merged) = &requests[0];
        assert_eq!(name, "cl-tohoku/bert-base-japanese");
        assert_eq!(*class, TokenizerClass::BertJapaneseTokenizer);
        assert_eq!(merged.word_tokenizer, Some(WordTokenizerKind::Mecab));
        assert_eq!(merged.do_lower_case, Some(true));
    }

    #[test]
    fn test_character_model_from_registry() {
        let loader = FakeLoader::new();
        let engines = Engines::new();
        let overrides = ConfigOverrides::new().with_word_tokenize(false);
        let tokenizer =
            from_registry("cl-tohoku/bert-base-japanese-char", &overrides, &loader, &engines)
                .unwrap();
        assert_eq!(tokenizer.config().subword_tokenizer, SubwordTokenizerKind::Character);
        assert_eq!(tokenizer.tokenize("今日天気").unwrap(), vec!["[UNK]", "[UNK]", "[UNK]", "[UNK]"]);
        assert_eq!(tokenizer.vocab_size(), 8);
    }

    #[test]
    fn test_special_tokens_from_config() {
        let config: Value = serde_json::json!({
            "unk_token": {"content": "<unk>", "lstrip": false},
            "mask_token": "[MASK]",
            "additional_special_tokens": ["<extra>", {"content": "<other>"}, 3]
        });
        let tokens = special_tokens_from(&config, TokenizerClass::AlbertTokenizer);
        assert_eq!(tokens.unk_token, "<unk>");
        assert_eq!(tokens.pad_token, "<pad>");
        assert_eq!(tokens.sep_token, "[SEP]");
        assert_eq!(tokens.additional, vec!["<extra>", "<other>"]);
    }

    #[test]
    fn test_default_special_tokens() {
        assert_eq!(default_special_tokens(TokenizerClass::T5Tokenizer).sep_token, "</s>");
        assert_eq!(default_special_tokens(TokenizerClass::DebertaV2Tokenizer).unk_token, "[UNK]");
    }

    #[test]
    fn test_local_loader_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let loader = LocalLoader::new(dir.path());
        let result = loader.load(
            "cl-tohoku/bert-base-japanese",
            TokenizerClass::BertJapaneseTokenizer,
            &ConfigOverrides::new(),
        );
        assert!(matches!(result, Err(WakachiError::VocabularyNotFound(_))));
    }

    #[test]
    fn test_local_loader_vocabulary() {
        let dir = tempfile::tempdir().unwrap();
        let model_dir = dir.path().join("org/model");
        fs::create_dir_all(&model_dir).unwrap();
        fs::write(model_dir.join("vocab.txt"), "[PAD]\n[UNK]\n今\n日\n").unwrap();
        fs::write(
            model_dir.join("tokenizer_config.json"),
            r#"{"subword_tokenizer_type": "character", "unk_token": "[UNK]"}"#,
        )
        .unwrap();

        let loader = LocalLoader::new(dir.path());
        let loaded = loader
            .load("org/model", TokenizerClass::BertJapaneseTokenizer, &ConfigOverrides::new())
            .unwrap();
        assert_eq!(loaded.subword.kind(), SubwordTokenizerKind::Character);
        assert_eq!(loaded.special_tokens.unk_token, "[UNK]");

        let result = loader.load("org/model", TokenizerClass::T5Tokenizer, &ConfigOverrides::new());
        assert!(matches!(result, Err(WakachiError::VocabularyNotFound(_))));
    }
}
