use std::fs;
use std::path::Path;

use tempfile::TempDir;

use wakachi::config::{
    ConfigOverrides, SubwordTokenizerKind, TokenizerClass, WordTokenizerKind,
};
use wakachi::engine::Engines;
use wakachi::error::{Result, WakachiError};
use wakachi::pretrained::{LocalLoader, from_registry};
use wakachi::registry;

fn write_model(root: &Path, name: &str, vocab: &[&str], tokenizer_config: Option<&str>) {
    let dir = root.join(name);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("vocab.txt"), vocab.join("\n") + "\n").unwrap();
    if let Some(config) = tokenizer_config {
        fs::write(dir.join("tokenizer_config.json"), config).unwrap();
    }
}

#[test]
fn registry_lists_every_family() {
    let names = registry::model_names();
    for prefix in ["cl-tohoku/", "izumi-lab/", "ken11/", "ku-nlp/", "nlp-waseda/", "rinna/"] {
        assert!(names.iter().any(|name| name.starts_with(prefix)), "{prefix}");
    }
    assert!(names.contains(&"izumi-lab/electra-base-japanese-generator"));
}

#[test]
fn char_model_loads_from_local_directory() -> Result<()> {
    let root = TempDir::new().unwrap();
    write_model(
        root.path(),
        "cl-tohoku/bert-base-japanese-char",
        &["[PAD]", "[UNK]", "[CLS]", "[SEP]", "[MASK]", "今", "日", "は"],
        Some(r#"{"do_lower_case": false, "word_tokenizer_type": "mecab", "subword_tokenizer_type": "character"}"#),
    );

    let overrides = ConfigOverrides::new().with_word_tokenize(false);
    let tokenizer = from_registry(
        "cl-tohoku/bert-base-japanese-char",
        &overrides,
        &LocalLoader::new(root.path()),
        &Engines::new(),
    )?;

    assert_eq!(tokenizer.config().subword_tokenizer, SubwordTokenizerKind::Character);
    assert_eq!(tokenizer.config().word_tokenizer, WordTokenizerKind::Disabled);
    assert_eq!(tokenizer.tokenize("[CLS]今日は晴[SEP]")?, vec!["[CLS]", "今", "日", "は", "[UNK]", "[SEP]"]);
    assert_eq!(tokenizer.encode("今日", true)?, vec![2, 5, 6, 3]);
    Ok(())
}

#[test]
fn unknown_local_model_with_explicit_settings() -> Result<()> {
    let root = TempDir::new().unwrap();
    write_model(
        root.path(),
        "local/bert",
        &["<unk>", "<s>", "</s>", "hello", "##s", ","],
        Some(r#"{"unk_token": {"content": "<unk>"}, "cls_token": "<s>", "sep_token": "</s>"}"#),
    );

    let overrides = ConfigOverrides::new()
        .with_word_tokenizer(WordTokenizerKind::Basic)
        .with_tokenizer_class(TokenizerClass::BertTokenizer);
    let tokenizer = from_registry(
        "local/bert",
        &overrides,
        &LocalLoader::new(root.path()),
        &Engines::new(),
    )?;

    assert_eq!(tokenizer.special_tokens().unk_token, "<unk>");
    assert_eq!(tokenizer.tokenize("hellos, bye")?, vec!["hello", "##s", ",", "<unk>"]);
    assert_eq!(tokenizer.encode("hello", true)?, vec![1, 3, 2]);
    Ok(())
}

#[test]
fn unknown_model_without_settings_is_rejected() {
    let root = TempDir::new().unwrap();
    let result = from_registry(
        "someone/model",
        &ConfigOverrides::new().with_tokenizer_class(TokenizerClass::BertTokenizer),
        &LocalLoader::new(root.path()),
        &Engines::new(),
    );
    assert!(matches!(result, Err(WakachiError::InvalidConfiguration(_))));
}

#[test]
fn legacy_char_wwm_models_are_rejected() {
    let root = TempDir::new().unwrap();
    for name in registry::UNSUPPORTED_MODELS {
        let result = from_registry(
            name,
            &ConfigOverrides::new(),
            &LocalLoader::new(root.path()),
            &Engines::new(),
        );
        assert!(matches!(result, Err(WakachiError::UnsupportedModel(_))));
    }
}

#[test]
fn piece_model_class_needs_its_model_file() {
    let root = TempDir::new().unwrap();
    write_model(root.path(), "izumi-lab/deberta-v2-small-japanese", &["[UNK]"], None);

    let result = from_registry(
        "izumi-lab/deberta-v2-small-japanese",
        &ConfigOverrides::new(),
        &LocalLoader::new(root.path()),
        &Engines::new(),
    );
    assert!(matches!(result, Err(WakachiError::VocabularyNotFound(_))));
}

#[test]
fn missing_model_directory() {
    let root = TempDir::new().unwrap();
    let result = from_registry(
        "cl-tohoku/bert-base-japanese-char",
        &ConfigOverrides::new(),
        &LocalLoader::new(root.path()),
        &Engines::new(),
    );
    assert!(matches!(result, Err(WakachiError::VocabularyNotFound(_))));
}
