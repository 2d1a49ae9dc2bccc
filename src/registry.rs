//! Known pretrained models and the pipeline settings they were trained with.
//!
//! The table is built once on first access and never changes afterwards.
//! Keys are matched exactly.

use std::sync::LazyLock;

use ahash::AHashMap;
use log::debug;

use crate::config::{
    ConfigOverrides, SubwordTokenizerKind, TokenizerClass, WordTokenizerKind,
};

/// Models whose tokenizers are published under a different pipeline and
/// cannot be reproduced here.
pub const UNSUPPORTED_MODELS: [&str; 2] = [
    "ku-nlp/roberta-base-japanese-char-wwm",
    "ku-nlp/roberta-large-japanese-char-wwm",
];

const IZUMI_LAB_MODELS: [&str; 12] = [
    "bert-small-japanese",
    "bert-small-japanese-fin",
    "electra-base-japanese-discriminator",
    "electra-base-japanese-generator",
    "electra-small-japanese-discriminator",
    "electra-small-japanese-fin-discriminator",
    "electra-small-japanese-fin-generator",
    "electra-small-japanese-generator",
    "electra-small-paper-japanese-discriminator",
    "electra-small-paper-japanese-fin-discriminator",
    "electra-small-paper-japanese-fin-generator",
    "electra-small-paper-japanese-generator",
];

fn mecab(class: TokenizerClass, dic: &str) -> ConfigOverrides {
    ConfigOverrides::new()
        .with_word_tokenizer(WordTokenizerKind::Mecab)
        .with_tokenizer_class(class)
        .with_mecab_dic(dic)
}

fn mecab_char() -> ConfigOverrides {
    ConfigOverrides::new()
        .with_lower_case(false)
        .with_word_tokenizer(WordTokenizerKind::Mecab)
        .with_tokenizer_class(TokenizerClass::BertJapaneseTokenizer)
        .with_subword_tokenizer(SubwordTokenizerKind::Character)
}

fn juman_whole_text(class: TokenizerClass) -> ConfigOverrides {
    ConfigOverrides::new()
        .with_word_tokenizer(WordTokenizerKind::Juman)
        .with_tokenizer_class(class)
        .with_subword_by_word(false)
}

fn normalizer(class: TokenizerClass) -> ConfigOverrides {
    ConfigOverrides::new()
        .with_word_tokenizer(WordTokenizerKind::Normalizer)
        .with_tokenizer_class(class)
}

static REGISTRY: LazyLock<AHashMap<String, ConfigOverrides>> = LazyLock::new(|| {
    use TokenizerClass::*;

    let mut map: AHashMap<String, ConfigOverrides> = [
        ("cl-tohoku/bert-base-japanese", mecab(BertJapaneseTokenizer, "ipadic")),
        ("cl-tohoku/bert-base-japanese-v2", mecab(BertJapaneseTokenizer, "unidic_lite")),
        (
            "cl-tohoku/bert-base-japanese-whole-word-masking",
            mecab(BertJapaneseTokenizer, "ipadic"),
        ),
        ("cl-tohoku/bert-base-japanese-char", mecab_char()),
        ("cl-tohoku/bert-base-japanese-char-whole-word-masking", mecab_char()),
        ("cl-tohoku/bert-large-japanese", mecab(BertJapaneseTokenizer, "unidic_lite")),
        ("izumi-lab/deberta-v2-base-japanese", normalizer(DebertaV2Tokenizer)),
        ("izumi-lab/deberta-v2-small-japanese", normalizer(DebertaV2Tokenizer)),
        (
            "ken11/albert-base-japanese-v1-with-japanese-tokenizer",
            mecab(BertJapaneseTokenizer, "ipadic"),
        ),
        ("ku-nlp/deberta-v2-base-japanese", juman_whole_text(DebertaV2Tokenizer)),
        ("ku-nlp/deberta-v2-large-japanese", juman_whole_text(DebertaV2Tokenizer)),
        ("ku-nlp/deberta-v2-tiny-japanese", juman_whole_text(DebertaV2Tokenizer)),
        ("nlp-waseda/roberta-base-japanese", juman_whole_text(AlbertTokenizer)),
        ("nlp-waseda/roberta-large-japanese", juman_whole_text(AlbertTokenizer)),
        ("nlp-waseda/roberta-large-japanese-seq512", juman_whole_text(AlbertTokenizer)),
        (
            "rinna/japanese-roberta-base",
            ConfigOverrides::new()
                .with_word_tokenize(false)
                .with_word_tokenizer(WordTokenizerKind::Disabled)
                .with_tokenizer_class(T5Tokenizer),
        ),
    ]
    .into_iter()
    .map(|(name, overrides)| (name.to_string(), overrides))
    .collect();

    map.extend(IZUMI_LAB_MODELS.iter().map(|model| {
        (
            format!("izumi-lab/{model}"),
            mecab(BertJapaneseTokenizer, "ipadic"),
        )
    }));

    debug!("model registry initialized with {} entries", map.len());
    map
});

/// The stored settings for `name`, if it is a known model.
pub fn resolve(name: &str) -> Option<&'static ConfigOverrides> {
    REGISTRY.get(name)
}

/// All registered model names, sorted.
pub fn model_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = REGISTRY.keys().map(String::as_str).collect();
    names.sort_unstable();
    names
}

/// Whether `name` is one of the rejected legacy identifiers.
pub fn is_unsupported(name: &str) -> bool {
    UNSUPPORTED_MODELS.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_size() {
        assert_eq!(model_names().len(), 16 + IZUMI_LAB_MODELS.len());
    }

    #[test]
    fn test_resolve_known_models() {
        let entry = resolve("cl-tohoku/bert-base-japanese-v2").unwrap();
        assert_eq!(entry.word_tokenizer, Some(WordTokenizerKind::Mecab));
        assert_eq!(entry.mecab_dic.as_deref(), Some("unidic_lite"));

        let entry = resolve("ku-nlp/deberta-v2-base-japanese").unwrap();
        assert_eq!(entry.word_tokenizer, Some(WordTokenizerKind::Juman));
        assert_eq!(entry.tokenizer_class, Some(TokenizerClass::DebertaV2Tokenizer));
        assert_eq!(entry.do_subword_by_word, Some(false));

        let entry = resolve("rinna/japanese-roberta-base").unwrap();
        assert_eq!(entry.do_word_tokenize, Some(false));
        assert_eq!(entry.tokenizer_class, Some(TokenizerClass::T5Tokenizer));

        let entry = resolve("cl-tohoku/bert-base-japanese-char").unwrap();
        assert_eq!(entry.subword_tokenizer, Some(SubwordTokenizerKind::Character));
        assert_eq!(entry.do_lower_case, Some(false));
    }

    #[test]
    fn test_generated_family() {
        let entry = resolve("izumi-lab/electra-small-paper-japanese-fin-generator").unwrap();
        assert_eq!(entry.word_tokenizer, Some(WordTokenizerKind::Mecab));
        assert_eq!(entry.tokenizer_class, Some(TokenizerClass::BertJapaneseTokenizer));
        assert_eq!(entry.mecab_dic.as_deref(), Some("ipadic"));
    }

    #[test]
    fn test_every_listed_name_resolves() {
        for name in model_names() {
            assert!(resolve(name).is_some(), "{name}");
        }
        assert!(resolve("").is_none());
    }

    #[test]
    fn test_exact_match_only() {
        assert!(resolve("CL-TOHOKU/bert-base-japanese").is_none());
        assert!(resolve("cl-tohoku/bert-base-japanese ").is_none());
    }

    #[test]
    fn test_model_names_sorted() {
        let names = model_names();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        assert!(names.contains(&"ken11/albert-base-japanese-v1-with-japanese-tokenizer"));
    }

    #[test]
    fn test_unsupported_models() {
        assert!(is_unsupported("ku-nlp/roberta-base-japanese-char-wwm"));
        assert!(!is_unsupported("ku-nlp/deberta-v2-base-japanese"));
        for name in UNSUPPORTED_MODELS {
            assert!(resolve(name).is_none());
        }
    }
}
