//! Normalization-only word tokenizer.
//!
//! Used as the word stage of pipelines whose subword model handles the
//! segmentation on its own.

use crate::error::Result;
use crate::mainword::{MainWordTokenizer, WordOptions};
use crate::special_tokens::SpecialTokenSet;

/// Returns the normalized text as a single token.
#[derive(Clone, Debug, Default)]
pub struct NormalizerTokenizer {
    options: WordOptions,
}

impl NormalizerTokenizer {
    pub fn new(options: WordOptions) -> Self {
        Self { options }
    }
}

impl MainWordTokenizer for NormalizerTokenizer {
    fn tokenize(&self, text: &str, never_split: &SpecialTokenSet) -> Result<Vec<String>> {
        let text = self.options.normalize(text).into_owned();
        Ok(self.options.fold_case(vec![text], never_split))
    }

    fn name(&self) -> &'static str {
        "normalizer"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_token() {
        let tokenizer = NormalizerTokenizer::new(WordOptions::new(false, true));
        let tokens = tokenizer
            .tokenize("ｶﾞｷﾞｸﾞ １２３ ＡＢＣ", &SpecialTokenSet::new())
            .unwrap();
        assert_eq!(tokens, vec!["ガギグ 123 ABC"]);
    }

    #[test]
    fn test_nfkc_idempotence() {
        let tokenizer = NormalizerTokenizer::new(WordOptions::new(false, true));
        let never_split = SpecialTokenSet::new();
        for text in ["①②③", "ﾊﾝｶｸ", "㍻", "ﬁ", "Ｈｅｌｌｏ　世界", ""] {
            let once = tokenizer.tokenize(text, &never_split).unwrap();
            let twice = tokenizer.tokenize(&once[0], &never_split).unwrap();
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_lower_case() {
        let tokenizer = NormalizerTokenizer::new(WordOptions::new(true, false));
        let tokens = tokenizer.tokenize("Hello World", &SpecialTokenSet::new()).unwrap();
        assert_eq!(tokens, vec!["hello world"]);
    }

    #[test]
    fn test_protected_text_keeps_case() {
        let tokenizer = NormalizerTokenizer::new(WordOptions::new(true, true));
        let never_split: SpecialTokenSet = ["[MASK]"].into_iter().collect();
        let tokens = tokenizer.tokenize("[MASK]", &never_split).unwrap();
        assert_eq!(tokens, vec!["[MASK]"]);
    }

    #[test]
    fn test_without_normalization() {
        let tokenizer = NormalizerTokenizer::new(WordOptions::new(false, false));
        let tokens = tokenizer.tokenize("ＡＢＣ", &SpecialTokenSet::new()).unwrap();
        assert_eq!(tokens, vec!["ＡＢＣ"]);
    }
}
