//! Long-unit-word segmentation with a statistical engine.

use std::sync::Arc;

use crate::engine::LongUnitWordSegmenter;
use crate::error::Result;
use crate::mainword::{MainWordTokenizer, WordOptions};
use crate::special_tokens::SpecialTokenSet;

/// Flattens the engine's per-sentence word groups into one sequence.
pub struct SpacyLuwTokenizer {
    options: WordOptions,
    segmenter: Arc<dyn LongUnitWordSegmenter>,
}

impl SpacyLuwTokenizer {
    pub fn new(options: WordOptions, segmenter: Arc<dyn LongUnitWordSegmenter>) -> Self {
        Self { options, segmenter }
    }
}

impl MainWordTokenizer for SpacyLuwTokenizer {
    fn tokenize(&self, text: &str, never_split: &SpecialTokenSet) -> Result<Vec<String>> {
        let text = self.options.normalize(text);
        let words = self
            .segmenter
            .segment(&text)?
            .into_iter()
            .flatten()
            .collect();
        Ok(self.options.fold_case(words, never_split))
    }

    fn name(&self) -> &'static str {
        "spacy-luw"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Sentences end at `。`, words at `/`.
    struct SlashSegmenter;

    impl LongUnitWordSegmenter for SlashSegmenter {
        fn segment(&self, text: &str) -> Result<Vec<Vec<String>>> {
            Ok(text
                .split_inclusive('。')
                .map(|sentence| sentence.split('/').map(str::to_string).collect())
                .collect())
        }

        fn name(&self) -> &'static str {
            "slash"
        }
    }

    #[test]
    fn test_sentences_flattened_in_order() {
        let tokenizer = SpacyLuwTokenizer::new(WordOptions::new(true, true), Arc::new(SlashSegmenter));
        let tokens = tokenizer
            .tokenize("国立/国語/研究所/。ＡＩ/です/。", &SpecialTokenSet::new())
            .unwrap();
        assert_eq!(tokens, vec!["国立", "国語", "研究所", "。", "ai", "です", "。"]);
    }
}
