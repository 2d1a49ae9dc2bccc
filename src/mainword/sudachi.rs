//! Sudachi-style segmentation with a selectable split mode.

use std::sync::Arc;

use crate::config::{SplitMode, WordForm};
use crate::engine::{Morpheme, SplitSegmenter};
use crate::error::Result;
use crate::mainword::{MainWordTokenizer, WordOptions};
use crate::special_tokens::SpecialTokenSet;

/// Word tokenizer emitting one form of each morpheme.
pub struct SudachiTokenizer {
    options: WordOptions,
    segmenter: Arc<dyn SplitSegmenter>,
    split_mode: SplitMode,
    word_form: WordForm,
}

impl SudachiTokenizer {
    pub fn new(
        options: WordOptions,
        segmenter: Arc<dyn SplitSegmenter>,
        split_mode: SplitMode,
        word_form: WordForm,
    ) -> Self {
        Self {
            options,
            segmenter,
            split_mode,
            word_form,
        }
    }

    pub fn split_mode(&self) -> SplitMode {
        self.split_mode
    }

    fn format(&self, morpheme: Morpheme) -> String {
        match self.word_form {
            WordForm::Surface => morpheme.surface,
            WordForm::Dictionary => morpheme.dictionary_form,
            WordForm::Normalized => morpheme.normalized_form,
        }
    }
}

impl MainWordTokenizer for SudachiTokenizer {
    fn tokenize(&self, text: &str, never_split: &SpecialTokenSet) -> Result<Vec<String>> {
        let text = self.options.normalize(text);
        let words = self
            .segmenter
            .segment(&text, self.split_mode)?
            .into_iter()
            .map(|morpheme| self.format(morpheme))
            .collect();
        Ok(self.options.fold_case(words, never_split))
    }

    fn name(&self) -> &'static str {
        "sudachi"
    }
}
