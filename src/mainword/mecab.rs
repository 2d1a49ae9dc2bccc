//! MeCab-format dictionary segmentation.

use std::sync::Arc;

use crate::engine::MorphologicalAnalyzer;
use crate::error::{Result, WakachiError};
use crate::mainword::{MainWordTokenizer, WordOptions};
use crate::special_tokens::SpecialTokenSet;

/// Word tokenizer over a MeCab-compatible analyzer.
///
/// Unlike [`JumanTokenizer`](crate::mainword::juman::JumanTokenizer) there is
/// no placeholder retry; any analyzer error is returned as-is.
pub struct MecabTokenizer {
    options: WordOptions,
    analyzer: Arc<dyn MorphologicalAnalyzer>,
}

impl MecabTokenizer {
    pub fn new(options: WordOptions, analyzer: Arc<dyn MorphologicalAnalyzer>) -> Self {
        Self { options, analyzer }
    }
}

impl MainWordTokenizer for MecabTokenizer {
    fn tokenize(&self, text: &str, never_split: &SpecialTokenSet) -> Result<Vec<String>> {
        let text = self.options.normalize(text);
        let surfaces = self.analyzer.analyze(&text).map_err(WakachiError::from)?;
        let surfaces = surfaces
            .into_iter()
            .filter(|surface| !surface.trim().is_empty())
            .collect();
        Ok(self.options.fold_case(surfaces, never_split))
    }

    fn name(&self) -> &'static str {
        "mecab"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalyzerError;

    struct SpaceAnalyzer;

    impl MorphologicalAnalyzer for SpaceAnalyzer {
        fn analyze(&self, text: &str) -> std::result::Result<Vec<String>, AnalyzerError> {
            Ok(text.split('|').map(str::to_string).collect())
        }

        fn name(&self) -> &'static str {
            "space"
        }
    }

    #[test]
    fn test_blank_surfaces_dropped() {
        let tokenizer = MecabTokenizer::new(WordOptions::new(true, true), Arc::new(SpaceAnalyzer));
        let tokens = tokenizer
            .tokenize("ＮＨＫ|　|放送|[CLS]", &["[CLS]"].into_iter().collect())
            .unwrap();
        assert_eq!(tokens, vec!["nhk", "放送", "[CLS]"]);
    }
}
