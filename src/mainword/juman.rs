//! Juman-style dictionary segmentation.
//!
//! Before the analyzer is called, a leading `#` or `@` becomes its
//! full-width form and oversized input may be skipped. If the analyzer
//! rejects the text with a format error, double quotes become `”` and
//! whitespace runs become `_`, and the analysis is retried once. A second
//! failure is a [`SegmentationFailure`](crate::error::WakachiError::SegmentationFailure).

use std::sync::Arc;

use log::{info, warn};

use crate::analysis::char_filter::CharFilter;
use crate::analysis::char_filter::pattern_replace::PatternReplaceCharFilter;
use crate::analysis::token_filter::Filter;
use crate::analysis::token_filter::replace::CharReplaceFilter;
use crate::analysis::token_filter::stop::StopFilter;
use crate::engine::MorphologicalAnalyzer;
use crate::error::{AnalyzerError, Result, WakachiError};
use crate::mainword::{MainWordTokenizer, WordOptions};
use crate::special_tokens::SpecialTokenSet;

/// Inputs longer than this many UTF-8 bytes may be skipped.
pub const MAX_INPUT_BYTES: usize = 4096;

const WHITESPACE_PLACEHOLDER: &str = "_";
const QUOTE_PLACEHOLDER: char = '”';

/// Word tokenizer delegating to a Juman-style morphological analyzer.
pub struct JumanTokenizer {
    options: WordOptions,
    analyzer: Arc<dyn MorphologicalAnalyzer>,
    ignore_max_byte_error: bool,
    leading_hash: PatternReplaceCharFilter,
    leading_at: PatternReplaceCharFilter,
    quotes: PatternReplaceCharFilter,
    whitespace: PatternReplaceCharFilter,
    placeholders: StopFilter,
    restore_quotes: CharReplaceFilter,
}

impl JumanTokenizer {
    pub fn new(
        options: WordOptions,
        analyzer: Arc<dyn MorphologicalAnalyzer>,
        ignore_max_byte_error: bool,
    ) -> Result<Self> {
        Ok(Self {
            options,
            analyzer,
            ignore_max_byte_error,
            leading_hash: PatternReplaceCharFilter::new("^#", "＃")?,
            leading_at: PatternReplaceCharFilter::new("^@", "＠")?,
            quotes: PatternReplaceCharFilter::new("\"", "”")?,
            whitespace: PatternReplaceCharFilter::new(r"\s+", WHITESPACE_PLACEHOLDER)?,
            placeholders: StopFilter::from_words([WHITESPACE_PLACEHOLDER]),
            restore_quotes: CharReplaceFilter::new(QUOTE_PLACEHOLDER, '"'),
        })
    }

    /// Analyze with the one-shot quote/whitespace retry.
    fn analyze_with_retry(&self, text: &str) -> Result<(Vec<String>, bool, bool)> {
        match self.analyzer.analyze(text) {
            Ok(surfaces) => Ok((surfaces, false, false)),
            Err(AnalyzerError::Format(reason)) => {
                let use_quote = text.contains('"');
                let mut retry = if use_quote {
                    self.quotes.filter(text).into_owned()
                } else {
                    text.to_string()
                };
                let use_underscore = self.whitespace.is_match(&retry);
                if use_underscore {
                    retry = self.whitespace.filter(&retry).into_owned();
                }
                info!(
                    "retrying analysis with placeholders (quote: {use_quote}, whitespace: {use_underscore}): {reason}"
                );

                let surfaces = self.analyzer.analyze(&retry).map_err(|e| {
                    WakachiError::segmentation_failure(format!(
                        "{} failed after retry on '{}': {}",
                        self.analyzer.name(),
                        retry,
                        e
                    ))
                })?;
                Ok((surfaces, use_quote, use_underscore))
            }
            Err(e) => Err(WakachiError::segmentation_failure(format!(
                "{} failed on '{}': {}",
                self.analyzer.name(),
                text,
                e
            ))),
        }
    }
}

impl MainWordTokenizer for JumanTokenizer {
    fn tokenize(&self, text: &str, never_split: &SpecialTokenSet) -> Result<Vec<String>> {
        let text = self.options.normalize(text);
        let text = self.leading_hash.filter(&text).into_owned();
        let text = self.leading_at.filter(&text).into_owned();

        if self.ignore_max_byte_error && text.len() > MAX_INPUT_BYTES {
            warn!(
                "skipping analysis of {} bytes of input (limit {})",
                text.len(),
                MAX_INPUT_BYTES
            );
            return Ok(Vec::new());
        }

        let (surfaces, use_quote, use_underscore) = self.analyze_with_retry(&text)?;

        let mut tokens = self.options.fold_case(surfaces, never_split);
        if use_underscore {
            tokens = self.placeholders.filter(tokens, never_split);
        }
        if use_quote {
            tokens = self.restore_quotes.filter(tokens, never_split);
        }
        Ok(tokens)
    }

    fn name(&self) -> &'static str {
        "juman"
    }
}
