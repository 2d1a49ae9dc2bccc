//! Char filter implementations for text normalization.
//!
//! These filters pre-process the text string before it is handed to a
//! segmentation engine.
//!
//! # Available Filters
//!
//! - [`unicode_normalize::UnicodeNormalizationCharFilter`] - Unicode normalization (NFC, NFKC, etc.)
//! - [`pattern_replace::PatternReplaceCharFilter`] - Regex-based replacement
//!
//! # Examples
//!
//! ```
//! use wakachi::analysis::char_filter::CharFilter;
//! use wakachi::analysis::char_filter::unicode_normalize::{
//!     NormalizationForm, UnicodeNormalizationCharFilter,
//! };
//!
//! let filter = UnicodeNormalizationCharFilter::new(NormalizationForm::NFKC);
//! assert_eq!(filter.filter("ＡＢＣ①"), "ABC1");
//! ```

use std::borrow::Cow;

/// Trait for character filters that transform text before tokenization.
///
/// Filters borrow the input when they leave it unchanged.
pub trait CharFilter: Send + Sync {
    /// Apply this filter to the input text.
    fn filter<'a>(&self, input: &'a str) -> Cow<'a, str>;

    /// Get the name of this char filter.
    fn name(&self) -> &'static str;
}

pub mod pattern_replace;
pub mod unicode_normalize;
