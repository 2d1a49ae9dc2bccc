//! Token filter implementations for post-processing engine output.
//!
//! # Available Filters
//!
//! - [`lowercase::LowercaseFilter`] - Lower-cases tokens outside the never-split set
//! - [`stop::StopFilter`] - Removes placeholder or blank tokens
//! - [`replace::CharReplaceFilter`] - Substitutes one character inside every token
//!
//! # Examples
//!
//! ```
//! use wakachi::analysis::token_filter::Filter;
//! use wakachi::analysis::token_filter::lowercase::LowercaseFilter;
//! use wakachi::special_tokens::SpecialTokenSet;
//!
//! let protected: SpecialTokenSet = ["[MASK]"].into_iter().collect();
//! let tokens = vec!["Hello".to_string(), "[MASK]".to_string()];
//! let filtered = LowercaseFilter::new().filter(tokens, &protected);
//!
//! assert_eq!(filtered, vec!["hello", "[MASK]"]);
//! ```

use crate::special_tokens::SpecialTokenSet;

/// Trait for filters that transform a sequence of token strings.
///
/// `protected` is the caller's never-split set; filters that change token
/// text must leave its members untouched.
pub trait Filter: Send + Sync {
    /// Apply this filter to a token sequence.
    fn filter(&self, tokens: Vec<String>, protected: &SpecialTokenSet) -> Vec<String>;

    /// Get the name of this filter (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod lowercase;
pub mod replace;
pub mod stop;
