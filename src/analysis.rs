//! Text analysis building blocks shared by the word tokenizers.
//!
//! Char filters rewrite raw text before an engine sees it; token filters
//! post-process the surfaces an engine returns.

pub mod char_filter;
pub mod token_filter;
