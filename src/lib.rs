//! # Wakachi
//!
//! Two-stage tokenization of Japanese text for subword language models.
//!
//! ## Features
//!
//! - Pluggable main word tokenizers (normalizer, rule-based, Juman++, MeCab, LUW, Sudachi)
//! - WordPiece, character and subword-model second stages
//! - Special-token protection across both stages
//! - A registry of pretrained model pipelines

pub mod analysis;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod mainword;
pub mod pipeline;
pub mod pretrained;
pub mod registry;
pub mod special_tokens;
pub mod subword;
pub mod vocab;

pub mod prelude {
    pub use crate::config::{
        ConfigOverrides, SubwordTokenizerKind, TokenizerClass, TokenizerConfig, WordTokenizerKind,
    };
    pub use crate::engine::Engines;
    pub use crate::error::{Result, WakachiError};
    pub use crate::pipeline::PipelineTokenizer;
    pub use crate::pretrained::{LocalLoader, PretrainedLoader, from_registry};
    pub use crate::special_tokens::SpecialTokens;
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
