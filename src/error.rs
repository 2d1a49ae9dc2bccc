//! Error types for the Wakachi library.
//!
//! All fallible operations return [`WakachiError`] through the crate-wide
//! [`Result`] alias. External analyzer engines report failures with the
//! narrower [`AnalyzerError`], which the dictionary segmenter inspects to
//! decide whether its whitespace/quote retry applies.
//!
//! # Examples
//!
//! ```
//! use wakachi::error::{Result, WakachiError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(WakachiError::invalid_configuration("unknown word tokenizer 'foo'"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Wakachi operations.
#[derive(Error, Debug)]
pub enum WakachiError {
    /// I/O errors (vocabulary files, engine pipes, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A required external engine is not installed or could not be started.
    #[error("Unavailable engine: {0}")]
    UnavailableEngine(String),

    /// Unknown kind string, missing required override, or conflicting options.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The morphological analyzer failed even after the retry protocol.
    ///
    /// Legacy implementations terminated the process here. Callers must
    /// abort the request instead of continuing with partial output.
    #[error("Segmentation failure: {0}")]
    SegmentationFailure(String),

    /// A vocabulary or model file required for construction is missing.
    #[error("Vocabulary not found: {0}")]
    VocabularyNotFound(String),

    /// A model identifier whose pipeline is known to be incompatible.
    #[error("Unsupported model: {0}")]
    UnsupportedModel(String),

    /// A recoverable failure reported by an external engine.
    #[error("Engine error: {0}")]
    Engine(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for operations that may fail with WakachiError.
pub type Result<T> = std::result::Result<T, WakachiError>;

impl WakachiError {
    /// Create a new unavailable engine error.
    pub fn unavailable_engine<S: Into<String>>(msg: S) -> Self {
        WakachiError::UnavailableEngine(msg.into())
    }

    /// Create a new invalid configuration error.
    pub fn invalid_configuration<S: Into<String>>(msg: S) -> Self {
        WakachiError::InvalidConfiguration(msg.into())
    }

    /// Create a new segmentation failure.
    pub fn segmentation_failure<S: Into<String>>(msg: S) -> Self {
        WakachiError::SegmentationFailure(msg.into())
    }

    /// Create a new vocabulary not found error.
    pub fn vocabulary_not_found<S: Into<String>>(msg: S) -> Self {
        WakachiError::VocabularyNotFound(msg.into())
    }

    /// Create a new unsupported model error.
    pub fn unsupported_model<S: Into<String>>(msg: S) -> Self {
        WakachiError::UnsupportedModel(msg.into())
    }

    /// Create a new engine error.
    pub fn engine<S: Into<String>>(msg: S) -> Self {
        WakachiError::Engine(msg.into())
    }

    /// Whether the error must abort the current request.
    pub fn is_fatal(&self) -> bool {
        matches!(self, WakachiError::SegmentationFailure(_))
    }
}

/// Failure reported by a morphological analyzer engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyzerError {
    /// The engine could not handle raw whitespace or double quotes in the input.
    #[error("format error: {0}")]
    Format(String),

    /// Any other engine failure.
    #[error("analyzer error: {0}")]
    Engine(String),
}

impl From<AnalyzerError> for WakachiError {
    fn from(err: AnalyzerError) -> Self {
        WakachiError::Engine(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = WakachiError::invalid_configuration("bad kind");
        assert_eq!(error.to_string(), "Invalid configuration: bad kind");

        let error = WakachiError::unavailable_engine("jumanpp");
        assert_eq!(error.to_string(), "Unavailable engine: jumanpp");

        let error = WakachiError::vocabulary_not_found("vocab.txt");
        assert_eq!(error.to_string(), "Vocabulary not found: vocab.txt");
    }

    #[test]
    fn test_only_segmentation_failure_is_fatal() {
        assert!(WakachiError::segmentation_failure("retry failed").is_fatal());
        assert!(!WakachiError::engine("encode failed").is_fatal());
        assert!(!WakachiError::invalid_configuration("x").is_fatal());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let wakachi_error = WakachiError::from(io_error);

        match wakachi_error {
            WakachiError::Io(_) => {}
            _ => panic!("Expected IO error variant"),
        }
    }

    #[test]
    fn test_analyzer_error_conversion() {
        let error: WakachiError = AnalyzerError::Engine("crashed".to_string()).into();
        assert_eq!(error.to_string(), "Engine error: analyzer error: crashed");
    }
}
