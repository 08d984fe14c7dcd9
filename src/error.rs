//! Error types
//!
//! Extraction itself never fails: fragments that cannot be used are skipped
//! and classified with [`SkipReason`]. Only the boundary (decoding requests,
//! loading configuration, crossing the C ABI) can produce a
//! [`PriceExtractionError`].

use std::fmt;

use thiserror::Error;

/// Errors raised outside the extraction engine proper.
#[derive(Debug, Error)]
pub enum PriceExtractionError {
    /// A required pointer argument was null
    #[error("{0} is null")]
    NullArgument(&'static str),

    /// Input bytes were not valid UTF-8
    #[error("invalid UTF-8 in {0}")]
    InvalidUtf8(&'static str),

    /// Request or payload JSON could not be decoded
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Settings file or environment overrides were unusable
    #[error("config error: {0}")]
    Config(#[from] ::config::ConfigError),
}

/// Result type alias for boundary operations.
pub type Result<T> = std::result::Result<T, PriceExtractionError>;

/// Why a fragment contributed nothing to the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Candidate did not have the currency+amount shape, or its marker is unknown
    ParseSkip,
    /// Field absent or empty
    EmptyInput,
    /// Ad title was neither a string nor a `{visible, hidden}` record
    AmbiguousShape,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SkipReason::ParseSkip => "parse_skip",
            SkipReason::EmptyInput => "empty_input",
            SkipReason::AmbiguousShape => "ambiguous_shape",
        };
        f.write_str(label)
    }
}
