//! Error types for encoding detection.

use thiserror::Error;

/// Errors that can occur while normalizing raw input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    /// No candidate encoding accepts the whole input.
    #[error("could not detect encoding of {len}-byte input (tried: {candidates})")]
    Undetected {
        /// Length of the rejected input in bytes.
        len: usize,
        /// Comma-separated names of the candidates that were tried.
        candidates: String,
    },
}

/// Result type for encoding operations.
pub type Result<T> = std::result::Result<T, EncodingError>;
