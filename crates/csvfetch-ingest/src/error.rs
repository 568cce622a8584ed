//! Error types for CSV ingestion.

use std::path::PathBuf;

use csvfetch_encoding::EncodingError;
use thiserror::Error;

/// Errors that can occur while opening or reading a [`crate::RowCursor`].
#[derive(Debug, Error)]
pub enum IngestError {
    // === Open Errors ===
    /// No candidate encoding accepts the input.
    #[error("could not detect encoding of {len}-byte input (tried: {candidates})")]
    EncodingUndetected { len: usize, candidates: String },

    /// The staging stream could not be allocated or filled.
    #[error("staging stream unavailable: {source}")]
    ResourceUnavailable {
        #[source]
        source: std::io::Error,
    },

    /// Input exceeds the configured size limit.
    #[error("input too large: {size} bytes (max {max_size})")]
    InputTooLarge { size: u64, max_size: u64 },

    // === File System Errors ===
    /// CSV file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Fetch Errors ===
    /// I/O fault while reading a row.
    #[error("failed to read row at byte {offset}: {source}")]
    Fetch {
        offset: u64,
        #[source]
        source: std::io::Error,
    },

    /// The stream handle was rejected by the operating system.
    ///
    /// This signals a defect in the environment or the caller, not bad data.
    #[error("invalid stream handle at byte {offset}")]
    InvalidHandle {
        offset: u64,
        #[source]
        source: std::io::Error,
    },

    /// The cursor has already been closed.
    #[error("cursor is closed")]
    CursorClosed,
}

impl IngestError {
    /// Returns true for the invalid-handle class, which callers should
    /// propagate rather than recover from.
    pub fn is_invalid_handle(&self) -> bool {
        matches!(self, Self::InvalidHandle { .. })
    }
}

impl From<EncodingError> for IngestError {
    fn from(err: EncodingError) -> Self {
        match err {
            EncodingError::Undetected { len, candidates } => {
                Self::EncodingUndetected { len, candidates }
            }
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
