//! Row-at-a-time CSV ingestion for input of unknown encoding.
//!
//! This crate reads delimited text whose character encoding is not known in
//! advance, normalizes it to UTF-8 with [`csvfetch_encoding`], and hands rows
//! out one at a time through a [`RowCursor`].
//!
//! # Features
//!
//! - **Encoding Detection**: ASCII, ISO-2022-JP, UTF-8, EUC-JP and Shift_JIS,
//!   strictly, in a configurable order
//! - **Seekable Staging**: normalized text lives in an anonymous temporary file
//! - **Row Cursor**: one record per fetch, quoted fields and multi-line values
//!   resolved, blank lines reported as empty rows
//! - **Guaranteed Release**: the staging stream is released exactly once, on
//!   end of stream, error, explicit close or drop
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use csvfetch_ingest::{CursorConfig, IngestError, RowCursor};
//!
//! let mut cursor = RowCursor::open_path(Path::new("members.csv"), &CursorConfig::default())?;
//!
//! while let Some(row) = cursor.fetch_row()? {
//!     if row.is_empty() {
//!         continue; // blank line
//!     }
//!     println!("{}", row.join(" | "));
//! }
//! ```

mod config;
mod csv;
mod cursor;
mod error;
mod input;
mod staging;

// === Error Types ===
pub use error::{IngestError, Result};

// === Configuration ===
pub use config::{CursorConfig, MAX_INPUT_SIZE};
pub use csv::Dialect;

// === Cursor ===
pub use cursor::{CursorState, Row, RowCursor};

// === Encoding ===
pub use csvfetch_encoding::{NormalizerConfig, SourceEncoding};
