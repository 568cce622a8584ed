//! Row-at-a-time reading over a staged, normalized stream.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::iter::FusedIterator;
use std::path::Path;

use csvfetch_encoding::{SourceEncoding, normalize_with_config};

use crate::config::CursorConfig;
use crate::csv::{Dialect, Record, read_record};
use crate::error::{IngestError, Result};
use crate::input::{check_input_size, read_file_with_limit};
use crate::staging::stage;

/// One CSV row. A blank line yields an empty row.
pub type Row = Vec<String>;

#[cfg(unix)]
const INVALID_HANDLE_CODE: i32 = 9; // EBADF
#[cfg(windows)]
const INVALID_HANDLE_CODE: i32 = 6; // ERROR_INVALID_HANDLE
#[cfg(not(any(unix, windows)))]
const INVALID_HANDLE_CODE: i32 = -1;

/// Lifecycle of an opened cursor.
///
/// There is no uninitialized or failed state: a cursor only exists once
/// [`RowCursor::open`] has succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorState {
    /// The stream is open and rows can be fetched.
    Ready,
    /// The stream has been released.
    Closed,
}

/// Pull-based CSV reader over input of unknown encoding.
///
/// Opening detects the input encoding, stages the UTF-8 text in an anonymous
/// temporary file and positions the cursor at its start. Each
/// [`fetch_row`](Self::fetch_row) parses one record. The stream is released
/// exactly once: at end of stream, on a read error, on [`close`](Self::close),
/// or when the cursor is dropped, whichever comes first.
///
/// # Example
///
/// ```
/// use csvfetch_ingest::RowCursor;
///
/// let mut cursor = RowCursor::open(b"a,\"b,c\",d\n\n").unwrap();
///
/// assert_eq!(cursor.fetch_row().unwrap(), Some(vec!["a".into(), "b,c".into(), "d".into()]));
/// assert_eq!(cursor.fetch_row().unwrap(), Some(vec![]));
/// assert_eq!(cursor.fetch_row().unwrap(), None);
/// assert!(!cursor.is_ready());
/// ```
#[derive(Debug)]
pub struct RowCursor<R: BufRead = BufReader<File>> {
    stream: Option<R>,
    state: CursorState,
    dialect: Dialect,
    source: SourceEncoding,
    offset: u64,
    rows_fetched: u64,
}

impl RowCursor {
    /// Opens a cursor over `raw` with the default configuration.
    pub fn open(raw: &[u8]) -> Result<Self> {
        Self::open_with_config(raw, &CursorConfig::default())
    }

    /// Opens a cursor over `raw`.
    ///
    /// # Errors
    ///
    /// - [`IngestError::InputTooLarge`] if `raw` exceeds the size limit
    /// - [`IngestError::EncodingUndetected`] if no candidate encoding fits
    /// - [`IngestError::ResourceUnavailable`] if the staging file cannot be
    ///   created or written
    ///
    /// No stream is left allocated on error.
    pub fn open_with_config(raw: &[u8], config: &CursorConfig) -> Result<Self> {
        check_input_size(raw.len() as u64, config.max_input_bytes)?;

        let buffer = normalize_with_config(raw, &config.normalizer)?;
        let stream = stage(&buffer, config.strip_bom)?;

        tracing::debug!(
            encoding = %buffer.source_encoding(),
            bytes = buffer.len(),
            "Opened row cursor"
        );
        Ok(Self::from_reader(
            stream,
            buffer.source_encoding(),
            config.dialect,
        ))
    }

    /// Reads the file at `path` and opens a cursor over its contents.
    pub fn open_path(path: &Path, config: &CursorConfig) -> Result<Self> {
        let raw = read_file_with_limit(path, config.max_input_bytes)?;
        Self::open_with_config(&raw, config)
    }
}

impl<R: BufRead> RowCursor<R> {
    pub(crate) fn from_reader(stream: R, source: SourceEncoding, dialect: Dialect) -> Self {
        Self {
            stream: Some(stream),
            state: CursorState::Ready,
            dialect,
            source,
            offset: 0,
            rows_fetched: 0,
        }
    }

    pub fn state(&self) -> CursorState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == CursorState::Ready
    }

    /// The encoding the input was detected as.
    pub fn source_encoding(&self) -> SourceEncoding {
        self.source
    }

    /// Bytes of the staged stream consumed by fetched rows.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn rows_fetched(&self) -> u64 {
        self.rows_fetched
    }

    /// Fetches the next row.
    ///
    /// Returns `Ok(None)` at end of stream, after which the cursor is closed.
    /// A read fault closes the cursor and is returned as
    /// [`IngestError::InvalidHandle`] when the OS rejected the handle itself,
    /// or [`IngestError::Fetch`] otherwise. Fetching from a closed cursor
    /// returns [`IngestError::CursorClosed`] without touching the stream.
    pub fn fetch_row(&mut self) -> Result<Option<Row>> {
        let Some(stream) = self.stream.as_mut() else {
            return Err(IngestError::CursorClosed);
        };

        match read_record(stream, self.dialect) {
            Ok(Some(record)) => {
                self.offset += record.bytes as u64;
                self.rows_fetched += 1;
                let row = into_row(record);
                tracing::trace!(row = self.rows_fetched, fields = row.len(), "Fetched row");
                Ok(Some(row))
            }
            Ok(None) => {
                tracing::debug!(rows = self.rows_fetched, "Reached end of stream");
                self.close();
                Ok(None)
            }
            Err(source) => {
                let offset = self.offset;
                self.close();
                Err(read_error(offset, source))
            }
        }
    }

    /// Releases the stream if it is still open.
    ///
    /// Returns true if this call released an open stream and false if there
    /// was nothing left to release. Calling it again is a no-op.
    pub fn close(&mut self) -> bool {
        self.state = CursorState::Closed;
        match self.stream.take() {
            Some(stream) => {
                drop(stream);
                tracing::debug!(
                    rows = self.rows_fetched,
                    offset = self.offset,
                    "Released cursor stream"
                );
                true
            }
            None => false,
        }
    }
}

impl<R: BufRead> Drop for RowCursor<R> {
    fn drop(&mut self) {
        self.close();
    }
}

impl<R: BufRead> Iterator for RowCursor<R> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.is_ready() {
            return None;
        }
        self.fetch_row().transpose()
    }
}

impl<R: BufRead> FusedIterator for RowCursor<R> {}

/// A lone absent field is a blank line and becomes an empty row.
fn into_row(record: Record) -> Row {
    if matches!(record.fields.as_slice(), [None]) {
        return Vec::new();
    }
    record
        .fields
        .into_iter()
        .map(Option::unwrap_or_default)
        .collect()
}

fn read_error(offset: u64, source: io::Error) -> IngestError {
    if source.raw_os_error() == Some(INVALID_HANDLE_CODE) {
        tracing::warn!(offset, error = %source, "Stream handle rejected while reading row");
        IngestError::InvalidHandle { offset, source }
    } else {
        tracing::warn!(offset, error = %source, "Failed to read row");
        IngestError::Fetch { offset, source }
    }
}
