//! Staging normalized text in a seekable temporary file.

use std::fs::File;
use std::io::{BufReader, Seek, Write};

use csvfetch_encoding::NormalizedBuffer;

use crate::error::{IngestError, Result};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Writes `buffer` to an anonymous temporary file positioned at offset 0.
///
/// The file has no name on disk and is removed by the OS once the returned
/// reader is dropped. On any failure the partially written file is dropped
/// before returning.
pub(crate) fn stage(buffer: &NormalizedBuffer, strip_bom: bool) -> Result<BufReader<File>> {
    let mut bytes = buffer.as_bytes();
    if strip_bom {
        bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    }

    let file =
        tempfile::tempfile().map_err(|source| IngestError::ResourceUnavailable { source })?;
    let file = fill(file, bytes)?;

    tracing::debug!(bytes = bytes.len(), "Staged normalized buffer");
    Ok(BufReader::new(file))
}

/// Writes `bytes` to `sink` and rewinds it to offset 0.
///
/// `sink` is consumed, so it is dropped before an error is returned.
fn fill<W: Write + Seek>(mut sink: W, bytes: &[u8]) -> Result<W> {
    sink.write_all(bytes)
        .and_then(|()| sink.rewind())
        .map_err(|source| IngestError::ResourceUnavailable { source })?;
    Ok(sink)
}
