//! Raw input acquisition and size limits.

use std::path::Path;

use crate::error::{IngestError, Result};

/// Maps an I/O error on `path` to the matching ingest error.
fn file_error(path: &Path, err: std::io::Error) -> IngestError {
    if err.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: err,
        }
    }
}

/// Rejects inputs longer than `max_size` bytes.
pub(crate) fn check_input_size(size: u64, max_size: u64) -> Result<()> {
    if size > max_size {
        return Err(IngestError::InputTooLarge { size, max_size });
    }
    Ok(())
}

/// Reads a whole file, checking its size against `max_size` first.
pub(crate) fn read_file_with_limit(path: &Path, max_size: u64) -> Result<Vec<u8>> {
    let metadata = std::fs::metadata(path).map_err(|e| file_error(path, e))?;
    check_input_size(metadata.len(), max_size)?;

    let raw = std::fs::read(path).map_err(|e| file_error(path, e))?;
    tracing::debug!(path = %path.display(), bytes = raw.len(), "Read source file");
    Ok(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_check_input_size() {
        assert!(check_input_size(5, 5).is_ok());
        assert!(matches!(
            check_input_size(6, 5),
            Err(IngestError::InputTooLarge {
                size: 6,
                max_size: 5
            })
        ));
    }

    #[test]
    fn test_read_file_with_limit() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "a,b\n").unwrap();

        assert_eq!(read_file_with_limit(file.path(), 100).unwrap(), b"a,b\n");
        assert!(matches!(
            read_file_with_limit(file.path(), 3),
            Err(IngestError::InputTooLarge { size: 4, .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_file_with_limit(&dir.path().join("missing.csv"), 100);
        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }
}
