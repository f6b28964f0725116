//! # File I/O Module
//!
//! Reading and writing source files, with I/O failures mapped onto the
//! per-file error taxonomy.

use std::io::ErrorKind as IoErrorKind;
use std::path::Path;

use tracing::trace;

use crate::error::HeaderError;

/// File I/O operations for the processor.
///
/// Each call opens and closes its file, so no handle outlives a single read
/// or write.
pub struct FileIO;

impl FileIO {
  /// Reads the full file as UTF-8 text.
  ///
  /// # Errors
  ///
  /// - [`HeaderError::NotFound`] if the file does not exist
  /// - [`HeaderError::BinaryContent`] if the bytes are not valid UTF-8
  /// - [`HeaderError::Io`] for any other failure
  pub fn read_text(path: &Path) -> Result<String, HeaderError> {
    let bytes = std::fs::read(path).map_err(|source| match source.kind() {
      IoErrorKind::NotFound => HeaderError::NotFound {
        path: path.to_path_buf(),
      },
      _ => HeaderError::Io {
        path: path.to_path_buf(),
        action: "Reading file",
        source,
      },
    })?;

    String::from_utf8(bytes).map_err(|e| {
      trace!(
        "{}: invalid UTF-8 after byte {}",
        path.display(),
        e.utf8_error().valid_up_to()
      );
      HeaderError::BinaryContent {
        path: path.to_path_buf(),
      }
    })
  }

  /// Replaces the file content.
  pub fn write_text(path: &Path, content: &str) -> Result<(), HeaderError> {
    std::fs::write(path, content).map_err(|source| HeaderError::Io {
      path: path.to_path_buf(),
      action: "Writing file",
      source,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_read_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = FileIO::read_text(&dir.path().join("missing.py")).unwrap_err();
    assert!(matches!(err, HeaderError::NotFound { .. }));
  }

  #[test]
  fn test_read_binary_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("blob.py");
    std::fs::write(&path, b"\x00\x00\x00\x2a\x40\x2d\xf8\x54").unwrap();

    let err = FileIO::read_text(&path).unwrap_err();
    assert!(matches!(err, HeaderError::BinaryContent { .. }));
  }

  #[test]
  fn test_read_directory_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = FileIO::read_text(dir.path()).unwrap_err();
    assert!(matches!(err, HeaderError::Io { .. }));
  }

  #[test]
  fn test_write_into_missing_directory_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing/a.sh");
    let err = FileIO::write_text(&path, "echo hi\n").unwrap_err();
    assert!(matches!(err, HeaderError::Io { action: "Writing file", .. }));
    assert!(!path.exists());
  }

  #[test]
  fn test_write_then_read() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("a.sh");
    FileIO::write_text(&path, "echo hi\n").unwrap();
    assert_eq!(FileIO::read_text(&path).unwrap(), "echo hi\n");
  }
}
