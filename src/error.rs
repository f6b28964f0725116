//! # Error Module
//!
//! Per-file error taxonomy for header synchronization. Every variant is
//! recoverable at the file boundary: the batch runner reports it and moves on
//! to the next file.

use std::path::PathBuf;

use serde::Serialize;

use crate::licence::Licence;

/// Errors that can occur while synchronizing the header of a single file.
#[derive(Debug, thiserror::Error)]
pub enum HeaderError {
  /// The file does not exist.
  #[error("{}: File is not existing.", path.display())]
  NotFound { path: PathBuf },

  /// The file content could not be decoded as UTF-8 text.
  #[error("{}: Ignoring binary file.", path.display())]
  BinaryContent { path: PathBuf },

  /// No header template exists for the file's extension.
  #[error("{}: No licence header for the format {suffix} found.", path.display())]
  UnsupportedExtension { path: PathBuf, suffix: String },

  /// The template for the extension and licence could not be located.
  #[error("{}: Licence file for {licence} is not existing.", path.display())]
  MissingTemplateResource {
    path: PathBuf,
    licence: Licence,
    template: PathBuf,
  },

  /// The last modification year could not be read from version control.
  #[error("{}: Could not get date of last modification using git: {message}", path.display())]
  VersionControlLookup { path: PathBuf, message: String },

  /// Any other read or write failure.
  #[error("{}: {action} failed: {source}", path.display())]
  Io {
    path: PathBuf,
    action: &'static str,
    #[source]
    source: std::io::Error,
  },
}

impl HeaderError {
  /// The coarse kind of this error, used for reporting.
  pub const fn kind(&self) -> ErrorKind {
    match self {
      Self::NotFound { .. } => ErrorKind::NotFound,
      Self::BinaryContent { .. } => ErrorKind::BinaryContent,
      Self::UnsupportedExtension { .. } => ErrorKind::UnsupportedExtension,
      Self::MissingTemplateResource { .. } => ErrorKind::MissingTemplateResource,
      Self::VersionControlLookup { .. } => ErrorKind::VersionControlLookupFailed,
      Self::Io { .. } => ErrorKind::Io,
    }
  }
}

/// Reportable error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
  NotFound,
  #[serde(rename = "binary")]
  BinaryContent,
  UnsupportedExtension,
  #[serde(rename = "missing-licence-file")]
  MissingTemplateResource,
  VersionControlLookupFailed,
  Io,
}

impl std::fmt::Display for ErrorKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let name = match self {
      Self::NotFound => "not-found",
      Self::BinaryContent => "binary",
      Self::UnsupportedExtension => "unsupported-extension",
      Self::MissingTemplateResource => "missing-licence-file",
      Self::VersionControlLookupFailed => "version-control-lookup-failed",
      Self::Io => "io",
    };
    f.write_str(name)
  }
}
