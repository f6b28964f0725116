//! # Licence Module
//!
//! The closed sets of licences and file extensions headersync knows how to
//! write headers for.

use std::fmt;
use std::path::Path;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// File suffixes (including the leading dot) that have header templates.
pub const SUPPORTED_FILE_TYPES: &[&str] = &[
  ".bash", ".c", ".h", ".go", ".cmake", ".js", ".nasl", ".po", ".py", ".sh", ".txt", ".xml", ".xsl",
];

/// Supported licence identifiers (SPDX).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
pub enum Licence {
  #[value(name = "AGPL-3.0-or-later")]
  #[serde(rename = "AGPL-3.0-or-later")]
  Agpl3OrLater,

  #[value(name = "GPL-2.0-only")]
  #[serde(rename = "GPL-2.0-only")]
  Gpl2Only,

  #[value(name = "GPL-2.0-or-later")]
  #[serde(rename = "GPL-2.0-or-later")]
  Gpl2OrLater,

  #[default]
  #[value(name = "GPL-3.0-or-later")]
  #[serde(rename = "GPL-3.0-or-later")]
  Gpl3OrLater,
}

impl Licence {
  /// The SPDX identifier, also used as the template directory name.
  pub const fn spdx_id(self) -> &'static str {
    match self {
      Self::Agpl3OrLater => "AGPL-3.0-or-later",
      Self::Gpl2Only => "GPL-2.0-only",
      Self::Gpl2OrLater => "GPL-2.0-or-later",
      Self::Gpl3OrLater => "GPL-3.0-or-later",
    }
  }
}

impl fmt::Display for Licence {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.spdx_id())
  }
}

/// Returns the file suffix with its leading dot, or an empty string.
///
/// Matching is case sensitive: `main.PY` has the suffix `.PY`, which is not
/// supported.
pub fn file_suffix(path: &Path) -> String {
  path
    .extension()
    .and_then(|ext| ext.to_str())
    .map(|ext| format!(".{ext}"))
    .unwrap_or_default()
}

/// Whether headers can be written for files with this suffix.
pub fn is_supported_suffix(suffix: &str) -> bool {
  SUPPORTED_FILE_TYPES.contains(&suffix)
}
