//! # Exclusion Module
//!
//! This module resolves the exclusion file into the set of absolute paths that
//! a run must never open.
//!
//! The exclusion file holds one glob per line, relative to each root:
//!
//! ```text
//! # generated code
//! *.pb.go
//! vendor/
//! docs/conf.py
//! ```
//!
//! Each pattern is matched at any depth below every root. A matched directory
//! excludes every file beneath it. Blank lines and lines starting with `#` are
//! skipped.

use std::collections::HashSet;
use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, trace, warn};

use crate::output::OutputSink;
use crate::processor::{absolutize_path, walk_files};

/// File name looked up in the current directory when no exclusion file is given.
pub const DEFAULT_EXCLUDE_FILE: &str = ".headersync-ignore";

/// Set of absolute file paths excluded from a run.
///
/// Built once before any file is processed and only read afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionList {
  paths: HashSet<PathBuf>,
}

impl ExclusionList {
  /// An exclusion list that excludes nothing.
  pub fn empty() -> Self {
    Self::default()
  }

  /// Reads `exclude_file` and expands its patterns against `roots`.
  ///
  /// A missing exclusion file is not an error: an informational line is
  /// emitted and the list is empty. Other read failures and invalid patterns
  /// are reported as warnings and skipped.
  pub fn resolve(exclude_file: &Path, roots: &[PathBuf], out: &mut dyn OutputSink) -> Self {
    let content = match std::fs::read_to_string(exclude_file) {
      Ok(content) => content,
      Err(e) if e.kind() == IoErrorKind::NotFound => {
        debug!("Exclusion file {} does not exist", exclude_file.display());
        out.info("No exclude list file found.");
        return Self::empty();
      }
      Err(e) => {
        out.warning(&format!(
          "{}: Could not read exclude list file: {e}",
          exclude_file.display()
        ));
        return Self::empty();
      }
    };

    let patterns = parse_patterns(&content);
    debug!(
      "Loaded {} exclusion patterns from {}",
      patterns.len(),
      exclude_file.display()
    );

    Self::from_patterns(&patterns, roots, out)
  }

  /// Expands already parsed patterns against `roots`.
  pub fn from_patterns(patterns: &[String], roots: &[PathBuf], out: &mut dyn OutputSink) -> Self {
    let mut paths = HashSet::new();

    for root in roots {
      let root = match absolutize_path(root) {
        Ok(root) => root,
        Err(e) => {
          out.warning(&format!("{}: {e:#}", root.display()));
          continue;
        }
      };
      let escaped_root = glob::Pattern::escape(&root.to_string_lossy());

      for pattern in patterns {
        let full_pattern = format!("{escaped_root}/**/{pattern}");
        trace!("Expanding exclusion pattern: {}", full_pattern);

        let entries = match glob::glob(&full_pattern) {
          Ok(entries) => entries,
          Err(e) => {
            out.warning(&format!("Invalid exclusion pattern '{pattern}': {e}"));
            continue;
          }
        };

        for entry in entries {
          match entry {
            Ok(path) if path.is_dir() => paths.extend(walk_files(&path)),
            Ok(path) => {
              paths.insert(path);
            }
            Err(e) => warn!("Error while expanding '{}': {}", pattern, e),
          }
        }
      }
    }

    debug!("Exclusion list holds {} files", paths.len());
    Self { paths }
  }

  /// Whether `path` is excluded. Relative paths are resolved against the
  /// current directory first.
  pub fn contains(&self, path: &Path) -> bool {
    if self.paths.is_empty() {
      return false;
    }
    absolutize_path(path).is_ok_and(|path| self.paths.contains(&path))
  }

  pub fn len(&self) -> usize {
    self.paths.len()
  }

  pub fn is_empty(&self) -> bool {
    self.paths.is_empty()
  }
}

/// Extracts the glob patterns from the text of an exclusion file.
///
/// Lines are trimmed; blank lines and `#` comments are dropped, as is a
/// trailing `/` on directory patterns.
pub fn parse_patterns(content: &str) -> Vec<String> {
  content
    .lines()
    .map(str::trim)
    .filter(|line| !line.is_empty() && !line.starts_with('#'))
    .map(|line| line.trim_end_matches('/'))
    .filter(|line| !line.is_empty())
    .map(str::to_string)
    .collect()
}
