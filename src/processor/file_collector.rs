//! # File Collector Module
//!
//! This module provides utilities for collecting candidate files from root
//! directories and for path normalization.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// Directory names that are never descended into.
const SKIPPED_DIRS: &[&str] = &[".git"];

/// Collects every file below each root, recursively.
///
/// Roots are walked in the order given; within a root, entries are visited
/// in file-name order so runs are reproducible. A root that is itself a file
/// is collected as is. Unreadable entries are logged and skipped.
pub fn collect_files(roots: &[PathBuf]) -> Vec<PathBuf> {
  let start_time = std::time::Instant::now();
  let mut files = Vec::new();

  for root in roots {
    debug!("Scanning directory: {}", root.display());
    files.extend(walk_files(root));
  }

  debug!(
    "Found {} files in {}ms",
    files.len(),
    start_time.elapsed().as_millis()
  );

  files
}

/// All regular files at or below `path`.
///
/// Symlinks to files are kept; symlinked directories are not descended into.
pub fn walk_files(path: &Path) -> Vec<PathBuf> {
  WalkDir::new(path)
    .sort_by_file_name()
    .into_iter()
    .filter_entry(|entry| !is_skipped_dir(entry))
    .filter_map(|entry| match entry {
      Ok(entry) => Some(entry),
      Err(e) => {
        warn!("Error reading directory entry: {}", e);
        None
      }
    })
    .filter(|entry| entry.path().is_file())
    .map(DirEntry::into_path)
    .collect()
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
  entry.depth() > 0
    && entry.file_type().is_dir()
    && entry
      .file_name()
      .to_str()
      .is_some_and(|name| SKIPPED_DIRS.contains(&name))
}

/// Converts a potentially relative path to an absolute path.
///
/// The path is joined onto the current directory and `.` components are
/// dropped. Symlinks and `..` are left unresolved.
pub fn absolutize_path(path: &Path) -> Result<PathBuf> {
  let absolute = if path.is_absolute() {
    path.to_path_buf()
  } else {
    let current_dir = std::env::current_dir().with_context(|| "Failed to get current directory")?;
    current_dir.join(path)
  };
  Ok(absolute.components().collect())
}
