//! # Git Module
//!
//! This module looks up when a file was last changed in its git repository.
//! It backs the `--changed` mode, where each file's target year is the year
//! of its most recent commit instead of a fixed year.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Datelike};
use git2::{Commit, Oid, Repository, Sort};
use tracing::{debug, trace};

use crate::error::HeaderError;

/// Source of a file's last modification year.
pub trait HistoryLookup {
  /// Returns the four digit year `path` was last modified.
  ///
  /// # Errors
  ///
  /// Returns [`HeaderError::VersionControlLookup`] when the year cannot be
  /// determined.
  fn last_modified_year(&self, path: &Path) -> Result<String, HeaderError>;
}

/// History lookup backed by the git repository containing each file.
#[derive(Debug, Default, Clone, Copy)]
pub struct GitHistory;

impl HistoryLookup for GitHistory {
  fn last_modified_year(&self, path: &Path) -> Result<String, HeaderError> {
    last_modified_year(path)
  }
}

/// Finds the author year of the newest commit that changed `path`.
///
/// The year is taken in the author's own timezone. A merge commit counts as a
/// change only if the file differs from every parent.
///
/// # Errors
///
/// Returns [`HeaderError::VersionControlLookup`] if:
/// - The file cannot be resolved on disk
/// - No git repository contains the file
/// - The repository has no commits, or none of them touch the file
pub fn last_modified_year(path: &Path) -> Result<String, HeaderError> {
  let lookup_error = |message: String| HeaderError::VersionControlLookup {
    path: path.to_path_buf(),
    message,
  };

  let file = std::fs::canonicalize(path).map_err(|e| lookup_error(e.to_string()))?;
  let start = file.parent().unwrap_or(&file);

  let repo = Repository::discover(start).map_err(|e| lookup_error(e.message().to_string()))?;
  let relative =
    repo_relative_path(&repo, &file).ok_or_else(|| lookup_error("file is outside the work tree".to_string()))?;
  debug!("Looking up last commit for {}", relative.display());

  let mut revwalk = repo.revwalk().map_err(|e| lookup_error(e.message().to_string()))?;
  revwalk
    .set_sorting(Sort::TIME)
    .map_err(|e| lookup_error(e.message().to_string()))?;
  revwalk.push_head().map_err(|e| lookup_error(e.message().to_string()))?;

  for oid in revwalk {
    let oid = oid.map_err(|e| lookup_error(e.message().to_string()))?;
    let commit = repo.find_commit(oid).map_err(|e| lookup_error(e.message().to_string()))?;

    if commit_touches(&commit, &relative) {
      trace!("{} last changed in {}", relative.display(), commit.id());
      return commit_year(&commit).ok_or_else(|| lookup_error("commit has an invalid timestamp".to_string()));
    }
  }

  Err(lookup_error("no commit touches the file".to_string()))
}

fn repo_relative_path(repo: &Repository, file: &Path) -> Option<PathBuf> {
  let workdir = repo.workdir()?;
  let workdir = std::fs::canonicalize(workdir).unwrap_or_else(|_| workdir.to_path_buf());
  file.strip_prefix(&workdir).ok().map(Path::to_path_buf)
}

fn blob_id(commit: &Commit<'_>, relative: &Path) -> Option<Oid> {
  let tree = commit.tree().ok()?;
  let entry = tree.get_path(relative).ok()?;
  Some(entry.id())
}

fn commit_touches(commit: &Commit<'_>, relative: &Path) -> bool {
  let Some(id) = blob_id(commit, relative) else {
    return false;
  };

  if commit.parent_count() == 0 {
    return true;
  }

  commit
    .parents()
    .all(|parent| blob_id(&parent, relative) != Some(id))
}

fn commit_year(commit: &Commit<'_>) -> Option<String> {
  let when = commit.author().when();
  let local_seconds = when.seconds() + i64::from(when.offset_minutes()) * 60;
  DateTime::from_timestamp(local_seconds, 0).map(|dt| dt.year().to_string())
}
