//! # Processor Module
//!
//! This module contains the core functionality for synchronizing license
//! headers: detecting a copyright line near the top of each file, inserting a
//! template header where none exists and extending stale year ranges.
//!
//! The module is organized into several submodules:
//! - [`file_io`] - File reading and writing operations
//! - [`content_transformer`] - Header insertion and copyright line rewrites
//! - [`file_collector`] - Directory traversal and path normalization
//!
//! The [`HeaderSync`] struct is the main entry point, orchestrating the
//! submodules for single files ([`HeaderSync::process_file`]) and whole runs
//! ([`HeaderSync::run`]).

mod content_transformer;
mod file_collector;
mod file_io;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
pub use content_transformer::ContentTransformer;
pub use file_collector::{absolutize_path, collect_files, walk_files};
pub use file_io::FileIO;
use tracing::{debug, info, trace};

use crate::error::HeaderError;
use crate::exclusion::{DEFAULT_EXCLUDE_FILE, ExclusionList};
use crate::git::{GitHistory, HistoryLookup};
use crate::header::HeaderPattern;
use crate::licence::Licence;
use crate::output::OutputSink;
use crate::report::{FileOutcome, FileReport, ProcessingSummary};
use crate::templates::{BuiltinTemplates, HeaderData, TemplateSource, render_header};

/// Per-file options shared by every file of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
  /// Target year, four digits
  pub year: String,
  /// Licence of inserted headers
  pub licence: Licence,
  /// Company matched in existing headers and written into new ones
  pub company: String,
  /// Take each file's target year from its last commit
  pub changed: bool,
}

/// The files a run operates on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Targets {
  /// Explicit files, processed in the given order. Duplicates are processed
  /// again.
  Files(Vec<PathBuf>),
  /// Roots walked recursively
  Directories(Vec<PathBuf>),
}

impl Targets {
  fn candidates(&self) -> Vec<PathBuf> {
    match self {
      Self::Files(files) => files.clone(),
      Self::Directories(roots) => collect_files(roots),
    }
  }
}

/// Result of a whole run.
#[derive(Debug, Clone)]
pub struct RunReport {
  pub reports: Vec<FileReport>,
  pub summary: ProcessingSummary,
  /// Process exit code: 0 on completion (per-file errors included), 1 when
  /// there was nothing to process
  pub exit_code: u8,
}

/// Synchronizes license headers according to a [`SyncConfig`].
///
/// The header pattern is compiled once, on construction, and reused for every
/// file.
pub struct HeaderSync {
  pattern: HeaderPattern,
  config: SyncConfig,
  templates: Box<dyn TemplateSource>,
  history: Box<dyn HistoryLookup>,
}

impl HeaderSync {
  /// Creates a synchronizer using the builtin templates and git history.
  ///
  /// # Errors
  ///
  /// Returns an error if the copyright pattern for the company cannot be
  /// compiled.
  pub fn new(config: SyncConfig) -> Result<Self> {
    let pattern = HeaderPattern::new(&config.company)
      .with_context(|| format!("Failed to build copyright pattern for company '{}'", config.company))?;

    Ok(Self {
      pattern,
      config,
      templates: Box::new(BuiltinTemplates),
      history: Box::new(GitHistory),
    })
  }

  /// Replaces the template source.
  pub fn with_templates(mut self, templates: Box<dyn TemplateSource>) -> Self {
    self.templates = templates;
    self
  }

  /// Replaces the history lookup used in changed mode.
  pub fn with_history(mut self, history: Box<dyn HistoryLookup>) -> Self {
    self.history = history;
    self
  }

  /// Brings the header of a single file up to date.
  ///
  /// Emits exactly one status line for the file, plus a warning when changed
  /// mode has to fall back to the configured year. Errors are reported
  /// through `out` and also returned; none of them affects other files.
  pub fn process_file(&self, path: &Path, out: &mut dyn OutputSink) -> Result<FileOutcome, HeaderError> {
    let year = self.target_year(path, out);
    let result = self.update_file(path, &year);
    report_result(path, &result, out);
    result
  }

  /// Resolves the exclusion list, enumerates candidates and processes each
  /// one in order.
  ///
  /// `exclude_file` overrides the default [`DEFAULT_EXCLUDE_FILE`]. Explicit
  /// file lists are only filtered when an exclusion file is given, with the
  /// current directory as root.
  ///
  /// # Errors
  ///
  /// Returns an error only if the current directory cannot be determined.
  pub fn run(&self, targets: &Targets, exclude_file: Option<&Path>, out: &mut dyn OutputSink) -> Result<RunReport> {
    let start_time = Instant::now();

    let exclusions = match (targets, exclude_file) {
      (Targets::Directories(roots), file) => {
        let file = file.unwrap_or_else(|| Path::new(DEFAULT_EXCLUDE_FILE));
        ExclusionList::resolve(file, roots, out)
      }
      (Targets::Files(_), Some(file)) => {
        let cwd = std::env::current_dir().with_context(|| "Failed to get current directory")?;
        ExclusionList::resolve(file, &[cwd], out)
      }
      (Targets::Files(_), None) => ExclusionList::empty(),
    };

    let candidates = targets.candidates();
    if candidates.is_empty() {
      out.error("Specify files to update!");
      return Ok(RunReport {
        reports: Vec::new(),
        summary: ProcessingSummary::from_reports(&[], start_time.elapsed()),
        exit_code: 1,
      });
    }

    info!("Processing {} files", candidates.len());

    let mut reports = Vec::with_capacity(candidates.len());
    for path in candidates {
      let outcome = if exclusions.contains(&path) {
        out.info(&format!("{}: Ignoring file from exclusion list.", path.display()));
        FileOutcome::IgnoredExcluded
      } else {
        FileOutcome::from_result(&self.process_file(&path, out))
      };
      reports.push(FileReport { path, outcome });
    }

    let summary = ProcessingSummary::from_reports(&reports, start_time.elapsed());
    debug!(
      "Processed {} files in {:.2}s",
      summary.total_files,
      summary.processing_time.as_secs_f64()
    );

    Ok(RunReport {
      reports,
      summary,
      exit_code: 0,
    })
  }

  fn target_year(&self, path: &Path, out: &mut dyn OutputSink) -> String {
    if !self.config.changed {
      return self.config.year.clone();
    }

    match self.history.last_modified_year(path) {
      Ok(year) => {
        trace!("{}: last modified in {}", path.display(), year);
        year
      }
      Err(e) => {
        debug!("{}", e);
        out.warning(&format!(
          "{}: Could not get date of last modification using git, using {} instead.",
          path.display(),
          self.config.year
        ));
        self.config.year.clone()
      }
    }
  }

  fn update_file(&self, path: &Path, year: &str) -> Result<FileOutcome, HeaderError> {
    let content = FileIO::read_text(path)?;

    let Some(found) = self.pattern.scan(&content) else {
      let data = HeaderData {
        company: &self.config.company,
        year,
      };
      let header = render_header(self.templates.as_ref(), path, self.config.licence, &data)?;
      FileIO::write_text(path, &ContentTransformer::insert_header(&header, &content))?;
      return Ok(FileOutcome::HeaderInserted);
    };

    trace!(
      "{}: copyright line found on line {}",
      path.display(),
      found.line_index + 1
    );

    if !found.copyright.is_stale(year) {
      return Ok(FileOutcome::AlreadyCurrent);
    }

    let previous = found.copyright.last_year().to_string();
    let (updated, _) = ContentTransformer::new(&self.pattern).update_year(&content, &found, year);
    FileIO::write_text(path, &updated)?;

    Ok(FileOutcome::YearUpdated {
      previous,
      year: year.to_string(),
    })
  }
}

fn report_result(path: &Path, result: &Result<FileOutcome, HeaderError>, out: &mut dyn OutputSink) {
  let file = path.display();
  match result {
    Ok(FileOutcome::HeaderInserted) => out.info(&format!("{file}: Added licence header.")),
    Ok(FileOutcome::YearUpdated { previous, year }) => out.info(&format!(
      "{file}: Changed Licence Header Copyright Year {previous} -> {year}"
    )),
    Ok(FileOutcome::AlreadyCurrent) => out.ok(&format!("{file}: Licence Header is ok.")),
    Ok(other) => debug!("{file}: {other:?}"),
    Err(e @ HeaderError::BinaryContent { .. }) => out.info(&e.to_string()),
    Err(e) => out.error(&e.to_string()),
  }
}
