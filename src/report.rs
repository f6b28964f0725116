//! # Report Module
//!
//! Per-file outcomes of a run, their summary, and the JSON report written with
//! `--report-json`.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;
use serde::{Serialize, Serializer};

use crate::error::{ErrorKind, HeaderError};

/// What happened to a single file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "kebab-case")]
pub enum FileOutcome {
  /// A template header was prepended
  HeaderInserted,
  /// The copyright year range was extended to `year`
  YearUpdated { previous: String, year: String },
  /// The header was already current; the file is untouched
  AlreadyCurrent,
  /// The file is not UTF-8 text
  IgnoredBinary,
  /// The file is on the exclusion list and was never opened
  IgnoredExcluded,
  /// Processing failed; the file is untouched
  Error { kind: ErrorKind },
}

impl FileOutcome {
  /// Folds a per-file result into a reportable outcome.
  pub fn from_result(result: &Result<Self, HeaderError>) -> Self {
    match result {
      Ok(outcome) => outcome.clone(),
      Err(HeaderError::BinaryContent { .. }) => Self::IgnoredBinary,
      Err(err) => Self::Error { kind: err.kind() },
    }
  }

  pub const fn is_error(&self) -> bool {
    matches!(self, Self::Error { .. })
  }
}

/// Information about a processed file for reporting
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
  /// Path to the file, as it was given or enumerated
  #[serde(serialize_with = "serialize_path")]
  pub path: PathBuf,
  #[serde(flatten)]
  pub outcome: FileOutcome,
}

fn serialize_path<S>(path: &Path, serializer: S) -> Result<S::Ok, S::Error>
where
  S: Serializer,
{
  serializer.serialize_str(&path.to_string_lossy())
}

/// Counts of outcomes over a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProcessingSummary {
  pub total_files: usize,
  pub inserted: usize,
  pub updated: usize,
  pub current: usize,
  /// Binary and excluded files
  pub ignored: usize,
  pub failed: usize,
  #[serde(rename = "processing_time_secs", serialize_with = "serialize_duration")]
  pub processing_time: Duration,
}

fn serialize_duration<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
  S: Serializer,
{
  serializer.serialize_f64(duration.as_secs_f64())
}

impl ProcessingSummary {
  /// Create a summary from a collection of file reports
  pub fn from_reports(reports: &[FileReport], processing_time: Duration) -> Self {
    let mut summary = Self {
      total_files: reports.len(),
      processing_time,
      ..Self::default()
    };

    for report in reports {
      match report.outcome {
        FileOutcome::HeaderInserted => summary.inserted += 1,
        FileOutcome::YearUpdated { .. } => summary.updated += 1,
        FileOutcome::AlreadyCurrent => summary.current += 1,
        FileOutcome::IgnoredBinary | FileOutcome::IgnoredExcluded => summary.ignored += 1,
        FileOutcome::Error { .. } => summary.failed += 1,
      }
    }

    summary
  }
}

#[derive(Serialize)]
struct JsonReport<'a> {
  generated_at: String,
  summary: &'a ProcessingSummary,
  files: &'a [FileReport],
}

/// Write the run as pretty-printed JSON to `output_path`.
///
/// # Errors
///
/// Returns an error if serialization fails or the file cannot be written.
pub fn write_json_report(output_path: &Path, files: &[FileReport], summary: &ProcessingSummary) -> Result<()> {
  let report = JsonReport {
    generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
    summary,
    files,
  };

  let content = serde_json::to_string_pretty(&report).with_context(|| "Failed to serialize report")?;

  fs::write(output_path, content).with_context(|| format!("Failed to write report to {}", output_path.display()))
}
