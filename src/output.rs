//! # Output Module
//!
//! This module centralizes all user-facing output for headersync. Output goes
//! through the [`OutputSink`] trait, which every operation receives as an
//! argument, so tests and library users can capture or silence it.
//!
//! - [`ConsoleOutput`] writes status lines with symbols and colors to stdout
//! - [`RecordingOutput`] keeps the lines in memory

use owo_colors::{OwoColorize, Stream};

use crate::logging::OutputMode;
use crate::report::ProcessingSummary;

/// Symbols used in output
pub mod symbols {
  /// Success/header current
  pub const OK: &str = "\u{2713}"; // ✓
  /// Informational message
  pub const INFO: &str = "\u{2139}"; // ℹ
  /// Warning
  pub const WARNING: &str = "\u{26a0}"; // ⚠
  /// Error
  pub const ERROR: &str = "\u{2717}"; // ✗
}

/// Severity of a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
  Ok,
  Info,
  Warning,
  Error,
  BoldInfo,
}

/// Destination for human-readable status lines.
pub trait OutputSink {
  /// Write a line at the given level.
  fn emit(&mut self, level: Level, message: &str);

  /// Increase the indentation of subsequent lines by four spaces.
  fn indent(&mut self);

  /// Undo one [`indent`](Self::indent).
  fn dedent(&mut self);

  fn ok(&mut self, message: &str) {
    self.emit(Level::Ok, message);
  }

  fn info(&mut self, message: &str) {
    self.emit(Level::Info, message);
  }

  fn warning(&mut self, message: &str) {
    self.emit(Level::Warning, message);
  }

  fn error(&mut self, message: &str) {
    self.emit(Level::Error, message);
  }

  fn bold_info(&mut self, message: &str) {
    self.emit(Level::BoldInfo, message);
  }
}

const INDENT_WIDTH: usize = 4;

/// Terminal output on stdout.
///
/// In quiet mode only warnings and errors are printed.
#[derive(Debug)]
pub struct ConsoleOutput {
  mode: OutputMode,
  indent: usize,
}

impl ConsoleOutput {
  pub const fn new(mode: OutputMode) -> Self {
    Self { mode, indent: 0 }
  }

  /// Print the run summary.
  ///
  /// Format: "Summary: A added, U updated, C current, I ignored, F failed"
  /// In verbose mode, also shows timing.
  pub fn print_summary(&self, summary: &ProcessingSummary) {
    if self.mode == OutputMode::Quiet {
      return;
    }

    let failed = if summary.failed > 0 {
      summary.failed.if_supports_color(Stream::Stdout, |s| s.red()).to_string()
    } else {
      summary.failed.if_supports_color(Stream::Stdout, |s| s.cyan()).to_string()
    };

    let mut line = format!(
      "Summary: {} added, {} updated, {} current, {} ignored, {} failed",
      summary.inserted.if_supports_color(Stream::Stdout, |s| s.cyan()),
      summary.updated.if_supports_color(Stream::Stdout, |s| s.cyan()),
      summary.current.if_supports_color(Stream::Stdout, |s| s.cyan()),
      summary.ignored.if_supports_color(Stream::Stdout, |s| s.dimmed()),
      failed
    );

    if self.mode == OutputMode::Verbose {
      line.push_str(&format!(" ({:.2}s)", summary.processing_time.as_secs_f64()));
    }

    println!();
    println!("{line}");
  }
}

impl OutputSink for ConsoleOutput {
  fn emit(&mut self, level: Level, message: &str) {
    if self.mode == OutputMode::Quiet && !matches!(level, Level::Warning | Level::Error) {
      return;
    }

    let pad = " ".repeat(self.indent);
    match level {
      Level::Ok => println!(
        "{pad}{} {message}",
        symbols::OK.if_supports_color(Stream::Stdout, |s| s.green())
      ),
      Level::Info => println!(
        "{pad}{} {message}",
        symbols::INFO.if_supports_color(Stream::Stdout, |s| s.cyan())
      ),
      Level::Warning => println!(
        "{pad}{} {}",
        symbols::WARNING.if_supports_color(Stream::Stdout, |s| s.yellow()),
        message.if_supports_color(Stream::Stdout, |s| s.yellow())
      ),
      Level::Error => println!(
        "{pad}{} {}",
        symbols::ERROR.if_supports_color(Stream::Stdout, |s| s.red()),
        message.if_supports_color(Stream::Stdout, |s| s.red())
      ),
      Level::BoldInfo => println!(
        "{pad}{} {}",
        symbols::INFO.if_supports_color(Stream::Stdout, |s| s.cyan()),
        message.if_supports_color(Stream::Stdout, |s| s.bold())
      ),
    }
  }

  fn indent(&mut self) {
    self.indent += INDENT_WIDTH;
  }

  fn dedent(&mut self) {
    self.indent = self.indent.saturating_sub(INDENT_WIDTH);
  }
}

/// In-memory sink recording every line with its level and indentation.
#[derive(Debug, Default)]
pub struct RecordingOutput {
  pub lines: Vec<(Level, String)>,
  indent: usize,
}

impl RecordingOutput {
  pub fn new() -> Self {
    Self::default()
  }

  /// Messages recorded at `level`, in order.
  pub fn messages(&self, level: Level) -> Vec<&str> {
    self
      .lines
      .iter()
      .filter(|(l, _)| *l == level)
      .map(|(_, m)| m.as_str())
      .collect()
  }

  /// Whether any recorded line contains `needle`.
  pub fn contains(&self, needle: &str) -> bool {
    self.lines.iter().any(|(_, m)| m.contains(needle))
  }
}

impl OutputSink for RecordingOutput {
  fn emit(&mut self, level: Level, message: &str) {
    self.lines.push((level, format!("{}{message}", " ".repeat(self.indent))));
  }

  fn indent(&mut self) {
    self.indent += INDENT_WIDTH;
  }

  fn dedent(&mut self) {
    self.indent = self.indent.saturating_sub(INDENT_WIDTH);
  }
}
