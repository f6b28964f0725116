//! # headersync
//!
//! A tool that keeps the copyright license headers of source files in sync.
//!
//! `headersync` scans the first lines of each file for a copyright line of the
//! configured company. Files without one get a licence header rendered from a
//! per-language template; files whose header ends in an older year get the
//! year range extended in place. Every other byte of the file is preserved.
//!
//! ## Features
//!
//! * Regex-based detection of `Copyright (C) <year>[-<year>] <company>` lines
//! * Header templates for Python, shell, C, Go, JavaScript, XML and more, under
//!   four GPL-family licences
//! * Exclusion lists built from glob patterns
//! * A changed mode that takes each file's year from its last git commit
//! * JSON reports of per-file outcomes
//!
//! ## Usage as a Library
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//!
//! use headersync::licence::Licence;
//! use headersync::logging::OutputMode;
//! use headersync::output::ConsoleOutput;
//! use headersync::processor::{HeaderSync, SyncConfig, Targets};
//!
//! fn main() -> anyhow::Result<()> {
//!     let sync = HeaderSync::new(SyncConfig {
//!         year: "2025".to_string(),
//!         licence: Licence::Gpl3OrLater,
//!         company: "Example Corp".to_string(),
//!         changed: false,
//!     })?;
//!
//!     let mut out = ConsoleOutput::new(OutputMode::Normal);
//!     let run = sync.run(&Targets::Directories(vec![PathBuf::from("src")]), None, &mut out)?;
//!
//!     if run.summary.failed > 0 {
//!         println!("{} files could not be updated", run.summary.failed);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! * [`processor`] - Per-file header synchronization and batch runs
//! * [`header`] - Copyright line detection
//! * [`templates`] - Header templates and their rendering
//! * [`exclusion`] - Exclusion list resolution
//! * [`git`] - Last modification year lookup
//! * [`output`] - User-facing status lines
//! * [`logging`] - Diagnostics and output modes

pub mod cli;
pub mod config;
pub mod error;
pub mod exclusion;
pub mod git;
pub mod header;
pub mod licence;
pub mod logging;
pub mod output;
pub mod processor;
pub mod report;
pub mod templates;
