//! # Logging Module
//!
//! This module provides logging setup for headersync:
//! - Structured diagnostics through `tracing`, written to stderr
//! - The output mode (normal, quiet, verbose) handed to the output sink
//! - Color control for user-facing output
//!
//! Diagnostics and status lines are kept apart: `tracing` events describe what
//! the tool is doing internally and are filtered by `-v`/`RUST_LOG`, while the
//! per-file status lines go through [`crate::output::OutputSink`].
//!
//! ## Example
//!
//! ```rust
//! use headersync::logging::{ColorMode, OutputMode, init_tracing};
//!
//! init_tracing(false, 1);
//! ColorMode::Never.apply();
//!
//! assert_eq!(OutputMode::from_flags(false, 1), OutputMode::Verbose);
//! tracing::info!("Processing file: {}", "example.py");
//! ```

mod modes;

pub use modes::{ColorMode, OutputMode, init_tracing};
