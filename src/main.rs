//! # headersync
//!
//! Keeps copyright license headers in source files present and current.

use std::process::ExitCode;

use anyhow::Result;
use headersync::cli::{Cli, run_update};

fn main() -> Result<ExitCode> {
  let cli = Cli::parse_args();
  run_update(cli.update_args)
}
