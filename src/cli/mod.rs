//! # CLI Module
//!
//! This module contains the command-line interface implementation.
//! It uses clap for argument parsing.

mod update;

use clap::Parser;
use clap::builder::styling::{AnsiColor, Color, Style, Styles};
pub use update::{UpdateArgs, run_update};

const CUSTOM_STYLES: Styles = Styles::styled()
  .header(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .usage(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Blue))).bold())
  .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
  .error(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red))).bold())
  .valid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))))
  .invalid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow))));

const LONG_VERSION: &str = concat!(
  env!("CARGO_PKG_VERSION"),
  " (",
  env!("HEADERSYNC_GIT_HASH"),
  " ",
  env!("HEADERSYNC_GIT_DATE"),
  ")"
);

/// Top-level CLI arguments
#[derive(Parser, Debug)]
#[command(
  name = "headersync",
  author,
  version,
  long_version = LONG_VERSION,
  about = "Update copyright years in source file headers, adding a licence header where none exists.",
  styles = CUSTOM_STYLES,
  after_help = "Examples:
  # Bump the copyright year of all files below src/ to the current year
  headersync -d src/

  # Use the year of each file's last commit instead
  headersync --changed -d src/ tests/

  # Update two files, inserting AGPL headers where missing
  headersync -l AGPL-3.0-or-later --company \"Example Corp\" -f main.py util.sh

  # Skip generated code listed in an exclusion file and write a JSON report
  headersync -d . --exclude-file .generated-ignore --report-json headers.json
",
  help_template = "{before-help}{name} v{version}
{about-section}
{usage-heading} {usage}

{all-args}{after-help}
"
)]
pub struct Cli {
  #[command(flatten)]
  pub update_args: UpdateArgs,
}

impl Cli {
  /// Parse CLI arguments and return the Cli struct
  pub fn parse_args() -> Self {
    Self::parse()
  }
}
