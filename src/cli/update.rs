//! # Update Command
//!
//! This module implements the header update command: it merges the command
//! line with the configuration file, runs [`HeaderSync`] over the targets and
//! prints the per-file status lines and the summary.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Result, bail};
use chrono::Datelike;
use clap::Args;
use tracing::{debug, info};

use crate::config::{Config, load_config};
use crate::header::parse_year;
use crate::licence::Licence;
use crate::logging::{ColorMode, OutputMode, init_tracing};
use crate::output::{ConsoleOutput, OutputSink};
use crate::processor::{HeaderSync, SyncConfig, Targets};
use crate::report::write_json_report;
use crate::templates::DirectoryTemplates;

/// Company used when neither the command line nor the config names one.
pub const DEFAULT_COMPANY: &str = "Greenbone Networks GmbH";

/// Arguments for the update command
#[derive(Args, Debug, Default)]
pub struct UpdateArgs {
  /// Files to update
  #[arg(short, long, num_args = 1.., value_name = "FILE", conflicts_with = "directories")]
  pub files: Vec<PathBuf>,

  /// Directories to find files to update recursively
  #[arg(short, long, num_args = 1.., value_name = "DIR")]
  pub directories: Vec<PathBuf>,

  /// File containing glob patterns for files to ignore when finding files to
  /// update in a directory (default: .headersync-ignore in the current
  /// directory). Patterns are relative, like `*.py`, and match at any depth.
  #[arg(long, value_name = "FILE")]
  pub exclude_file: Option<PathBuf>,

  /// Set the modification year to this year (default: current year)
  #[arg(short, long, value_name = "YEAR", value_parser = parse_year)]
  pub year: Option<String>,

  /// Use the year of each file's last git commit as modification year. This
  /// will probably not change all files to the current year!
  #[arg(short, long, conflicts_with = "year")]
  pub changed: bool,

  /// Licence of added headers [default: GPL-3.0-or-later]
  #[arg(short, long, value_enum, value_name = "LICENCE")]
  pub licence: Option<Licence>,

  /// Company holding the copyright, matched in existing headers [default:
  /// Greenbone Networks GmbH]
  #[arg(long, value_name = "NAME")]
  pub company: Option<String>,

  /// Directory with `<licence>/template<suffix>` files to use instead of the
  /// builtin templates
  #[arg(long, value_name = "DIR")]
  pub template_dir: Option<PathBuf>,

  /// Path to config file (default: .headersync.toml in the current directory)
  #[arg(long, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// Ignore config file even if present
  #[arg(long, conflicts_with = "config")]
  pub no_config: bool,

  /// Write a JSON report of all file outcomes to the specified path
  #[arg(long, value_name = "OUTPUT")]
  pub report_json: Option<PathBuf>,

  /// Increase verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Suppress all output except warnings and errors
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Control when to use colored output (auto, never, always)
  #[arg(
    long,
    value_name = "WHEN",
    num_args = 0..=1,
    default_value_t = ColorMode::Auto,
    default_missing_value = "always",
    value_enum
  )]
  pub colors: ColorMode,
}

/// Settings after merging command line, config file and defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Settings {
  sync: SyncConfig,
  targets: Targets,
  exclude_file: Option<PathBuf>,
  template_dir: Option<PathBuf>,
}

impl UpdateArgs {
  /// Merge with the config file: flags win over the file, the file over the
  /// builtin defaults.
  fn into_settings(self, config: Config, current_year: i32) -> Result<Settings> {
    let company = self
      .company
      .or(config.company)
      .unwrap_or_else(|| DEFAULT_COMPANY.to_string());
    if company.trim().is_empty() {
      bail!("--company cannot be empty");
    }

    let targets = if self.directories.is_empty() {
      Targets::Files(self.files)
    } else {
      Targets::Directories(self.directories)
    };

    Ok(Settings {
      sync: SyncConfig {
        year: self.year.unwrap_or_else(|| current_year.to_string()),
        licence: self.licence.or(config.licence).unwrap_or_default(),
        company,
        changed: self.changed,
      },
      targets,
      exclude_file: self.exclude_file.or(config.exclude_file),
      template_dir: self.template_dir.or(config.template_dir),
    })
  }
}

/// Run the update command with the given arguments
///
/// # Errors
///
/// Returns an error if the config file cannot be loaded, the merged settings
/// are invalid or the JSON report cannot be written. Per-file failures are
/// reported and never turn into an error here.
pub fn run_update(args: UpdateArgs) -> Result<ExitCode> {
  init_tracing(args.quiet, args.verbose);
  args.colors.apply();

  let mode = OutputMode::from_flags(args.quiet, args.verbose);
  let cwd = std::env::current_dir()?;
  let config = load_config(args.config.as_deref(), &cwd, args.no_config)?.unwrap_or_default();
  debug!("Effective config file settings: {:?}", config);

  let report_json = args.report_json.clone();
  let settings = args.into_settings(config, chrono::Local::now().year())?;
  info!(
    "Target year {}, licence {}, company '{}'",
    settings.sync.year, settings.sync.licence, settings.sync.company
  );

  let mut sync = HeaderSync::new(settings.sync)?;
  if let Some(dir) = settings.template_dir {
    debug!("Using templates from {}", dir.display());
    sync = sync.with_templates(Box::new(DirectoryTemplates::new(dir)));
  }

  let mut out = ConsoleOutput::new(mode);
  out.bold_info("headersync -> Updating file headers");
  out.indent();
  let run = sync.run(&settings.targets, settings.exclude_file.as_deref(), &mut out)?;
  out.dedent();

  if !run.reports.is_empty() {
    out.print_summary(&run.summary);
  }

  if let Some(path) = report_json {
    write_json_report(&path, &run.reports, &run.summary)?;
    info!("JSON report written to {}", path.display());
  }

  Ok(ExitCode::from(run.exit_code))
}
