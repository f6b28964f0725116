use clap::ValueEnum;
use tracing_subscriber::EnvFilter;

/// How much user-facing output to produce.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
  #[default]
  Normal,
  /// Only warnings and errors
  Quiet,
  /// Normal output plus timing and diagnostics
  Verbose,
}

impl OutputMode {
  /// Derive the mode from the `--quiet` flag and the `-v` count.
  pub const fn from_flags(quiet: bool, verbose: u8) -> Self {
    if quiet {
      Self::Quiet
    } else if verbose > 0 {
      Self::Verbose
    } else {
      Self::Normal
    }
  }
}

/// Enum representing the color mode options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
  /// Automatically determine whether to use colors based on TTY detection
  #[default]
  Auto,
  /// Never use colors
  Never,
  /// Always use colors
  Always,
}

impl ColorMode {
  /// Apply the mode to all `owo-colors` output of this process.
  pub fn apply(self) {
    match self {
      Self::Auto => owo_colors::unset_override(),
      Self::Never => owo_colors::set_override(false),
      Self::Always => owo_colors::set_override(true),
    }
  }
}

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence. Otherwise the level follows the flags:
/// quiet → error, default → warn, `-v` → info, `-vv` → debug, `-vvv` → trace.
/// Calling this more than once is harmless; later calls are ignored.
pub fn init_tracing(quiet: bool, verbose: u8) {
  let default_level = if quiet {
    "error"
  } else {
    match verbose {
      0 => "warn",
      1 => "info",
      2 => "debug",
      _ => "trace",
    }
  };

  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

  let _ = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .without_time()
    .try_init();
}
