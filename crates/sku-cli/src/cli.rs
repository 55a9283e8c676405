//! CLI argument definitions for the SKU catalog generator.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use sku_cli::logging::LogFormat;
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(
    name = "sku-cli",
    version,
    about = "Generate validated gearbox SKU catalogs",
    long_about = "Generate exhaustive product-code catalogs for gearbox series.\n\n\
                  Series are defined as data under the standards directory; every \
                  (size, ratio) pair listed as unavailable is left out of the export."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// More log output with -v/-vv, less with -q.
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Colored tables and logs: auto, always or never.
    #[command(flatten)]
    pub color: Color,

    /// Fixed log level; takes precedence over -v/-q and RUST_LOG.
    #[arg(long = "log-level", value_enum, global = true, help_heading = "Logging")]
    pub log_level: Option<LogLevelArg>,

    /// Log line layout.
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true,
        help_heading = "Logging"
    )]
    pub log_format: LogFormatArg,

    /// Append logs to PATH rather than stderr.
    #[arg(
        long = "log-file",
        value_name = "PATH",
        global = true,
        help_heading = "Logging"
    )]
    pub log_file: Option<PathBuf>,

    /// Series definitions directory (default: $SKU_STANDARDS_DIR or the bundled standards/).
    #[arg(long = "standards-dir", value_name = "DIR", global = true)]
    pub standards_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Enumerate series and write one CSV catalog per series.
    Generate(GenerateArgs),

    /// List all defined series.
    Series,

    /// Audit exclusion rules for suspicious entries.
    Check(CheckArgs),
}

#[derive(Parser)]
pub struct GenerateArgs {
    /// Series code to generate (repeatable; default: all series).
    #[arg(long = "series", short = 's', value_name = "CODE")]
    pub series: Vec<String>,

    /// Output directory for catalog files.
    #[arg(long = "output-dir", short = 'o', value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Enumerate and count without writing files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct CheckArgs {
    /// Print the full report as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevelArg> for LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Error => Self::ERROR,
            LogLevelArg::Warn => Self::WARN,
            LogLevelArg::Info => Self::INFO,
            LogLevelArg::Debug => Self::DEBUG,
            LogLevelArg::Trace => Self::TRACE,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Pretty => Self::Pretty,
            LogFormatArg::Compact => Self::Compact,
            LogFormatArg::Json => Self::Json,
        }
    }
}
