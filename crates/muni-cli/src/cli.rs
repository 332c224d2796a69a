//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "muni-indicators",
    version,
    about = "Municipal demographic, housing, and mobility indicators",
    long_about = "Compute municipal indicators from INE statistical tables.\n\n\
                  Joins population, census, household, housing, and vehicle fleet\n\
                  datasets by municipality and reports per-year indicators."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Directory holding the dataset files (overrides MUNI_DATA_DIR and the config).
    #[arg(long = "data-dir", value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// TOML file describing dataset files, key columns, and value columns.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compute the indicator table for a municipality.
    Indicators(IndicatorsArgs),

    /// Show the long-run population series for a municipality.
    History(HistoryArgs),

    /// List municipalities whose name or code contains a term.
    Search(SearchArgs),

    /// Summarize the loaded datasets.
    Datasets,
}

#[derive(Parser)]
pub struct IndicatorsArgs {
    /// Municipality key, e.g. "28079 Madrid".
    #[arg(value_name = "MUNICIPALITY")]
    pub municipality: String,

    /// Export the table to this file, or into this directory under the
    /// default file name.
    #[arg(long = "export", value_name = "PATH")]
    pub export: Option<PathBuf>,

    /// Export format.
    #[arg(long = "format", value_enum, default_value = "csv")]
    pub format: ExportFormatArg,
}

#[derive(Parser)]
pub struct HistoryArgs {
    /// Municipality key, e.g. "28079 Madrid".
    #[arg(value_name = "MUNICIPALITY")]
    pub municipality: String,

    /// Export the series as CSV to this file or directory.
    #[arg(long = "export", value_name = "PATH")]
    pub export: Option<PathBuf>,
}

#[derive(Parser)]
pub struct SearchArgs {
    /// Case-insensitive fragment of the municipality key.
    #[arg(value_name = "TERM", default_value = "")]
    pub term: String,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ExportFormatArg {
    Csv,
    Json,
    Xlsx,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
