//! CLI argument definitions for `feedgen`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "feedgen",
    version,
    about = "Build the combined Google Merchant feed from inventory exports",
    long_about = "Build the combined Google Merchant feed from inventory exports.\n\n\
                  Reads the natural, lab-grown, and gemstone CSV exports, resolves\n\
                  prices in the target currency, and writes one 14-column feed.\n\
                  Settings come from the environment (see `feedgen config`)."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

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

    /// Prefix pretty and compact log lines with a timestamp.
    #[arg(long = "log-timestamps", global = true)]
    pub log_timestamps: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Fetch inputs, build the combined feed, and publish it.
    Run(RunArgs),

    /// Print the resolved configuration (secrets redacted).
    Config,

    /// List the shape to fallback image table.
    Shapes,
}

#[derive(Args)]
pub struct RunArgs {
    /// Directory the combined feed is written to [env: LOCAL_OUTPUT_DIRECTORY].
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Directory fetched inputs are staged in [env: FTP_DOWNLOAD_DIR].
    #[arg(long = "staging-dir", value_name = "DIR")]
    pub staging_dir: Option<PathBuf>,

    /// Local mirror of the remote drop folder to fetch from [env: FEED_SOURCE_DIR].
    #[arg(long = "source-dir", value_name = "DIR")]
    pub source_dir: Option<PathBuf>,

    /// Local directory standing in for the bucket store [env: FEED_SINK_DIR].
    #[arg(long = "sink-dir", value_name = "DIR")]
    pub sink_dir: Option<PathBuf>,

    /// Read a category from this file instead of the staging directory.
    ///
    /// Format: CATEGORY=PATH with CATEGORY one of natural, lab_grown, gemstone.
    /// May be repeated.
    #[arg(long = "input", value_name = "CATEGORY=PATH")]
    pub inputs: Vec<String>,

    /// Currency every price is expressed in [env: FEED_TARGET_CURRENCY].
    #[arg(long = "target-currency", value_name = "CODE")]
    pub target_currency: Option<String>,

    /// Base to target conversion rate [env: FEED_EXCHANGE_RATE].
    #[arg(long = "exchange-rate", value_name = "RATE")]
    pub exchange_rate: Option<f64>,

    /// Leave rows without a resolvable price out of the feed.
    #[arg(long = "drop-zero-priced")]
    pub drop_zero_priced: bool,

    /// Print a JSON status body instead of the summary table.
    #[arg(long = "json")]
    pub json: bool,
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
