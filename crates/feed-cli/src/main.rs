//! Merchant feed builder CLI.

use clap::{ColorChoice, Parser};
use feed_cli::logging::{LogConfig, LogFormat, init_logging};
use feed_cli::report::StatusBody;
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{run_config, run_feed, run_shapes};
use crate::summary::print_summary;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match cli.command {
        Command::Run(args) => match run_feed(&args) {
            Ok(report) => {
                if args.json {
                    print_status(&StatusBody::success(report.message()));
                } else {
                    print_summary(&report);
                }
                0
            }
            Err(error) => {
                tracing::error!(error = %format!("{error:#}"), "feed run failed");
                if args.json {
                    print_status(&StatusBody::error(format!("{error:#}")));
                } else {
                    eprintln!("error: {error:#}");
                }
                1
            }
        },
        Command::Config => match run_config() {
            Ok(()) => 0,
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
        Command::Shapes => {
            run_shapes();
            0
        }
    };
    std::process::exit(exit_code);
}

fn print_status(body: &StatusBody) {
    match serde_json::to_string(body) {
        Ok(json) => println!("{json}"),
        Err(error) => eprintln!("error: failed to serialize status: {error}"),
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let level_filter = match cli.log_level {
        Some(LogLevelArg::Error) => LevelFilter::ERROR,
        Some(LogLevelArg::Warn) => LevelFilter::WARN,
        Some(LogLevelArg::Info) => LevelFilter::INFO,
        Some(LogLevelArg::Debug) => LevelFilter::DEBUG,
        Some(LogLevelArg::Trace) => LevelFilter::TRACE,
        None => cli.verbosity.tracing_level_filter(),
    };
    let format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    let with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };

    LogConfig::default()
        .with_level_filter(level_filter)
        .with_env_filter(!(cli.verbosity.is_present() || cli.log_level.is_some()))
        .with_ansi(with_ansi)
        .with_timestamps(cli.log_timestamps)
        .with_format(format)
        .with_log_file(cli.log_file.clone())
}
