//! Metadata Schema Duplicator CLI.

use std::io::{self, IsTerminal};
use std::path::Path;

use clap::{ColorChoice, Parser};
use msd_cli::logging::{LogConfig, LogFormat, init_logging};
use msd_cli::settings::{Settings, load_settings};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{connect, run_collections, run_config, run_copy, run_fields};
use crate::summary::print_copy_result;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(error) => {
            eprintln!("error: failed to start async runtime: {error}");
            std::process::exit(1);
        }
    };

    let settings = settings_from_cli(&cli);
    let exit_code = match runtime.block_on(dispatch(cli.command, &settings, cli.config.as_deref())) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

async fn dispatch(
    command: Command,
    settings: &Settings,
    config_path: Option<&Path>,
) -> anyhow::Result<i32> {
    match command {
        Command::Collections(args) => {
            run_collections(&connect(settings)?, &args).await?;
            Ok(0)
        }
        Command::Fields(args) => {
            run_fields(&connect(settings)?, &args).await?;
            Ok(0)
        }
        Command::Copy(args) => {
            let result = run_copy(&connect(settings)?, settings, &args).await?;
            print_copy_result(&result);
            Ok(result.exit_code())
        }
        Command::Config(args) => {
            run_config(settings, config_path, &args)?;
            Ok(0)
        }
    }
}

/// Stored settings with command-line and environment overrides applied.
fn settings_from_cli(cli: &Cli) -> Settings {
    let mut settings = load_settings(cli.config.as_deref());
    if let Some(endpoint) = &cli.endpoint {
        settings.remote.endpoint.clone_from(endpoint);
    }
    settings.remote = settings.remote.with_token_from_env();
    settings
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
