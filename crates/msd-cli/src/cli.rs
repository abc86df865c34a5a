//! CLI argument definitions for the schema duplicator.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use msd_cli::selection::OptionExclusion;

#[derive(Parser)]
#[command(
    name = "msd",
    version,
    about = "Metadata Schema Duplicator - Copy metadata field definitions between libraries",
    long_about = "Copy custom metadata field definitions from one library to another.\n\n\
                  Merge mode reuses same-named fields and only adds missing options;\n\
                  create-new mode always creates fresh fields."
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

    /// Settings file to use instead of the platform default.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// GraphQL endpoint (overrides the settings file).
    #[arg(long = "endpoint", value_name = "URL", env = "MSD_ENDPOINT", global = true)]
    pub endpoint: Option<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List libraries that have metadata fields.
    Collections(CollectionsArgs),

    /// List the metadata fields of a library.
    Fields(FieldsArgs),

    /// Copy field definitions from one library to another.
    Copy(CopyArgs),

    /// Show or change stored settings.
    Config(ConfigArgs),
}

#[derive(Args)]
pub struct CollectionsArgs {
    /// Only show libraries whose name contains this text (case-insensitive).
    #[arg(long = "search", value_name = "TEXT")]
    pub search: Option<String>,
}

#[derive(Args)]
pub struct FieldsArgs {
    /// Library id.
    #[arg(value_name = "COLLECTION")]
    pub collection: String,

    /// Only show fields whose name contains this text (case-insensitive).
    #[arg(long = "search", value_name = "TEXT")]
    pub search: Option<String>,
}

#[derive(Args)]
pub struct CopyArgs {
    /// Source library id.
    #[arg(long = "from", value_name = "COLLECTION")]
    pub from: String,

    /// Destination library id (default: `default_destination` from settings).
    #[arg(long = "to", value_name = "COLLECTION")]
    pub to: Option<String>,

    /// Field to copy, by name. Repeat to copy several; order is kept.
    #[arg(long = "field", value_name = "NAME", required_unless_present = "all")]
    pub fields: Vec<String>,

    /// Copy every field of the source library.
    #[arg(long = "all", conflicts_with = "fields")]
    pub all: bool,

    /// Leave one option of a selected choice field out, as FIELD=VALUE. Repeatable.
    #[arg(long = "exclude-option", value_name = "FIELD=VALUE")]
    pub exclude_options: Vec<OptionExclusion>,

    /// Always create new fields instead of merging into same-named ones.
    ///
    /// Running the same copy twice in this mode creates duplicates.
    #[arg(long = "create-new")]
    pub create_new: bool,

    /// Show the plan without changing the destination.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the settings file location and its effective contents.
    Show,

    /// Remember a destination library for `copy`.
    SetDestination {
        /// Library id.
        #[arg(value_name = "COLLECTION")]
        collection: String,
    },

    /// Store the GraphQL endpoint.
    SetEndpoint {
        #[arg(value_name = "URL")]
        url: String,
    },
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
