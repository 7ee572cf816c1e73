//! CLI argument definitions for the sleep CDE mapper.

use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "cde",
    version,
    about = "Sleep CDE mapper - Map sleep study variables to canonical data elements",
    long_about = "Map heterogeneous sleep study variables onto canonical sleep data elements.\n\n\
                  Reads a TSV, CSV or JSONL variable listing, resolves every variable through\n\
                  the ordered strategy chain and writes a validated JSON mapping document."
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
}

#[derive(Subcommand)]
pub enum Command {
    /// Map a variable listing and write the mapping document.
    Map(MapArgs),

    /// List canonical slots in the schema registry.
    Slots(SlotsArgs),

    /// Resolve a single variable and show how the decision was made.
    Explain(ExplainArgs),
}

#[derive(Parser)]
pub struct MapArgs {
    /// Variable listing (.tsv, .csv or .jsonl).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Mapping document path (default: <INPUT> with a .mappings.json extension).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Engine configuration file (TOML). Built-in defaults when omitted.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Worker threads (default: batch.workers, else available parallelism).
    #[arg(long = "workers", value_name = "N")]
    pub workers: Option<NonZeroUsize>,

    /// Exit with status 1 when validation reports errors.
    ///
    /// The mapping document is written either way.
    #[arg(long = "fail-on-violations")]
    pub fail_on_violations: bool,
}

#[derive(Parser)]
pub struct SlotsArgs {
    /// Only list slots of this concept group (e.g. respiratory_events).
    #[arg(long = "group", value_name = "GROUP")]
    pub group: Option<String>,
}

#[derive(Parser)]
pub struct ExplainArgs {
    /// Source variable name.
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Source dataset identifier.
    #[arg(long = "dataset", value_name = "D", default_value = "adhoc")]
    pub dataset: String,

    /// Variable label.
    #[arg(long = "label", value_name = "L")]
    pub label: Option<String>,

    /// Concept path (folder) of the variable.
    #[arg(long = "path", value_name = "P")]
    pub path: Option<String>,

    /// Engine configuration file (TOML).
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,
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
