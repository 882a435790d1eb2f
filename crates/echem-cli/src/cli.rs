//! CLI argument definitions for the instrument file converter.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use echem_ingest::Device;

#[derive(Parser)]
#[command(
    name = "echem-convert",
    version,
    about = "Convert electrochemistry instrument files to normalized tables",
    long_about = "Convert electrochemistry instrument files to normalized tables.\n\n\
                  Reads generic CSV and BioLogic EC-Lab MPT files and writes the\n\
                  time, voltage and current columns with a JSON field schema."
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
    /// Convert instrument files and write normalized outputs.
    Convert(ConvertArgs),

    /// Show how a file is read, without converting it.
    Inspect(InspectArgs),

    /// List supported devices.
    Devices,
}

/// Options selecting how input files are read.
#[derive(Args)]
pub struct InputArgs {
    /// Device that produced the files (default: detected from the extension).
    #[arg(long = "device", value_name = "DEVICE", value_parser = parse_device)]
    pub device: Option<Device>,

    /// JSON metadata document describing the fields.
    #[arg(long = "metadata", value_name = "JSON")]
    pub metadata: Option<PathBuf>,

    /// Encoding of files that are not UTF-8 (e.g. latin1).
    #[arg(long = "encoding", value_name = "LABEL")]
    pub encoding: Option<String>,
}

#[derive(Parser)]
pub struct ConvertArgs {
    /// Instrument files to convert.
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,

    #[command(flatten)]
    pub input: InputArgs,

    /// Output directory for generated files (default: <FILE dir>/converted).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Convert and report without writing output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Keep only the first voltage and current alias found.
    #[arg(long = "first-match")]
    pub first_match: bool,
}

#[derive(Parser)]
pub struct InspectArgs {
    /// Instrument file to inspect.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    #[command(flatten)]
    pub input: InputArgs,
}

fn parse_device(value: &str) -> Result<Device, String> {
    value.parse().map_err(|err: echem_ingest::IngestError| err.to_string())
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
