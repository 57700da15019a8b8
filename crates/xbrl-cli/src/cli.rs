//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "xbrl-tabulator",
    version,
    about = "Extract XBRL regulatory filings into relational tables",
    long_about = "Convert XBRL filing instances into relational tables whose schemas\n\
                  are derived from a taxonomy's concept trees. One table per report\n\
                  schedule, appended to a CSV-backed store in batches."
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
    /// Extract filing instances into per-schedule tables.
    Extract(ExtractArgs),

    /// Show the tables a taxonomy derives into.
    Tables(TablesArgs),
}

#[derive(Parser)]
pub struct ExtractArgs {
    /// Taxonomy concept tree (JSON interchange form).
    #[arg(value_name = "TAXONOMY")]
    pub taxonomy: PathBuf,

    /// Directory containing filing instance documents (.xbrl/.xml).
    #[arg(value_name = "INSTANCE_DIR")]
    pub instance_dir: PathBuf,

    /// Output directory for the table store (default: <INSTANCE_DIR>/tables).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Number of instances accumulated between store flushes.
    #[arg(long = "batch-size", value_name = "N", default_value_t = 25)]
    pub batch_size: usize,

    /// Worker pool size (default: platform-determined).
    #[arg(long = "workers", value_name = "N")]
    pub workers: Option<usize>,

    /// Append a filing_id column carrying each instance's sequence index.
    #[arg(long = "filing-id")]
    pub filing_id: bool,

    /// Write the run summary (row counts, skipped instances) as JSON.
    #[arg(long = "summary-json", value_name = "PATH")]
    pub summary_json: Option<PathBuf>,
}

#[derive(Parser)]
pub struct TablesArgs {
    /// Taxonomy concept tree (JSON interchange form).
    #[arg(value_name = "TAXONOMY")]
    pub taxonomy: PathBuf,

    /// Include the filing_id column in the derived schemas.
    #[arg(long = "filing-id")]
    pub filing_id: bool,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
