//! Command-line interface definitions for NumDupe.
//!
//! Two subcommands map onto the two phases of a run:
//!
//! ```bash
//! # Write a ~100 MiB corpus of integers below one million
//! numdupe generate --target-size-mb 100 --max-exclusive 1000000
//!
//! # Count occurrences and print every repeated value
//! numdupe compute --corpus numbers.txt
//!
//! # Write duplicates with counts as JSON
//! numdupe compute --format json --output dupes.json
//! ```
//!
//! A subcommand is required; a missing or unknown mode is a usage error.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::output::OutputFormat;

/// Find repeated integers in large newline-delimited corpora.
#[derive(Debug, Parser)]
#[command(name = "numdupe")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Report errors as JSON on stderr
    #[arg(long, global = true)]
    pub json_errors: bool,

    /// Path to a TOML config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a corpus of random integers
    Generate(GenerateArgs),
    /// Count a corpus and report values occurring more than once
    Compute(ComputeArgs),
}

/// Arguments for the generate subcommand.
///
/// Unset options fall back to the config file, then to built-in defaults.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Corpus file to write
    #[arg(short, long, value_name = "PATH")]
    pub corpus: Option<PathBuf>,

    /// Stop once the corpus exceeds this many MiB
    #[arg(short = 's', long, value_name = "MB")]
    pub target_size_mb: Option<u64>,

    /// Exclusive upper bound for generated integers
    #[arg(short = 'm', long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
    pub max_exclusive: Option<u64>,

    /// Lines written between size checks
    #[arg(short, long, value_name = "N", value_parser = parse_batch_size)]
    pub batch_size: Option<usize>,

    /// Seed for a reproducible corpus
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Append to an existing corpus instead of replacing it
    #[arg(long)]
    pub append: bool,
}

/// Arguments for the compute subcommand.
#[derive(Debug, Args)]
pub struct ComputeArgs {
    /// Corpus file to read
    #[arg(short, long, value_name = "PATH")]
    pub corpus: Option<PathBuf>,

    /// Write results to this file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Result format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Parse a strictly positive batch size.
///
/// # Errors
///
/// Returns a message for non-numeric or zero input.
pub fn parse_batch_size(s: &str) -> Result<usize, String> {
    let n: usize = s
        .trim()
        .parse()
        .map_err(|_| format!("Invalid batch size: '{s}'"))?;
    if n == 0 {
        return Err("Batch size must be at least 1".to_string());
    }
    Ok(n)
}
