//! NumDupe - repeated-value finder for large integer corpora
//!
//! Streams a newline-delimited corpus into a prefix tree that counts every
//! distinct line, then lazily enumerates the lines that occurred more than once.
//! Memory grows with the number of distinct prefixes, not with the number of
//! lines. A companion generator writes random corpora of a chosen size.

pub mod cli;
pub mod config;
pub mod corpus;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod output;
pub mod progress;
pub mod signal;
pub mod trie;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use yansi::Paint;

use crate::cli::{Cli, Commands};
use crate::config::Config;
use crate::corpus::CorpusGenerator;
use crate::duplicates::{DuplicateFinder, FinderConfig};
use crate::error::ExitCode;
use crate::output::{JsonOutput, OutputFormat, TextOutput};
use crate::progress::{Progress, ProgressCallback};
use crate::signal::ShutdownHandler;

/// Run the application for parsed CLI arguments.
///
/// # Errors
///
/// Returns an error if configuration is invalid, the corpus cannot be written
/// or read, results cannot be written, or the run was interrupted.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet);
    if cli.no_color {
        yansi::disable();
    }

    let handler = signal::install_handler().context("Failed to install Ctrl+C handler")?;
    let mut config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Generate(args) => {
            config.apply_generate_args(&args);
            run_generate(&config, args.append, &handler, cli.quiet)
        }
        Commands::Compute(args) => {
            config.apply_compute_args(&args);
            run_compute(&config, args.format, &handler, cli.quiet)
        }
    }
}

fn run_generate(
    config: &Config,
    append: bool,
    handler: &ShutdownHandler,
    quiet: bool,
) -> Result<ExitCode> {
    let progress: Arc<dyn ProgressCallback> = Arc::new(Progress::new(quiet));
    let generator_config = config
        .generator_config()
        .with_append(append)
        .with_shutdown_flag(handler.get_flag())
        .with_progress_callback(progress);

    let summary = CorpusGenerator::new(generator_config)
        .generate()
        .with_context(|| format!("Failed to generate {}", config.corpus_path.display()))?;

    if !quiet {
        eprintln!(
            "{} wrote {} lines ({}) to {}",
            "Generated:".green().bold(),
            summary.lines_written,
            summary.size_display(),
            config.corpus_path.display()
        );
    }
    Ok(ExitCode::Success)
}

fn run_compute(
    config: &Config,
    format: OutputFormat,
    handler: &ShutdownHandler,
    quiet: bool,
) -> Result<ExitCode> {
    let progress: Arc<dyn ProgressCallback> = Arc::new(Progress::new(quiet));
    let finder = DuplicateFinder::new(
        FinderConfig::default()
            .with_shutdown_flag(handler.get_flag())
            .with_progress_callback(progress),
    );

    let (tree, mut summary) = finder
        .build_from_path(&config.corpus_path)
        .with_context(|| format!("Failed to count {}", config.corpus_path.display()))?;

    let mut sink: Box<dyn Write> = match config.output_path {
        Some(ref path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create results file {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let start = Instant::now();
    let exit_code = match format {
        OutputFormat::Text => {
            summary.duplicate_keys = TextOutput::new(&mut sink)
                .write_keys(tree.duplicates())
                .context("Failed to write duplicates")?;
            summary.enumerate_duration = start.elapsed();
            exit_code_for(summary.duplicate_keys)
        }
        OutputFormat::Json => {
            let pairs: Vec<(String, u64)> = tree.duplicates_with_counts().collect();
            summary.duplicate_keys = pairs.len();
            summary.enumerate_duration = start.elapsed();
            let exit_code = exit_code_for(summary.duplicate_keys);
            JsonOutput::new(pairs, &summary, exit_code)
                .write_to(&mut sink, true)
                .context("Failed to write JSON report")?;
            exit_code
        }
    };

    log::info!(
        "Found {} duplicate values among {} distinct in {:.2?}",
        summary.duplicate_keys,
        summary.distinct_keys,
        summary.total_duration()
    );
    if !quiet {
        eprintln!(
            "{} {} duplicate values, {} distinct, {} lines ({} empty skipped), {} trie nodes",
            "Done:".green().bold(),
            summary.duplicate_keys.to_string().yellow(),
            summary.distinct_keys,
            summary.lines_read,
            summary.empty_lines,
            summary.node_count
        );
    }

    Ok(exit_code)
}

fn exit_code_for(duplicate_keys: usize) -> ExitCode {
    if duplicate_keys == 0 {
        ExitCode::NoDuplicates
    } else {
        ExitCode::Success
    }
}
