//! Random corpus generator.
//!
//! Writes uniformly distributed integers from `[0, max_exclusive)` as decimal
//! strings, one per line, in fixed-size batches. After every batch the file is
//! flushed and its on-disk size checked; generation stops once that size first
//! exceeds the configured threshold. At least one batch is always written.
//!
//! # Example
//!
//! ```no_run
//! use numdupe::corpus::{CorpusGenerator, GeneratorConfig};
//!
//! let config = GeneratorConfig::new("numbers.txt")
//!     .with_target_size_mb(10)
//!     .with_max_exclusive(1_000_000)
//!     .with_seed(7);
//! let summary = CorpusGenerator::new(config).generate().unwrap();
//! println!("{} lines, {}", summary.lines_written, summary.size_display());
//! ```

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use bytesize::ByteSize;

use crate::progress::ProgressCallback;

/// Default exclusive upper bound for generated integers.
pub const DEFAULT_MAX_EXCLUSIVE: u64 = 10_000_000;
/// Default corpus size threshold in MiB.
pub const DEFAULT_TARGET_SIZE_MB: u64 = 100;
/// Default number of lines written between size checks.
pub const DEFAULT_BATCH_SIZE: usize = 10_000;

/// Configuration for corpus generation.
#[derive(Clone)]
pub struct GeneratorConfig {
    /// File the corpus is written to.
    pub path: PathBuf,
    /// Exclusive upper bound for generated integers.
    pub max_exclusive: u64,
    /// Stop once the file grows beyond this many MiB.
    pub target_size_mb: u64,
    /// Lines written between flushes and size checks.
    pub batch_size: usize,
    /// Fixed PRNG seed for reproducible corpora.
    pub seed: Option<u64>,
    /// Keep existing file content instead of truncating.
    pub append: bool,
    /// Optional shutdown flag for graceful termination.
    pub shutdown_flag: Option<Arc<AtomicBool>>,
    /// Optional progress callback.
    pub progress_callback: Option<Arc<dyn ProgressCallback>>,
}

impl std::fmt::Debug for GeneratorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratorConfig")
            .field("path", &self.path)
            .field("max_exclusive", &self.max_exclusive)
            .field("target_size_mb", &self.target_size_mb)
            .field("batch_size", &self.batch_size)
            .field("seed", &self.seed)
            .field("append", &self.append)
            .field("shutdown_flag", &self.shutdown_flag)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<callback>"),
            )
            .finish()
    }
}

impl GeneratorConfig {
    /// Create a configuration writing to `path` with default limits.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_exclusive: DEFAULT_MAX_EXCLUSIVE,
            target_size_mb: DEFAULT_TARGET_SIZE_MB,
            batch_size: DEFAULT_BATCH_SIZE,
            seed: None,
            append: false,
            shutdown_flag: None,
            progress_callback: None,
        }
    }

    /// Set the exclusive upper bound for generated integers.
    #[must_use]
    pub fn with_max_exclusive(mut self, max_exclusive: u64) -> Self {
        self.max_exclusive = max_exclusive;
        self
    }

    /// Set the size threshold in MiB.
    #[must_use]
    pub fn with_target_size_mb(mut self, mb: u64) -> Self {
        self.target_size_mb = mb;
        self
    }

    /// Set the number of lines per batch.
    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Fix the PRNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Append to an existing corpus instead of truncating it.
    #[must_use]
    pub fn with_append(mut self, append: bool) -> Self {
        self.append = append;
        self
    }

    /// Set the shutdown flag for graceful termination.
    #[must_use]
    pub fn with_shutdown_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.shutdown_flag = Some(flag);
        self
    }

    /// Set the progress callback.
    #[must_use]
    pub fn with_progress_callback(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Size threshold in bytes.
    #[must_use]
    pub fn threshold_bytes(&self) -> u64 {
        ByteSize::mib(self.target_size_mb).as_u64()
    }

    fn is_shutdown_requested(&self) -> bool {
        self.shutdown_flag
            .as_ref()
            .is_some_and(|f| f.load(Ordering::SeqCst))
    }

    fn validate(&self) -> Result<(), GeneratorError> {
        if self.max_exclusive == 0 {
            return Err(GeneratorError::InvalidConfig(
                "max_exclusive must be greater than 0".to_string(),
            ));
        }
        if self.batch_size == 0 {
            return Err(GeneratorError::InvalidConfig(
                "batch_size must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Statistics from a generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateSummary {
    /// Lines appended during this run
    pub lines_written: u64,
    /// Final size of the corpus file in bytes
    pub bytes_on_disk: u64,
    /// Number of batches written
    pub batches: u64,
    /// Wall-clock duration of the run
    pub duration: Duration,
}

impl GenerateSummary {
    /// Format the final file size as a human-readable string.
    #[must_use]
    pub fn size_display(&self) -> String {
        ByteSize::b(self.bytes_on_disk).to_string()
    }
}

/// Errors that can occur during corpus generation.
#[derive(thiserror::Error, Debug)]
pub enum GeneratorError {
    /// Generation was interrupted by user (Ctrl+C or shutdown signal).
    #[error("Generation interrupted by user")]
    Interrupted,

    /// The configuration cannot produce a corpus.
    #[error("Invalid generator configuration: {0}")]
    InvalidConfig(String),

    /// Writing or inspecting the corpus file failed.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Corpus file path
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Writes random corpora according to a [`GeneratorConfig`].
#[derive(Debug)]
pub struct CorpusGenerator {
    config: GeneratorConfig,
}

impl CorpusGenerator {
    /// Create a generator for the given configuration.
    #[must_use]
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Write batches until the corpus file exceeds the size threshold.
    ///
    /// # Errors
    ///
    /// - [`GeneratorError::InvalidConfig`] for a zero bound or batch size
    /// - [`GeneratorError::Io`] if the file cannot be opened, written or synced
    /// - [`GeneratorError::Interrupted`] if shutdown was requested between batches;
    ///   everything written up to that point is flushed first
    pub fn generate(&self) -> Result<GenerateSummary, GeneratorError> {
        let config = &self.config;
        config.validate()?;

        let start = Instant::now();
        let threshold = config.threshold_bytes();
        let path = config.path.as_path();

        log::info!(
            "Generating corpus {} (target > {}, values in [0, {}))",
            path.display(),
            ByteSize::b(threshold),
            config.max_exclusive
        );

        let file = open_corpus(path, config.append).map_err(|e| io_error(path, e))?;
        let mut writer = BufWriter::new(file);
        let mut rng = config
            .seed
            .map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);

        if let Some(ref callback) = config.progress_callback {
            callback.on_phase_start("generate", threshold);
        }

        let mut summary = GenerateSummary::default();
        loop {
            if config.is_shutdown_requested() {
                writer.flush().map_err(|e| io_error(path, e))?;
                log::info!(
                    "Generation interrupted after {} lines",
                    summary.lines_written
                );
                return Err(GeneratorError::Interrupted);
            }

            for _ in 0..config.batch_size {
                writeln!(writer, "{}", rng.u64(0..config.max_exclusive))
                    .map_err(|e| io_error(path, e))?;
            }
            writer.flush().map_err(|e| io_error(path, e))?;

            summary.lines_written += config.batch_size as u64;
            summary.batches += 1;
            summary.bytes_on_disk = writer
                .get_ref()
                .metadata()
                .map_err(|e| io_error(path, e))?
                .len();

            log::trace!(
                "Batch {} written, corpus is {} bytes",
                summary.batches,
                summary.bytes_on_disk
            );
            if let Some(ref callback) = config.progress_callback {
                callback.on_progress(summary.bytes_on_disk);
            }

            if summary.bytes_on_disk > threshold {
                break;
            }
        }

        writer
            .get_ref()
            .sync_all()
            .map_err(|e| io_error(path, e))?;

        if let Some(ref callback) = config.progress_callback {
            callback.on_phase_end("generate");
        }

        summary.duration = start.elapsed();
        log::info!(
            "Generation complete: {} lines, {} in {:.2?}",
            summary.lines_written,
            summary.size_display(),
            summary.duration
        );
        Ok(summary)
    }
}

fn open_corpus(path: &Path, append: bool) -> std::io::Result<File> {
    let mut options = OpenOptions::new();
    options.create(true);
    if append {
        options.append(true);
    } else {
        options.write(true).truncate(true);
    }
    options.open(path)
}

fn io_error(path: &Path, source: std::io::Error) -> GeneratorError {
    GeneratorError::Io {
        path: path.to_path_buf(),
        source,
    }
}
