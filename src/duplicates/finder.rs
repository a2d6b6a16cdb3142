//! Build loop feeding corpus lines into the prefix tree.
//!
//! # Overview
//!
//! 1. **Read**: pull one line at a time from a [`LineReader`]
//! 2. **Insert**: skip empty lines, insert every other line unchanged
//! 3. **Enumerate**: once input is exhausted, walk the finished tree for
//!    keys seen more than once
//!
//! A read failure aborts the whole build. A partially built tree reflects an
//! arbitrarily truncated corpus, so it is never handed back to the caller.
//!
//! # Example
//!
//! ```no_run
//! use numdupe::duplicates::{DuplicateFinder, FinderConfig};
//! use std::path::Path;
//!
//! let finder = DuplicateFinder::new(FinderConfig::default());
//! let (tree, summary) = finder.build_from_path(Path::new("numbers.txt")).unwrap();
//!
//! for key in tree.duplicates() {
//!     println!("{key}");
//! }
//! println!("{} distinct values", summary.distinct_keys);
//! ```

use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::corpus::LineReader;
use crate::progress::ProgressCallback;
use crate::trie::{PrefixTree, TrieError};

/// Lines processed between shutdown checks and progress updates.
const CHECK_INTERVAL: u64 = 4096;

/// Configuration for the duplicate finder.
#[derive(Clone, Default)]
pub struct FinderConfig {
    /// Optional shutdown flag for graceful termination.
    pub shutdown_flag: Option<Arc<AtomicBool>>,
    /// Optional progress callback for reporting.
    pub progress_callback: Option<Arc<dyn ProgressCallback>>,
}

impl std::fmt::Debug for FinderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinderConfig")
            .field("shutdown_flag", &self.shutdown_flag)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<callback>"),
            )
            .finish()
    }
}

impl FinderConfig {
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

    /// Check if shutdown has been requested.
    fn is_shutdown_requested(&self) -> bool {
        self.shutdown_flag
            .as_ref()
            .is_some_and(|f| f.load(Ordering::SeqCst))
    }
}

/// Summary statistics from a compute run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComputeSummary {
    /// Lines read from the corpus, empty ones included
    pub lines_read: u64,
    /// Empty lines skipped
    pub empty_lines: u64,
    /// Raw bytes read from the corpus
    pub bytes_read: u64,
    /// Characters across all inserted keys
    pub key_chars: u64,
    /// Number of distinct keys
    pub distinct_keys: usize,
    /// Nodes in the finished tree, root included
    pub node_count: usize,
    /// Keys occurring more than once (filled in after enumeration)
    pub duplicate_keys: usize,
    /// Time spent reading and inserting
    pub build_duration: Duration,
    /// Time spent enumerating duplicates
    pub enumerate_duration: Duration,
}

impl ComputeSummary {
    /// Number of lines actually inserted into the tree.
    #[must_use]
    pub fn inserted_lines(&self) -> u64 {
        self.lines_read - self.empty_lines
    }

    /// Total wall-clock time of the run.
    #[must_use]
    pub fn total_duration(&self) -> Duration {
        self.build_duration + self.enumerate_duration
    }
}

/// Errors that can occur while building the tree.
#[derive(thiserror::Error, Debug)]
pub enum FinderError {
    /// The run was interrupted by user (Ctrl+C or shutdown signal).
    #[error("Compute interrupted by user")]
    Interrupted,

    /// The corpus path does not exist.
    #[error("Corpus not found: {0}")]
    PathNotFound(PathBuf),

    /// The corpus path is not a regular file.
    #[error("Not a file: {0}")]
    NotAFile(PathBuf),

    /// The corpus could not be opened.
    #[error("Failed to open {path}: {source}")]
    Open {
        /// Corpus path
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Reading the corpus failed part way through.
    #[error("Read error at line {line}: {source}")]
    Read {
        /// 1-based line number of the failed read
        line: u64,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Tree precondition violated.
    #[error(transparent)]
    Trie(#[from] TrieError),
}

/// Drives the line-by-line build of a [`PrefixTree`].
#[derive(Debug, Default)]
pub struct DuplicateFinder {
    config: FinderConfig,
}

impl DuplicateFinder {
    /// Create a new duplicate finder with the given configuration.
    #[must_use]
    pub fn new(config: FinderConfig) -> Self {
        Self { config }
    }

    /// Create a new duplicate finder with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(FinderConfig::default())
    }

    /// Build a tree from the corpus file at `path`.
    ///
    /// # Errors
    ///
    /// Returns `FinderError` if:
    /// - The path does not exist or is not a file
    /// - The file cannot be opened or a read fails
    /// - The run is interrupted by shutdown signal
    pub fn build_from_path(&self, path: &Path) -> Result<(PrefixTree, ComputeSummary), FinderError> {
        if !path.exists() {
            return Err(FinderError::PathNotFound(path.to_path_buf()));
        }
        if !path.is_file() {
            return Err(FinderError::NotAFile(path.to_path_buf()));
        }

        let open_error = |source| FinderError::Open {
            path: path.to_path_buf(),
            source,
        };
        let total = std::fs::metadata(path).map_err(open_error)?.len();
        let reader = LineReader::open(path).map_err(open_error)?;

        log::info!("Reading corpus {}", path.display());
        if let Some(ref callback) = self.config.progress_callback {
            callback.on_phase_start("compute", total);
        }

        let result = self.build(reader);

        if let Some(ref callback) = self.config.progress_callback {
            callback.on_phase_end("compute");
        }
        result
    }

    /// Build a tree from any buffered reader.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError::Read`] on the first failed read and
    /// [`FinderError::Interrupted`] if shutdown is requested.
    pub fn build_from_reader<R: BufRead>(
        &self,
        reader: R,
    ) -> Result<(PrefixTree, ComputeSummary), FinderError> {
        self.build(LineReader::new(reader))
    }

    /// Build a tree from `path` and collect its duplicate keys.
    ///
    /// # Errors
    ///
    /// Same as [`DuplicateFinder::build_from_path`].
    pub fn find_in_path(&self, path: &Path) -> Result<(Vec<String>, ComputeSummary), FinderError> {
        let (tree, mut summary) = self.build_from_path(path)?;

        let start = Instant::now();
        let keys: Vec<String> = tree.duplicates().collect();
        summary.enumerate_duration = start.elapsed();
        summary.duplicate_keys = keys.len();

        Ok((keys, summary))
    }

    fn build<R: BufRead>(
        &self,
        mut reader: LineReader<R>,
    ) -> Result<(PrefixTree, ComputeSummary), FinderError> {
        let start = Instant::now();
        let mut tree = PrefixTree::new();
        let mut summary = ComputeSummary::default();

        if self.config.is_shutdown_requested() {
            return Err(FinderError::Interrupted);
        }

        loop {
            let line_no = reader.lines_read() + 1;
            let line = match reader.next_line() {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(source) => {
                    log::error!("Read failed at line {}: {}", line_no, source);
                    return Err(FinderError::Read {
                        line: line_no,
                        source,
                    });
                }
            };

            if line.is_empty() {
                summary.empty_lines += 1;
            } else {
                summary.key_chars += line.chars().count() as u64;
                tree.insert(line)?;
            }

            if line_no % CHECK_INTERVAL == 0 {
                if self.config.is_shutdown_requested() {
                    log::info!("Compute interrupted after {} lines", line_no);
                    return Err(FinderError::Interrupted);
                }
                if let Some(ref callback) = self.config.progress_callback {
                    callback.on_progress(reader.bytes_read());
                }
            }
        }

        summary.lines_read = reader.lines_read();
        summary.bytes_read = reader.bytes_read();
        summary.distinct_keys = tree.distinct_keys();
        summary.node_count = tree.node_count();
        summary.build_duration = start.elapsed();

        log::info!(
            "Build complete: {} lines ({} empty), {} distinct values, {} nodes in {:.2?}",
            summary.lines_read,
            summary.empty_lines,
            summary.distinct_keys,
            summary.node_count,
            summary.build_duration
        );

        Ok((tree, summary))
    }
}
