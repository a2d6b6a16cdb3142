//! Output formatters for duplicate keys.
//!
//! This module provides the sinks duplicate keys are written to:
//! - Plain text, one key per line, streamed straight from the enumerator
//! - JSON for automation and scripting
//!
//! Both write to any [`std::io::Write`], so the caller decides between stdout
//! and a results file.
//!
//! # Example
//!
//! ```
//! use numdupe::output::TextOutput;
//! use numdupe::trie::PrefixTree;
//!
//! let mut tree = PrefixTree::new();
//! for key in ["5", "3", "5"] {
//!     tree.insert(key).unwrap();
//! }
//!
//! let mut out = Vec::new();
//! let written = TextOutput::new(&mut out).write_keys(tree.duplicates()).unwrap();
//! assert_eq!(written, 1);
//! assert_eq!(out, b"5\n");
//! ```

pub mod json;
pub mod text;

use std::fmt;

pub use json::JsonOutput;
pub use text::TextOutput;

/// Output format for compute results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One duplicate key per line
    #[default]
    Text,
    /// JSON document with keys, counts and a summary
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Errors raised while writing results.
#[derive(thiserror::Error, Debug)]
pub enum OutputError {
    /// JSON serialization failed.
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Writing to the sink failed.
    #[error("I/O error while writing results: {0}")]
    Io(#[from] std::io::Error),
}
