//! JSON output formatter for compute results.
//!
//! # Output Schema
//!
//! ```json
//! {
//!   "duplicates": [
//!     { "key": "7", "count": 3 },
//!     { "key": "77", "count": 2 }
//!   ],
//!   "summary": {
//!     "lines_read": 5,
//!     "empty_lines": 0,
//!     "distinct_keys": 2,
//!     "node_count": 3,
//!     "duplicate_keys": 2,
//!     "build_duration_ms": 1,
//!     "enumerate_duration_ms": 0,
//!     "exit_code": 0,
//!     "exit_code_name": "ND000"
//!   }
//! }
//! ```

use std::io::Write;

use serde::Serialize;

use super::OutputError;
use crate::duplicates::ComputeSummary;
use crate::error::ExitCode;

/// A duplicate key with its occurrence count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JsonDuplicate {
    /// The repeated line
    pub key: String,
    /// How many times it occurred
    pub count: u64,
}

/// Summary statistics in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonSummary {
    pub lines_read: u64,
    pub empty_lines: u64,
    pub bytes_read: u64,
    pub distinct_keys: usize,
    pub node_count: usize,
    pub duplicate_keys: usize,
    pub build_duration_ms: u64,
    pub enumerate_duration_ms: u64,
    /// The exit code number
    pub exit_code: i32,
    /// The machine-readable exit code name (e.g., "ND000")
    pub exit_code_name: String,
}

impl JsonSummary {
    #[must_use]
    pub fn from_compute_summary(summary: &ComputeSummary, exit_code: ExitCode) -> Self {
        Self {
            lines_read: summary.lines_read,
            empty_lines: summary.empty_lines,
            bytes_read: summary.bytes_read,
            distinct_keys: summary.distinct_keys,
            node_count: summary.node_count,
            duplicate_keys: summary.duplicate_keys,
            build_duration_ms: summary.build_duration.as_millis() as u64,
            enumerate_duration_ms: summary.enumerate_duration.as_millis() as u64,
            exit_code: exit_code.as_i32(),
            exit_code_name: exit_code.code_prefix().to_string(),
        }
    }
}

/// Complete JSON document for a compute run.
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput {
    pub duplicates: Vec<JsonDuplicate>,
    pub summary: JsonSummary,
}

impl JsonOutput {
    /// Build the document from `(key, count)` pairs, as produced by
    /// [`crate::trie::PrefixTree::duplicates_with_counts`].
    pub fn new<I>(duplicates: I, summary: &ComputeSummary, exit_code: ExitCode) -> Self
    where
        I: IntoIterator<Item = (String, u64)>,
    {
        Self {
            duplicates: duplicates
                .into_iter()
                .map(|(key, count)| JsonDuplicate { key, count })
                .collect(),
            summary: JsonSummary::from_compute_summary(summary, exit_code),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Serialize to `writer` followed by a newline.
    pub fn write_to<W: Write>(&self, writer: &mut W, pretty: bool) -> Result<(), OutputError> {
        let json = if pretty {
            self.to_json_pretty()?
        } else {
            self.to_json()?
        };
        writer.write_all(json.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}
