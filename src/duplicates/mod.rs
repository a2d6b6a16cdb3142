//! Duplicate detection module.
//!
//! This module provides the build loop that streams a corpus into a
//! [`crate::trie::PrefixTree`] and the summary it reports.

pub mod finder;

pub use finder::{ComputeSummary, DuplicateFinder, FinderConfig, FinderError};
