//! Prefix tree used to count occurrences of corpus lines.
//!
//! This module provides:
//! - [`TrieNode`]: a node holding an occurrence counter and its owned children
//! - [`PrefixTree`]: the rooted tree with incremental insertion
//! - [`Duplicates`]: a lazy pre-order traversal yielding every key seen more than once
//!
//! # Example
//!
//! ```
//! use numdupe::trie::PrefixTree;
//!
//! let mut tree = PrefixTree::new();
//! for key in ["7", "77", "7", "77", "7"] {
//!     tree.insert(key).unwrap();
//! }
//!
//! let dupes: Vec<String> = tree.duplicates().collect();
//! assert_eq!(dupes, vec!["7", "77"]);
//! ```

pub mod iter;
pub mod node;
pub mod tree;

pub use iter::{Duplicates, DuplicatesWithCounts};
pub use node::TrieNode;
pub use tree::{PrefixTree, TrieError};
