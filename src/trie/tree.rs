//! Prefix tree with per-node occurrence counters.
//!
//! Insertion is a straight-line walk from the root: for every character the
//! matching child is looked up or created, and the counter of the node reached
//! after the last character is incremented. Cost is O(key length) per insert and
//! the tree only grows with the number of distinct prefixes, never with the
//! number of lines fed into it.

use super::iter::{Duplicates, DuplicatesWithCounts};
use super::node::TrieNode;

/// Errors raised by tree operations.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TrieError {
    /// An empty key was passed to [`PrefixTree::insert`].
    ///
    /// Callers are expected to filter empty lines before inserting.
    #[error("Cannot insert an empty key into the prefix tree")]
    EmptyKey,
}

/// A rooted prefix tree counting how often each key was inserted.
///
/// The root represents the empty prefix. Node count and counters only ever grow
/// for the lifetime of the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixTree {
    root: TrieNode,
    node_count: usize,
    distinct_keys: usize,
    total_insertions: u64,
}

impl Default for PrefixTree {
    fn default() -> Self {
        Self::new()
    }
}

impl PrefixTree {
    /// Create an empty tree holding only the root node.
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: TrieNode::new(),
            node_count: 1,
            distinct_keys: 0,
            total_insertions: 0,
        }
    }

    /// Record one occurrence of `key`.
    ///
    /// Missing edges along the path are created on demand. A key that is a
    /// prefix of another key keeps its own counter on the shared node.
    ///
    /// # Errors
    ///
    /// Returns [`TrieError::EmptyKey`] without touching the tree if `key` is empty.
    ///
    /// # Example
    ///
    /// ```
    /// use numdupe::trie::PrefixTree;
    ///
    /// let mut tree = PrefixTree::new();
    /// tree.insert("12").unwrap();
    /// tree.insert("1").unwrap();
    /// assert_eq!(tree.count("1"), 1);
    /// assert_eq!(tree.count("12"), 1);
    /// assert!(tree.insert("").is_err());
    /// ```
    pub fn insert(&mut self, key: &str) -> Result<(), TrieError> {
        if key.is_empty() {
            return Err(TrieError::EmptyKey);
        }

        let mut created = 0usize;
        let mut node = &mut self.root;
        for ch in key.chars() {
            node = node.children.entry(ch).or_insert_with(|| {
                created += 1;
                TrieNode::new()
            });
        }

        if node.count == 0 {
            self.distinct_keys += 1;
        }
        node.count += 1;
        self.node_count += created;
        self.total_insertions += 1;
        Ok(())
    }

    /// Number of times `key` was inserted. Absent keys and the empty key report 0.
    #[must_use]
    pub fn count(&self, key: &str) -> u64 {
        self.find(key).map_or(0, TrieNode::count)
    }

    /// Follow `prefix` from the root and return the node it reaches, if any.
    #[must_use]
    pub fn find(&self, prefix: &str) -> Option<&TrieNode> {
        let mut node = &self.root;
        for ch in prefix.chars() {
            node = node.child(ch)?;
        }
        Some(node)
    }

    /// The root node (empty prefix).
    #[must_use]
    pub fn root(&self) -> &TrieNode {
        &self.root
    }

    /// Total number of nodes, root included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Number of distinct keys inserted so far.
    #[must_use]
    pub fn distinct_keys(&self) -> usize {
        self.distinct_keys
    }

    /// Number of successful `insert` calls.
    #[must_use]
    pub fn total_insertions(&self) -> u64 {
        self.total_insertions
    }

    /// True if nothing has been inserted yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_insertions == 0
    }

    /// Lazily enumerate every key inserted more than once, in pre-order with
    /// children visited in ascending character order.
    ///
    /// Each call starts a fresh traversal.
    pub fn duplicates(&self) -> Duplicates<'_> {
        Duplicates::new(&self.root)
    }

    /// Same traversal as [`PrefixTree::duplicates`], paired with each key's count.
    pub fn duplicates_with_counts(&self) -> DuplicatesWithCounts<'_> {
        DuplicatesWithCounts::new(&self.root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_from(keys: &[&str]) -> PrefixTree {
        let mut tree = PrefixTree::new();
        for key in keys {
            tree.insert(key).unwrap();
        }
        tree
    }

    #[test]
    fn test_new_tree_has_only_root() {
        let tree = PrefixTree::new();
        assert!(tree.is_empty());
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.distinct_keys(), 0);
        assert_eq!(tree.root().count(), 0);
    }

    #[test]
    fn test_repeated_insert_reuses_nodes() {
        let tree = tree_from(&["42", "42"]);
        assert_eq!(tree.count("42"), 2);
        assert_eq!(tree.node_count(), 3);
        assert_eq!(tree.distinct_keys(), 1);
        assert_eq!(tree.total_insertions(), 2);
    }

    #[test]
    fn test_prefix_keys_have_independent_counters() {
        let tree = tree_from(&["12", "1"]);
        assert_eq!(tree.count("1"), 1);
        assert_eq!(tree.count("12"), 1);
        assert_eq!(tree.node_count(), 3);
        assert!(!tree.find("1").unwrap().is_leaf());
    }

    #[test]
    fn test_intermediate_prefix_exists_with_zero_count() {
        let tree = tree_from(&["123"]);
        let node = tree.find("12").unwrap();
        assert_eq!(node.count(), 0);
        assert_eq!(tree.count("12"), 0);
        assert_eq!(tree.count("123"), 1);
    }

    #[test]
    fn test_count_of_absent_key_is_zero() {
        let tree = tree_from(&["5"]);
        assert_eq!(tree.count("6"), 0);
        assert_eq!(tree.count("55"), 0);
        assert_eq!(tree.count(""), 0);
    }

    #[test]
    fn test_empty_key_rejected_without_mutation() {
        let mut tree = tree_from(&["9"]);
        let before = tree.clone();
        assert_eq!(tree.insert(""), Err(TrieError::EmptyKey));
        assert_eq!(tree, before);
        assert_eq!(tree.root().count(), 0);
    }

    #[test]
    fn test_no_shared_prefix_node_count() {
        let tree = tree_from(&["123", "456"]);
        assert_eq!(tree.node_count(), 7);
    }

    #[test]
    fn test_non_digit_keys_are_opaque() {
        let tree = tree_from(&["-1", "-1", " 1"]);
        assert_eq!(tree.count("-1"), 2);
        assert_eq!(tree.count(" 1"), 1);
    }

    #[test]
    fn test_trie_error_display() {
        assert_eq!(
            TrieError::EmptyKey.to_string(),
            "Cannot insert an empty key into the prefix tree"
        );
    }
}
