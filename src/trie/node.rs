//! Node type for the prefix tree.

use std::collections::BTreeMap;

/// A node in the prefix tree.
///
/// Each node stands for the prefix spelled by the edges from the root down to it.
/// Children are owned exclusively by their parent and kept in ascending character
/// order, which fixes the traversal order of [`crate::trie::Duplicates`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TrieNode {
    /// Child nodes keyed by the character on the connecting edge.
    pub(crate) children: BTreeMap<char, TrieNode>,
    /// Number of inserted keys that terminate exactly at this node.
    pub(crate) count: u64,
}

impl TrieNode {
    /// Create an empty node with a zero counter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of complete keys that ended at this node.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Look up the child reached through `ch`.
    #[must_use]
    pub fn child(&self, ch: char) -> Option<&TrieNode> {
        self.children.get(&ch)
    }

    /// Iterate over `(edge, child)` pairs in ascending character order.
    pub fn children(&self) -> impl DoubleEndedIterator<Item = (char, &TrieNode)> {
        self.children.iter().map(|(&ch, node)| (ch, node))
    }

    /// Whether this node has no children.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// True when more than one key terminated here.
    #[must_use]
    pub fn is_duplicate(&self) -> bool {
        self.count > 1
    }
}

impl Drop for TrieNode {
    // Dismantle iteratively so very long keys cannot overflow the stack.
    fn drop(&mut self) {
        let mut pending: Vec<TrieNode> = std::mem::take(&mut self.children).into_values().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(std::mem::take(&mut node.children).into_values());
        }
    }
}
