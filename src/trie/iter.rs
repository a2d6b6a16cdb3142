//! Lazy duplicate enumeration over a [`crate::trie::PrefixTree`].
//!
//! The traversal is an explicit-stack pre-order walk, so key length never
//! translates into call-stack depth. The current key lives in a single buffer:
//! every stack frame remembers how long the buffer was at its parent, and the
//! buffer is truncated back to that length before the frame's edge character is
//! appended. Total work is O(nodes) plus the cost of cloning yielded keys.

use super::node::TrieNode;

/// A pending node together with the key length at its parent.
#[derive(Debug)]
struct Frame<'a> {
    node: &'a TrieNode,
    edge: Option<char>,
    parent_len: usize,
}

/// Iterator over keys whose occurrence count exceeds one.
///
/// Created by [`crate::trie::PrefixTree::duplicates`]. Keys are produced in
/// pre-order (a key before any key it prefixes), siblings in ascending
/// character order.
#[derive(Debug)]
pub struct Duplicates<'a> {
    stack: Vec<Frame<'a>>,
    key: String,
}

impl<'a> Duplicates<'a> {
    pub(crate) fn new(root: &'a TrieNode) -> Self {
        Self {
            stack: vec![Frame {
                node: root,
                edge: None,
                parent_len: 0,
            }],
            key: String::new(),
        }
    }

    /// Move to the next duplicate node, leaving its key in `self.key`.
    ///
    /// Returns that node's count.
    fn advance(&mut self) -> Option<u64> {
        while let Some(frame) = self.stack.pop() {
            self.key.truncate(frame.parent_len);
            if let Some(ch) = frame.edge {
                self.key.push(ch);
            }

            let len = self.key.len();
            self.stack
                .extend(frame.node.children().rev().map(|(ch, child)| Frame {
                    node: child,
                    edge: Some(ch),
                    parent_len: len,
                }));

            if frame.node.is_duplicate() {
                return Some(frame.node.count());
            }
        }
        None
    }
}

impl Iterator for Duplicates<'_> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        self.advance().map(|_| self.key.clone())
    }
}

impl std::iter::FusedIterator for Duplicates<'_> {}

/// Iterator over `(key, count)` pairs for every duplicate key.
///
/// Same order as [`Duplicates`].
#[derive(Debug)]
pub struct DuplicatesWithCounts<'a> {
    inner: Duplicates<'a>,
}

impl<'a> DuplicatesWithCounts<'a> {
    pub(crate) fn new(root: &'a TrieNode) -> Self {
        Self {
            inner: Duplicates::new(root),
        }
    }
}

impl Iterator for DuplicatesWithCounts<'_> {
    type Item = (String, u64);

    fn next(&mut self) -> Option<Self::Item> {
        let count = self.inner.advance()?;
        Some((self.inner.key.clone(), count))
    }
}

impl std::iter::FusedIterator for DuplicatesWithCounts<'_> {}
