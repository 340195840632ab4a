//! Structural statistics of the search tree.
//!
//! Each statistic is computed by its own full pass so that they can be
//! cross-checked against each other.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::storage::bst::node::{Node, Record, fold_post_order};
use crate::storage::bst::tree::SearchTree;

/// Shape statistics of a tree.
///
/// # Invariants
///
/// - `total_nodes` equals the sum of `nodes_per_level` values.
/// - `leaf_count <= total_nodes`.
/// - For a non-empty tree, `height` is one more than the deepest level
///   present in `nodes_per_level`. An empty tree has height 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeStats {
    /// Number of nodes on the longest root-to-leaf path.
    pub height: usize,
    /// Number of records in the tree.
    pub total_nodes: usize,
    /// Number of nodes without children.
    pub leaf_count: usize,
    /// Number of nodes at each depth, the root being level 0.
    pub nodes_per_level: BTreeMap<usize, usize>,
}

impl<R: Record> SearchTree<R> {
    /// Height in nodes. A single node has height 1.
    #[must_use]
    pub fn height(&self) -> usize {
        fold_post_order(self.root(), || 0, |_, left, right| 1 + left.max(right))
    }

    /// Number of records in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        fold_post_order(self.root(), || 0, |_, left, right| 1 + left + right)
    }

    /// Number of nodes without children.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        fold_post_order(self.root(), || 0, |node, left, right| {
            if node.is_leaf() { 1 } else { left + right }
        })
    }

    /// Number of nodes at each depth, the root being level 0.
    #[must_use]
    pub fn nodes_per_level(&self) -> BTreeMap<usize, usize> {
        let mut levels = BTreeMap::new();
        let mut stack: Vec<(&Node<R>, usize)> =
            self.root().map(|root| (root, 0)).into_iter().collect();

        while let Some((node, level)) = stack.pop() {
            *levels.entry(level).or_insert(0) += 1;
            stack.extend(node.right().map(|child| (child, level + 1)));
            stack.extend(node.left().map(|child| (child, level + 1)));
        }

        levels
    }

    /// All shape statistics at once.
    #[must_use]
    pub fn stats(&self) -> TreeStats {
        TreeStats {
            height: self.height(),
            total_nodes: self.len(),
            leaf_count: self.leaf_count(),
            nodes_per_level: self.nodes_per_level(),
        }
    }
}
