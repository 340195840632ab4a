//! Path queries: the path between two keys and the longest path through
//! the root.

use std::borrow::Borrow;

use crate::storage::bst::node::{Node, Record, fold_post_order};
use crate::storage::bst::tree::SearchTree;

impl<R: Record> SearchTree<R> {
    /// The records on the simple path from `start` to `end`, both included.
    ///
    /// The path climbs from `start` to the lowest common ancestor of the two
    /// keys and then descends to `end`. Returns `None` if either key is
    /// absent.
    #[must_use]
    pub fn path<Q>(&self, start: &Q, end: &Q) -> Option<Vec<&R>>
    where
        R::Key: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let ancestor = lowest_common_ancestor(self.root(), start, end)?;
        let mut to_start = path_from(ancestor, start)?;
        let to_end = path_from(ancestor, end)?;

        to_start.reverse();
        to_start.extend(to_end.into_iter().skip(1));
        Some(to_start)
    }

    /// The longest leaf-to-leaf path that passes through the root.
    ///
    /// The deepest path of each root subtree is taken (the left one on
    /// ties), giving `left leaf … root … right leaf`. This is anchored at the
    /// root and is not necessarily the diameter of the tree. Empty for an
    /// empty tree.
    #[must_use]
    pub fn longest_path(&self) -> Vec<&R> {
        let Some(root) = self.root() else {
            return Vec::new();
        };

        // Already ordered leaf first, which is what the left side needs.
        let (_, mut path) = deepest_path(root.left());
        path.push(&root.record);

        let (_, mut right) = deepest_path(root.right());
        right.reverse();
        path.extend(right);
        path
    }
}

/// The deepest node that has both keys in its subtree, or is one of them.
///
/// A node whose key matches either target is a candidate. When both
/// subtrees of a node yield a candidate, the node itself is the ancestor;
/// otherwise whichever side found something is propagated. If only one key
/// is present, that key's node is returned and the later downward search
/// for the other key fails.
fn lowest_common_ancestor<'a, R, Q>(
    root: Option<&'a Node<R>>,
    first: &Q,
    second: &Q,
) -> Option<&'a Node<R>>
where
    R: Record,
    R::Key: Borrow<Q>,
    Q: Ord + ?Sized,
{
    fold_post_order(
        root,
        || None,
        |node, left, right| {
            let key: &Q = node.record.key().borrow();
            if key == first || key == second {
                return Some(node);
            }
            match (left, right) {
                (Some(_), Some(_)) => Some(node),
                (left, right) => left.or(right),
            }
        },
    )
}

/// Depth-first search from `from` to the node holding `key`.
///
/// Returns the records from `from` down to the target, both included. The
/// search explores left before right and drops nodes from the candidate
/// path when it backtracks out of their subtrees.
fn path_from<'a, R, Q>(from: &'a Node<R>, key: &Q) -> Option<Vec<&'a R>>
where
    R: Record,
    R::Key: Borrow<Q>,
    Q: Ord + ?Sized,
{
    let mut path: Vec<&R> = Vec::new();
    let mut stack = vec![(from, 0usize)];

    while let Some((node, depth)) = stack.pop() {
        path.truncate(depth);
        path.push(&node.record);
        let node_key: &Q = node.record.key().borrow();
        if node_key == key {
            return Some(path);
        }
        stack.extend(node.right().map(|child| (child, depth + 1)));
        stack.extend(node.left().map(|child| (child, depth + 1)));
    }

    None
}

/// Depth and records of the deepest path below `subtree`, ordered from the
/// leaf up to the subtree root. The left side wins ties.
fn deepest_path<R>(subtree: Option<&Node<R>>) -> (usize, Vec<&R>) {
    fold_post_order(
        subtree,
        || (0, Vec::new()),
        |node, (left_depth, left), (right_depth, right)| {
            let (depth, mut path) = if left_depth >= right_depth {
                (left_depth, left)
            } else {
                (right_depth, right)
            };
            path.push(&node.record);
            (depth + 1, path)
        },
    )
}
