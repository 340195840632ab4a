//! Search tree mutation, lookup, and traversal.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::str::FromStr;

use crate::storage::bst::node::{Link, Node, Record, fold_post_order};

/// An unbalanced binary search tree of uniquely keyed records.
///
/// Identifiers are handed out from a monotonically increasing counter that
/// starts at 1. The tree performs no I/O; persistence is layered on top by
/// [`CarSaleStore`](crate::storage::CarSaleStore).
#[derive(Debug)]
pub struct SearchTree<R: Record> {
    root: Link<R>,
    next_id: u64,
}

/// Outcome of [`SearchTree::remove`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Removal<R> {
    /// The key was present; holds the record that was removed.
    Removed(R),
    /// No record has the requested key.
    NotFound,
}

impl<R> Removal<R> {
    /// Whether a record was removed.
    #[must_use]
    pub const fn is_removed(&self) -> bool {
        matches!(self, Self::Removed(_))
    }
}

/// The order in which [`SearchTree::traverse`] yields records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalOrder {
    /// Left subtree, node, right subtree. Yields ascending keys.
    InOrder,
    /// Node, left subtree, right subtree.
    PreOrder,
    /// Left subtree, right subtree, node.
    PostOrder,
}

/// Error returned when parsing an unknown traversal order name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraversalOrderError(pub String);

impl std::fmt::Display for TraversalOrderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid traversal order '{}' (expected inorder, preorder or postorder)",
            self.0
        )
    }
}

impl std::error::Error for TraversalOrderError {}

impl FromStr for TraversalOrder {
    type Err = TraversalOrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "inorder" => Ok(Self::InOrder),
            "preorder" => Ok(Self::PreOrder),
            "postorder" => Ok(Self::PostOrder),
            other => Err(TraversalOrderError(other.to_string())),
        }
    }
}

impl<R: Record> Default for SearchTree<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> SearchTree<R> {
    /// Create an empty tree. The first assigned identifier is 1.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            root: None,
            next_id: 1,
        }
    }

    /// The root node, or `None` for an empty tree.
    #[must_use]
    pub fn root(&self) -> Option<&Node<R>> {
        self.root.as_deref()
    }

    /// Whether the tree holds no records.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The identifier the next new record without one will receive.
    #[must_use]
    pub const fn next_id(&self) -> u64 {
        self.next_id
    }

    /// Insert a record, or overwrite the record with the same key.
    ///
    /// A record without an identifier gets the next counter value when it
    /// creates a new node, and inherits the existing identifier when it
    /// overwrites one. A record that already carries an identifier keeps
    /// it and advances the counter past it.
    pub fn insert(&mut self, mut record: R) -> &R {
        if let Some(id) = record.id() {
            self.next_id = self.next_id.max(id.saturating_add(1));
        }

        let slot = find_slot(&mut self.root, record.key());
        match slot {
            Some(node) => {
                if let (None, Some(existing)) = (record.id(), node.record.id()) {
                    record.set_id(existing);
                }
                node.record = record;
                &node.record
            }
            None => {
                if record.id().is_none() {
                    record.set_id(self.next_id);
                    self.next_id += 1;
                }
                &slot.insert(Box::new(Node::leaf(record))).record
            }
        }
    }

    /// Look up a record by key.
    #[must_use]
    pub fn find<Q>(&self, key: &Q) -> Option<&R>
    where
        R::Key: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match key.cmp(node.record.key().borrow()) {
                Ordering::Equal => return Some(&node.record),
                Ordering::Less => node.left(),
                Ordering::Greater => node.right(),
            };
        }
        None
    }

    /// Apply `apply` to the record with this key, in place.
    ///
    /// `apply` must not change the record's key or identifier. Returns the
    /// updated record, or `None` if the key is absent.
    pub fn update<Q>(&mut self, key: &Q, apply: impl FnOnce(&mut R)) -> Option<&R>
    where
        R::Key: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let node = find_slot(&mut self.root, key).as_deref_mut()?;
        let id = node.record.id();
        apply(&mut node.record);
        debug_assert!(
            key.cmp(node.record.key().borrow()) == Ordering::Equal,
            "update must not change the record key"
        );
        debug_assert_eq!(id, node.record.id(), "update must not change the identifier");
        Some(&node.record)
    }

    /// Remove the record with this key.
    ///
    /// A node with at most one child is replaced by that child. A node with
    /// two children takes over the record of its in-order successor (the
    /// minimum of its right subtree), which is then spliced out of the
    /// right subtree.
    pub fn remove<Q>(&mut self, key: &Q) -> Removal<R>
    where
        R::Key: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let slot = find_slot(&mut self.root, key);
        let Some(mut node) = slot.take() else {
            return Removal::NotFound;
        };

        if node.left.is_some() && node.right.is_some() {
            let Some(successor) = detach_min(&mut node.right) else {
                unreachable!("right subtree of a two-child node is non-empty");
            };
            let removed = std::mem::replace(&mut node.record, successor);
            *slot = Some(node);
            return Removal::Removed(removed);
        }

        let Node {
            record,
            left,
            right,
        } = *node;
        *slot = left.or(right);
        Removal::Removed(record)
    }

    /// Collect records in the given traversal order.
    #[must_use]
    pub fn traverse(&self, order: TraversalOrder) -> Vec<&R> {
        match order {
            TraversalOrder::InOrder => self.in_order(),
            TraversalOrder::PreOrder => self.pre_order(),
            TraversalOrder::PostOrder => self.post_order(),
        }
    }

    /// Records in ascending key order.
    #[must_use]
    pub fn in_order(&self) -> Vec<&R> {
        let mut records = Vec::new();
        let mut stack: Vec<&Node<R>> = Vec::new();
        let mut current = self.root.as_deref();

        loop {
            while let Some(node) = current {
                stack.push(node);
                current = node.left();
            }
            let Some(node) = stack.pop() else {
                break;
            };
            records.push(&node.record);
            current = node.right();
        }

        records
    }

    /// Records with each node before its left then right subtree.
    #[must_use]
    pub fn pre_order(&self) -> Vec<&R> {
        let mut records = Vec::new();
        let mut stack: Vec<&Node<R>> = self.root.as_deref().into_iter().collect();

        while let Some(node) = stack.pop() {
            records.push(&node.record);
            stack.extend(node.right());
            stack.extend(node.left());
        }

        records
    }

    /// Records with each node after its left then right subtree.
    #[must_use]
    pub fn post_order(&self) -> Vec<&R> {
        fold_post_order(self.root(), Vec::new, |node, mut left, right| {
            left.extend(right);
            left.push(&node.record);
            left
        })
    }
}

impl<R: Record> Drop for SearchTree<R> {
    fn drop(&mut self) {
        // Dropping a `Box<Node>` recursively would follow the tree height,
        // which is unbounded here. Detach children before each node drops.
        let mut pending: Vec<Box<Node<R>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }
    }
}

/// Descend from `slot` to the slot that holds `key`, or to the empty slot
/// where it would be inserted.
fn find_slot<'a, R, Q>(mut slot: &'a mut Link<R>, key: &Q) -> &'a mut Link<R>
where
    R: Record,
    R::Key: Borrow<Q>,
    Q: Ord + ?Sized,
{
    loop {
        let ordering = match slot.as_deref() {
            Some(node) => key.cmp(node.record.key().borrow()),
            None => return slot,
        };
        if ordering == Ordering::Equal {
            return slot;
        }
        let Some(node) = slot.as_mut() else {
            unreachable!("empty slot handled above");
        };
        slot = if ordering == Ordering::Less {
            &mut node.left
        } else {
            &mut node.right
        };
    }
}

/// Unlink the minimum node of the subtree in `slot` and return its record.
///
/// The minimum has no left child, so its right subtree takes its place.
fn detach_min<R>(mut slot: &mut Link<R>) -> Option<R> {
    while slot.as_ref()?.left.is_some() {
        slot = match slot {
            Some(node) => &mut node.left,
            None => return None,
        };
    }

    let node = slot.take()?;
    let Node { record, right, .. } = *node;
    *slot = right;
    Some(record)
}
