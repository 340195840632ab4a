//! Node layout and the record contract for the search tree.

/// A value that can be stored in a [`SearchTree`](super::SearchTree).
///
/// The key is the sole ordering criterion. The identifier is assigned by the
/// tree when a record without one is first inserted, and must not change
/// afterwards.
pub trait Record {
    /// Totally ordered key type.
    type Key: Ord + ?Sized;

    /// The ordering key of this record.
    fn key(&self) -> &Self::Key;

    /// The record identifier, or `None` if none has been assigned yet.
    fn id(&self) -> Option<u64>;

    /// Assign the record identifier.
    fn set_id(&mut self, id: u64);
}

/// An owned child slot. `None` is an empty slot.
pub(super) type Link<R> = Option<Box<Node<R>>>;

/// A tree node.
///
/// Owns its record and at most two children. There is no parent pointer.
#[derive(Debug)]
pub struct Node<R> {
    pub(super) record: R,
    pub(super) left: Link<R>,
    pub(super) right: Link<R>,
}

impl<R> Node<R> {
    /// Create a childless node holding `record`.
    #[must_use]
    pub(super) const fn leaf(record: R) -> Self {
        Self {
            record,
            left: None,
            right: None,
        }
    }

    /// The record held by this node.
    #[must_use]
    pub const fn record(&self) -> &R {
        &self.record
    }

    /// The left child, if any.
    #[must_use]
    pub fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    /// The right child, if any.
    #[must_use]
    pub fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    /// Whether this node has no children.
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// Work item for [`fold_post_order`].
enum Visit<'a, R> {
    Enter(Option<&'a Node<R>>),
    Combine(&'a Node<R>),
}

/// Evaluate a bottom-up computation over a subtree without recursion.
///
/// `empty` produces the value of an empty slot; `combine` receives a node
/// together with the values already computed for its left and right
/// subtrees, in that order. Children are always evaluated left first.
pub(super) fn fold_post_order<'a, R, T>(
    root: Option<&'a Node<R>>,
    empty: impl Fn() -> T,
    mut combine: impl FnMut(&'a Node<R>, T, T) -> T,
) -> T {
    let mut work = vec![Visit::Enter(root)];
    let mut values: Vec<T> = Vec::new();

    while let Some(visit) = work.pop() {
        match visit {
            Visit::Enter(None) => values.push(empty()),
            Visit::Enter(Some(node)) => {
                work.push(Visit::Combine(node));
                work.push(Visit::Enter(node.right()));
                work.push(Visit::Enter(node.left()));
            }
            Visit::Combine(node) => {
                // Left was pushed first, so it sits below right.
                let right = values.pop().unwrap_or_else(&empty);
                let left = values.pop().unwrap_or_else(&empty);
                values.push(combine(node, left, right));
            }
        }
    }

    values.pop().unwrap_or_else(empty)
}
