//! Unbalanced binary search tree used as the primary index.
//!
//! The tree keeps records ordered by a unique key and supports point
//! lookups, upserts, partial updates, removal, the three classic
//! traversals, structural statistics, and path queries between keys.
//!
//! # Structure
//!
//! Every node exclusively owns its record and up to two children through
//! `Option<Box<Node>>` slots. There are no parent links, so the node graph
//! is acyclic by construction and removal is expressed as reassigning a
//! child slot.
//!
//! # Invariants
//!
//! - For every node, keys in the left subtree compare strictly less than
//!   the node's key and keys in the right subtree strictly greater.
//! - No two nodes hold the same key.
//! - The tree is never rebalanced: its shape depends on insertion order and
//!   its height can reach the number of nodes. All walks therefore use
//!   explicit stacks instead of recursion.
//!
//! # Usage
//!
//! ```
//! use car_sales::storage::bst::{Record, SearchTree, TraversalOrder};
//!
//! #[derive(Clone, Debug)]
//! struct Entry {
//!     id: Option<u64>,
//!     key: String,
//! }
//!
//! impl Record for Entry {
//!     type Key = String;
//!
//!     fn key(&self) -> &String {
//!         &self.key
//!     }
//!
//!     fn id(&self) -> Option<u64> {
//!         self.id
//!     }
//!
//!     fn set_id(&mut self, id: u64) {
//!         self.id = Some(id);
//!     }
//! }
//!
//! let mut tree = SearchTree::new();
//! for key in ["M100AAA", "B200BBB", "Z300CCC"] {
//!     tree.insert(Entry { id: None, key: key.to_string() });
//! }
//!
//! let keys: Vec<&str> = tree
//!     .traverse(TraversalOrder::InOrder)
//!     .iter()
//!     .map(|entry| entry.key.as_str())
//!     .collect();
//! assert_eq!(keys, ["B200BBB", "M100AAA", "Z300CCC"]);
//! assert_eq!(tree.find("B200BBB").and_then(Record::id), Some(2));
//! ```

mod node;
mod path;
mod stats;
mod tree;

pub use node::{Node, Record};
pub use stats::TreeStats;
pub use tree::{Removal, SearchTree, TraversalOrder, TraversalOrderError};
