// Life of a request:
// 1. JSON comes in over HTTP
// 2. Validate the body and path parameters against the sale schema
// 3. For queries:
//     - Take the store's read lock
//     - Walk the search tree
//     - Respond
//    For mutations:
//     - Take the store's write lock
//     - Apply the change to the search tree
//     - Rewrite the CSV snapshot, then respond
//
// System components:
//  - Unbalanced binary search tree keyed by license plate
//  - Snapshot persistence
//  - HTTP API

#![cfg_attr(test, allow(clippy::disallowed_methods, clippy::unwrap_used, clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]

pub mod api;
pub mod config;
pub mod seed;
pub mod storage;
pub mod types;
