//! Sale index storage.
//!
//! An in-memory binary search tree holds the records; a snapshot store
//! persists them.
//!
//! # Layout
//!
//! - [`bst`]: the search tree, generic over any [`bst::Record`]
//! - [`CarSaleStore`]: the tree of [`CarSale`](crate::types::CarSale)
//!   records plus a full snapshot write after every mutation
//! - [`SnapshotStore`]: how snapshots are loaded and saved, with a CSV
//!   implementation and an in-memory one
//!
//! # Usage
//!
//! ```
//! use car_sales::storage::{CarSaleStore, MemorySnapshot};
//! use car_sales::types::{CarSaleCreate, Color};
//!
//! let snapshot = MemorySnapshot::new();
//! let mut store = CarSaleStore::open(Box::new(snapshot.clone()))?;
//!
//! let sale = store.create(CarSaleCreate {
//!     license_plate: "ABC123".to_string(),
//!     brand: "Toyota".to_string(),
//!     color: Color::Red,
//!     price: 15_000.0,
//!     sale_date: None,
//! })?;
//!
//! assert_eq!(sale.id, 1);
//! assert_eq!(snapshot.sales().len(), 1);
//! # Ok::<(), car_sales::storage::StoreError>(())
//! ```

pub mod bst;
mod snapshot;
mod store;

pub use snapshot::{CSV_HEADER, CsvSnapshot, MemorySnapshot, SnapshotError, SnapshotStore};
pub use store::{CarSaleStore, StoreError};
