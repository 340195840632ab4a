//! The sale index: a search tree paired with snapshot persistence.
//!
//! Every mutation is followed by a full snapshot of the records in
//! ascending key order, so the in-memory tree and the stored snapshot do
//! not silently diverge. Reads never touch the snapshot.
//!
//! # Thread Safety
//!
//! The store has no internal locking. Callers that share it between tasks
//! must serialize access, e.g. with an `RwLock` around the store.

use chrono::Utc;

use crate::storage::bst::{Removal, SearchTree, TraversalOrder, TreeStats};
use crate::storage::snapshot::{SnapshotError, SnapshotStore};
use crate::types::{CarSale, CarSaleCreate, CarSaleUpdate, STORED_ID_RANGE, ValidationError};

/// Index of vehicle sales keyed by license plate.
pub struct CarSaleStore {
    tree: SearchTree<CarSale>,
    snapshot: Box<dyn SnapshotStore>,
}

impl std::fmt::Debug for CarSaleStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CarSaleStore")
            .field("snapshot", &self.snapshot.location())
            .field("next_id", &self.tree.next_id())
            .finish_non_exhaustive()
    }
}

impl CarSaleStore {
    /// Open a store, loading every record from `snapshot`.
    ///
    /// Records are inserted in the order the snapshot yields them. Stored
    /// identifiers are kept and the identifier counter resumes after the
    /// largest one. A record outside the schema, including one with an
    /// identifier outside [`STORED_ID_RANGE`], fails the whole load.
    pub fn open(mut snapshot: Box<dyn SnapshotStore>) -> Result<Self, StoreError> {
        let sales = snapshot.load()?;
        let loaded = sales.len();

        let mut tree = SearchTree::new();
        for sale in sales {
            sale.validate()?;
            tree.insert(sale);
        }

        let stored = tree.len();
        if stored != loaded {
            tracing::warn!(
                "Snapshot {} contained {} duplicate license plates; kept the last of each",
                snapshot.location(),
                loaded - stored
            );
        }
        tracing::info!(
            "Loaded {} car sales from {} (next id {})",
            stored,
            snapshot.location(),
            tree.next_id()
        );

        Ok(Self { tree, snapshot })
    }

    /// The underlying search tree.
    #[cfg(test)]
    #[must_use]
    pub(crate) const fn tree(&self) -> &SearchTree<CarSale> {
        &self.tree
    }

    /// Number of stored sales.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Whether no sales are stored.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Create a sale, or overwrite the sale with the same license plate.
    ///
    /// An overwrite keeps the existing identifier.
    pub fn create(&mut self, request: CarSaleCreate) -> Result<CarSale, StoreError> {
        request.validate()?;

        let sale = self.tree.insert(request.into_sale(Utc::now())).clone();
        tracing::debug!("Stored car sale {} (id {})", sale.license_plate, sale.id);

        self.persist()?;
        Ok(sale)
    }

    /// Look up a sale by license plate.
    #[must_use]
    pub fn get(&self, license_plate: &str) -> Option<CarSale> {
        self.tree.find(license_plate).cloned()
    }

    /// Apply a partial update to a sale.
    ///
    /// Returns `Ok(None)` if no sale has this license plate; nothing is
    /// persisted in that case.
    pub fn update(
        &mut self,
        license_plate: &str,
        update: CarSaleUpdate,
    ) -> Result<Option<CarSale>, StoreError> {
        update.validate()?;

        let Some(sale) = self
            .tree
            .update(license_plate, |sale| update.apply(sale))
            .cloned()
        else {
            return Ok(None);
        };
        tracing::debug!("Updated car sale {license_plate}");

        self.persist()?;
        Ok(Some(sale))
    }

    /// Delete a sale by license plate.
    ///
    /// The snapshot is rewritten whether or not the plate existed.
    pub fn delete(&mut self, license_plate: &str) -> Result<Removal<CarSale>, StoreError> {
        let removal = self.tree.remove(license_plate);
        match &removal {
            Removal::Removed(sale) => {
                tracing::debug!("Deleted car sale {license_plate} (id {})", sale.id);
            }
            Removal::NotFound => tracing::debug!("No car sale {license_plate} to delete"),
        }

        self.persist()?;
        Ok(removal)
    }

    /// Every sale in the requested traversal order.
    #[must_use]
    pub fn traverse(&self, order: TraversalOrder) -> Vec<CarSale> {
        self.tree.traverse(order).into_iter().cloned().collect()
    }

    /// Shape statistics of the index.
    #[must_use]
    pub fn stats(&self) -> TreeStats {
        self.tree.stats()
    }

    /// Sales on the path between two license plates, or `None` if either
    /// is absent.
    #[must_use]
    pub fn path(&self, start: &str, end: &str) -> Option<Vec<CarSale>> {
        self.tree
            .path(start, end)
            .map(|path| path.into_iter().cloned().collect())
    }

    /// Sales on the longest leaf-to-leaf path through the root.
    #[must_use]
    pub fn longest_path(&self) -> Vec<CarSale> {
        self.tree.longest_path().into_iter().cloned().collect()
    }

    /// Write the full in-order snapshot.
    fn persist(&mut self) -> Result<(), StoreError> {
        let sales = self.tree.in_order();
        self.snapshot.save(&sales).map_err(|e| {
            tracing::error!(
                "Failed to save snapshot to {}: {e}",
                self.snapshot.location()
            );
            StoreError::Snapshot(e)
        })
    }
}

/// Errors returned by [`CarSaleStore`].
#[derive(Debug)]
pub enum StoreError {
    /// The request failed schema validation. Nothing was changed.
    Validation(ValidationError),
    /// The snapshot could not be loaded or saved.
    Snapshot(SnapshotError),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(e) => write!(f, "validation error: {e}"),
            Self::Snapshot(e) => write!(f, "snapshot error: {e}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Validation(e) => Some(e),
            Self::Snapshot(e) => Some(e),
        }
    }
}

impl From<ValidationError> for StoreError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<SnapshotError> for StoreError {
    fn from(e: SnapshotError) -> Self {
        Self::Snapshot(e)
    }
}
