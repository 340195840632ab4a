//! Snapshot persistence for the sale index.
//!
//! The index is persisted as a full snapshot of its records in ascending
//! key order, rewritten after every mutation. The CSV implementation writes
//! the snapshot to a temporary file in the target directory, syncs it, and
//! renames it over the previous snapshot, so a crash leaves either the old
//! or the new snapshot on disk and never a partial one.
//!
//! # CSV Format
//!
//! ```text
//! id,license_plate,brand,color,price,sale_date
//! 1,ABC123,Toyota,red,15000.00,2024-03-01T12:00:00+00:00
//! ```
//!
//! - `price` is written with two decimals.
//! - `sale_date` is written as RFC 3339. Naive ISO-8601 timestamps without
//!   an offset are accepted on load and read as UTC.
//! - Rows with an empty `id` are skipped on load.

use std::fs::File;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use tempfile::NamedTempFile;

use crate::types::CarSale;

/// Column names of the CSV snapshot, in order.
pub const CSV_HEADER: [&str; 6] = ["id", "license_plate", "brand", "color", "price", "sale_date"];

/// Loads and saves full snapshots of the index.
pub trait SnapshotStore: Send + Sync {
    /// Read every stored record. Order is unspecified.
    fn load(&mut self) -> Result<Vec<CarSale>, SnapshotError>;

    /// Replace the stored snapshot with `sales`, given in ascending key order.
    fn save(&mut self, sales: &[&CarSale]) -> Result<(), SnapshotError>;

    /// Human-readable location of the snapshot, for logging.
    fn location(&self) -> String;
}

/// CSV file snapshot with atomic replacement.
#[derive(Debug, Clone)]
pub struct CsvSnapshot {
    path: PathBuf,
}

impl CsvSnapshot {
    /// Use the CSV file at `path`. The file is created on first load if
    /// missing.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn directory(&self) -> &Path {
        self.path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
    }
}

impl SnapshotStore for CsvSnapshot {
    fn load(&mut self) -> Result<Vec<CarSale>, SnapshotError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!(
                    "No snapshot at {}, creating an empty one",
                    self.path.display()
                );
                self.save(&[])?;
                return Ok(Vec::new());
            }
            Err(e) => return Err(SnapshotError::Io(e)),
        };

        let mut reader = csv::Reader::from_reader(file);
        let mut sales = Vec::new();
        for (index, row) in reader.deserialize::<CsvRow>().enumerate() {
            let row = row?;
            if row.id.trim().is_empty() {
                continue;
            }
            // Line 1 is the header.
            let line = index + 2;
            let sale = row
                .into_sale()
                .map_err(|message| SnapshotError::InvalidRow { line, message })?;
            sales.push(sale);
        }

        Ok(sales)
    }

    fn save(&mut self, sales: &[&CarSale]) -> Result<(), SnapshotError> {
        let directory = self.directory();
        std::fs::create_dir_all(directory)?;

        let mut temp = NamedTempFile::new_in(directory)?;
        {
            let mut writer = csv::Writer::from_writer(temp.as_file_mut());
            writer.write_record(CSV_HEADER)?;
            for sale in sales {
                writer.write_record([
                    sale.id.to_string(),
                    sale.license_plate.clone(),
                    sale.brand.clone(),
                    sale.color.to_string(),
                    format!("{:.2}", sale.price),
                    sale.sale_date.to_rfc3339(),
                ])?;
            }
            writer.flush()?;
        }
        temp.as_file().sync_all()?;
        temp.persist(&self.path)
            .map_err(|e| SnapshotError::Io(e.error))?;

        tracing::debug!(
            "Wrote snapshot of {} car sales to {}",
            sales.len(),
            self.path.display()
        );
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// A CSV row as read from disk, before field parsing.
#[derive(Debug, Deserialize)]
struct CsvRow {
    id: String,
    license_plate: String,
    brand: String,
    color: String,
    price: String,
    sale_date: String,
}

impl CsvRow {
    fn into_sale(self) -> Result<CarSale, String> {
        let id = self
            .id
            .trim()
            .parse::<u64>()
            .map_err(|e| format!("invalid id '{}': {e}", self.id))?;
        let color = self.color.parse().map_err(|e| format!("{e}"))?;
        let price = self
            .price
            .trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid price '{}': {e}", self.price))?;
        let sale_date = parse_timestamp(&self.sale_date)
            .ok_or_else(|| format!("invalid sale_date '{}'", self.sale_date))?;

        let sale = CarSale {
            id,
            license_plate: self.license_plate,
            brand: self.brand,
            color,
            price,
            sale_date,
        };
        sale.validate().map_err(|e| e.to_string())?;
        Ok(sale)
    }
}

/// Parse an RFC 3339 timestamp, or a naive ISO-8601 one taken as UTC.
fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Some(timestamp.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// In-memory snapshot. Clones share the same storage, so a handle kept
/// outside a store observes every save.
#[derive(Debug, Clone, Default)]
pub struct MemorySnapshot {
    state: Arc<Mutex<MemoryState>>,
}

#[derive(Debug, Default)]
struct MemoryState {
    sales: Vec<CarSale>,
    saves: usize,
}

impl MemorySnapshot {
    /// An empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A snapshot that loads `sales`.
    #[must_use]
    pub fn with_sales(sales: Vec<CarSale>) -> Self {
        Self {
            state: Arc::new(Mutex::new(MemoryState { sales, saves: 0 })),
        }
    }

    /// The most recently saved records.
    #[must_use]
    pub fn sales(&self) -> Vec<CarSale> {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .sales
            .clone()
    }

    /// Number of saves performed so far.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .saves
    }
}

impl SnapshotStore for MemorySnapshot {
    fn load(&mut self) -> Result<Vec<CarSale>, SnapshotError> {
        let state = self.state.lock().map_err(|_| SnapshotError::LockPoisoned)?;
        Ok(state.sales.clone())
    }

    fn save(&mut self, sales: &[&CarSale]) -> Result<(), SnapshotError> {
        let mut state = self.state.lock().map_err(|_| SnapshotError::LockPoisoned)?;
        state.sales = sales.iter().map(|&sale| sale.clone()).collect();
        state.saves += 1;
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}

/// Errors that can occur while loading or saving a snapshot.
#[derive(Debug)]
pub enum SnapshotError {
    /// File I/O error.
    Io(std::io::Error),
    /// CSV encoding or decoding error.
    Csv(csv::Error),
    /// A row could not be turned into a record.
    InvalidRow { line: usize, message: String },
    /// The in-memory snapshot lock is poisoned.
    LockPoisoned,
}

impl std::fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Csv(e) => write!(f, "CSV error: {e}"),
            Self::InvalidRow { line, message } => write!(f, "invalid row at line {line}: {message}"),
            Self::LockPoisoned => write!(f, "snapshot lock poisoned"),
        }
    }
}

impl std::error::Error for SnapshotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Csv(e) => Some(e),
            Self::InvalidRow { .. } | Self::LockPoisoned => None,
        }
    }
}

impl From<std::io::Error> for SnapshotError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<csv::Error> for SnapshotError {
    fn from(e: csv::Error) -> Self {
        Self::Csv(e)
    }
}
