//! Vehicle sale records and the request shapes that create and modify them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::storage::bst::Record;
use crate::types::Color;
use crate::types::validation::{
    ValidationError, validate_brand, validate_license_plate, validate_price, validate_stored_id,
};

/// A stored vehicle sale, keyed by license plate.
///
/// # Invariants
///
/// - `license_plate` is unique within an index and never changes once the
///   record is stored.
/// - `id` is 0 until the index assigns one, and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarSale {
    pub id: u64,
    pub license_plate: String,
    pub brand: String,
    pub color: Color,
    /// Price in USD.
    pub price: f64,
    pub sale_date: DateTime<Utc>,
}

impl CarSale {
    /// Check a stored sale against the schema, including its identifier.
    /// A stored sale never carries 0, which marks an unassigned identifier.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_stored_id(self.id)?;
        validate_license_plate(&self.license_plate)?;
        validate_brand(&self.brand)?;
        validate_price(self.price)
    }
}

impl Record for CarSale {
    type Key = String;

    fn key(&self) -> &String {
        &self.license_plate
    }

    fn id(&self) -> Option<u64> {
        (self.id != 0).then_some(self.id)
    }

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }
}

/// Request body for creating (or overwriting) a sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarSaleCreate {
    pub license_plate: String,
    pub brand: String,
    pub color: Color,
    pub price: f64,
    /// Defaults to the time the sale is created.
    #[serde(default)]
    pub sale_date: Option<DateTime<Utc>>,
}

impl CarSaleCreate {
    /// Check every field against the schema constraints.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_license_plate(&self.license_plate)?;
        validate_brand(&self.brand)?;
        validate_price(self.price)
    }

    /// Build a record without an identifier, stamping `now` when no sale
    /// date was given.
    #[must_use]
    pub fn into_sale(self, now: DateTime<Utc>) -> CarSale {
        CarSale {
            id: 0,
            license_plate: self.license_plate,
            brand: self.brand,
            color: self.color,
            price: self.price,
            sale_date: self.sale_date.unwrap_or(now),
        }
    }
}

/// Partial update of a stored sale. `None` fields are left unchanged.
///
/// The license plate cannot be changed this way; re-keying a sale takes a
/// delete followed by a create.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CarSaleUpdate {
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub color: Option<Color>,
    #[serde(default)]
    pub price: Option<f64>,
}

impl CarSaleUpdate {
    /// Check the fields that are present.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(brand) = &self.brand {
            validate_brand(brand)?;
        }
        if let Some(price) = self.price {
            validate_price(price)?;
        }
        Ok(())
    }

    /// Apply the present fields to `sale`.
    pub fn apply(self, sale: &mut CarSale) {
        if let Some(brand) = self.brand {
            sale.brand = brand;
        }
        if let Some(color) = self.color {
            sale.color = color;
        }
        if let Some(price) = self.price {
            sale.price = price;
        }
    }
}
