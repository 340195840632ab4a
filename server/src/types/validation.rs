//! Field validation for sale records.
//!
//! Mirrors the constraints enforced on incoming requests: plates of 6 to 10
//! characters, brands of 2 to 50 characters, and strictly positive prices.

use std::fmt;
use std::ops::RangeInclusive;

/// Allowed license plate length, in characters.
pub const LICENSE_PLATE_LENGTH: RangeInclusive<usize> = 6..=10;

/// Allowed brand length, in characters.
pub const BRAND_LENGTH: RangeInclusive<usize> = 2..=50;

/// Identifiers a stored sale may carry. 0 marks an unassigned identifier,
/// and the upper bound leaves the counter room to grow.
pub const STORED_ID_RANGE: RangeInclusive<u64> = 1..=(u64::MAX >> 1);

/// A field failed validation.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A text field is shorter or longer than allowed.
    Length {
        field: &'static str,
        length: usize,
        min: usize,
        max: usize,
    },
    /// The price is zero, negative, or not a finite number.
    NonPositivePrice(f64),
    /// A stored identifier is 0 or too large to advance the counter past.
    IdOutOfRange(u64),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Length {
                field,
                length,
                min,
                max,
            } => write!(
                f,
                "{field} must be between {min} and {max} characters (got {length})"
            ),
            Self::NonPositivePrice(price) => {
                write!(f, "price must be a positive number (got {price})")
            }
            Self::IdOutOfRange(id) => write!(
                f,
                "id must be between {} and {} (got {id})",
                STORED_ID_RANGE.start(),
                STORED_ID_RANGE.end()
            ),
        }
    }
}

impl std::error::Error for ValidationError {}

fn validate_length(
    field: &'static str,
    value: &str,
    allowed: &RangeInclusive<usize>,
) -> Result<(), ValidationError> {
    let length = value.chars().count();
    if allowed.contains(&length) {
        Ok(())
    } else {
        Err(ValidationError::Length {
            field,
            length,
            min: *allowed.start(),
            max: *allowed.end(),
        })
    }
}

/// Check that a license plate has an allowed length.
pub fn validate_license_plate(plate: &str) -> Result<(), ValidationError> {
    validate_length("license_plate", plate, &LICENSE_PLATE_LENGTH)
}

/// Check that a brand name has an allowed length.
pub fn validate_brand(brand: &str) -> Result<(), ValidationError> {
    validate_length("brand", brand, &BRAND_LENGTH)
}

/// Check that a price is finite and strictly positive.
pub fn validate_price(price: f64) -> Result<(), ValidationError> {
    if price.is_finite() && price > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::NonPositivePrice(price))
    }
}

/// Check that a stored identifier is assigned and leaves room for the
/// identifier counter.
pub fn validate_stored_id(id: u64) -> Result<(), ValidationError> {
    if STORED_ID_RANGE.contains(&id) {
        Ok(())
    } else {
        Err(ValidationError::IdOutOfRange(id))
    }
}
