//! Record schema for vehicle sales.
//!
//! These types sit at the boundary of the index: requests are validated
//! here before they reach the search tree, which only relies on the license
//! plate being a totally ordered key.

mod car_sale;
mod color;
mod validation;

pub use car_sale::{CarSale, CarSaleCreate, CarSaleUpdate};
pub use color::{Color, ParseColorError};
pub use validation::{
    BRAND_LENGTH, LICENSE_PLATE_LENGTH, STORED_ID_RANGE, ValidationError, validate_brand,
    validate_license_plate, validate_price, validate_stored_id,
};
