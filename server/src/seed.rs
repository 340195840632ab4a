//! Random sale generation for populating a fresh index.
//!
//! Generation is reproducible when the generator is built from a fixed seed.

use chrono::{DateTime, TimeDelta, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::{CarSaleCreate, Color};

/// Brands the generator picks from.
pub const BRANDS: [&str; 10] = [
    "Toyota",
    "Honda",
    "Ford",
    "Chevrolet",
    "Nissan",
    "Volkswagen",
    "Hyundai",
    "Kia",
    "Mazda",
    "Subaru",
];

/// Lowest generated price, in USD.
pub const MIN_PRICE: f64 = 10_000.0;
/// Highest generated price, in USD.
pub const MAX_PRICE: f64 = 50_000.0;

const SECONDS_PER_YEAR: i64 = 365 * 24 * 60 * 60;

/// Generator for random sale requests.
pub struct SaleGenerator {
    rng: StdRng,
    now: DateTime<Utc>,
}

impl SaleGenerator {
    /// A generator seeded from the operating system.
    #[must_use]
    pub fn from_os_rng(now: DateTime<Utc>) -> Self {
        Self {
            rng: StdRng::from_os_rng(),
            now,
        }
    }

    /// A reproducible generator.
    #[must_use]
    pub fn seeded(seed: u64, now: DateTime<Utc>) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            now,
        }
    }

    /// A random plate: three uppercase letters followed by three digits.
    pub fn license_plate(&mut self) -> String {
        let mut plate: String = (0..3)
            .map(|_| char::from(self.rng.random_range(b'A'..=b'Z')))
            .collect();
        plate.extend((0..3).map(|_| char::from(self.rng.random_range(b'0'..=b'9'))));
        plate
    }

    /// A random sale dated within the year before `now`.
    pub fn sale(&mut self) -> CarSaleCreate {
        let license_plate = self.license_plate();
        let brand = BRANDS[self.rng.random_range(0..BRANDS.len())].to_string();
        let color = Color::ALL[self.rng.random_range(0..Color::ALL.len())];
        let price = (self.rng.random_range(MIN_PRICE..=MAX_PRICE) * 100.0).round() / 100.0;
        let age = TimeDelta::seconds(self.rng.random_range(0..SECONDS_PER_YEAR));

        CarSaleCreate {
            license_plate,
            brand,
            color,
            price,
            sale_date: Some(self.now - age),
        }
    }
}
