#![cfg_attr(not(test), deny(clippy::unwrap_used))]
//! Populate the configured snapshot with random car sales.

use car_sales::config::ServerConfig;
use car_sales::seed::SaleGenerator;
use car_sales::storage::{CarSaleStore, CsvSnapshot};
use chrono::Utc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const SALE_COUNT: usize = 10;

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "car_sales=info,seed=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    let mut store = match CarSaleStore::open(Box::new(CsvSnapshot::new(config.data_file.clone())))
    {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("Failed to load car sales: {e}");
            std::process::exit(1);
        }
    };

    let mut generator = SaleGenerator::from_os_rng(Utc::now());
    for _ in 0..SALE_COUNT {
        match store.create(generator.sale()) {
            Ok(sale) => tracing::info!(
                "Created sale {} (id {}): {} {} for ${:.2} on {}",
                sale.license_plate,
                sale.id,
                sale.color,
                sale.brand,
                sale.price,
                sale.sale_date.format("%Y-%m-%d")
            ),
            Err(e) => {
                tracing::error!("Failed to create sale: {e}");
                std::process::exit(1);
            }
        }
    }

    tracing::info!(
        "Seeded {} sales into {} ({} total)",
        SALE_COUNT,
        config.data_file.display(),
        store.len()
    );
}
