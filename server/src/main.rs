#![cfg_attr(test, allow(clippy::disallowed_methods))]
// Forbid unwrap() in production code to prevent panics from corrupt data.
// Test code is allowed to use unwrap() for convenience.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]

use car_sales::api::{self, AppState};
use car_sales::config::ServerConfig;
use car_sales::storage::{CarSaleStore, CsvSnapshot};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "car_sales=debug,tower_http=info".into()),
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

    tracing::info!(
        "Loaded configuration: data_file={}, listen_address={}, listen_port={}",
        config.data_file.display(),
        config.listen_address,
        config.listen_port
    );

    let store = match CarSaleStore::open(Box::new(CsvSnapshot::new(config.data_file.clone()))) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("Failed to load car sales: {e}");
            std::process::exit(1);
        }
    };

    let app = api::router(AppState::new(store));

    let addr = config.socket_addr();
    tracing::info!("listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to bind: {e}");
            std::process::exit(1);
        });

    axum::serve(listener, app).await.unwrap_or_else(|e| {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    });
}
