//! HTTP interface to the sale index.
//!
//! The router exposes the store under `/api/car-sales`. Errors are rendered
//! as `{"detail": "..."}`; see [`ApiError`] for the status mapping.
//!
//! # Thread Safety
//!
//! The store sits behind an `RwLock` shared through [`AppState`]. Queries
//! take the read lock. Mutations take the write lock on a blocking task,
//! since each one rewrites the snapshot before returning.

mod error;
mod handlers;

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::storage::CarSaleStore;

pub use error::ApiError;

/// Shared state for every handler.
#[derive(Clone)]
#[allow(clippy::disallowed_methods)] // Arc::clone is safe and expected for shared state
pub struct AppState {
    store: Arc<RwLock<CarSaleStore>>,
}

impl AppState {
    /// Wrap an opened store.
    #[must_use]
    pub fn new(store: CarSaleStore) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, CarSaleStore>, ApiError> {
        self.store
            .read()
            .map_err(|_| ApiError::Internal("car sale store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, CarSaleStore>, ApiError> {
        self.store
            .write()
            .map_err(|_| ApiError::Internal("car sale store lock poisoned".to_string()))
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let car_sales = Router::new()
        .route("/", post(handlers::create_sale))
        .route("/stats", get(handlers::tree_stats))
        .route("/longest-path", get(handlers::longest_path))
        .route("/traversal/{order}", get(handlers::traversal))
        .route("/path/{start}/{end}", get(handlers::path_between))
        .route(
            "/{license_plate}",
            get(handlers::get_sale)
                .put(handlers::update_sale)
                .delete(handlers::delete_sale),
        );

    Router::new()
        .route("/", get(handlers::welcome))
        .nest("/api/car-sales", car_sales)
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
