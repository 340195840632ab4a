use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Serialize;
use tokio::task;

use super::{ApiError, AppState};
use crate::storage::CarSaleStore;
use crate::storage::bst::{Removal, TraversalOrder, TreeStats};
use crate::types::{CarSale, CarSaleCreate, CarSaleUpdate, validate_license_plate};

#[derive(Debug, Serialize)]
pub(super) struct Welcome {
    message: &'static str,
    car_sales: &'static str,
}

pub(super) async fn welcome() -> Json<Welcome> {
    Json(Welcome {
        message: "Welcome to the Car Sales Binary Tree API",
        car_sales: "/api/car-sales",
    })
}

/// Run a mutation on a blocking task while holding the write lock.
async fn mutate<T, F>(state: AppState, op: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&mut CarSaleStore) -> Result<T, ApiError> + Send + 'static,
{
    task::spawn_blocking(move || {
        let mut store = state.write()?;
        op(&mut *store)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("internal task failure: {e}")))?
}

pub(super) async fn create_sale(
    State(state): State<AppState>,
    body: Result<Json<CarSaleCreate>, JsonRejection>,
) -> Result<(StatusCode, Json<CarSale>), ApiError> {
    let Json(request) = body?;

    let sale = mutate(state, move |store| Ok(store.create(request)?)).await?;
    Ok((StatusCode::CREATED, Json(sale)))
}

pub(super) async fn get_sale(
    State(state): State<AppState>,
    Path(license_plate): Path<String>,
) -> Result<Json<CarSale>, ApiError> {
    validate_license_plate(&license_plate)?;

    state
        .read()?
        .get(&license_plate)
        .map(Json)
        .ok_or(ApiError::SALE_NOT_FOUND)
}

pub(super) async fn update_sale(
    State(state): State<AppState>,
    Path(license_plate): Path<String>,
    body: Result<Json<CarSaleUpdate>, JsonRejection>,
) -> Result<Json<CarSale>, ApiError> {
    validate_license_plate(&license_plate)?;
    let Json(update) = body?;

    mutate(state, move |store| {
        store
            .update(&license_plate, update)?
            .map(Json)
            .ok_or(ApiError::SALE_NOT_FOUND)
    })
    .await
}

pub(super) async fn delete_sale(
    State(state): State<AppState>,
    Path(license_plate): Path<String>,
) -> Result<StatusCode, ApiError> {
    validate_license_plate(&license_plate)?;

    mutate(state, move |store| match store.delete(&license_plate)? {
        Removal::Removed(_) => Ok(StatusCode::NO_CONTENT),
        Removal::NotFound => Err(ApiError::SALE_NOT_FOUND),
    })
    .await
}

pub(super) async fn traversal(
    State(state): State<AppState>,
    Path(order): Path<String>,
) -> Result<Json<Vec<CarSale>>, ApiError> {
    let order: TraversalOrder = order.parse()?;
    Ok(Json(state.read()?.traverse(order)))
}

pub(super) async fn tree_stats(State(state): State<AppState>) -> Result<Json<TreeStats>, ApiError> {
    Ok(Json(state.read()?.stats()))
}

pub(super) async fn path_between(
    State(state): State<AppState>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<Vec<CarSale>>, ApiError> {
    validate_license_plate(&start)?;
    validate_license_plate(&end)?;

    state
        .read()?
        .path(&start, &end)
        .map(Json)
        .ok_or(ApiError::PATH_NOT_FOUND)
}

pub(super) async fn longest_path(
    State(state): State<AppState>,
) -> Result<Json<Vec<CarSale>>, ApiError> {
    Ok(Json(state.read()?.longest_path()))
}
