use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::storage::StoreError;
use crate::storage::bst::TraversalOrderError;
use crate::types::ValidationError;

/// Errors returned by the HTTP handlers.
///
/// Every variant renders as `{"detail": "..."}` with the matching status.
#[derive(Debug)]
pub enum ApiError {
    /// No sale has the requested license plate (404).
    NotFound(&'static str),
    /// A field or path parameter failed schema validation (422).
    Validation(ValidationError),
    /// The request body could not be decoded.
    InvalidBody(JsonRejection),
    /// Unknown traversal order (400).
    InvalidOrder(TraversalOrderError),
    /// Persistence or locking failed (500).
    Internal(String),
}

impl ApiError {
    pub(crate) const SALE_NOT_FOUND: Self = Self::NotFound("Car sale not found");
    pub(crate) const PATH_NOT_FOUND: Self = Self::NotFound("One or both nodes not found");

    fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::InvalidBody(rejection) => rejection.status(),
            Self::InvalidOrder(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(detail) => write!(f, "{detail}"),
            Self::Validation(e) => write!(f, "{e}"),
            Self::InvalidBody(rejection) => write!(f, "{}", rejection.body_text()),
            Self::InvalidOrder(_) => write!(f, "Invalid traversal order"),
            Self::Internal(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidBody(rejection)
    }
}

impl From<TraversalOrderError> for ApiError {
    fn from(e: TraversalOrderError) -> Self {
        Self::InvalidOrder(e)
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Validation(e) => Self::Validation(e),
            StoreError::Snapshot(e) => Self::Internal(format!("failed to persist car sales: {e}")),
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorPayload {
    detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {self}");
        }
        let body = Json(ErrorPayload {
            detail: self.to_string(),
        });
        (status, body).into_response()
    }
}
