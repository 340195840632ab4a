//! Common helpers for end-to-end tests.

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::api::{self, AppState};
use crate::storage::{CarSaleStore, MemorySnapshot};

/// A router over a fresh store, plus a handle on what it persisted.
pub struct TestApp {
    pub router: Router,
    pub snapshot: MemorySnapshot,
}

impl TestApp {
    /// A router over an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::with_snapshot(MemorySnapshot::new())
    }

    /// A router over a store loaded from `snapshot`.
    #[must_use]
    pub fn with_snapshot(snapshot: MemorySnapshot) -> Self {
        let store = CarSaleStore::open(Box::new(snapshot.clone())).unwrap();
        Self {
            router: api::router(AppState::new(store)),
            snapshot,
        }
    }

    /// Send a request and return the status and decoded JSON body.
    ///
    /// An empty body decodes as `Value::Null`.
    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, None).await
    }

    /// Create a sale for `plate` and assert it was accepted.
    pub async fn create(&self, plate: &str) -> Value {
        let (status, body) = self.post("/api/car-sales", sale_body(plate)).await;
        assert_eq!(status, StatusCode::CREATED, "creating {plate}: {body}");
        body
    }

    /// Create sales for each plate, in order.
    pub async fn create_all(&self, plates: &[&str]) {
        for plate in plates {
            self.create(plate).await;
        }
    }
}

/// A valid create body for `plate`.
pub fn sale_body(plate: &str) -> Value {
    json!({
        "license_plate": plate,
        "brand": "Toyota",
        "color": "red",
        "price": 15000.0,
        "sale_date": "2024-03-01T12:00:00Z",
    })
}

/// License plates of a JSON list of sales, in order.
pub fn plates(body: &Value) -> Vec<String> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|sale| sale["license_plate"].as_str().unwrap().to_string())
        .collect()
}

/// The `detail` message of an error body.
pub fn detail(body: &Value) -> &str {
    body["detail"].as_str().unwrap()
}
