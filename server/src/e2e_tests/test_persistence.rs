//! Test that the API loads from and writes to the snapshot.

use axum::http::StatusCode;
use tempfile::tempdir;

use crate::api::{self, AppState};
use crate::e2e_tests::helpers::*;
use crate::storage::{CarSaleStore, CsvSnapshot, MemorySnapshot};
use crate::testing::stored_sale;

#[tokio::test]
async fn test_loaded_sales_are_served() {
    let snapshot = MemorySnapshot::with_sales(vec![
        stored_sale(5, "K500KKK"),
        stored_sale(2, "C300CCC"),
    ]);
    let app = TestApp::with_snapshot(snapshot);

    let (status, body) = app.get("/api/car-sales/C300CCC").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 2);
    assert_eq!(body["brand"], "Honda");

    let created = app.create("T700TTT").await;
    assert_eq!(created["id"], 6);
}

#[tokio::test]
async fn test_csv_snapshot_survives_restart() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data").join("car_sales.csv");

    let open = || {
        let store = CarSaleStore::open(Box::new(CsvSnapshot::new(path.clone()))).unwrap();
        TestApp {
            router: api::router(AppState::new(store)),
            snapshot: MemorySnapshot::new(),
        }
    };

    let app = open();
    app.create_all(&["M100AAA", "B200BBB", "Z300CCC"]).await;
    let (status, _) = app.delete("/api/car-sales/M100AAA").await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    drop(app);

    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.starts_with("id,license_plate,brand,color,price,sale_date"));
    assert!(contents.contains("15000.00"));

    let app = open();
    let (_, body) = app.get("/api/car-sales/traversal/inorder").await;
    assert_eq!(plates(&body), ["B200BBB", "Z300CCC"]);
    let created = app.create("A100AAA").await;
    assert_eq!(created["id"], 4);
}
