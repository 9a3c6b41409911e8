use cart_sync::adapters::CART_STORAGE_KEY;
use cart_sync::core::Storage;
use cart_sync::{
    Cart, CartManager, CartSnapshotStore, ChannelNotifier, HttpStockClient, LocalStorage, Notice,
    Outcome,
};
use httpmock::prelude::*;
use std::time::Duration;
use tempfile::TempDir;

fn product_json(id: u64) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "title": format!("Tênis {}", id),
        "price": 139.9,
        "image": format!("https://cdn.example.com/tenis{}.jpg", id)
    })
}

async fn open_manager(
    server: &MockServer,
    dir: &TempDir,
) -> (
    CartManager<LocalStorage, HttpStockClient, ChannelNotifier>,
    tokio::sync::mpsc::UnboundedReceiver<Notice>,
) {
    let store = CartSnapshotStore::new(LocalStorage::new(dir.path()));
    let api = HttpStockClient::new(&server.base_url(), Duration::from_secs(5)).unwrap();
    let (notifier, notices) = ChannelNotifier::new();
    let manager = CartManager::load(store, api, notifier).await.unwrap();
    (manager, notices)
}

async fn stored_cart(dir: &TempDir) -> Cart {
    let data = LocalStorage::new(dir.path())
        .read(CART_STORAGE_KEY)
        .await
        .unwrap()
        .expect("snapshot should exist");
    serde_json::from_slice(&data).unwrap()
}

#[tokio::test]
async fn test_add_persists_and_survives_restart() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start();

    let stock_mock = server.mock(|when, then| {
        when.method(GET).path("/stock/1");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"id": 1, "amount": 2}));
    });
    let product_mock = server.mock(|when, then| {
        when.method(GET).path("/products/1");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(product_json(1));
    });

    let (manager, mut notices) = open_manager(&server, &temp_dir).await;
    assert!(manager.snapshot().is_empty());

    assert!(manager.add_product(1).await.is_committed());
    assert!(manager.add_product(1).await.is_committed());
    let third = manager.add_product(1).await;

    assert_eq!(third.notice(), Some(Notice::InsufficientStock));
    assert_eq!(notices.try_recv().unwrap(), Notice::InsufficientStock);
    stock_mock.assert_hits(3);
    product_mock.assert_hits(1);

    let cart = manager.snapshot();
    assert_eq!(cart.amount_of(1), 2);
    assert_eq!(stored_cart(&temp_dir).await, cart);

    drop(manager);
    let (reopened, _notices) = open_manager(&server, &temp_dir).await;
    assert_eq!(reopened.snapshot(), cart);
}

#[tokio::test]
async fn test_unknown_product_fails_add_without_write() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start();

    let stock_mock = server.mock(|when, then| {
        when.method(GET).path("/stock/404");
        then.status(404).json_body(serde_json::json!({}));
    });

    let (manager, mut notices) = open_manager(&server, &temp_dir).await;
    let outcome = manager.add_product(404).await;

    stock_mock.assert();
    assert!(matches!(
        outcome,
        Outcome::Failed {
            notice: Notice::AddFailed,
            ..
        }
    ));
    assert_eq!(notices.try_recv().unwrap().to_string(), "error adding product");
    assert!(LocalStorage::new(temp_dir.path())
        .read(CART_STORAGE_KEY)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_update_and_remove_against_service() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start();

    let seed = serde_json::json!([
        {"id": 1, "title": "Tênis 1", "price": 139.9,
         "image": "https://cdn.example.com/tenis1.jpg", "amount": 2}
    ]);
    LocalStorage::new(temp_dir.path())
        .write(CART_STORAGE_KEY, seed.to_string().as_bytes())
        .await
        .unwrap();

    let stock_mock = server.mock(|when, then| {
        when.method(GET).path("/stock/1");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"id": 1, "amount": 5}));
    });

    let (manager, mut notices) = open_manager(&server, &temp_dir).await;

    manager.update_product_amount(1, 4).await;
    assert_eq!(manager.snapshot().amount_of(1), 3);
    assert_eq!(stored_cart(&temp_dir).await.amount_of(1), 3);

    let rejected = manager.update_product_amount(1, 6).await;
    assert_eq!(rejected.notice(), Some(Notice::InsufficientStock));
    assert_eq!(notices.try_recv().unwrap(), Notice::InsufficientStock);

    assert!(matches!(
        manager.update_product_amount(1, 0).await,
        Outcome::Ignored
    ));
    stock_mock.assert_hits(2);

    assert!(manager.remove_product(1).await.is_committed());
    assert!(stored_cart(&temp_dir).await.is_empty());

    let missing = manager.remove_product(1).await;
    assert_eq!(missing.notice(), Some(Notice::RemoveFailed));
    assert_eq!(notices.try_recv().unwrap(), Notice::RemoveFailed);
    stock_mock.assert_hits(2);
}

#[tokio::test]
async fn test_service_outage_reports_update_failure() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/stock/1");
        then.status(503);
    });

    let (manager, mut notices) = open_manager(&server, &temp_dir).await;
    let outcome = manager.update_product_amount(1, 2).await;

    assert!(matches!(
        outcome,
        Outcome::Failed {
            notice: Notice::UpdateFailed,
            ..
        }
    ));
    assert_eq!(notices.try_recv().unwrap(), Notice::UpdateFailed);
    assert!(manager.snapshot().is_empty());
}

#[tokio::test]
async fn test_corrupt_snapshot_fails_startup() {
    let temp_dir = TempDir::new().unwrap();
    LocalStorage::new(temp_dir.path())
        .write(CART_STORAGE_KEY, b"[{\"id\": 1")
        .await
        .unwrap();

    let store = CartSnapshotStore::new(LocalStorage::new(temp_dir.path()));
    let api = HttpStockClient::new("http://127.0.0.1:9", Duration::from_secs(1)).unwrap();
    let (notifier, _notices) = ChannelNotifier::new();

    assert!(CartManager::load(store, api, notifier).await.is_err());
}

#[tokio::test]
async fn test_add_keeps_catalog_fields_as_served() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/stock/1");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"id": 1, "amount": 3}));
    });
    server.mock(|when, then| {
        when.method(GET).path("/products/1");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"id": 1, "title": "T", "price": "139.90", "brand": "Nike"}));
    });

    let (manager, mut notices) = open_manager(&server, &temp_dir).await;
    let outcome = manager.add_product(1).await;

    assert!(outcome.is_committed());
    assert!(notices.try_recv().is_err());

    let data = LocalStorage::new(temp_dir.path())
        .read(CART_STORAGE_KEY)
        .await
        .unwrap()
        .unwrap();
    let written: serde_json::Value = serde_json::from_slice(&data).unwrap();
    assert_eq!(
        written,
        serde_json::json!([
            {"id": 1, "title": "T", "price": "139.90", "brand": "Nike", "amount": 1}
        ])
    );
    assert!((manager.snapshot().total_price() - 139.9).abs() < 1e-9);
}
