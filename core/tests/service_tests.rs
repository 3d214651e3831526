//! Order service tests against in-memory and failing request log stores.

#![allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect

use order_mock_core::request_log::RequestLogStore;
use order_mock_core::{BatchSize, OrderService, RequestMeta};
use order_mock_testing::{FailingRequestLogStore, InMemoryRequestLogStore, init_test_tracing, test_clock};
use std::sync::Arc;

const ANDROID_AGENT: &str =
    "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0 Mobile Safari/537.36";

fn service_with(store: Arc<dyn RequestLogStore>) -> OrderService {
    init_test_tracing();
    OrderService::new(store, Arc::new(test_clock()))
}

fn android_meta(path: &str) -> RequestMeta {
    RequestMeta::new(Some(ANDROID_AGENT.to_string()), Some("203.0.113.9".to_string()), path)
}

#[tokio::test]
async fn test_get_order_logs_one_record() {
    let store = Arc::new(InMemoryRequestLogStore::new());
    let service = service_with(store.clone());

    let order = service.get_order("42", &android_meta("/api/getOrder")).await;

    // test_clock() is 2025-01-01T00:00:00Z, whose epoch millis end in 600000
    assert_eq!(order.order_sn, "ORDER-42-600000");
    assert!((1..=15).contains(&order.items_list.len()));

    let records = store.records();
    assert_eq!(records.len(), 1);
    let log = &records[0].log;
    assert_eq!(log.order_id, "42");
    assert_eq!(log.device, "Android Phone - Chrome on Android");
    assert_eq!(log.device_type, "Android Phone");
    assert_eq!(log.browser, "Chrome");
    assert_eq!(log.os, "Android");
    assert_eq!(log.ip, "203.0.113.9");
    assert_eq!(log.path, "/api/getOrder");
    assert_eq!(log.request_time, test_clock_time());
}

fn test_clock_time() -> chrono::DateTime<chrono::Utc> {
    use order_mock_core::environment::Clock;
    test_clock().now()
}

#[tokio::test]
async fn test_get_orders_logs_sequential_sub_ids() {
    let store = Arc::new(InMemoryRequestLogStore::new());
    let service = service_with(store.clone());

    let orders = service
        .get_orders(BatchSize::parse(Some("4")), &android_meta("/api/getOrders"))
        .await;

    assert_eq!(orders.len(), 4);
    for (index, order) in orders.iter().enumerate() {
        assert!(order.order_sn.starts_with(&format!("ORDER-{}-", index + 1)));
        assert!(!order.items_list.is_empty());
    }
    assert_eq!(store.order_ids(), vec!["1", "2", "3", "4"]);
    assert!(store.records().iter().all(|r| r.log.path == "/api/getOrders"));
}

#[tokio::test]
async fn test_missing_metadata_is_recorded_as_unknown() {
    let store = Arc::new(InMemoryRequestLogStore::new());
    let service = service_with(store.clone());

    service
        .get_order("7", &RequestMeta::new(None, None, "/api/getOrder"))
        .await;

    let log = &store.records()[0].log;
    assert_eq!(log.ip, "Unknown");
    assert_eq!(log.device, "Desktop - Unknown on Unknown");
}

#[tokio::test]
async fn test_store_failure_does_not_affect_orders() {
    let store = Arc::new(FailingRequestLogStore::new());
    let service = service_with(store.clone());

    let order = service.get_order("9", &android_meta("/api/getOrder")).await;
    assert!(order.order_sn.contains("9"));

    let orders = service
        .get_orders(BatchSize::parse(Some("3")), &android_meta("/api/getOrders"))
        .await;
    assert_eq!(orders.len(), 3);

    // one attempt per order, no retries
    assert_eq!(store.attempts(), 4);
}

#[tokio::test]
async fn test_batch_is_clamped() {
    let store = Arc::new(InMemoryRequestLogStore::new());
    let service = service_with(store.clone());

    let orders = service
        .get_orders(BatchSize::parse(Some("500")), &android_meta("/api/getOrders"))
        .await;

    assert_eq!(orders.len(), 20);
    assert_eq!(store.len(), 20);
}
