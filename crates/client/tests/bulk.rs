//! Bulk upload pipeline against a mock store.

mod common;

use std::time::Duration;

use hulara_client::bulk::{BulkProductRow, BulkUploader};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn row(name: &str, sku: &str) -> BulkProductRow {
    BulkProductRow {
        name: name.to_string(),
        sku: sku.to_string(),
        regular_price: "1000".to_string(),
        ..BulkProductRow::default()
    }
}

fn uploader(server: &MockServer) -> BulkUploader {
    BulkUploader::with_pause(common::gateway(server), common::cache(server), Duration::ZERO)
}

#[tokio::test]
async fn test_bulk_run_tallies_successes_and_failures() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/wp-json/wc/v3/products"))
        .and(body_partial_json(json!({"name": "Kurta"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 1})))
        .expect(1)
        .mount(&server)
        .await;
    let rejection = "{\"code\":\"product_invalid_sku\"}";
    Mock::given(method("POST"))
        .and(path("/wp-json/wc/v3/products"))
        .and(body_partial_json(json!({"name": "Dupatta"})))
        .respond_with(ResponseTemplate::new(400).set_body_string(rejection))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/wp-json/wc/v3/products"))
        .and(body_partial_json(json!({"name": "Shawl"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 3})))
        .expect(1)
        .mount(&server)
        .await;

    let summary = uploader(&server)
        .run(&[row("Kurta", "K-1"), row("Dupatta", "D-1"), row("Shawl", "S-1")])
        .await;

    assert_eq!(summary.created, 2);
    assert!(!summary.all_created());
    assert_eq!(summary.failures.len(), 1);
    assert_eq!(summary.failures[0].row, 1);
    assert_eq!(summary.failures[0].name, "Dupatta");
    assert_eq!(summary.failures[0].error, rejection);
}

#[tokio::test]
async fn test_bulk_run_invalidates_cache_once() {
    let server = MockServer::start().await;

    // The list page is fetched once before the run and once after; the
    // cached copy in between must not survive the upload.
    Mock::given(method("GET"))
        .and(path("/wp-json/wc/v3/products"))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"id": 1}]))
                .insert_header("X-WP-Total", "1"),
        )
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/wp-json/wc/v3/products"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 2})))
        .expect(1)
        .mount(&server)
        .await;

    let cache = common::cache(&server);
    let uploader =
        BulkUploader::with_pause(common::gateway(&server), cache.clone(), Duration::ZERO);

    cache.page(1, 20).await.expect("warm the cache");
    let summary = uploader.run(&[row("Kurta", "K-1")]).await;
    assert_eq!(summary.created, 1);
    cache.page(1, 20).await.expect("read after upload");
}

#[tokio::test]
async fn test_bulk_run_without_successes_keeps_cache() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wp-json/wc/v3/products"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"id": 1}]))
                .insert_header("X-WP-Total", "1"),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/wp-json/wc/v3/products"))
        .respond_with(ResponseTemplate::new(400).set_body_string("nope"))
        .expect(1)
        .mount(&server)
        .await;

    let cache = common::cache(&server);
    let uploader =
        BulkUploader::with_pause(common::gateway(&server), cache.clone(), Duration::ZERO);

    cache.page(1, 20).await.expect("warm the cache");
    let summary = uploader.run(&[row("Kurta", "K-1")]).await;
    assert_eq!(summary.created, 0);
    // Still served from cache: the GET mock allows only one call.
    cache.page(1, 20).await.expect("read after failed upload");
}
