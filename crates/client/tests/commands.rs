//! Command layer behavior against a mock store.

mod common;

use hulara_core::{ProductId, ReviewId};
use hulara_client::commands::Commands;
use hulara_client::woo::types::{NewVariation, ProductUpdate, VariationAttribute};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn commands(server: &MockServer) -> Commands {
    Commands::new(
        common::fetcher(server),
        common::cache(server),
        common::gateway(server),
    )
}

fn selection(name: &str, option: &str) -> VariationAttribute {
    VariationAttribute {
        name: name.to_string(),
        option: option.to_string(),
    }
}

async fn mount_parent(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/wp-json/wc/v3/products/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7,
            "name": "Kurta",
            "type": "variable",
            "attributes": [
                {"name": "Size", "options": ["S", "M", "L"], "variation": true},
                {"name": "Material", "options": ["Cotton"], "variation": false}
            ]
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_update_product_invalidates_cache() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wp-json/wc/v3/products"))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"id": 7}]))
                .insert_header("X-WP-Total", "1"),
        )
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/wp-json/wc/v3/products/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 7})))
        .expect(1)
        .mount(&server)
        .await;

    let cache = common::cache(&server);
    let commands = Commands::new(common::fetcher(&server), cache.clone(), common::gateway(&server));

    cache.page(1, 20).await.expect("warm the cache");
    let report = commands
        .update_product(
            ProductId::new(7),
            &ProductUpdate {
                name: Some("Renamed".to_string()),
                ..ProductUpdate::default()
            },
        )
        .await;
    assert!(report.success);
    assert_eq!(report.message, "Product 7 updated");
    cache.page(1, 20).await.expect("read after update");
}

#[tokio::test]
async fn test_rejected_update_keeps_cache_and_reports_store_text() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wp-json/wc/v3/products"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"id": 7}]))
                .insert_header("X-WP-Total", "1"),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/wp-json/wc/v3/products/7"))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad price"))
        .mount(&server)
        .await;

    let cache = common::cache(&server);
    let commands = Commands::new(common::fetcher(&server), cache.clone(), common::gateway(&server));

    cache.page(1, 20).await.expect("warm the cache");
    let report = commands
        .update_product(ProductId::new(7), &ProductUpdate::default())
        .await;
    assert!(!report.success);
    assert_eq!(report.message, "bad price");
    // Cache untouched: the GET mock allows only one call.
    cache.page(1, 20).await.expect("read after rejection");
}

#[tokio::test]
async fn test_add_variation_accepts_valid_selection() {
    let server = MockServer::start().await;
    mount_parent(&server).await;

    Mock::given(method("POST"))
        .and(path("/wp-json/wc/v3/products/7/variations"))
        .and(body_partial_json(json!({"attributes": [{"name": "Size", "option": "M"}]})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 71})))
        .expect(1)
        .mount(&server)
        .await;

    let payload = NewVariation {
        sku: "K-7-M".to_string(),
        regular_price: "2500".to_string(),
        stock_quantity: 3,
        manage_stock: true,
        attributes: vec![selection("Size", "M")],
        ..NewVariation::default()
    };
    let report = commands(&server)
        .add_variation(ProductId::new(7), &payload)
        .await;

    assert!(report.success, "{}", report.message);
}

#[tokio::test]
async fn test_add_variation_rejects_unknown_attribute() {
    let server = MockServer::start().await;
    mount_parent(&server).await;

    let payload = NewVariation {
        attributes: vec![selection("Color", "Red")],
        ..NewVariation::default()
    };
    let report = commands(&server)
        .add_variation(ProductId::new(7), &payload)
        .await;

    assert!(!report.success);
    assert!(report.message.contains("Color"));
}

#[tokio::test]
async fn test_add_variation_rejects_non_variation_attribute() {
    let server = MockServer::start().await;
    mount_parent(&server).await;

    // "Material" exists on the parent but is not variation-enabled.
    let payload = NewVariation {
        attributes: vec![selection("Material", "Cotton")],
        ..NewVariation::default()
    };
    let report = commands(&server)
        .add_variation(ProductId::new(7), &payload)
        .await;

    assert!(!report.success);
    assert!(report.message.contains("Material"));
}

#[tokio::test]
async fn test_add_variation_rejects_disallowed_option() {
    let server = MockServer::start().await;
    mount_parent(&server).await;

    let payload = NewVariation {
        attributes: vec![selection("Size", "XXL")],
        ..NewVariation::default()
    };
    let report = commands(&server)
        .add_variation(ProductId::new(7), &payload)
        .await;

    assert!(!report.success);
    assert!(report.message.contains("XXL"));
}

#[tokio::test]
async fn test_add_variation_missing_parent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wp-json/wc/v3/products/404"))
        .respond_with(ResponseTemplate::new(404).set_body_string("{\"code\":\"not_found\"}"))
        .mount(&server)
        .await;

    let payload = NewVariation {
        attributes: vec![selection("Size", "M")],
        ..NewVariation::default()
    };
    let report = commands(&server)
        .add_variation(ProductId::new(404), &payload)
        .await;

    assert!(!report.success);
    assert_eq!(report.message, "Product 404 not found");
}

#[tokio::test]
async fn test_force_delete_requires_confirmation() {
    let server = MockServer::start().await;

    // No DELETE mock: an unconfirmed force delete makes no call at all.
    let report = commands(&server)
        .force_delete_product(ProductId::new(7), false)
        .await;
    assert!(!report.success);
    assert!(report.message.contains("confirmation"));

    Mock::given(method("DELETE"))
        .and(path("/wp-json/wc/v3/products/7"))
        .and(query_param("force", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 7})))
        .expect(1)
        .mount(&server)
        .await;

    let report = commands(&server)
        .force_delete_product(ProductId::new(7), true)
        .await;
    assert!(report.success);
}

#[tokio::test]
async fn test_review_moderation_commands() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/wp-json/wc/v3/products/reviews/31"))
        .and(body_partial_json(json!({"status": "spam"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 31})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/wp-json/wc/v3/products/reviews/31"))
        .and(query_param("force", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 31})))
        .expect(1)
        .mount(&server)
        .await;

    let commands = commands(&server);
    let spammed = commands.spam_review(ReviewId::new(31)).await;
    assert!(spammed.success);
    assert_eq!(spammed.message, "Review 31 marked as spam");

    let deleted = commands.delete_review(ReviewId::new(31)).await;
    assert!(deleted.success);
}
