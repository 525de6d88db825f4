//! Pipeline tests against a wiremock Admin API.
//!
//! All GraphQL operations share one endpoint, so mocks are routed by
//! operation name in the request body. Each test asserts the observable
//! behavior of the row loop: which remote calls happen, in what number, and
//! what ends up in the metafield value.

use serde_json::{json, Value};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use varimg_shopify::AdminClient;

use super::*;

const GRAPHQL_PATH: &str = "/admin/api/2025-10/graphql.json";

fn test_client(server: &MockServer) -> AdminClient {
    AdminClient::with_base_url(&server.uri(), "shpat_test", "2025-10", 5, "varimg-test/0.1")
        .expect("failed to build test AdminClient")
}

fn row(handle: &str, sku: &str, image_urls: Vec<String>) -> VariantImageRow {
    VariantImageRow {
        handle: handle.to_owned(),
        sku: sku.to_owned(),
        image_urls,
    }
}

fn variant_response(variant_id: &str, sku: &str) -> Value {
    json!({
        "data": {
            "productByHandle": {
                "id": "gid://shopify/Product/1",
                "variants": { "nodes": [{ "id": variant_id, "sku": sku }] }
            }
        }
    })
}

fn staged_target_response(server: &MockServer) -> Value {
    json!({
        "data": {
            "stagedUploadsCreate": {
                "stagedTargets": [{
                    "url": format!("{}/staged-upload", server.uri()),
                    "resourceUrl": "https://storage.example.com/tmp/1",
                    "parameters": []
                }],
                "userErrors": []
            }
        }
    })
}

fn file_create_response(file_id: &str) -> Value {
    json!({
        "data": {
            "fileCreate": {
                "files": [{ "id": file_id }],
                "userErrors": []
            }
        }
    })
}

fn metafields_set_response() -> Value {
    json!({
        "data": {
            "metafieldsSet": {
                "metafields": [{ "id": "gid://shopify/Metafield/789" }],
                "userErrors": []
            }
        }
    })
}

/// Mounts GET mocks for image downloads at `/img/<name>`.
async fn mount_image(server: &MockServer, name: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(format!("/img/{name}")))
        .respond_with(ResponseTemplate::new(status).set_body_bytes(b"image-bytes".as_slice()))
        .mount(server)
        .await;
}

fn image_url(server: &MockServer, name: &str) -> String {
    format!("{}/img/{name}", server.uri())
}

/// Returns the bodies of all received requests containing `needle`.
async fn request_bodies_containing(server: &MockServer, needle: &str) -> Vec<Value> {
    server
        .received_requests()
        .await
        .expect("request recording should be enabled")
        .iter()
        .filter(|r| String::from_utf8_lossy(&r.body).contains(needle))
        .map(|r| serde_json::from_slice(&r.body).expect("request body should be JSON"))
        .collect()
}

// ---------------------------------------------------------------------------
// Not-found rows
// ---------------------------------------------------------------------------

#[tokio::test]
async fn not_found_row_makes_no_upload_or_mutation_calls() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_string_contains("productByHandle"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(&json!({ "data": { "productByHandle": null } })),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/img/a.png"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_string_contains("stagedUploadsCreate"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_string_contains("metafieldsSet"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let rows = vec![row("gone", "SKU-1", vec![image_url(&server, "a.png")])];
    let summary = import_rows(&client, &rows, "custom", "variant_images", false).await;

    assert_eq!(
        summary,
        ImportSummary {
            rows_total: 1,
            rows_skipped: 1,
            ..ImportSummary::default()
        }
    );
}

// ---------------------------------------------------------------------------
// Full upload path
// ---------------------------------------------------------------------------

#[tokio::test]
async fn uploads_each_image_and_writes_list_metafield() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_string_contains("productByHandle"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&variant_response(
            "gid://shopify/ProductVariant/11",
            "SKU-1",
        )))
        .mount(&server)
        .await;

    mount_image(&server, "a.png", 200).await;
    mount_image(&server, "b.jpg", 200).await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_string_contains("stagedUploadsCreate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&staged_target_response(&server)))
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/staged-upload"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    // First fileCreate returns MediaImage/1, the second MediaImage/2.
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_string_contains("fileCreate"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(&file_create_response("gid://shopify/MediaImage/1")),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_string_contains("fileCreate"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(&file_create_response("gid://shopify/MediaImage/2")),
        )
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_string_contains("metafieldsSet"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&metafields_set_response()))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let rows = vec![row(
        "hi-boy",
        "SKU-1",
        vec![image_url(&server, "a.png"), image_url(&server, "b.jpg")],
    )];
    let summary = import_rows(&client, &rows, "custom", "variant_images", false).await;

    assert_eq!(
        summary,
        ImportSummary {
            rows_total: 1,
            variants_updated: 1,
            images_attached: 2,
            ..ImportSummary::default()
        }
    );

    // Two image columns → exactly two staged upload attempts.
    let staged = request_bodies_containing(&server, "stagedUploadsCreate").await;
    assert_eq!(staged.len(), 2, "expected one staged upload per image URL");

    // The metafield value lists both file references in column order.
    let metafield_calls = request_bodies_containing(&server, "metafieldsSet").await;
    assert_eq!(metafield_calls.len(), 1);
    let metafield = &metafield_calls[0]["variables"]["metafields"][0];
    assert_eq!(metafield["ownerId"], "gid://shopify/ProductVariant/11");
    assert_eq!(
        metafield["value"],
        r#"["gid://shopify/MediaImage/1","gid://shopify/MediaImage/2"]"#
    );
}

// ---------------------------------------------------------------------------
// Partial upload failure
// ---------------------------------------------------------------------------

#[tokio::test]
async fn failed_upload_is_omitted_and_order_preserved() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_string_contains("productByHandle"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&variant_response(
            "gid://shopify/ProductVariant/11",
            "SKU-1",
        )))
        .mount(&server)
        .await;

    // First image 404s; second succeeds.
    mount_image(&server, "bad.png", 404).await;
    mount_image(&server, "good.png", 200).await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_string_contains("stagedUploadsCreate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&staged_target_response(&server)))
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/staged-upload"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_string_contains("fileCreate"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(&file_create_response("gid://shopify/MediaImage/9")),
        )
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_string_contains("metafieldsSet"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&metafields_set_response()))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let rows = vec![row(
        "hi-boy",
        "SKU-1",
        vec![
            image_url(&server, "bad.png"),
            image_url(&server, "good.png"),
        ],
    )];
    let summary = import_rows(&client, &rows, "custom", "variant_images", false).await;

    assert_eq!(
        summary,
        ImportSummary {
            rows_total: 1,
            variants_updated: 1,
            images_attached: 1,
            ..ImportSummary::default()
        }
    );

    let metafield_calls = request_bodies_containing(&server, "metafieldsSet").await;
    assert_eq!(metafield_calls.len(), 1);
    assert_eq!(
        metafield_calls[0]["variables"]["metafields"][0]["value"],
        r#"["gid://shopify/MediaImage/9"]"#
    );
}

#[tokio::test]
async fn no_metafield_write_when_all_uploads_fail() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_string_contains("productByHandle"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&variant_response(
            "gid://shopify/ProductVariant/11",
            "SKU-1",
        )))
        .mount(&server)
        .await;

    mount_image(&server, "bad1.png", 404).await;
    mount_image(&server, "bad2.png", 500).await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_string_contains("metafieldsSet"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let rows = vec![row(
        "hi-boy",
        "SKU-1",
        vec![
            image_url(&server, "bad1.png"),
            image_url(&server, "bad2.png"),
        ],
    )];
    let summary = import_rows(&client, &rows, "custom", "variant_images", false).await;

    assert_eq!(
        summary,
        ImportSummary {
            rows_total: 1,
            rows_failed: 1,
            ..ImportSummary::default()
        }
    );
}

// ---------------------------------------------------------------------------
// Row isolation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn row_failure_does_not_stop_subsequent_rows() {
    let server = MockServer::start().await;

    // First lookup fails at the GraphQL level; the second resolves normally.
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_string_contains("productByHandle"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({
            "errors": [{ "message": "Internal error" }]
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_string_contains("productByHandle"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&variant_response(
            "gid://shopify/ProductVariant/22",
            "SKU-2",
        )))
        .mount(&server)
        .await;

    mount_image(&server, "ok.png", 200).await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_string_contains("stagedUploadsCreate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&staged_target_response(&server)))
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/staged-upload"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_string_contains("fileCreate"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(&file_create_response("gid://shopify/MediaImage/5")),
        )
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_string_contains("metafieldsSet"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&metafields_set_response()))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let rows = vec![
        row("broken", "SKU-1", vec![image_url(&server, "ok.png")]),
        row("hi-boy", "SKU-2", vec![image_url(&server, "ok.png")]),
    ];
    let summary = import_rows(&client, &rows, "custom", "variant_images", false).await;

    assert_eq!(
        summary,
        ImportSummary {
            rows_total: 2,
            variants_updated: 1,
            images_attached: 1,
            rows_failed: 1,
            ..ImportSummary::default()
        }
    );
}

// ---------------------------------------------------------------------------
// Dry run
// ---------------------------------------------------------------------------

#[tokio::test]
async fn dry_run_resolves_variants_but_uploads_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_string_contains("productByHandle"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&variant_response(
            "gid://shopify/ProductVariant/11",
            "SKU-1",
        )))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/img/a.png"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_string_contains("stagedUploadsCreate"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_string_contains("metafieldsSet"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let rows = vec![row("hi-boy", "SKU-1", vec![image_url(&server, "a.png")])];
    let summary = import_rows(&client, &rows, "custom", "variant_images", true).await;

    assert_eq!(
        summary,
        ImportSummary {
            rows_total: 1,
            ..ImportSummary::default()
        }
    );
}

// ---------------------------------------------------------------------------
// Rows without images
// ---------------------------------------------------------------------------

#[tokio::test]
async fn row_without_image_urls_is_skipped_after_lookup() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_string_contains("productByHandle"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&variant_response(
            "gid://shopify/ProductVariant/11",
            "SKU-1",
        )))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_string_contains("metafieldsSet"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let rows = vec![row("hi-boy", "SKU-1", Vec::new())];
    let summary = import_rows(&client, &rows, "custom", "variant_images", false).await;

    assert_eq!(
        summary,
        ImportSummary {
            rows_total: 1,
            rows_skipped: 1,
            ..ImportSummary::default()
        }
    );
}
