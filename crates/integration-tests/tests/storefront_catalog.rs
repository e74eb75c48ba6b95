//! Integration tests for the catalog pages.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - Seed data loaded (cargo run -p voltshop-cli -- seed)
//! - The storefront running (cargo run -p voltshop-storefront)
//!
//! Run with: cargo test -p voltshop-integration-tests -- --ignored

use reqwest::StatusCode;

use voltshop_integration_tests::{session_client, storefront_base_url};

#[tokio::test]
#[ignore = "Requires running storefront server and seeded database"]
async fn health_endpoints_respond() {
    let client = session_client();
    let base_url = storefront_base_url();

    let resp = client
        .get(format!("{base_url}/health"))
        .send()
        .await
        .expect("Failed to reach health endpoint");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .get(format!("{base_url}/health/ready"))
        .send()
        .await
        .expect("Failed to reach readiness endpoint");
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running storefront server and seeded database"]
async fn home_page_shows_sidebar_and_latest_products() {
    let client = session_client();
    let base_url = storefront_base_url();

    let resp = client
        .get(format!("{base_url}/"))
        .send()
        .await
        .expect("Failed to get home page");
    assert_eq!(resp.status(), StatusCode::OK);

    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("Notebooks"));
    assert!(body.contains("Smartphones"));
    assert!(body.contains("Volt Aero 14"));
}

#[tokio::test]
#[ignore = "Requires running storefront server and seeded database"]
async fn product_page_shows_specifications() {
    let client = session_client();
    let base_url = storefront_base_url();

    let resp = client
        .get(format!("{base_url}/products/smartphone/volt-one-max/"))
        .send()
        .await
        .expect("Failed to get product page");
    assert_eq!(resp.status(), StatusCode::OK);

    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("Volt One Max"));
    assert!(body.contains("Battery capacity"));
    // sd = true, so the max SD volume row is rendered
    assert!(body.contains("Max SD card volume"));
}

#[tokio::test]
#[ignore = "Requires running storefront server and seeded database"]
async fn category_page_lists_products_of_both_kinds_layout() {
    let client = session_client();
    let base_url = storefront_base_url();

    let resp = client
        .get(format!("{base_url}/category/notebooks/"))
        .send()
        .await
        .expect("Failed to get category page");
    assert_eq!(resp.status(), StatusCode::OK);

    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("Volt Aero 14"));
    assert!(body.contains("Volt Forge 16"));
}

#[tokio::test]
#[ignore = "Requires running storefront server and seeded database"]
async fn unknown_product_kind_and_slug_are_not_found() {
    let client = session_client();
    let base_url = storefront_base_url();

    let resp = client
        .get(format!("{base_url}/products/toaster/volt-one/"))
        .send()
        .await
        .expect("Failed to get product page");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = client
        .get(format!("{base_url}/products/notebook/no-such-device/"))
        .send()
        .await
        .expect("Failed to get product page");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
