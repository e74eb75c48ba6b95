//! Integration tests for the cart and checkout flow.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - Seed data loaded (cargo run -p voltshop-cli -- seed)
//! - The storefront running (cargo run -p voltshop-storefront)
//!
//! Run with: cargo test -p voltshop-integration-tests -- --ignored
//!
//! Each test uses a fresh cookie jar, so it gets its own anonymous cart.

use reqwest::StatusCode;

use voltshop_integration_tests::{session_client, storefront_base_url};

#[tokio::test]
#[ignore = "Requires running storefront server and seeded database"]
async fn add_to_cart_lands_on_cart_page_with_the_product() {
    let client = session_client();
    let base_url = storefront_base_url();

    // The redirect to /cart is followed automatically
    let resp = client
        .get(format!("{base_url}/add-to-cart/notebook/volt-aero-14/"))
        .send()
        .await
        .expect("Failed to add to cart");
    assert_eq!(resp.status(), StatusCode::OK);

    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("Product added to cart"));
    assert!(body.contains("Volt Aero 14"));
    assert!(body.contains("1 item(s)"));
}

#[tokio::test]
#[ignore = "Requires running storefront server and seeded database"]
async fn adding_the_same_product_twice_keeps_one_line() {
    let client = session_client();
    let base_url = storefront_base_url();

    client
        .get(format!("{base_url}/add-to-cart/smartphone/volt-one/"))
        .send()
        .await
        .expect("Failed to add to cart");

    let resp = client
        .get(format!("{base_url}/add-to-cart/smartphone/volt-one/"))
        .send()
        .await
        .expect("Failed to add to cart again");

    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("Product is already in your cart"));
    assert!(body.contains("1 item(s)"));
}

#[tokio::test]
#[ignore = "Requires running storefront server and seeded database"]
async fn change_quantity_updates_totals() {
    let client = session_client();
    let base_url = storefront_base_url();

    client
        .get(format!("{base_url}/add-to-cart/notebook/volt-forge-16/"))
        .send()
        .await
        .expect("Failed to add to cart");

    let resp = client
        .post(format!("{base_url}/change_quantity/notebook/volt-forge-16/"))
        .form(&[("quantity", "3")])
        .send()
        .await
        .expect("Failed to change quantity");
    assert_eq!(resp.status(), StatusCode::OK);

    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("Quantity updated"));
    assert!(body.contains("value=\"3\""));
}

#[tokio::test]
#[ignore = "Requires running storefront server and seeded database"]
async fn invalid_quantity_is_rejected_with_a_notice() {
    let client = session_client();
    let base_url = storefront_base_url();

    client
        .get(format!("{base_url}/add-to-cart/notebook/volt-aero-14/"))
        .send()
        .await
        .expect("Failed to add to cart");

    let resp = client
        .post(format!("{base_url}/change_quantity/notebook/volt-aero-14/"))
        .form(&[("quantity", "0")])
        .send()
        .await
        .expect("Failed to post quantity");
    assert_eq!(resp.status(), StatusCode::OK);

    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("Quantity must be a positive whole number"));
    // The line is untouched
    assert!(body.contains("value=\"1\""));
}

#[tokio::test]
#[ignore = "Requires running storefront server and seeded database"]
async fn remove_from_cart_empties_the_cart() {
    let client = session_client();
    let base_url = storefront_base_url();

    client
        .get(format!("{base_url}/add-to-cart/smartphone/volt-one-max/"))
        .send()
        .await
        .expect("Failed to add to cart");

    let resp = client
        .get(format!("{base_url}/remove-from-cart/smartphone/volt-one-max/"))
        .send()
        .await
        .expect("Failed to remove from cart");

    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("Product removed from cart"));
    assert!(body.contains("Your cart is empty"));
}

#[tokio::test]
#[ignore = "Requires running storefront server and seeded database"]
async fn checkout_without_sign_in_bounces_back_with_a_notice() {
    let client = session_client();
    let base_url = storefront_base_url();

    client
        .get(format!("{base_url}/add-to-cart/notebook/volt-aero-14/"))
        .send()
        .await
        .expect("Failed to add to cart");

    let resp = client
        .post(format!("{base_url}/make-order/"))
        .form(&[
            ("first_name", "Ada"),
            ("last_name", "Lovelace"),
            ("phone", "+1 555 0100"),
            ("address", "12 Analytical St"),
            ("buying_type", "delivery"),
            ("order_date", "2026-09-15"),
        ])
        .send()
        .await
        .expect("Failed to post order");
    assert_eq!(resp.status(), StatusCode::OK);

    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("Please sign in to place an order"));
}
