//! Integration tests for Voltshop.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and run migrations
//! cargo run -p voltshop-cli -- migrate
//! cargo run -p voltshop-cli -- seed
//!
//! # Start the storefront
//! cargo run -p voltshop-storefront
//!
//! # Run integration tests
//! cargo test -p voltshop-integration-tests -- --ignored
//! ```
//!
//! The tests drive the running storefront over HTTP with a cookie jar,
//! so a full cart session survives across requests the same way a
//! browser's would. They are `#[ignore]`d by default because they need
//! a live server and database.

/// Base URL for the storefront (configurable via environment).
#[must_use]
pub fn storefront_base_url() -> String {
    std::env::var("STOREFRONT_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Create an HTTP client with a cookie store, so the session cookie
/// issued on the first request is replayed on the rest.
#[must_use]
pub fn session_client() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}
