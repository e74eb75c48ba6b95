//! Database access for the storefront `PostgreSQL` database.
//!
//! ## Tables
//!
//! - `category`, `notebook`, `smartphone` - catalog
//! - `customer` - customer profiles (identity itself is external)
//! - `cart`, `cart_item` - shopping carts
//! - `orders` - placed orders
//! - `session` - tower-sessions storage
//!
//! # Migrations
//!
//! Migrations live in `crates/storefront/migrations/` and run via:
//! ```bash
//! cargo run -p voltshop-cli -- migrate
//! ```
//!
//! Repositories use the runtime query API with `FromRow` row structs and
//! convert rows into domain models, failing with
//! [`RepositoryError::DataCorruption`] when stored tags don't parse.

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub mod cart;
pub mod catalog;
pub mod orders;

pub use cart::CartRepository;
pub use catalog::CatalogRepository;
pub use orders::OrderRepository;

/// Errors returned by repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Underlying database failure.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The requested record does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The operation conflicts with current database state.
    #[error("conflict: {0}")]
    Conflict(String),

    /// A stored value could not be interpreted.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
