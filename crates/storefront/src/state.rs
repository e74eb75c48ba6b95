//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use sqlx::PgPool;

use crate::config::StorefrontConfig;
use crate::db::{CatalogRepository, RepositoryError};
use crate::models::catalog::CategoryCounts;

/// How long sidebar category counts may be served from cache.
const SIDEBAR_CACHE_TTL: Duration = Duration::from_secs(60);

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; provides access to the database pool,
/// configuration, and the sidebar cache.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    pool: PgPool,
    sidebar_cache: Cache<(), Vec<CategoryCounts>>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: StorefrontConfig, pool: PgPool) -> Self {
        let sidebar_cache = Cache::builder()
            .max_capacity(1)
            .time_to_live(SIDEBAR_CACHE_TTL)
            .build();

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                sidebar_cache,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Sidebar categories with product counts, cached for a short TTL
    /// since every page renders the sidebar.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` stringified if the underlying query
    /// fails (moka wraps the error in an `Arc`).
    pub async fn sidebar_categories(&self) -> Result<Vec<CategoryCounts>, String> {
        self.inner
            .sidebar_cache
            .try_get_with((), async {
                CatalogRepository::new(self.pool()).sidebar_categories().await
            })
            .await
            .map_err(|e: Arc<RepositoryError>| e.to_string())
    }
}
