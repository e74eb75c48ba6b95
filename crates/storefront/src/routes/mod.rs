//! HTTP route handlers for the storefront.
//!
//! # Route structure
//!
//! ```text
//! GET  /                                  - Catalog home (sidebar + latest products)
//! GET  /products/{kind}/{slug}/           - Product detail page
//! GET  /category/{slug}/                  - Category detail page
//! GET  /cart/                             - Current cart
//! GET  /add-to-cart/{kind}/{slug}/        - Add line item, redirect to /cart/
//! GET  /remove-from-cart/{kind}/{slug}/   - Remove line item, redirect to /cart/
//! POST /change_quantity/{kind}/{slug}/    - Set quantity, redirect to /cart/
//! GET  /checkout/                         - Checkout form
//! POST /make-order/                       - Run the checkout transaction
//! ```
//!
//! Trailing slashes are handled by `NormalizePathLayer` in `main`.

pub mod cart;
pub mod categories;
pub mod checkout;
pub mod home;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use voltshop_core::{ProductKind, format_usd};

use crate::error::{AppError, Result};
use crate::models::catalog::ProductSummary;
use crate::state::AppState;

/// Sidebar category display data for templates.
#[derive(Clone)]
pub struct CategoryView {
    pub name: String,
    pub slug: String,
    pub count: i64,
}

/// Product card display data for listing templates.
#[derive(Clone)]
pub struct ProductCardView {
    pub kind: String,
    pub slug: String,
    pub title: String,
    pub price: String,
    pub image: String,
}

impl From<ProductSummary> for ProductCardView {
    fn from(p: ProductSummary) -> Self {
        Self {
            kind: p.kind.as_str().to_owned(),
            slug: p.slug,
            title: p.title,
            price: format_usd(p.price),
            image: p.image,
        }
    }
}

/// Sidebar categories with total product counts, served from the state
/// cache.
pub(crate) async fn sidebar(state: &AppState) -> Result<Vec<CategoryView>> {
    let categories = state
        .sidebar_categories()
        .await
        .map_err(AppError::Internal)?;
    Ok(categories
        .into_iter()
        .map(|c| CategoryView {
            count: c.total(),
            name: c.category.name,
            slug: c.category.slug,
        })
        .collect())
}

/// Parse a kind tag from the URL; an unknown tag is a 404, not a server
/// error.
pub(crate) fn parse_kind(tag: &str) -> Result<ProductKind> {
    tag.parse::<ProductKind>()
        .map_err(|e| AppError::NotFound(e.to_string()))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/products/{kind}/{slug}", get(products::show))
        .route("/category/{slug}", get(categories::show))
        .route("/cart", get(cart::show))
        .route("/add-to-cart/{kind}/{slug}", get(cart::add))
        .route("/remove-from-cart/{kind}/{slug}", get(cart::remove))
        .route("/change_quantity/{kind}/{slug}", post(cart::change_quantity))
        .route("/checkout", get(checkout::show))
        .route("/make-order", post(checkout::make_order))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_kind_is_not_found() {
        let err = parse_kind("fridge").unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert!(parse_kind("notebook").is_ok());
        assert!(parse_kind("smartphone").is_ok());
    }
}
