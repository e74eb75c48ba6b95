//! Category detail route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};
use tracing::instrument;

use crate::db::CatalogRepository;
use crate::error::Result;
use crate::filters;
use crate::routes::{CategoryView, ProductCardView, sidebar};
use crate::state::AppState;

/// Category detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "categories/show.html")]
pub struct CategoryShowTemplate {
    pub categories: Vec<CategoryView>,
    pub category_name: String,
    pub products: Vec<ProductCardView>,
}

/// Display a category's product listing.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<CategoryShowTemplate> {
    let repo = CatalogRepository::new(state.pool());
    let category = repo.category_by_slug(&slug).await?;
    let products = repo
        .products_in_category(category.id)
        .await?
        .into_iter()
        .map(ProductCardView::from)
        .collect();

    Ok(CategoryShowTemplate {
        categories: sidebar(&state).await?,
        category_name: category.name,
        products,
    })
}
