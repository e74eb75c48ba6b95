//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tower_sessions::Session;
use tracing::instrument;

use voltshop_core::ProductKind;

use crate::db::CatalogRepository;
use crate::error::Result;
use crate::filters;
use crate::flash;
use crate::routes::{CategoryView, ProductCardView, sidebar};
use crate::state::AppState;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub categories: Vec<CategoryView>,
    pub products: Vec<ProductCardView>,
    pub flashes: Vec<String>,
}

/// The kind featured first on the home page.
const FEATURED_KIND: ProductKind = ProductKind::Notebook;

/// Display the catalog home page: sidebar categories plus the newest
/// products of each kind, the featured kind first.
#[instrument(skip(state, session))]
pub async fn home(State(state): State<AppState>, session: Session) -> Result<HomeTemplate> {
    let categories = sidebar(&state).await?;
    let products = CatalogRepository::new(state.pool())
        .latest_products(Some(FEATURED_KIND))
        .await?
        .into_iter()
        .map(ProductCardView::from)
        .collect();

    Ok(HomeTemplate {
        categories,
        products,
        flashes: flash::drain(&session).await,
    })
}
