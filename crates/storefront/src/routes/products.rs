//! Product detail route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};
use tracing::instrument;

use voltshop_core::format_usd;

use crate::db::CatalogRepository;
use crate::error::Result;
use crate::filters;
use crate::models::catalog::ProductDetail;
use crate::routes::{CategoryView, parse_kind, sidebar};
use crate::state::AppState;

/// A spec-sheet row for the detail page.
#[derive(Clone)]
pub struct SpecView {
    pub label: String,
    pub value: String,
}

/// Product detail display data.
#[derive(Clone)]
pub struct ProductDetailView {
    pub kind: String,
    pub slug: String,
    pub title: String,
    pub price: String,
    pub image: String,
    pub description: Option<String>,
    pub specs: Vec<SpecView>,
}

impl From<&ProductDetail> for ProductDetailView {
    fn from(detail: &ProductDetail) -> Self {
        Self {
            kind: detail.kind().as_str().to_owned(),
            slug: detail.slug().to_owned(),
            title: detail.title().to_owned(),
            price: format_usd(detail.price()),
            image: detail.image().to_owned(),
            description: detail.description().map(str::to_owned),
            specs: detail
                .spec_rows()
                .into_iter()
                .map(|(label, value)| SpecView {
                    label: label.to_owned(),
                    value,
                })
                .collect(),
        }
    }
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub categories: Vec<CategoryView>,
    pub product: ProductDetailView,
}

/// Display one product's detail page.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path((kind, slug)): Path<(String, String)>,
) -> Result<ProductShowTemplate> {
    let kind = parse_kind(&kind)?;
    let detail = CatalogRepository::new(state.pool())
        .product_detail(kind, &slug)
        .await?;

    Ok(ProductShowTemplate {
        categories: sidebar(&state).await?,
        product: ProductDetailView::from(&detail),
    })
}
