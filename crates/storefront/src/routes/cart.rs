//! Cart route handlers.
//!
//! The current cart is resolved explicitly from the session on every
//! cart operation: the owner cart when a customer identity is present,
//! an anonymous cart otherwise. Carts are created lazily on first use
//! and their id recorded in the session.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::Redirect,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use voltshop_core::{CartId, CustomerId, format_usd};

use crate::db::{CartRepository, CatalogRepository};
use crate::error::{AppError, Result};
use crate::filters;
use crate::flash;
use crate::models::cart::{Cart, CartLine};
use crate::models::session_keys;
use crate::routes::{CategoryView, parse_kind, sidebar};
use crate::state::AppState;

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub kind: String,
    pub slug: String,
    pub title: String,
    pub image: String,
    pub quantity: i64,
    pub unit_price: String,
    pub line_price: String,
}

impl From<&CartLine> for CartItemView {
    fn from(line: &CartLine) -> Self {
        Self {
            kind: line.item.kind.as_str().to_owned(),
            slug: line.slug.clone(),
            title: line.title.clone(),
            image: line.image.clone(),
            quantity: line.item.quantity,
            unit_price: format_usd(line.unit_price),
            line_price: format_usd(line.item.total_price),
        }
    }
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub categories: Vec<CategoryView>,
    pub items: Vec<CartItemView>,
    pub total_products: i64,
    pub total_price: String,
    pub flashes: Vec<String>,
}

/// Change-quantity form data.
#[derive(Debug, Deserialize)]
pub struct QuantityForm {
    pub quantity: Option<String>,
}

// =============================================================================
// Session Helpers
// =============================================================================

fn session_error(e: tower_sessions::session::Error) -> AppError {
    AppError::Internal(format!("session error: {e}"))
}

/// The customer identity the external auth layer put in the session.
pub(crate) async fn current_customer_id(session: &Session) -> Result<Option<CustomerId>> {
    Ok(session
        .get::<i64>(session_keys::CUSTOMER_ID)
        .await
        .map_err(session_error)?
        .map(CustomerId::new))
}

/// Resolve the session's active cart, creating one lazily.
///
/// With a customer identity: that customer's open cart, or a fresh owner
/// cart. Without: the cart recorded in the session, or a fresh anonymous
/// cart. Carts frozen by checkout are never returned.
pub(crate) async fn current_cart(state: &AppState, session: &Session) -> Result<Cart> {
    let repo = CartRepository::new(state.pool());

    if let Some(customer_id) = current_customer_id(session).await? {
        if let Some(cart) = repo.active_cart_for_owner(customer_id).await? {
            return Ok(cart);
        }
        let cart = repo.create_cart(Some(customer_id)).await?;
        remember_cart(session, cart.id).await?;
        return Ok(cart);
    }

    if let Some(cart_id) = session
        .get::<i64>(session_keys::CART_ID)
        .await
        .map_err(session_error)?
        && let Some(cart) = repo.active_cart_by_id(CartId::new(cart_id)).await?
    {
        return Ok(cart);
    }

    let cart = repo.create_cart(None).await?;
    remember_cart(session, cart.id).await?;
    Ok(cart)
}

async fn remember_cart(session: &Session, cart_id: CartId) -> Result<()> {
    session
        .insert(session_keys::CART_ID, cart_id.as_i64())
        .await
        .map_err(session_error)
}

/// Forget the session's cart reference (after checkout freezes it).
pub(crate) async fn forget_cart(session: &Session) -> Result<()> {
    session
        .remove::<i64>(session_keys::CART_ID)
        .await
        .map_err(session_error)?;
    Ok(())
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the cart page.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Result<CartShowTemplate> {
    let cart = current_cart(&state, &session).await?;
    let lines = CartRepository::new(state.pool()).lines(cart.id).await?;

    Ok(CartShowTemplate {
        categories: sidebar(&state).await?,
        items: lines.iter().map(CartItemView::from).collect(),
        total_products: cart.total_products,
        total_price: format_usd(cart.total_price),
        flashes: flash::drain(&session).await,
    })
}

/// Add a product to the cart, then redirect to the cart page.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Path((kind, slug)): Path<(String, String)>,
) -> Result<Redirect> {
    let kind = parse_kind(&kind)?;
    let product = CatalogRepository::new(state.pool())
        .product_by_slug(kind, &slug)
        .await?;
    let cart = current_cart(&state, &session).await?;

    let created = CartRepository::new(state.pool())
        .add_item(&cart, &product)
        .await?;
    if created {
        flash::notify(&session, "Product added to cart").await;
    } else {
        flash::notify(&session, "Product is already in your cart").await;
    }
    Ok(Redirect::to("/cart/"))
}

/// Remove a product's line item from the cart, then redirect to the
/// cart page.
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Path((kind, slug)): Path<(String, String)>,
) -> Result<Redirect> {
    let kind = parse_kind(&kind)?;
    let product = CatalogRepository::new(state.pool())
        .product_by_slug(kind, &slug)
        .await?;
    let cart = current_cart(&state, &session).await?;

    CartRepository::new(state.pool())
        .remove_item(cart.id, &product)
        .await?;
    flash::notify(&session, "Product removed from cart").await;
    Ok(Redirect::to("/cart/"))
}

/// Set a line item's quantity, then redirect to the cart page.
///
/// The submitted quantity must be a positive integer; anything else is
/// rejected with a notice and leaves the cart untouched.
#[instrument(skip(state, session, form))]
pub async fn change_quantity(
    State(state): State<AppState>,
    session: Session,
    Path((kind, slug)): Path<(String, String)>,
    Form(form): Form<QuantityForm>,
) -> Result<Redirect> {
    let kind = parse_kind(&kind)?;

    let quantity = match parse_quantity(form.quantity.as_deref()) {
        Ok(q) => q,
        Err(message) => {
            flash::notify(&session, message).await;
            return Ok(Redirect::to("/cart/"));
        }
    };

    let product = CatalogRepository::new(state.pool())
        .product_by_slug(kind, &slug)
        .await?;
    let cart = current_cart(&state, &session).await?;

    CartRepository::new(state.pool())
        .set_quantity(cart.id, &product, quantity)
        .await?;
    flash::notify(&session, "Quantity updated").await;
    Ok(Redirect::to("/cart/"))
}

/// Validate a submitted quantity as a positive integer.
fn parse_quantity(raw: Option<&str>) -> std::result::Result<u32, String> {
    let raw = raw.map(str::trim).unwrap_or_default();
    match raw.parse::<u32>() {
        Ok(q) if q > 0 => Ok(q),
        _ => Err("Quantity must be a positive whole number".to_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantity_must_be_a_positive_integer() {
        assert_eq!(parse_quantity(Some("3")), Ok(3));
        assert_eq!(parse_quantity(Some(" 12 ")), Ok(12));

        assert!(parse_quantity(Some("0")).is_err());
        assert!(parse_quantity(Some("-2")).is_err());
        assert!(parse_quantity(Some("2.5")).is_err());
        assert!(parse_quantity(Some("lots")).is_err());
        assert!(parse_quantity(Some("")).is_err());
        assert!(parse_quantity(None).is_err());
    }
}
