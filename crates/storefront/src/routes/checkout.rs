//! Checkout route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, extract::State, response::Redirect};
use tower_sessions::Session;
use tracing::{info, instrument};

use voltshop_core::format_usd;

use crate::db::{CartRepository, OrderRepository};
use crate::error::Result;
use crate::filters;
use crate::flash;
use crate::models::order::OrderForm;
use crate::routes::cart::{CartItemView, current_cart, current_customer_id, forget_cart};
use crate::routes::{CategoryView, sidebar};
use crate::state::AppState;

/// Checkout page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/show.html")]
pub struct CheckoutShowTemplate {
    pub categories: Vec<CategoryView>,
    pub items: Vec<CartItemView>,
    pub total_products: i64,
    pub total_price: String,
    pub flashes: Vec<String>,
}

/// Display the checkout page with the cart summary and order form.
#[instrument(skip(state, session))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
) -> Result<CheckoutShowTemplate> {
    let cart = current_cart(&state, &session).await?;
    let lines = CartRepository::new(state.pool()).lines(cart.id).await?;

    Ok(CheckoutShowTemplate {
        categories: sidebar(&state).await?,
        items: lines.iter().map(CartItemView::from).collect(),
        total_products: cart.total_products,
        total_price: format_usd(cart.total_price),
        flashes: flash::drain(&session).await,
    })
}

/// Handle the checkout form submission.
///
/// Requires a signed-in customer and a valid form; either failure sends
/// the visitor back to the checkout page with a notice. On success the
/// cart is frozen into a new order, the session's cart reference is
/// cleared, and the visitor lands on the home page with a confirmation.
#[instrument(skip(state, session, form))]
pub async fn make_order(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<OrderForm>,
) -> Result<Redirect> {
    let Some(customer_id) = current_customer_id(&session).await? else {
        flash::notify(&session, "Please sign in to place an order").await;
        return Ok(Redirect::to("/checkout/"));
    };

    let repo = OrderRepository::new(state.pool());
    let Some(customer) = repo.customer_by_id(customer_id).await? else {
        flash::notify(&session, "Please sign in to place an order").await;
        return Ok(Redirect::to("/checkout/"));
    };

    let draft = match form.validate() {
        Ok(draft) => draft,
        Err(message) => {
            flash::notify(&session, message).await;
            return Ok(Redirect::to("/checkout/"));
        }
    };

    let cart = current_cart(&state, &session).await?;
    if cart.total_products == 0 {
        flash::notify(&session, "Your cart is empty").await;
        return Ok(Redirect::to("/cart/"));
    }

    let order = repo.place_order(&customer, cart.id, &draft).await?;
    forget_cart(&session).await?;

    info!(order_id = %order.id, customer_id = %customer.id, "order placed");
    flash::notify(
        &session,
        "Thank you for your order! Our manager will get in touch with you",
    )
    .await;
    Ok(Redirect::to("/"))
}
