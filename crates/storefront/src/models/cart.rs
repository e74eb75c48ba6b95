//! Cart domain types.

use rust_decimal::Decimal;

use voltshop_core::{CartId, CartItemId, CustomerId, ProductId, ProductKind};

/// A shopping cart.
///
/// `total_price` and `total_products` are denormalized aggregates owned by
/// the cart aggregator ([`crate::db::cart::recalc`]); they are recomputed
/// after every line-item mutation, never derived at read time.
#[derive(Debug, Clone)]
pub struct Cart {
    pub id: CartId,
    pub owner_id: Option<CustomerId>,
    pub total_products: i64,
    pub total_price: Decimal,
    /// Set exactly once, at successful checkout. A frozen cart is never
    /// returned as anyone's active cart.
    pub in_order: bool,
    pub for_anonymous: bool,
}

/// A single line item in a cart.
///
/// Invariant: `total_price == quantity x product price`, recomputed on
/// every write.
#[derive(Debug, Clone)]
pub struct CartItem {
    pub id: CartItemId,
    pub customer_id: Option<CustomerId>,
    pub cart_id: CartId,
    pub kind: ProductKind,
    pub product_id: ProductId,
    pub quantity: i64,
    pub total_price: Decimal,
}

/// A line item joined with its product's display data, for the cart page.
#[derive(Debug, Clone)]
pub struct CartLine {
    pub item: CartItem,
    pub title: String,
    pub slug: String,
    pub unit_price: Decimal,
    pub image: String,
}
