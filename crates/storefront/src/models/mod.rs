//! Domain models for the storefront.
//!
//! These types represent validated domain objects, separate from the
//! database row types the repositories decode.

pub mod cart;
pub mod catalog;
pub mod customer;
pub mod order;

pub use cart::{Cart, CartItem, CartLine};
pub use catalog::{Category, CategoryCounts, Notebook, ProductDetail, ProductRef, ProductSummary, Smartphone};
pub use customer::Customer;
pub use order::{Order, OrderDraft, OrderForm};

/// Session keys used across handlers.
pub mod session_keys {
    /// Active cart id for this session.
    pub const CART_ID: &str = "cart_id";
    /// Authenticated customer id, set by the external auth layer.
    pub const CUSTOMER_ID: &str = "customer_id";
    /// Pending flash notices, drained by the next rendered page.
    pub const FLASH: &str = "flash_messages";
}
