//! Core types for Voltshop.

pub mod id;
pub mod kind;
pub mod money;
pub mod status;

pub use id::*;
pub use kind::{ProductKind, UnknownProductKind};
pub use money::{format_usd, line_total};
pub use status::{BuyingType, OrderStatus};
