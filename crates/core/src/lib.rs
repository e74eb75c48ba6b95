//! Voltshop Core - Shared domain types.
//!
//! This crate provides common types used across the Voltshop components:
//! - `storefront` - Public-facing shop
//! - `cli` - Command-line tools for migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no
//! HTTP handling. Database encode/decode impls are gated behind the
//! `postgres` feature.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, the product-kind union, order enums, money

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
