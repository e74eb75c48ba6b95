//! HTTP middleware for the storefront.
//!
//! # Layer order (bottom to top in the router)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request tracing)
//! 3. Session layer (tower-sessions with `PostgreSQL` store)

pub mod session;

pub use session::create_session_layer;
