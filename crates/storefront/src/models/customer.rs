//! Customer domain type.

use voltshop_core::{CustomerId, UserId};

/// A customer profile.
///
/// Authentication is external to this system; `user_id` is the identity
/// the session layer hands us after login.
#[derive(Debug, Clone)]
pub struct Customer {
    pub id: CustomerId,
    pub user_id: UserId,
    pub phone: Option<String>,
    pub address: Option<String>,
}
