//! Order lifecycle enums.

use serde::{Deserialize, Serialize};

/// Order fulfillment status.
///
/// Orders are always created as [`OrderStatus::New`]; the later states are
/// reached only through administrative action, never by the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    New,
    InProgress,
    Ready,
    Completed,
}

impl OrderStatus {
    /// The stored string code for this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::InProgress => "in_progress",
            Self::Ready => "ready",
            Self::Completed => "completed",
        }
    }

    /// The next state in the administrative progression, if any.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::New => Some(Self::InProgress),
            Self::InProgress => Some(Self::Ready),
            Self::Ready => Some(Self::Completed),
            Self::Completed => None,
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(Self::New),
            "in_progress" => Ok(Self::InProgress),
            "ready" => Ok(Self::Ready),
            "completed" => Ok(Self::Completed),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

/// How the customer wants to receive the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BuyingType {
    /// Pick up at the store.
    #[default]
    SelfPickup,
    /// Courier delivery to the order's address.
    Delivery,
}

impl BuyingType {
    /// The stored string code for this buying type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SelfPickup => "self",
            Self::Delivery => "delivery",
        }
    }
}

impl std::fmt::Display for BuyingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BuyingType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "self" => Ok(Self::SelfPickup),
            "delivery" => Ok(Self::Delivery),
            _ => Err(format!("invalid buying type: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn status_codes_round_trip() {
        for status in [
            OrderStatus::New,
            OrderStatus::InProgress,
            OrderStatus::Ready,
            OrderStatus::Completed,
        ] {
            assert_eq!(OrderStatus::from_str(status.as_str()), Ok(status));
        }
        assert!(OrderStatus::from_str("in_ready").is_err());
    }

    #[test]
    fn status_progression_terminates() {
        let mut status = OrderStatus::New;
        let mut steps = 0;
        while let Some(next) = status.next() {
            status = next;
            steps += 1;
        }
        assert_eq!(status, OrderStatus::Completed);
        assert_eq!(steps, 3);
    }

    #[test]
    fn buying_type_codes_round_trip() {
        assert_eq!(BuyingType::from_str("self"), Ok(BuyingType::SelfPickup));
        assert_eq!(BuyingType::from_str("delivery"), Ok(BuyingType::Delivery));
        assert!(BuyingType::from_str("pigeon").is_err());
    }
}
