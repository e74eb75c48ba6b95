//! Order domain types and the checkout form.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use voltshop_core::{BuyingType, CartId, CustomerId, OrderId, OrderStatus};

/// A placed order.
///
/// Orders are created once per successful checkout, in
/// [`OrderStatus::New`], and never deleted by this system. Contact and
/// delivery fields are snapshots of the submitted form, not references to
/// the customer profile.
#[derive(Debug, Clone)]
pub struct Order {
    pub id: OrderId,
    pub customer_id: CustomerId,
    /// The cart frozen by this order. Set inside the checkout transaction.
    pub cart_id: Option<CartId>,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub address: String,
    pub status: OrderStatus,
    pub buying_type: BuyingType,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub order_date: NaiveDate,
}

/// The raw checkout form, as submitted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderForm {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub buying_type: Option<String>,
    pub order_date: Option<String>,
    pub comment: Option<String>,
}

/// A validated checkout submission, ready for the checkout transaction.
#[derive(Debug, Clone)]
pub struct OrderDraft {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub address: String,
    pub buying_type: BuyingType,
    pub order_date: NaiveDate,
    pub comment: Option<String>,
}

impl OrderForm {
    /// Validate the submitted form into an [`OrderDraft`].
    ///
    /// Required: first name, last name, phone, address, buying type, and
    /// a `YYYY-MM-DD` order date. Comment is optional; a blank comment is
    /// treated as absent.
    ///
    /// # Errors
    ///
    /// Returns a user-facing message naming the first failing field.
    pub fn validate(&self) -> Result<OrderDraft, String> {
        let first_name = required(self.first_name.as_deref(), "first name")?;
        let last_name = required(self.last_name.as_deref(), "last name")?;
        let phone = required(self.phone.as_deref(), "phone")?;
        let address = required(self.address.as_deref(), "address")?;

        let buying_type = required(self.buying_type.as_deref(), "buying type")?
            .parse::<BuyingType>()
            .map_err(|_| "buying type must be 'self' or 'delivery'".to_owned())?;

        let order_date = required(self.order_date.as_deref(), "order date")?;
        let order_date = NaiveDate::parse_from_str(&order_date, "%Y-%m-%d")
            .map_err(|_| "order date must be a valid YYYY-MM-DD date".to_owned())?;

        let comment = self
            .comment
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_owned);

        Ok(OrderDraft {
            first_name,
            last_name,
            phone,
            address,
            buying_type,
            order_date,
            comment,
        })
    }
}

fn required(value: Option<&str>, field: &str) -> Result<String, String> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_owned()),
        _ => Err(format!("{field} is required")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> OrderForm {
        OrderForm {
            first_name: Some("Ada".to_owned()),
            last_name: Some("Lovelace".to_owned()),
            phone: Some("+1 555 0100".to_owned()),
            address: Some("12 Analytical St".to_owned()),
            buying_type: Some("delivery".to_owned()),
            order_date: Some("2026-09-15".to_owned()),
            comment: Some("  ".to_owned()),
        }
    }

    #[test]
    fn valid_form_produces_draft() {
        let draft = filled_form().validate().expect("form should validate");
        assert_eq!(draft.first_name, "Ada");
        assert_eq!(draft.buying_type, BuyingType::Delivery);
        assert_eq!(
            draft.order_date,
            NaiveDate::from_ymd_opt(2026, 9, 15).unwrap()
        );
        // Blank comment is normalized to None.
        assert_eq!(draft.comment, None);
    }

    #[test]
    fn missing_phone_is_rejected() {
        let mut form = filled_form();
        form.phone = Some("   ".to_owned());
        assert_eq!(form.validate().unwrap_err(), "phone is required");

        form.phone = None;
        assert_eq!(form.validate().unwrap_err(), "phone is required");
    }

    #[test]
    fn bad_buying_type_and_date_are_rejected() {
        let mut form = filled_form();
        form.buying_type = Some("drone".to_owned());
        assert!(form.validate().unwrap_err().contains("buying type"));

        let mut form = filled_form();
        form.order_date = Some("15/09/2026".to_owned());
        assert!(form.validate().unwrap_err().contains("order date"));
    }

    #[test]
    fn fields_are_trimmed() {
        let mut form = filled_form();
        form.first_name = Some("  Ada  ".to_owned());
        let draft = form.validate().unwrap();
        assert_eq!(draft.first_name, "Ada");
    }
}
