//! Fixed-point money arithmetic.
//!
//! Product prices carry two decimal places; line and cart totals carry
//! three, matching the `NUMERIC(12,2)` / `NUMERIC(12,3)` columns. All
//! arithmetic goes through [`rust_decimal::Decimal`] so repeated saves
//! cannot accumulate rounding drift.

use rust_decimal::Decimal;

/// Total price of a line item: `quantity x unit price`, at 3 decimal
/// places.
#[must_use]
pub fn line_total(unit_price: Decimal, quantity: u32) -> Decimal {
    let mut total = unit_price * Decimal::from(quantity);
    total.rescale(3);
    total
}

/// Format an amount for display, e.g. `$1299.00`.
#[must_use]
pub fn format_usd(amount: Decimal) -> String {
    format!("${amount:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn line_total_is_exact() {
        // 3 x 10.50 = 31.500
        let total = line_total(Decimal::new(1050, 2), 3);
        assert_eq!(total, Decimal::new(31_500, 3));
        assert_eq!(total.scale(), 3);
    }

    #[test]
    fn line_total_survives_repeated_recomputation() {
        let price = Decimal::new(1999, 2); // 19.99
        let mut total = line_total(price, 7);
        for _ in 0..100 {
            total = line_total(price, 7);
        }
        assert_eq!(total, Decimal::new(139_930, 3));
    }

    #[test]
    fn cart_sum_example_from_two_items() {
        // Items priced 10.000 and 25.500 sum to 35.500.
        let a = line_total(Decimal::new(1000, 2), 1);
        let b = line_total(Decimal::new(2550, 2), 1);
        assert_eq!(a + b, Decimal::new(35_500, 3));
    }

    #[test]
    fn display_formatting() {
        assert_eq!(format_usd(Decimal::new(129_900, 2)), "$1299.00");
        assert_eq!(format_usd(Decimal::new(35_500, 3)), "$35.50");
        assert_eq!(format_usd(Decimal::ZERO), "$0.00");
    }
}
