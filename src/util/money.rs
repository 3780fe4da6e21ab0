//! Price formatting and checkout discount math.

#[cfg(test)]
#[path = "money_test.rs"]
mod money_test;

use rust_decimal::Decimal;

/// Format a price for display with two decimal places, e.g. `$10.50`.
#[must_use]
pub fn format_price(value: Decimal) -> String {
    format!("${value:.2}")
}

/// 10% coupon discount on an order total, rounded to cents.
#[must_use]
pub fn coupon_discount(total: Decimal) -> Decimal {
    (total * Decimal::new(1, 1)).round_dp(2)
}

/// Total payable after the coupon discount.
#[must_use]
pub fn discounted_total(total: Decimal) -> Decimal {
    total - coupon_discount(total)
}
