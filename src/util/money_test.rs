use super::*;

#[test]
fn format_price_pads_to_two_decimals() {
    assert_eq!(format_price(Decimal::new(105, 1)), "$10.50");
    assert_eq!(format_price(Decimal::from(7)), "$7.00");
    assert_eq!(format_price(Decimal::ZERO), "$0.00");
}

#[test]
fn format_price_rounds_sub_cent_values() {
    assert_eq!(format_price(Decimal::new(10_333, 3)), "$10.33");
}

#[test]
fn coupon_discount_is_ten_percent() {
    assert_eq!(coupon_discount(Decimal::from(25)), Decimal::new(250, 2));
    assert_eq!(coupon_discount(Decimal::ZERO), Decimal::ZERO);
}

#[test]
fn coupon_discount_rounds_to_cents() {
    // 10% of 10.33 is 1.033, kept to cents.
    assert_eq!(
        coupon_discount(Decimal::new(1033, 2)),
        Decimal::new(103, 2)
    );
}

#[test]
fn discounted_total_subtracts_discount() {
    assert_eq!(discounted_total(Decimal::from(25)), Decimal::new(2250, 2));
}
