//! Discount arithmetic shared by the cart, the catalog filter, checkout and
//! inquiries.
//!
//! Every consumer goes through [`effective_price`], so a product shows the
//! same number in a listing, a cart line and an order line.

use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places kept on an effective price.
pub const PRICE_SCALE: u32 = 2;

/// Returns `price` after applying a percentage `discount`.
///
/// An absent or zero discount returns `price` untouched. Otherwise the
/// result is `price × (1 − discount / 100)` rounded to [`PRICE_SCALE`]
/// places, midpoint away from zero. Negative inputs are not validated.
#[must_use]
pub fn effective_price(price: Decimal, discount: Option<Decimal>) -> Decimal {
    match discount {
        Some(d) if !d.is_zero() => {
            let factor = Decimal::ONE - d / Decimal::ONE_HUNDRED;
            (price * factor)
                .round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointAwayFromZero)
        }
        _ => price,
    }
}

/// Effective price of `quantity` units.
#[must_use]
pub fn line_total(price: Decimal, discount: Option<Decimal>, quantity: u32) -> Decimal {
    effective_price(price, discount) * Decimal::from(quantity)
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn no_discount_returns_price_unchanged() {
        assert_eq!(effective_price(dec!(149.99), None), dec!(149.99));
        assert_eq!(effective_price(dec!(149.99), Some(Decimal::ZERO)), dec!(149.99));
    }

    #[test]
    fn percentage_discount_is_applied() {
        assert_eq!(effective_price(dec!(100), Some(dec!(10))), dec!(90));
        assert_eq!(effective_price(dec!(250), Some(dec!(100))), dec!(0));
    }

    #[test]
    fn fractional_results_round_to_two_places() {
        // 999 * 0.67 = 669.33
        assert_eq!(effective_price(dec!(999), Some(dec!(33))), dec!(669.33));
        // 10.05 * 0.5 = 5.025 -> 5.03
        assert_eq!(effective_price(dec!(10.05), Some(dec!(50))), dec!(5.03));
    }

    #[test]
    fn effective_price_never_increases_with_discount() {
        for price in [dec!(0), dec!(1), dec!(49.5), dec!(1299)] {
            let mut previous = effective_price(price, Some(Decimal::ZERO));
            for step in 1..=100u32 {
                let current = effective_price(price, Some(Decimal::from(step)));
                assert!(
                    current <= previous,
                    "price {price}: discount {step} gave {current} > {previous}"
                );
                previous = current;
            }
        }
    }

    #[test]
    fn line_total_multiplies_effective_price() {
        assert_eq!(line_total(dec!(100), Some(dec!(10)), 3), dec!(270));
        assert_eq!(line_total(dec!(50), None, 0), dec!(0));
    }
}
