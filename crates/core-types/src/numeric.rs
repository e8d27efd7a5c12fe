//! Small numeric helpers shared by every calculator.
//!
//! Money and percentages are `Decimal` throughout, so a "non-finite" metric
//! (for example cash runway with zero burn) is expressed as `None` and turned
//! into zero at display time with [`finite_or_zero`].

use crate::error::CoreError;
use rust_decimal::Decimal;

/// Display coercion for metrics that may be undefined: `None` becomes zero.
pub fn finite_or_zero(value: Option<Decimal>) -> Decimal {
    value.unwrap_or(Decimal::ZERO)
}

/// Floors a denominator at one, so `x / floor_one(n)` never divides by zero.
pub fn floor_one(value: Decimal) -> Decimal {
    value.max(Decimal::ONE)
}

/// `part / whole * 100`, or zero when `whole` is not positive.
pub fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole > Decimal::ZERO {
        part / whole * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    }
}

/// Adds `amount` to a running total, failing instead of overflowing.
///
/// `what` names the total in the error, e.g. `"income of 2024-01"`.
pub fn checked_total(total: Decimal, amount: Decimal, what: &str) -> Result<Decimal, CoreError> {
    total
        .checked_add(amount)
        .ok_or_else(|| CoreError::Overflow(what.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn undefined_metric_displays_as_zero() {
        assert_eq!(finite_or_zero(None), Decimal::ZERO);
        assert_eq!(finite_or_zero(Some(dec!(12.5))), dec!(12.5));
    }

    #[test]
    fn floor_one_only_raises_small_denominators() {
        assert_eq!(floor_one(Decimal::ZERO), Decimal::ONE);
        assert_eq!(floor_one(dec!(-3)), Decimal::ONE);
        assert_eq!(floor_one(dec!(0.5)), Decimal::ONE);
        assert_eq!(floor_one(dec!(7)), dec!(7));
    }

    #[test]
    fn percent_of_zero_whole_is_zero() {
        assert_eq!(percent_of(dec!(600), dec!(1000)), dec!(60));
        assert_eq!(percent_of(dec!(-50), Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn checked_total_reports_overflow() {
        assert_eq!(checked_total(dec!(1.5), dec!(2), "income").unwrap(), dec!(3.5));
        assert_eq!(
            checked_total(Decimal::MAX, Decimal::ONE, "income"),
            Err(CoreError::Overflow("income".to_string()))
        );
    }
}
