//! Money conversion and defensive input parsing
//!
//! Monetary values are stored as `f64` in models and computed as
//! `Decimal`. User-typed amounts arrive as free text and must never
//! propagate as NaN: anything non-numeric parses to zero.

use rust_decimal::prelude::*;

/// Rounding for monetary values (2 decimal places, half-up)
pub(crate) const DECIMAL_PLACES: u32 = 2;

/// Convert f64 to Decimal for calculation
///
/// NaN, infinities and out-of-range values become zero.
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Parse a user-typed currency amount.
///
/// Empty or non-numeric input yields zero; negative amounts are
/// clamped to zero. The UI substitutes defaults instead of blocking,
/// so this never fails.
pub fn parse_amount(input: &str) -> Decimal {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Decimal::ZERO;
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(to_decimal)
        .unwrap_or(Decimal::ZERO)
        .max(Decimal::ZERO)
}

/// Parse a user-typed percentage, clamped to [0, 100].
pub fn parse_percent(input: &str) -> Decimal {
    parse_amount(input).min(Decimal::ONE_HUNDRED)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_decimal_precision() {
        // Classic floating point problem: 0.1 + 0.2 != 0.3
        let sum = to_decimal(0.1) + to_decimal(0.2);
        assert_eq!(to_f64(sum), 0.3);
    }

    #[test]
    fn test_to_decimal_nan_becomes_zero() {
        assert_eq!(to_decimal(f64::NAN), Decimal::ZERO);
        assert_eq!(to_decimal(f64::INFINITY), Decimal::ZERO);
        assert_eq!(to_decimal(f64::NEG_INFINITY), Decimal::ZERO);
    }

    #[test]
    fn test_to_f64_rounds_half_up() {
        let value = Decimal::new(5, 3); // 0.005
        assert_eq!(to_f64(value), 0.01);
        let value = Decimal::new(4, 3); // 0.004
        assert_eq!(to_f64(value), 0.0);
    }

    #[test]
    fn test_parse_amount_valid() {
        assert_eq!(parse_amount("100"), Decimal::new(100, 0));
        assert_eq!(parse_amount(" 12.50 "), Decimal::new(1250, 2));
    }

    #[test]
    fn test_parse_amount_garbage_is_zero() {
        assert_eq!(parse_amount(""), Decimal::ZERO);
        assert_eq!(parse_amount("   "), Decimal::ZERO);
        assert_eq!(parse_amount("abc"), Decimal::ZERO);
        assert_eq!(parse_amount("12,50"), Decimal::ZERO);
        assert_eq!(parse_amount("NaN"), Decimal::ZERO);
        assert_eq!(parse_amount("inf"), Decimal::ZERO);
    }

    #[test]
    fn test_parse_amount_negative_clamped() {
        assert_eq!(parse_amount("-5"), Decimal::ZERO);
    }

    #[test]
    fn test_parse_percent_clamped_to_100() {
        assert_eq!(parse_percent("20"), Decimal::new(20, 0));
        assert_eq!(parse_percent("250"), Decimal::ONE_HUNDRED);
        assert_eq!(parse_percent("-10"), Decimal::ZERO);
        assert_eq!(parse_percent("x"), Decimal::ZERO);
    }
}
