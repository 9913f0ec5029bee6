//! Common utility functions for tax calculations.
//!
//! This module provides shared functionality used by both regimes: clamping,
//! parsing of user-entered amounts, and kobo rounding for figures that are
//! shown to the user. Engine results themselves are never rounded.

use rust_decimal::Decimal;

use crate::error::TaxEngineError;

/// Rounds a decimal value to exactly two decimal places (kobo) using half-up
/// rounding.
///
/// Values at exactly 0.005 are rounded away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use ngtax_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the maximum of two decimal values.
///
/// ```
/// use rust_decimal_macros::dec;
/// use ngtax_core::calculations::common::max;
///
/// assert_eq!(max(dec!(100.00), dec!(200.00)), dec!(200.00));
/// assert_eq!(max(dec!(-100.00), dec!(-200.00)), dec!(-100.00));
/// ```
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// Returns the minimum of two decimal values.
pub fn min(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a < b { a } else { b }
}

/// Rejects negative amounts with [`TaxEngineError::InvalidInput`].
pub fn ensure_non_negative(
    field: &'static str,
    value: Decimal,
) -> Result<Decimal, TaxEngineError> {
    if value < Decimal::ZERO {
        return Err(TaxEngineError::negative(field, value));
    }
    Ok(value)
}

/// Normalizes input for decimal parsing: trims whitespace, drops a leading
/// naira sign and removes commas (thousands separator).
fn normalize_amount_input(s: &str) -> String {
    let trimmed = s.trim();
    let trimmed = trimmed
        .strip_prefix('₦')
        .or_else(|| trimmed.strip_prefix("NGN"))
        .unwrap_or(trimmed);
    trimmed.trim().replace(',', "")
}

/// Parses a user-entered monetary field.
///
/// Handles comma as thousands separator (e.g. `"1,234.56"`) and an optional
/// `₦` prefix. Empty or whitespace-only input is treated as 0.
///
/// # Errors
///
/// Returns [`TaxEngineError::InvalidInput`] naming `field` when the text is
/// not a number or the amount is negative.
///
/// ```
/// use rust_decimal_macros::dec;
/// use ngtax_core::calculations::common::parse_amount;
///
/// assert_eq!(parse_amount("income", "₦2,000,000").unwrap(), dec!(2000000));
/// assert!(parse_amount("rent", "abc").is_err());
/// ```
pub fn parse_amount(
    field: &'static str,
    s: &str,
) -> Result<Decimal, TaxEngineError> {
    let normalized = normalize_amount_input(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    let value: Decimal = normalized.parse().map_err(|e| {
        tracing::debug!(field, input = %s, "rejected non-numeric amount: {}", e);
        TaxEngineError::InvalidInput {
            field,
            reason: format!("'{}' is not a number", s.trim()),
        }
    })?;
    ensure_non_negative(field, value)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // round_half_up tests
    // =========================================================================

    #[test]
    fn round_half_up_rounds_down_below_midpoint() {
        assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
    }

    #[test]
    fn round_half_up_rounds_up_at_midpoint() {
        assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
    }

    #[test]
    fn round_half_up_preserves_whole_naira() {
        assert_eq!(round_half_up(dec!(120000)), dec!(120000.00));
    }

    // =========================================================================
    // max / min tests
    // =========================================================================

    #[test]
    fn max_returns_larger_value() {
        assert_eq!(max(dec!(800000), dec!(1600000)), dec!(1600000));
        assert_eq!(max(dec!(1600000), dec!(800000)), dec!(1600000));
    }

    #[test]
    fn min_returns_smaller_value() {
        assert_eq!(min(dec!(500000), dec!(400000)), dec!(400000));
        assert_eq!(min(dec!(400000), dec!(500000)), dec!(400000));
    }

    #[test]
    fn min_handles_equal_values() {
        assert_eq!(min(dec!(150.00), dec!(150.00)), dec!(150.00));
    }

    // =========================================================================
    // ensure_non_negative tests
    // =========================================================================

    #[test]
    fn ensure_non_negative_accepts_zero_and_positive() {
        assert_eq!(ensure_non_negative("income", dec!(0)), Ok(dec!(0)));
        assert_eq!(ensure_non_negative("income", dec!(1)), Ok(dec!(1)));
    }

    #[test]
    fn ensure_non_negative_rejects_negative() {
        let err = ensure_non_negative("pension", dec!(-0.01)).unwrap_err();

        assert!(matches!(
            err,
            TaxEngineError::InvalidInput {
                field: "pension",
                ..
            }
        ));
    }

    // =========================================================================
    // parse_amount tests
    // =========================================================================

    #[test]
    fn parse_amount_accepts_comma_thousands_separator() {
        assert_eq!(parse_amount("income", "1,234.56").unwrap(), dec!(1234.56));
        assert_eq!(
            parse_amount("income", "10,000,000").unwrap(),
            dec!(10000000)
        );
    }

    #[test]
    fn parse_amount_accepts_naira_prefix() {
        assert_eq!(parse_amount("rent", "₦ 500,000").unwrap(), dec!(500000));
        assert_eq!(parse_amount("rent", "NGN500000").unwrap(), dec!(500000));
    }

    #[test]
    fn parse_amount_empty_treated_as_zero() {
        assert_eq!(parse_amount("insurance", "").unwrap(), Decimal::ZERO);
        assert_eq!(parse_amount("insurance", "   ").unwrap(), Decimal::ZERO);
    }

    #[test]
    fn parse_amount_rejects_non_numeric() {
        let err = parse_amount("income", "lots").unwrap_err();

        assert_eq!(
            err,
            TaxEngineError::InvalidInput {
                field: "income",
                reason: "'lots' is not a number".to_string(),
            }
        );
    }

    #[test]
    fn parse_amount_rejects_negative() {
        let err = parse_amount("rent", "-1,000").unwrap_err();

        assert_eq!(err.to_string(), "invalid rent: must not be negative, got -1000");
    }
}
