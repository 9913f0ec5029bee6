//! 2025 regime: a flat rate on income above a tax-free threshold.

use rust_decimal::Decimal;

use crate::TaxRules;
use crate::calculations::common::ensure_non_negative;
use crate::error::TaxEngineError;

/// Computes old-regime tax with the statutory rules.
///
/// Income up to 300,000 is tax-free; the excess is taxed at 7%. The result
/// is exact; rounding to kobo is left to presentation.
///
/// # Errors
///
/// Returns [`TaxEngineError::InvalidInput`] for negative income.
///
/// ```
/// use rust_decimal_macros::dec;
/// use ngtax_core::calculations::compute_old_regime_tax;
///
/// assert_eq!(compute_old_regime_tax(dec!(300000)).unwrap(), dec!(0));
/// assert_eq!(compute_old_regime_tax(dec!(1300000)).unwrap(), dec!(70000));
/// ```
pub fn compute_old_regime_tax(income: Decimal) -> Result<Decimal, TaxEngineError> {
    old_regime_tax(&TaxRules::default(), income)
}

pub(crate) fn old_regime_tax(
    rules: &TaxRules,
    income: Decimal,
) -> Result<Decimal, TaxEngineError> {
    let income = ensure_non_negative("income", income)?;
    if income <= rules.old_tax_free_threshold {
        return Ok(Decimal::ZERO);
    }

    let excess = income - rules.old_tax_free_threshold;
    Ok(excess * rules.old_flat_rate)
}
