//! 2026 regime: capped reliefs, a taxable floor and a marginal bracket walk.
//!
//! # Steps
//!
//! | Step | Description |
//! |------|-------------|
//! | 0    | Income at or below 800,000 is exempt; return zero immediately |
//! | 1a   | Rent relief: 20% of rent, capped at 500,000 |
//! | 1b   | Pension relief: contributions, capped at 200,000 |
//! | 1c   | Insurance relief: premiums, capped at 100,000 |
//! | 2    | Taxable income: income less reliefs, floored at 800,000 |
//! | 3    | Tax: sum over brackets of the slice of taxable income inside each |
//!
//! Step 0 runs before step 2, so for exempt incomes the floor never applies.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use ngtax_core::{ReliefInputs, TaxBracket};
//! use ngtax_core::calculations::compute_new_regime_tax;
//!
//! let brackets = vec![
//!     TaxBracket { min: dec!(0), max: Some(dec!(800000)), rate: dec!(0) },
//!     TaxBracket { min: dec!(800000), max: Some(dec!(3000000)), rate: dec!(0.15) },
//!     TaxBracket { min: dec!(3000000), max: None, rate: dec!(0.18) },
//! ];
//! let reliefs = ReliefInputs::new(dec!(2000000), dec!(0), dec!(0));
//!
//! let result = compute_new_regime_tax(dec!(2000000), &reliefs, &brackets).unwrap();
//!
//! assert_eq!(result.rent_relief, dec!(400000));
//! assert_eq!(result.taxable_income, dec!(1600000));
//! assert_eq!(result.tax, dec!(120000));
//! ```

use rust_decimal::Decimal;

use crate::calculations::common::{ensure_non_negative, max, min};
use crate::error::TaxEngineError;
use crate::{
    BracketContribution, BracketTable, ReliefBreakdown, ReliefInputs, TaxBracket, TaxResult,
    TaxRules,
};

/// Computes new-regime tax against an unvalidated bracket slice.
///
/// The slice is validated on every call; callers that compute repeatedly
/// should build a [`BracketTable`] once and use [`crate::TaxEngine`].
///
/// # Errors
///
/// - [`TaxEngineError::InvalidInput`] for negative income or reliefs.
/// - [`TaxEngineError::Configuration`] for an empty, unordered or otherwise
///   malformed bracket table.
pub fn compute_new_regime_tax(
    income: Decimal,
    reliefs: &ReliefInputs,
    brackets: &[TaxBracket],
) -> Result<TaxResult, TaxEngineError> {
    validate_inputs(income, reliefs)?;
    let table = BracketTable::new(brackets.to_vec())?;
    Ok(new_regime_tax(&TaxRules::default(), &table, income, reliefs))
}

/// Rejects negative income or relief amounts.
pub(crate) fn validate_inputs(
    income: Decimal,
    reliefs: &ReliefInputs,
) -> Result<(), TaxEngineError> {
    ensure_non_negative("income", income)?;
    ensure_non_negative("rent", reliefs.rent)?;
    ensure_non_negative("pension", reliefs.pension)?;
    ensure_non_negative("insurance", reliefs.insurance)?;
    Ok(())
}

/// Runs steps 0 to 3 on validated inputs.
pub(crate) fn new_regime_tax(
    rules: &TaxRules,
    table: &BracketTable,
    income: Decimal,
    reliefs: &ReliefInputs,
) -> TaxResult {
    if income <= rules.new_exemption_threshold {
        return TaxResult::exempt();
    }

    let breakdown = compute_reliefs(rules, reliefs);
    let taxable_income = taxable_income(rules, income, &breakdown);
    let tax = bracket_walk(table, taxable_income);

    TaxResult {
        tax,
        rent_relief: breakdown.rent_relief,
        pension_relief: breakdown.pension_relief,
        insurance_relief: breakdown.insurance_relief,
        taxable_income,
    }
}

/// Applies each relief cap independently.
pub(crate) fn compute_reliefs(
    rules: &TaxRules,
    reliefs: &ReliefInputs,
) -> ReliefBreakdown {
    ReliefBreakdown {
        rent_relief: min(rules.rent_relief_cap, reliefs.rent * rules.rent_relief_rate),
        pension_relief: min(rules.pension_relief_cap, reliefs.pension),
        insurance_relief: min(rules.insurance_relief_cap, reliefs.insurance),
    }
}

/// Income less reliefs, never below the taxable floor.
pub(crate) fn taxable_income(
    rules: &TaxRules,
    income: Decimal,
    reliefs: &ReliefBreakdown,
) -> Decimal {
    max(rules.taxable_floor, income - reliefs.total())
}

/// Marginal accumulation over the brackets, unrounded.
pub(crate) fn bracket_walk(
    brackets: &[TaxBracket],
    taxable: Decimal,
) -> Decimal {
    brackets
        .iter()
        .filter(|b| taxable > b.min)
        .map(|b| (min(taxable, b.upper_bound()) - b.min) * b.rate)
        .sum()
}

/// The bracket walk itemised per bracket; brackets above `taxable` are omitted.
pub(crate) fn bracket_breakdown(
    brackets: &[TaxBracket],
    taxable: Decimal,
) -> Vec<BracketContribution> {
    brackets
        .iter()
        .filter(|b| taxable > b.min)
        .map(|b| {
            let taxed_amount = min(taxable, b.upper_bound()) - b.min;
            BracketContribution {
                min: b.min,
                max: b.max,
                rate: b.rate,
                taxed_amount,
                tax: taxed_amount * b.rate,
            }
        })
        .collect()
}
