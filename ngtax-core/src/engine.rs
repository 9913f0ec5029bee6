//! The tax engine: both regimes evaluated against one bracket table.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use ngtax_core::{BracketTable, ReliefInputs, TaxBracket, TaxEngine, TaxRegime};
//!
//! let table = BracketTable::new(vec![
//!     TaxBracket { min: dec!(0), max: Some(dec!(800000)), rate: dec!(0) },
//!     TaxBracket { min: dec!(800000), max: Some(dec!(3000000)), rate: dec!(0.15) },
//!     TaxBracket { min: dec!(3000000), max: None, rate: dec!(0.18) },
//! ])
//! .unwrap();
//!
//! let engine = TaxEngine::new(&table);
//! let comparison = engine
//!     .compare(dec!(2000000), &ReliefInputs::new(dec!(2000000), dec!(0), dec!(0)))
//!     .unwrap();
//!
//! assert_eq!(comparison.old_tax, dec!(119000));
//! assert_eq!(comparison.new.tax, dec!(120000));
//! assert_eq!(comparison.cheaper, Some(TaxRegime::Old));
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use crate::calculations::common::round_half_up;
use crate::calculations::{
    bracket_breakdown, compute_reliefs, new_regime_tax, old_regime_tax, validate_inputs,
};
use crate::error::TaxEngineError;
use crate::{
    BracketContribution, BracketTable, RegimeComparison, ReliefBreakdown, ReliefInputs, TaxRegime,
    TaxResult, TaxRules,
};

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Calculator for both regimes.
///
/// Borrows a validated [`BracketTable`]; it holds no other state, so every
/// call is a pure function of its arguments.
#[derive(Debug, Clone)]
pub struct TaxEngine<'a> {
    brackets: &'a BracketTable,
    rules: TaxRules,
}

impl<'a> TaxEngine<'a> {
    /// Creates an engine with the statutory rules.
    pub fn new(brackets: &'a BracketTable) -> Self {
        Self::with_rules(brackets, TaxRules::default())
    }

    pub fn with_rules(
        brackets: &'a BracketTable,
        rules: TaxRules,
    ) -> Self {
        Self { brackets, rules }
    }

    /// Old-regime tax: flat rate on income above the tax-free threshold.
    ///
    /// # Errors
    ///
    /// Returns [`TaxEngineError::InvalidInput`] for negative income.
    pub fn compute_old_regime_tax(
        &self,
        income: Decimal,
    ) -> Result<Decimal, TaxEngineError> {
        let tax = old_regime_tax(&self.rules, income)?;
        debug!(%tax, "computed old regime tax");
        Ok(tax)
    }

    /// New-regime tax with the relief breakdown.
    ///
    /// # Errors
    ///
    /// Returns [`TaxEngineError::InvalidInput`] for negative income or reliefs.
    pub fn compute_new_regime_tax(
        &self,
        income: Decimal,
        reliefs: &ReliefInputs,
    ) -> Result<TaxResult, TaxEngineError> {
        validate_inputs(income, reliefs)?;
        let result = new_regime_tax(&self.rules, self.brackets, income, reliefs);
        debug!(
            tax = %result.tax,
            taxable_income = %result.taxable_income,
            "computed new regime tax"
        );
        Ok(result)
    }

    /// Tax under the given regime.
    pub fn compute(
        &self,
        regime: TaxRegime,
        income: Decimal,
        reliefs: &ReliefInputs,
    ) -> Result<Decimal, TaxEngineError> {
        match regime {
            TaxRegime::Old => self.compute_old_regime_tax(income),
            TaxRegime::New => self
                .compute_new_regime_tax(income, reliefs)
                .map(|r| r.tax),
        }
    }

    /// Reliefs after caps, regardless of whether the income is exempt.
    pub fn compute_reliefs(
        &self,
        reliefs: &ReliefInputs,
    ) -> ReliefBreakdown {
        compute_reliefs(&self.rules, reliefs)
    }

    /// Per-bracket contributions for a taxable base.
    pub fn bracket_breakdown(
        &self,
        taxable: Decimal,
    ) -> Vec<BracketContribution> {
        bracket_breakdown(self.brackets, taxable)
    }

    /// Evaluates both regimes for the same income and reliefs.
    ///
    /// # Errors
    ///
    /// Returns [`TaxEngineError::InvalidInput`] for negative income or reliefs.
    pub fn compare(
        &self,
        income: Decimal,
        reliefs: &ReliefInputs,
    ) -> Result<RegimeComparison, TaxEngineError> {
        let old_tax = self.compute_old_regime_tax(income)?;
        let new = self.compute_new_regime_tax(income, reliefs)?;
        let difference = new.tax - old_tax;

        let cheaper = if difference < Decimal::ZERO {
            Some(TaxRegime::New)
        } else if difference > Decimal::ZERO {
            Some(TaxRegime::Old)
        } else {
            None
        };

        Ok(RegimeComparison {
            income,
            old_tax,
            difference,
            cheaper,
            old_effective_rate: effective_rate(old_tax, income),
            new_effective_rate: effective_rate(new.tax, income),
            old_monthly_tax: round_half_up(old_tax / MONTHS_PER_YEAR),
            new_monthly_tax: round_half_up(new.tax / MONTHS_PER_YEAR),
            new_marginal_rate: self.brackets.marginal_rate(new.taxable_income),
            new,
        })
    }
}

/// Tax as a fraction of income, to four decimal places.
fn effective_rate(
    tax: Decimal,
    income: Decimal,
) -> Decimal {
    if income.is_zero() {
        return Decimal::ZERO;
    }
    (tax / income).round_dp(4)
}
