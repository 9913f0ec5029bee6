use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{ReliefBreakdown, TaxRegime};

/// Outcome of a new-regime calculation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxResult {
    /// Annual tax due.
    pub tax: Decimal,
    pub rent_relief: Decimal,
    pub pension_relief: Decimal,
    pub insurance_relief: Decimal,
    /// Base the brackets were applied to.
    pub taxable_income: Decimal,
}

impl TaxResult {
    /// Result for incomes at or below the exemption threshold.
    pub fn exempt() -> Self {
        Self::default()
    }

    pub fn reliefs(&self) -> ReliefBreakdown {
        ReliefBreakdown {
            rent_relief: self.rent_relief,
            pension_relief: self.pension_relief,
            insurance_relief: self.insurance_relief,
        }
    }
}

/// One bracket's share of a bracket walk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketContribution {
    pub min: Decimal,
    pub max: Option<Decimal>,
    pub rate: Decimal,
    /// Portion of the taxable base falling inside this bracket.
    pub taxed_amount: Decimal,
    pub tax: Decimal,
}

/// Both regimes evaluated for the same income and reliefs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeComparison {
    pub income: Decimal,
    pub old_tax: Decimal,
    pub new: TaxResult,
    /// `new.tax - old_tax`; negative when the new regime is cheaper.
    pub difference: Decimal,
    pub cheaper: Option<TaxRegime>,
    /// Tax as a share of gross income (0 for zero income).
    pub old_effective_rate: Decimal,
    pub new_effective_rate: Decimal,
    pub old_monthly_tax: Decimal,
    pub new_monthly_tax: Decimal,
    /// Rate on the last naira of new-regime taxable income (0 when exempt).
    pub new_marginal_rate: Decimal,
}
