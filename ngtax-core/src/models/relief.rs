use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Raw relief amounts as entered by the taxpayer (annual naira).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReliefInputs {
    /// Annual rent paid.
    pub rent: Decimal,
    /// Pension contributions.
    pub pension: Decimal,
    /// Life insurance or annuity premiums.
    pub insurance: Decimal,
}

impl ReliefInputs {
    pub fn new(
        rent: Decimal,
        pension: Decimal,
        insurance: Decimal,
    ) -> Self {
        Self {
            rent,
            pension,
            insurance,
        }
    }
}

/// Reliefs after each cap has been applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReliefBreakdown {
    pub rent_relief: Decimal,
    pub pension_relief: Decimal,
    pub insurance_relief: Decimal,
}

impl ReliefBreakdown {
    pub fn total(&self) -> Decimal {
        self.rent_relief + self.pension_relief + self.insurance_relief
    }
}
