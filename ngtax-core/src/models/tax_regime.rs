use std::fmt;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// The two tax regimes the engine knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxRegime {
    /// 2025 rules: flat rate above a tax-free threshold.
    Old,
    /// 2026 rules: capped reliefs and a marginal bracket table.
    New,
}

impl TaxRegime {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Old => "old",
            Self::New => "new",
        }
    }

    /// Accepts the regime name or its year (`"old"`, `"2025"`, `"new"`, `"2026"`).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "old" | "2025" => Some(Self::Old),
            "new" | "2026" => Some(Self::New),
            _ => None,
        }
    }

    pub fn year(&self) -> i32 {
        match self {
            Self::Old => 2025,
            Self::New => 2026,
        }
    }
}

impl fmt::Display for TaxRegime {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{} ({})", self.as_str(), self.year())
    }
}

/// Fixed amounts and rates for both regimes.
///
/// Only the bracket table is loaded from configuration; everything here is
/// statutory and hard-coded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRules {
    /// Old regime: income up to this amount is tax-free.
    pub old_tax_free_threshold: Decimal,
    /// Old regime: flat rate on income above the threshold.
    pub old_flat_rate: Decimal,

    /// New regime: income at or below this amount pays no tax.
    pub new_exemption_threshold: Decimal,
    /// New regime: minimum taxable base after reliefs.
    pub taxable_floor: Decimal,

    /// Share of annual rent allowed as relief.
    pub rent_relief_rate: Decimal,
    pub rent_relief_cap: Decimal,
    pub pension_relief_cap: Decimal,
    pub insurance_relief_cap: Decimal,
}

impl Default for TaxRules {
    fn default() -> Self {
        Self {
            old_tax_free_threshold: dec!(300000),
            old_flat_rate: dec!(0.07),
            new_exemption_threshold: dec!(800000),
            taxable_floor: dec!(800000),
            rent_relief_rate: dec!(0.2),
            rent_relief_cap: dec!(500000),
            pension_relief_cap: dec!(200000),
            insurance_relief_cap: dec!(100000),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_accepts_names_and_years() {
        assert_eq!(TaxRegime::parse("old"), Some(TaxRegime::Old));
        assert_eq!(TaxRegime::parse("OLD"), Some(TaxRegime::Old));
        assert_eq!(TaxRegime::parse("2025"), Some(TaxRegime::Old));
        assert_eq!(TaxRegime::parse(" new "), Some(TaxRegime::New));
        assert_eq!(TaxRegime::parse("2026"), Some(TaxRegime::New));
        assert_eq!(TaxRegime::parse("2024"), None);
    }

    #[test]
    fn display_includes_year() {
        assert_eq!(TaxRegime::New.to_string(), "new (2026)");
        assert_eq!(TaxRegime::Old.to_string(), "old (2025)");
    }

    #[test]
    fn default_rules_match_statutory_amounts() {
        let rules = TaxRules::default();

        assert_eq!(rules.old_tax_free_threshold, dec!(300000));
        assert_eq!(rules.old_flat_rate, dec!(0.07));
        assert_eq!(rules.new_exemption_threshold, dec!(800000));
        assert_eq!(rules.taxable_floor, dec!(800000));
        assert_eq!(rules.rent_relief_cap, dec!(500000));
        assert_eq!(rules.pension_relief_cap, dec!(200000));
        assert_eq!(rules.insurance_relief_cap, dec!(100000));
    }
}
