//! Plain-text rendering of calculation results.

use std::fmt::Write;

use ngtax_core::calculations::common::round_half_up;
use ngtax_core::{BracketContribution, BracketTable, RegimeComparison, TaxRegime};
use rust_decimal::Decimal;
use serde::Serialize;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;
const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// Everything `calculate` prints, in a form that also serializes to JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalculationReport {
    pub comparison: RegimeComparison,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<Vec<BracketContribution>>,
}

/// Result of `calculate --regime`: the tax under one regime only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegimeReport {
    pub regime: TaxRegime,
    pub year: i32,
    pub income: Decimal,
    pub tax: Decimal,
    pub monthly_tax: Decimal,
}

impl RegimeReport {
    pub fn new(
        regime: TaxRegime,
        income: Decimal,
        tax: Decimal,
    ) -> Self {
        Self {
            regime,
            year: regime.year(),
            income,
            tax,
            monthly_tax: round_half_up(tax / MONTHS_PER_YEAR),
        }
    }
}

/// Formats an amount as naira with thousands separators, e.g. `₦1,234,567.50`.
pub fn format_naira(amount: Decimal) -> String {
    let rounded = round_half_up(amount);
    let digits = format!("{:.2}", rounded.abs());
    let (whole, frac) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}₦{grouped}.{frac}")
}

/// Formats a fractional rate as a percentage, e.g. `0.075` as `7.5%`.
pub fn format_rate(rate: Decimal) -> String {
    format!("{}%", (rate * HUNDRED).normalize())
}

fn label(regime: TaxRegime) -> String {
    format!("{} regime ({})", capitalize(regime.as_str()), regime.year())
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Side-by-side summary of both regimes, plus the bracket breakdown when
/// one was requested.
pub fn render_calculation(report: &CalculationReport) -> String {
    let c = &report.comparison;
    let mut out = String::new();

    let _ = writeln!(out, "Gross income:        {}", format_naira(c.income));
    let _ = writeln!(out);

    let _ = writeln!(out, "{}", label(TaxRegime::Old));
    let _ = writeln!(out, "  Annual tax:        {}", format_naira(c.old_tax));
    let _ = writeln!(out, "  Monthly tax:       {}", format_naira(c.old_monthly_tax));
    let _ = writeln!(out, "  Effective rate:    {}", format_rate(c.old_effective_rate));
    let _ = writeln!(out);

    let _ = writeln!(out, "{}", label(TaxRegime::New));
    let _ = writeln!(out, "  Rent relief:       {}", format_naira(c.new.rent_relief));
    let _ = writeln!(out, "  Pension relief:    {}", format_naira(c.new.pension_relief));
    let _ = writeln!(out, "  Insurance relief:  {}", format_naira(c.new.insurance_relief));
    let _ = writeln!(out, "  Taxable income:    {}", format_naira(c.new.taxable_income));
    let _ = writeln!(out, "  Annual tax:        {}", format_naira(c.new.tax));
    let _ = writeln!(out, "  Monthly tax:       {}", format_naira(c.new_monthly_tax));
    let _ = writeln!(out, "  Effective rate:    {}", format_rate(c.new_effective_rate));
    let _ = writeln!(out, "  Marginal rate:     {}", format_rate(c.new_marginal_rate));
    let _ = writeln!(out);

    match c.cheaper {
        Some(regime) => {
            let _ = writeln!(
                out,
                "The {} is cheaper by {}.",
                label(regime).to_lowercase(),
                format_naira(c.difference.abs())
            );
        }
        None => {
            let _ = writeln!(out, "Both regimes give the same tax.");
        }
    }

    if let Some(rows) = &report.breakdown {
        let _ = writeln!(out);
        out.push_str(&render_breakdown(rows));
    }

    out
}

/// Summary for a single regime.
pub fn render_regime(report: &RegimeReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Gross income:        {}", format_naira(report.income));
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", label(report.regime));
    let _ = writeln!(out, "  Annual tax:        {}", format_naira(report.tax));
    let _ = writeln!(out, "  Monthly tax:       {}", format_naira(report.monthly_tax));
    out
}

/// Per-bracket contributions of a new-regime bracket walk.
pub fn render_breakdown(rows: &[BracketContribution]) -> String {
    let mut out = String::from("Bracket breakdown\n");
    if rows.is_empty() {
        out.push_str("  (income is exempt; no brackets applied)\n");
        return out;
    }
    for row in rows {
        let _ = writeln!(
            out,
            "  {:<32} {:>6}  on {:>18}  = {:>16}",
            range(row.min, row.max),
            format_rate(row.rate),
            format_naira(row.taxed_amount),
            format_naira(row.tax)
        );
    }
    out
}

/// The active bracket table, one line per bracket.
pub fn render_brackets(table: &BracketTable) -> String {
    let mut out = String::new();
    for bracket in table.iter() {
        let _ = writeln!(
            out,
            "{:<32} {:>6}",
            range(bracket.min, bracket.max),
            format_rate(bracket.rate)
        );
    }
    out
}

fn range(
    min: Decimal,
    max: Option<Decimal>,
) -> String {
    match max {
        Some(max) => format!("{} - {}", format_naira(min), format_naira(max)),
        None => format!("above {}", format_naira(min)),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // format_naira tests
    // =========================================================================

    #[test]
    fn format_naira_groups_thousands() {
        assert_eq!(format_naira(dec!(1536000)), "₦1,536,000.00");
        assert_eq!(format_naira(dec!(120000)), "₦120,000.00");
        assert_eq!(format_naira(dec!(999)), "₦999.00");
    }

    #[test]
    fn format_naira_zero_and_small() {
        assert_eq!(format_naira(dec!(0)), "₦0.00");
        assert_eq!(format_naira(dec!(0.5)), "₦0.50");
    }

    #[test]
    fn format_naira_rounds_to_kobo() {
        assert_eq!(format_naira(dec!(1234.565)), "₦1,234.57");
    }

    #[test]
    fn format_naira_negative() {
        assert_eq!(format_naira(dec!(-1000)), "-₦1,000.00");
    }

    // =========================================================================
    // format_rate tests
    // =========================================================================

    #[test]
    fn format_rate_as_percentage() {
        assert_eq!(format_rate(dec!(0.15)), "15%");
        assert_eq!(format_rate(dec!(0.075)), "7.5%");
        assert_eq!(format_rate(dec!(0)), "0%");
    }

    // =========================================================================
    // table rendering tests
    // =========================================================================

    #[test]
    fn regime_report_rounds_monthly_tax_only() {
        let report = RegimeReport::new(TaxRegime::Old, dec!(1234567.891), dec!(65419.75237));

        assert_eq!(report.tax, dec!(65419.75237));
        assert_eq!(report.monthly_tax, dec!(5451.65));
        assert_eq!(report.year, 2025);

        let text = render_regime(&report);
        assert!(text.contains("Old regime (2025)"), "got: {text}");
        assert!(text.contains("Annual tax:        ₦65,419.75"), "got: {text}");
        assert!(text.contains("Monthly tax:       ₦5,451.65"), "got: {text}");
    }

    #[test]
    fn render_breakdown_reports_exempt_income() {
        assert!(render_breakdown(&[]).contains("exempt"));
    }

    #[test]
    fn render_breakdown_lists_each_row() {
        let rows = vec![BracketContribution {
            min: dec!(800000),
            max: Some(dec!(3000000)),
            rate: dec!(0.15),
            taxed_amount: dec!(800000),
            tax: dec!(120000),
        }];

        let text = render_breakdown(&rows);

        assert!(text.contains("₦800,000.00 - ₦3,000,000.00"), "got: {text}");
        assert!(text.contains("15%"), "got: {text}");
        assert!(text.contains("₦120,000.00"), "got: {text}");
    }
}
