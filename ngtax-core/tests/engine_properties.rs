//! End-to-end checks of the public engine API against the 2026 bracket table.

use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use ngtax_core::calculations::{compute_new_regime_tax, compute_old_regime_tax};
use ngtax_core::{BracketTable, ReliefInputs, TaxBracket, TaxEngine, TaxResult};

fn brackets_2026() -> Vec<TaxBracket> {
    let rows = [
        (dec!(0), Some(dec!(800000)), dec!(0)),
        (dec!(800000), Some(dec!(3000000)), dec!(0.15)),
        (dec!(3000000), Some(dec!(12000000)), dec!(0.18)),
        (dec!(12000000), Some(dec!(25000000)), dec!(0.21)),
        (dec!(25000000), Some(dec!(50000000)), dec!(0.23)),
        (dec!(50000000), None, dec!(0.25)),
    ];
    rows.into_iter()
        .map(|(min, max, rate)| TaxBracket { min, max, rate })
        .collect()
}

fn incomes() -> impl Iterator<Item = Decimal> {
    (0..=200).map(|step| Decimal::from(step) * dec!(50000))
}

fn fractional_incomes() -> [Decimal; 6] {
    [
        dec!(299999.999),
        dec!(300000.05),
        dec!(800000.01),
        dec!(1234567.891),
        dec!(3000000.005),
        dec!(61234567.8912),
    ]
}

/// Marginal sum over the 2026 table, written out bracket by bracket.
fn reference_walk(taxable: Decimal) -> Decimal {
    brackets_2026()
        .iter()
        .map(|b| {
            let top = b.max.map_or(taxable, |max| taxable.min(max));
            (top - b.min).max(Decimal::ZERO) * b.rate
        })
        .sum()
}

#[test]
fn old_regime_is_zero_up_to_threshold() {
    for income in incomes().filter(|i| *i <= dec!(300000)) {
        assert_eq!(compute_old_regime_tax(income).unwrap(), Decimal::ZERO);
    }
}

#[test]
fn old_regime_is_flat_above_threshold() {
    for income in incomes().filter(|i| *i > dec!(300000)) {
        assert_eq!(
            compute_old_regime_tax(income).unwrap(),
            (income - dec!(300000)) * dec!(0.07)
        );
    }
}

#[test]
fn new_regime_is_zero_up_to_exemption() {
    let brackets = brackets_2026();
    let reliefs = ReliefInputs::new(dec!(3000000), dec!(300000), dec!(200000));

    for income in incomes().filter(|i| *i <= dec!(800000)) {
        let result = compute_new_regime_tax(income, &reliefs, &brackets).unwrap();
        assert_eq!(result.tax, Decimal::ZERO, "income {income}");
    }
}

#[test]
fn taxable_income_invariant_holds_above_exemption() {
    let table = BracketTable::new(brackets_2026()).unwrap();
    let engine = TaxEngine::new(&table);
    let reliefs = ReliefInputs::new(dec!(1800000), dec!(150000), dec!(60000));

    for income in incomes().filter(|i| *i > dec!(800000)) {
        let result = engine.compute_new_regime_tax(income, &reliefs).unwrap();
        let expected = (income
            - result.rent_relief
            - result.pension_relief
            - result.insurance_relief)
            .max(dec!(800000));

        assert_eq!(result.taxable_income, expected, "income {income}");
    }
}

#[test]
fn new_regime_tax_is_monotonic_in_income() {
    let table = BracketTable::new(brackets_2026()).unwrap();
    let engine = TaxEngine::new(&table);
    let reliefs = ReliefInputs::default();
    let mut previous = Decimal::ZERO;

    for income in incomes() {
        let tax = engine.compute_new_regime_tax(income, &reliefs).unwrap().tax;
        assert!(tax >= previous, "tax fell at income {income}");
        previous = tax;
    }
}

#[test]
fn boundary_income_pays_nothing() {
    let result =
        compute_new_regime_tax(dec!(800000), &ReliefInputs::default(), &brackets_2026()).unwrap();

    assert_eq!(result, TaxResult::exempt());
}

#[test]
fn rent_relief_scenario() {
    let reliefs = ReliefInputs::new(dec!(2000000), dec!(0), dec!(0));

    let result = compute_new_regime_tax(dec!(2000000), &reliefs, &brackets_2026()).unwrap();

    assert_eq!(result.rent_relief, dec!(400000));
    assert_eq!(result.taxable_income, dec!(1600000));
    assert_eq!(result.tax, dec!(120000));
}

#[test]
fn capped_reliefs_scenario() {
    let reliefs = ReliefInputs::new(dec!(0), dec!(250000), dec!(150000));

    let result = compute_new_regime_tax(dec!(10000000), &reliefs, &brackets_2026()).unwrap();

    assert_eq!(result.pension_relief, dec!(200000));
    assert_eq!(result.insurance_relief, dec!(100000));
    assert_eq!(result.taxable_income, dec!(9700000));
    assert_eq!(result.tax, dec!(1536000));
}

#[test]
fn repeated_runs_are_bit_identical() {
    let table = BracketTable::new(brackets_2026()).unwrap();
    let engine = TaxEngine::new(&table);
    let reliefs = ReliefInputs::new(dec!(987654.32), dec!(123456.78), dec!(54321.09));

    let runs: Vec<_> = (0..5)
        .map(|_| engine.compare(dec!(33333333.33), &reliefs).unwrap())
        .collect();

    for run in &runs[1..] {
        assert_eq!(run, &runs[0]);
        assert_eq!(run.new.tax.serialize(), runs[0].new.tax.serialize());
        assert_eq!(run.old_tax.serialize(), runs[0].old_tax.serialize());
    }
}

// =============================================================================
// fractional amounts
// =============================================================================

#[test]
fn old_regime_is_exact_for_fractional_income() {
    for income in fractional_incomes() {
        let expected = if income > dec!(300000) {
            (income - dec!(300000)) * dec!(0.07)
        } else {
            Decimal::ZERO
        };

        assert_eq!(compute_old_regime_tax(income).unwrap(), expected, "income {income}");
    }
    assert_eq!(compute_old_regime_tax(dec!(300000.05)).unwrap(), dec!(0.0035));
}

#[test]
fn rent_relief_is_exact_for_fractional_rent() {
    let brackets = brackets_2026();

    for rent in [dec!(0.03), dec!(0.01), dec!(1234.567), dec!(2499999.995), dec!(2500000.01)] {
        let reliefs = ReliefInputs::new(rent, dec!(0), dec!(0));
        let result = compute_new_regime_tax(dec!(1234567.891), &reliefs, &brackets).unwrap();

        assert_eq!(
            result.rent_relief,
            (rent * dec!(0.2)).min(dec!(500000)),
            "rent {rent}"
        );
    }
}

#[test]
fn new_regime_is_exact_for_fractional_inputs() {
    let table = BracketTable::new(brackets_2026()).unwrap();
    let engine = TaxEngine::new(&table);
    let reliefs = ReliefInputs::new(dec!(0.03), dec!(150000.125), dec!(99999.999));

    for income in fractional_incomes().into_iter().filter(|i| *i > dec!(800000)) {
        let result = engine.compute_new_regime_tax(income, &reliefs).unwrap();
        let expected_taxable =
            (income - dec!(0.006) - dec!(150000.125) - dec!(99999.999)).max(dec!(800000));

        assert_eq!(result.taxable_income, expected_taxable, "income {income}");
        assert_eq!(result.tax, reference_walk(expected_taxable), "income {income}");
    }
}
