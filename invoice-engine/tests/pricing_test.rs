//! Pricing formula tests for invoice-engine.

mod common;

use common::{charge, dec, job};
use invoice_engine::engine::pricing::{price_job, Formula, FormulaKey};
use invoice_engine::engine::resolver::ResolvedJobFields;
use rust_decimal::Decimal;

fn claim(amount: &str) -> ResolvedJobFields {
    ResolvedJobFields {
        claim_amount: dec(amount),
        ..ResolvedJobFields::default()
    }
}

#[test]
fn fixed_only_bills_fixed() {
    let job = job("J-1");
    let mut row = charge(&job);
    row.fixed = dec("500");

    let price = price_job(&job, &row, &claim("8000"));
    assert_eq!(price.amount, dec("500"));
}

#[test]
fn percentage_only_bills_percentage_of_claim() {
    let job = job("J-1");
    let mut row = charge(&job);
    row.in_percentage = dec("10");

    let price = price_job(&job, &row, &claim("8000"));
    assert_eq!(price.amount, dec("800"));
    assert_eq!(price.percentage_amount, dec("800"));
}

#[test]
fn percentage_with_floor_applies_minimum() {
    let job = job("J-1");
    let mut row = charge(&job);
    row.in_percentage = dec("10");
    row.min = dec("1000");

    let price = price_job(&job, &row, &claim("8000"));
    assert_eq!(price.amount, dec("1000"));

    row.min = dec("100");
    let price = price_job(&job, &row, &claim("8000"));
    assert_eq!(price.amount, dec("800"));
}

#[test]
fn percentage_with_cap_applies_maximum() {
    let job = job("J-1");
    let mut row = charge(&job);
    row.in_percentage = dec("10");
    row.max = dec("500");

    let price = price_job(&job, &row, &claim("8000"));
    assert_eq!(price.amount, dec("500"));
}

#[test]
fn percentage_clamped_between_min_and_max() {
    let job = job("J-1");
    let mut row = charge(&job);
    row.in_percentage = dec("10");
    row.min = dec("100");
    row.max = dec("1000");

    assert_eq!(price_job(&job, &row, &claim("8000")).amount, dec("800"));
    assert_eq!(price_job(&job, &row, &claim("500")).amount, dec("100"));
    assert_eq!(price_job(&job, &row, &claim("50000")).amount, dec("1000"));
}

#[test]
fn per_unit_only_bills_quantity_times_rate() {
    let job = job("J-1");
    let mut row = charge(&job);
    row.per_shb = dec("25");

    let fields = ResolvedJobFields {
        quantity: Some(dec("4")),
        ..ResolvedJobFields::default()
    };
    let price = price_job(&job, &row, &fields);
    assert_eq!(price.amount, dec("100"));
    assert_eq!(price.quantity, dec("4"));
}

#[test]
fn quantity_falls_back_to_job_baseline_then_zero() {
    let mut job = job("J-1");
    job.quantity = Some(dec("6"));
    let mut row = charge(&job);
    row.per_shb = dec("25");

    let price = price_job(&job, &row, &ResolvedJobFields::default());
    assert_eq!(price.amount, dec("150"));

    job.quantity = None;
    let price = price_job(&job, &row, &ResolvedJobFields::default());
    assert_eq!(price.amount, Decimal::ZERO);
}

#[test]
fn fixed_plus_percentage_adds_both() {
    let job = job("J-1");
    let mut row = charge(&job);
    row.fixed = dec("500");
    row.in_percentage = dec("10");

    assert_eq!(price_job(&job, &row, &claim("8000")).amount, dec("1300"));
}

#[test]
fn fixed_plus_percentage_with_floor() {
    let job = job("J-1");
    let mut row = charge(&job);
    row.fixed = dec("500");
    row.in_percentage = dec("10");
    row.min = dec("1000");

    assert_eq!(price_job(&job, &row, &claim("8000")).amount, dec("1500"));
}

#[test]
fn fixed_plus_percentage_with_cap() {
    let job = job("J-1");
    let mut row = charge(&job);
    row.fixed = dec("500");
    row.in_percentage = dec("10");
    row.max = dec("600");

    assert_eq!(price_job(&job, &row, &claim("8000")).amount, dec("1100"));
}

#[test]
fn fixed_plus_percentage_clamped_matches_worked_scenario() {
    // fixed=500, 10% of claim 8000 = 800, clamp(800, 100, 1000) = 800.
    let job = job("J-1");
    let mut row = charge(&job);
    row.fixed = dec("500");
    row.in_percentage = dec("10");
    row.min = dec("100");
    row.max = dec("1000");

    let price = price_job(&job, &row, &claim("8000"));
    assert_eq!(price.percentage_amount, dec("800"));
    assert_eq!(price.amount, dec("1300.00"));
}

#[test]
fn percentage_and_per_unit_takes_greater_without_flag() {
    let job = job("J-1");
    let mut row = charge(&job);
    row.in_percentage = dec("10");
    row.per_shb = dec("25");

    let fields = ResolvedJobFields {
        claim_amount: dec("8000"),
        quantity: Some(dec("4")),
        ..ResolvedJobFields::default()
    };
    assert_eq!(price_job(&job, &row, &fields).amount, dec("800"));

    row.percentage_per_shb = true;
    assert_eq!(price_job(&job, &row, &fields).amount, dec("900"));
}

#[test]
fn fixed_percentage_and_per_unit_takes_greater_without_flag() {
    let job = job("J-1");
    let mut row = charge(&job);
    row.fixed = dec("500");
    row.in_percentage = dec("10");
    row.per_shb = dec("25");

    let fields = ResolvedJobFields {
        claim_amount: dec("8000"),
        quantity: Some(dec("4")),
        ..ResolvedJobFields::default()
    };
    assert_eq!(price_job(&job, &row, &fields).amount, dec("1300"));

    row.fixed_percentage_per_shb = true;
    assert_eq!(price_job(&job, &row, &fields).amount, dec("1400"));
}

#[test]
fn undefined_combination_falls_back_to_fixed() {
    let job = job("J-1");

    // min without a percentage is not a defined combination
    let mut row = charge(&job);
    row.min = dec("1000");
    assert_eq!(price_job(&job, &row, &claim("8000")).amount, Decimal::ZERO);

    // fixed + per-unit without a percentage falls back to fixed
    let mut row = charge(&job);
    row.fixed = dec("500");
    row.per_shb = dec("25");
    let fields = ResolvedJobFields {
        quantity: Some(dec("4")),
        ..ResolvedJobFields::default()
    };
    assert_eq!(price_job(&job, &row, &fields).amount, dec("500"));
}

#[test]
fn formula_selection_is_explicit_about_fallback() {
    let key = FormulaKey {
        has_fixed: true,
        has_percentage: false,
        has_min: true,
        has_max: true,
        has_per_shb: true,
    };
    assert_eq!(Formula::select(key), Formula::Fallback);
}

#[test]
fn amounts_round_to_two_decimals() {
    let job = job("J-1");
    let mut row = charge(&job);
    row.in_percentage = dec("10");

    // 10% of 1000.555 = 100.0555, rounds half away from zero
    let price = price_job(&job, &row, &claim("1000.555"));
    assert_eq!(price.amount, dec("100.06"));
}

#[test]
fn zero_configuration_prices_to_zero() {
    let job = job("J-1");
    let row = charge(&job);
    let price = price_job(&job, &row, &claim("8000"));
    assert_eq!(price.amount, Decimal::ZERO);
    assert!(price.amount >= Decimal::ZERO);
}
