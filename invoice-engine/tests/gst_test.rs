//! GST calculation tests for invoice-engine.

mod common;

use common::{dec, rate};
use invoice_engine::engine::gst::apply_gst;
use invoice_engine::models::GstType;
use rust_decimal::Decimal;

#[test]
fn sc_levies_cgst_and_sgst_only() {
    let breakdown = apply_gst(dec("1000"), Some(GstType::Sc), &rate("9", "9", "18"));

    assert_eq!(breakdown.cgst_amount, dec("90.00"));
    assert_eq!(breakdown.sgst_amount, dec("90.00"));
    assert_eq!(breakdown.igst_amount, Decimal::ZERO);
    assert_eq!(breakdown.total(), dec("180"));
}

#[test]
fn igst_levies_igst_only() {
    let breakdown = apply_gst(dec("1000"), Some(GstType::Igst), &rate("9", "9", "18"));

    assert_eq!(breakdown.igst_amount, dec("180.00"));
    assert_eq!(breakdown.cgst_amount, Decimal::ZERO);
    assert_eq!(breakdown.sgst_amount, Decimal::ZERO);
}

#[test]
fn exempted_levies_nothing_regardless_of_rates() {
    let breakdown = apply_gst(dec("1000"), Some(GstType::Exempted), &rate("9", "9", "18"));

    assert_eq!(breakdown.cgst_amount, Decimal::ZERO);
    assert_eq!(breakdown.sgst_amount, Decimal::ZERO);
    assert_eq!(breakdown.igst_amount, Decimal::ZERO);
}

#[test]
fn rates_are_always_displayed_from_the_sac_record() {
    let breakdown = apply_gst(dec("1000"), Some(GstType::Exempted), &rate("9", "9", "18"));

    assert_eq!(breakdown.cgst_rate, dec("9"));
    assert_eq!(breakdown.sgst_rate, dec("9"));
    assert_eq!(breakdown.igst_rate, dec("18"));
}

#[test]
fn unset_type_defaults_to_intra_state_when_those_rates_exist() {
    let breakdown = apply_gst(dec("1000"), None, &rate("9", "9", "18"));

    assert_eq!(breakdown.cgst_amount, dec("90"));
    assert_eq!(breakdown.sgst_amount, dec("90"));
    assert_eq!(breakdown.igst_amount, Decimal::ZERO);
}

#[test]
fn unset_type_falls_back_to_igst_when_only_igst_rated() {
    let breakdown = apply_gst(dec("1000"), None, &rate("0", "0", "18"));

    assert_eq!(breakdown.cgst_amount, Decimal::ZERO);
    assert_eq!(breakdown.sgst_amount, Decimal::ZERO);
    assert_eq!(breakdown.igst_amount, dec("180"));
}

#[test]
fn amounts_round_to_two_decimals() {
    let breakdown = apply_gst(dec("333.33"), Some(GstType::Sc), &rate("9", "9", "18"));

    // 333.33 * 9% = 29.9997 rounds to 30.00
    assert_eq!(breakdown.cgst_amount, dec("30.00"));
    assert_eq!(breakdown.sgst_amount, dec("30.00"));
}

#[test]
fn zero_subtotal_levies_zero() {
    let breakdown = apply_gst(Decimal::ZERO, Some(GstType::Sc), &rate("9", "9", "18"));

    assert_eq!(breakdown.total(), Decimal::ZERO);
}
