//! GST computation from a service subtotal and a job's classification.

use rust_decimal::Decimal;

use billing_core::utils::numeric::round_money;

use crate::models::{GstBreakdown, GstRate, GstType};

/// Apply GST to a service subtotal.
///
/// Displayed rates always come from the base SAC record; the
/// classification only selects which amounts are levied. An unset
/// classification levies CGST + SGST when either of those base rates is
/// positive and IGST otherwise (default policy inferred from the rate
/// table shape).
pub fn apply_gst(subtotal: Decimal, gst_type: Option<GstType>, rates: &GstRate) -> GstBreakdown {
    let mut breakdown = GstBreakdown {
        cgst_rate: rates.cgst,
        sgst_rate: rates.sgst,
        igst_rate: rates.igst,
        ..GstBreakdown::default()
    };

    match gst_type {
        Some(GstType::Sc) => {
            breakdown.cgst_amount = levy(subtotal, rates.cgst);
            breakdown.sgst_amount = levy(subtotal, rates.sgst);
        }
        Some(GstType::Igst) => {
            breakdown.igst_amount = levy(subtotal, rates.igst);
        }
        Some(GstType::Exempted) => {}
        None => {
            if rates.cgst > Decimal::ZERO || rates.sgst > Decimal::ZERO {
                breakdown.cgst_amount = levy(subtotal, rates.cgst);
                breakdown.sgst_amount = levy(subtotal, rates.sgst);
            } else {
                breakdown.igst_amount = levy(subtotal, rates.igst);
            }
        }
    }

    breakdown
}

fn levy(subtotal: Decimal, rate: Decimal) -> Decimal {
    round_money(subtotal * rate / Decimal::ONE_HUNDRED)
}
