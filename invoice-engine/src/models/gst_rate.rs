//! GST rate master keyed by SAC code.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Base GST percentages for one SAC code.
///
/// A job-register references one of these; the rates are always displayed
/// on the invoice even when the classification zeroes some amounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GstRate {
    pub sac_code: String,
    pub cgst: Decimal,
    pub sgst: Decimal,
    pub igst: Decimal,
}

impl GstRate {
    /// Rate record with every component at zero, used when a job-register
    /// has no GST rate configured.
    pub fn zero(sac_code: impl Into<String>) -> Self {
        Self {
            sac_code: sac_code.into(),
            cgst: Decimal::ZERO,
            sgst: Decimal::ZERO,
            igst: Decimal::ZERO,
        }
    }
}
