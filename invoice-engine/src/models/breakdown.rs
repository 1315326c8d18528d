//! Computed invoice breakdown, the engine's output contract.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::bucket::ChargeAmounts;

/// GST rates and amounts for one invoice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GstBreakdown {
    pub cgst_rate: Decimal,
    pub sgst_rate: Decimal,
    pub igst_rate: Decimal,
    pub cgst_amount: Decimal,
    pub sgst_amount: Decimal,
    pub igst_amount: Decimal,
}

impl GstBreakdown {
    /// Total tax across all three components.
    pub fn total(&self) -> Decimal {
        self.cgst_amount + self.sgst_amount + self.igst_amount
    }
}

/// A populated reimbursement charge line in a breakdown.
///
/// The description is the first one found at the slot across the
/// selection; the charge is the slot total over every selected job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemiField {
    pub slot: usize,
    pub description: String,
    pub charges: Decimal,
}

/// Consolidated breakdown across the selected jobs.
///
/// Consumed both for on-screen preview and, through
/// [`super::Invoice::from_breakdown`], for the persisted invoice record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvoiceBreakdown {
    #[serde(flatten)]
    pub charges: ChargeAmounts,
    pub ca_cert_count: Decimal,
    pub ce_cert_count: Decimal,
    /// First non-zero per-unit rate across the selection, for display.
    pub per_shb: Decimal,
    pub remi_fields: Vec<RemiField>,
    pub gst: GstBreakdown,
    pub reward_amount: Decimal,
    pub discount_amount: Decimal,
    /// Taxable base: service buckets plus reward minus discount.
    pub service_subtotal: Decimal,
    pub final_amount: Decimal,
    /// Whether pay amounts replaced full bucket totals.
    pub partial: bool,
}
