//! Invoice documents and the write boundary for persisting breakdowns.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

use billing_core::utils::numeric::round_money;

use super::breakdown::{GstBreakdown, InvoiceBreakdown};
use super::bucket::{ChargeAmounts, ChargeBucket};
use super::job::BillingType;

/// Invoice settlement mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceType {
    Full,
    Partial,
}

impl InvoiceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceType::Full => "Full",
            InvoiceType::Partial => "Partial",
        }
    }

    pub fn from_string(s: &str) -> Self {
        match s {
            "Partial" => InvoiceType::Partial,
            _ => InvoiceType::Full,
        }
    }
}

/// Invoice lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Active,
    Canceled,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Active => "Active",
            InvoiceStatus::Canceled => "Canceled",
        }
    }

    pub fn from_string(s: &str) -> Self {
        match s {
            "Canceled" => InvoiceStatus::Canceled,
            _ => InvoiceStatus::Active,
        }
    }
}

/// Persisted invoice document.
///
/// Carries the per-bucket amounts actually billed, post partial-ledger
/// resolution; the settlement ledger reads these back as opening amounts
/// on the next partial invoice over the same jobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub invoice_id: Uuid,
    pub invoice_number: Option<String>,
    pub billing_type: BillingType,
    pub invoice_type: InvoiceType,
    pub status: InvoiceStatus,
    pub client_id: Uuid,
    pub issue_date: Option<NaiveDate>,
    pub charges: ChargeAmounts,
    pub reward_amount: Decimal,
    pub discount_amount: Decimal,
    pub gst: GstBreakdown,
    pub final_amount: Decimal,
    /// Jobs covered by this invoice.
    pub job_ids: Vec<Uuid>,
    pub metadata: Option<serde_json::Value>,
    pub created_utc: DateTime<Utc>,
}

/// Input for persisting an invoice from a computed breakdown.
#[derive(Debug, Clone)]
pub struct CreateInvoice {
    pub billing_type: BillingType,
    pub invoice_type: InvoiceType,
    pub client_id: Uuid,
    pub invoice_number: Option<String>,
    pub issue_date: Option<NaiveDate>,
    pub job_ids: Vec<Uuid>,
    pub metadata: Option<serde_json::Value>,
}

impl Invoice {
    /// Build a persistable invoice from a computed breakdown, carrying
    /// only the fields relevant to the billing type.
    ///
    /// Service billing zeroes the reimbursement buckets; reimbursement
    /// billing zeroes the service buckets, tax, reward, and discount;
    /// combined billing keeps everything. The final amount is recomputed
    /// from the fields that survive.
    pub fn from_breakdown(input: CreateInvoice, breakdown: &InvoiceBreakdown) -> Self {
        let mut charges = breakdown.charges.clone();
        let mut gst = breakdown.gst.clone();
        let mut reward_amount = breakdown.reward_amount;
        let mut discount_amount = breakdown.discount_amount;

        if !input.billing_type.has_reimbursement_portion() {
            for bucket in ChargeBucket::all().filter(|bucket| !bucket.is_service()) {
                charges.set(bucket, Decimal::ZERO);
            }
        }

        if !input.billing_type.has_service_portion() {
            for bucket in ChargeBucket::all().filter(ChargeBucket::is_service) {
                charges.set(bucket, Decimal::ZERO);
            }
            gst.cgst_amount = Decimal::ZERO;
            gst.sgst_amount = Decimal::ZERO;
            gst.igst_amount = Decimal::ZERO;
            reward_amount = Decimal::ZERO;
            discount_amount = Decimal::ZERO;
        }

        let service_subtotal = charges.service_portion() + reward_amount - discount_amount;
        let final_amount =
            round_money(service_subtotal + gst.total() + charges.reimbursement_portion());

        Self {
            invoice_id: Uuid::new_v4(),
            invoice_number: input.invoice_number,
            billing_type: input.billing_type,
            invoice_type: input.invoice_type,
            status: InvoiceStatus::Active,
            client_id: input.client_id,
            issue_date: input.issue_date,
            charges,
            reward_amount,
            discount_amount,
            gst,
            final_amount,
            job_ids: input.job_ids,
            metadata: input.metadata,
            created_utc: Utc::now(),
        }
    }

    /// Whether this invoice intersects the given job selection.
    pub fn covers_any(&self, selection: &HashSet<Uuid>) -> bool {
        self.job_ids.iter().any(|id| selection.contains(id))
    }
}

/// Job ids covered by an active invoice of the given billing type.
///
/// Backs the selection rule that a job may not appear on two active
/// invoices of the same billing type at once: jobs in this set are
/// excluded before selection.
pub fn covered_job_ids(invoices: &[Invoice], billing_type: BillingType) -> HashSet<Uuid> {
    invoices
        .iter()
        .filter(|invoice| {
            invoice.status == InvoiceStatus::Active && invoice.billing_type == billing_type
        })
        .flat_map(|invoice| invoice.job_ids.iter().copied())
        .collect()
}
