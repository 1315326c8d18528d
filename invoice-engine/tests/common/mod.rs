//! Test helper module for invoice-engine integration tests.
//!
//! Provides fixture builders for jobs, service charges, field values,
//! and snapshots.

#![allow(dead_code)]

use chrono::Utc;
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use std::collections::HashMap;
use uuid::Uuid;

use billing_core::observability::init_tracing;
use invoice_engine::models::{
    BillingType, ChargeAmounts, GstBreakdown, GstRate, Invoice, InvoiceStatus, InvoiceType, Job,
    JobFieldValue, JobServiceCharge, JobStatus,
};
use invoice_engine::snapshot::BillingSnapshot;

static TRACING: Lazy<()> = Lazy::new(|| init_tracing("invoice-engine-tests", "debug"));

/// Initialize logging once per test binary.
pub fn init() {
    Lazy::force(&TRACING);
}

/// Parse a decimal literal.
pub fn dec(value: &str) -> Decimal {
    value.parse().expect("invalid decimal literal")
}

/// A job with sensible defaults.
pub fn job(job_number: &str) -> Job {
    Job {
        job_id: Uuid::new_v4(),
        job_number: job_number.to_string(),
        status: JobStatus::InProcess,
        billing_type: BillingType::ServiceReimbursement,
        invoice_type: None,
        client_id: Uuid::new_v4(),
        branch_id: None,
        register_id: Uuid::new_v4(),
        quantity: None,
        created_utc: Utc::now(),
    }
}

/// An all-zero active service charge row for a job.
pub fn charge(job: &Job) -> JobServiceCharge {
    let mut charge = JobServiceCharge::empty(job.job_id);
    charge.charge_id = Uuid::new_v4();
    charge
}

pub fn field(job: &Job, name: &str, value: &str) -> JobFieldValue {
    JobFieldValue {
        job_id: job.job_id,
        field_name: name.to_string(),
        value: value.to_string(),
    }
}

pub fn rate(cgst: &str, sgst: &str, igst: &str) -> GstRate {
    GstRate {
        sac_code: "998599".to_string(),
        cgst: dec(cgst),
        sgst: dec(sgst),
        igst: dec(igst),
    }
}

/// Snapshot over the given rows, with one GST rate shared by every
/// job's register when supplied.
pub fn snapshot(
    jobs: &[&Job],
    charges: &[&JobServiceCharge],
    fields: &[JobFieldValue],
    priors: &[Invoice],
    gst: Option<GstRate>,
) -> BillingSnapshot {
    let mut rates = HashMap::new();
    if let Some(gst) = gst {
        for job in jobs {
            rates.insert(job.register_id, gst.clone());
        }
    }
    BillingSnapshot::new(
        jobs.iter().map(|job| (*job).clone()).collect(),
        charges.iter().map(|charge| (*charge).clone()).collect(),
        fields.to_vec(),
        rates,
        priors.to_vec(),
    )
}

/// A prior active invoice covering the given jobs with the given stored
/// bucket amounts.
pub fn prior_invoice(
    billing_type: BillingType,
    job_ids: Vec<Uuid>,
    charges: ChargeAmounts,
) -> Invoice {
    Invoice {
        invoice_id: Uuid::new_v4(),
        invoice_number: None,
        billing_type,
        invoice_type: InvoiceType::Partial,
        status: InvoiceStatus::Active,
        client_id: Uuid::new_v4(),
        issue_date: None,
        charges,
        reward_amount: Decimal::ZERO,
        discount_amount: Decimal::ZERO,
        gst: GstBreakdown::default(),
        final_amount: Decimal::ZERO,
        job_ids,
        metadata: None,
        created_utc: Utc::now(),
    }
}
