//! Job model for invoice-engine.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::invoice::InvoiceType;

/// Job lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    InProcess,
    Closed,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::InProcess => "In_process",
            JobStatus::Closed => "Closed",
        }
    }

    pub fn from_string(s: &str) -> Self {
        match s {
            "Closed" => JobStatus::Closed,
            _ => JobStatus::InProcess,
        }
    }
}

/// Billing classification of a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingType {
    Service,
    Reimbursement,
    ServiceReimbursement,
    ServiceReimbursementSplit,
}

impl BillingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BillingType::Service => "Service",
            BillingType::Reimbursement => "Reimbursement",
            BillingType::ServiceReimbursement => "Service_Reimbursement",
            BillingType::ServiceReimbursementSplit => "Service_Reimbursement_Split",
        }
    }

    pub fn from_string(s: &str) -> Self {
        match s {
            "Reimbursement" => BillingType::Reimbursement,
            "Service_Reimbursement" => BillingType::ServiceReimbursement,
            "Service_Reimbursement_Split" => BillingType::ServiceReimbursementSplit,
            _ => BillingType::Service,
        }
    }

    /// Whether invoices of this classification bill service charges.
    pub fn has_service_portion(&self) -> bool {
        !matches!(self, BillingType::Reimbursement)
    }

    /// Whether invoices of this classification bill reimbursement charges.
    pub fn has_reimbursement_portion(&self) -> bool {
        !matches!(self, BillingType::Service)
    }
}

/// Job record as maintained by the job-register screens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub job_id: Uuid,
    pub job_number: String,
    pub status: JobStatus,
    pub billing_type: BillingType,
    /// Default settlement mode for invoices raised against this job.
    pub invoice_type: Option<InvoiceType>,
    pub client_id: Uuid,
    pub branch_id: Option<Uuid>,
    /// Job-register (job type) record supplying the SAC code and GST rates.
    pub register_id: Uuid,
    /// Baseline quantity used when no quantity field value is present.
    pub quantity: Option<Decimal>,
    pub created_utc: DateTime<Utc>,
}
