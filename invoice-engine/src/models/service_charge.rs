//! Per-job service charge configuration.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// GST classification tag on a service charge row.
///
/// Selects which tax components are levied; the rates themselves always
/// come from the job-register's SAC record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GstType {
    /// Intra-state supply: CGST + SGST.
    #[serde(rename = "SC")]
    Sc,
    /// Inter-state supply: IGST.
    #[serde(rename = "I")]
    Igst,
    /// GST-exempt supply: no tax regardless of rates.
    #[serde(rename = "EXEMPTED")]
    Exempted,
}

impl GstType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GstType::Sc => "SC",
            GstType::Igst => "I",
            GstType::Exempted => "EXEMPTED",
        }
    }

    /// Parse the stored tag; anything unrecognized is treated as unset.
    pub fn from_string(s: &str) -> Option<Self> {
        match s {
            "SC" => Some(GstType::Sc),
            "I" => Some(GstType::Igst),
            "EXEMPTED" => Some(GstType::Exempted),
            _ => None,
        }
    }
}

/// One configurable reimbursement charge line on a service charge row.
///
/// Slots are positional: cross-job aggregation matches by slot index,
/// not by description text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RemiSlot {
    pub description: Option<String>,
    /// Raw charge amount as entered; parsed leniently at aggregation time.
    pub charges: Option<String>,
}

impl RemiSlot {
    pub fn new(description: impl Into<String>, charges: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            charges: Some(charges.into()),
        }
    }

    /// Whether the slot carries a usable description. Empty strings and
    /// the literal string "NULL" left behind by old imports do not count.
    pub fn is_populated(&self) -> bool {
        match self.description.as_deref().map(str::trim) {
            Some(description) => !description.is_empty() && description != "NULL",
            None => false,
        }
    }
}

/// Per-job pricing configuration. One active row per job is authoritative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobServiceCharge {
    pub charge_id: Uuid,
    pub job_id: Uuid,
    pub fixed: Decimal,
    pub in_percentage: Decimal,
    pub min: Decimal,
    pub max: Decimal,
    /// Per-unit rate applied to the job's quantity.
    pub per_shb: Decimal,
    /// Combination flag: add the per-unit amount to the percentage amount
    /// instead of taking the greater of the two.
    pub percentage_per_shb: bool,
    /// Combination flag: add the per-unit amount on top of fixed plus
    /// percentage instead of taking the greater of the two.
    pub fixed_percentage_per_shb: bool,
    pub registration_other_charges: Decimal,
    /// Rate per CA certificate; multiplied by the job's certificate count.
    pub ca_charges: Decimal,
    /// Rate per CE certificate; multiplied by the job's certificate count.
    pub ce_charges: Decimal,
    /// Static application fee, used when no field value overrides it.
    pub application_fees: Decimal,
    pub remi_slots: Vec<RemiSlot>,
    pub gst_type: Option<GstType>,
    pub active: bool,
}

impl JobServiceCharge {
    /// An all-zero configuration for jobs with no charge row. Pricing a
    /// job against it yields zero everywhere rather than an error.
    pub fn empty(job_id: Uuid) -> Self {
        Self {
            charge_id: Uuid::nil(),
            job_id,
            fixed: Decimal::ZERO,
            in_percentage: Decimal::ZERO,
            min: Decimal::ZERO,
            max: Decimal::ZERO,
            per_shb: Decimal::ZERO,
            percentage_per_shb: false,
            fixed_percentage_per_shb: false,
            registration_other_charges: Decimal::ZERO,
            ca_charges: Decimal::ZERO,
            ce_charges: Decimal::ZERO,
            application_fees: Decimal::ZERO,
            remi_slots: Vec::new(),
            gst_type: None,
            active: true,
        }
    }

    pub fn remi_slot(&self, slot: usize) -> Option<&RemiSlot> {
        self.remi_slots.get(slot)
    }
}
