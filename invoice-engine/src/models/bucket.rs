//! Charge bucket keys and per-bucket amount records.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Number of configurable reimbursement charge slots per service charge row.
pub const REMI_SLOT_COUNT: usize = 5;

/// A charge bucket on an invoice.
///
/// Buckets are the unit of aggregation and partial settlement: amounts
/// are summed per bucket across jobs, and opening/pay tracking is kept
/// per bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChargeBucket {
    Professional,
    Registration,
    CaCharges,
    CeCharges,
    ApplicationFees,
    /// Reimbursement charge slot, zero-based index.
    Remi(usize),
}

impl ChargeBucket {
    /// All buckets in display order.
    pub fn all() -> impl Iterator<Item = ChargeBucket> {
        [
            ChargeBucket::Professional,
            ChargeBucket::Registration,
            ChargeBucket::CaCharges,
            ChargeBucket::CeCharges,
            ChargeBucket::ApplicationFees,
        ]
        .into_iter()
        .chain((0..REMI_SLOT_COUNT).map(ChargeBucket::Remi))
    }

    /// Stored column name for this bucket on a persisted invoice.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChargeBucket::Professional => "professional_charges",
            ChargeBucket::Registration => "registration_other_charges",
            ChargeBucket::CaCharges => "ca_charges",
            ChargeBucket::CeCharges => "ce_charges",
            ChargeBucket::ApplicationFees => "application_fees",
            ChargeBucket::Remi(0) => "remi_one_charges",
            ChargeBucket::Remi(1) => "remi_two_charges",
            ChargeBucket::Remi(2) => "remi_three_charges",
            ChargeBucket::Remi(3) => "remi_four_charges",
            ChargeBucket::Remi(4) => "remi_five_charges",
            ChargeBucket::Remi(_) => "remi_charges",
        }
    }

    /// Whether this bucket is part of the taxable service subtotal.
    /// Application fees and remi lines are reimbursements and never taxed.
    pub fn is_service(&self) -> bool {
        matches!(
            self,
            ChargeBucket::Professional
                | ChargeBucket::Registration
                | ChargeBucket::CaCharges
                | ChargeBucket::CeCharges
        )
    }
}

/// Per-bucket charge amounts, shared by aggregation, the settlement
/// ledger, and persisted invoices.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChargeAmounts {
    pub professional_charges: Decimal,
    pub registration_other_charges: Decimal,
    pub ca_charges: Decimal,
    pub ce_charges: Decimal,
    pub application_fees: Decimal,
    pub remi_charges: [Decimal; REMI_SLOT_COUNT],
}

impl ChargeAmounts {
    pub fn get(&self, bucket: ChargeBucket) -> Decimal {
        match bucket {
            ChargeBucket::Professional => self.professional_charges,
            ChargeBucket::Registration => self.registration_other_charges,
            ChargeBucket::CaCharges => self.ca_charges,
            ChargeBucket::CeCharges => self.ce_charges,
            ChargeBucket::ApplicationFees => self.application_fees,
            ChargeBucket::Remi(slot) => {
                self.remi_charges.get(slot).copied().unwrap_or(Decimal::ZERO)
            }
        }
    }

    pub fn set(&mut self, bucket: ChargeBucket, amount: Decimal) {
        match bucket {
            ChargeBucket::Professional => self.professional_charges = amount,
            ChargeBucket::Registration => self.registration_other_charges = amount,
            ChargeBucket::CaCharges => self.ca_charges = amount,
            ChargeBucket::CeCharges => self.ce_charges = amount,
            ChargeBucket::ApplicationFees => self.application_fees = amount,
            ChargeBucket::Remi(slot) => {
                if let Some(cell) = self.remi_charges.get_mut(slot) {
                    *cell = amount;
                }
            }
        }
    }

    pub fn add(&mut self, bucket: ChargeBucket, amount: Decimal) {
        self.set(bucket, self.get(bucket) + amount);
    }

    /// Sum across every bucket.
    pub fn total(&self) -> Decimal {
        ChargeBucket::all().map(|bucket| self.get(bucket)).sum()
    }

    /// Taxable service portion: professional + registration + CA + CE.
    pub fn service_portion(&self) -> Decimal {
        ChargeBucket::all()
            .filter(ChargeBucket::is_service)
            .map(|bucket| self.get(bucket))
            .sum()
    }

    /// Untaxed reimbursement portion: application fees + remi slots.
    pub fn reimbursement_portion(&self) -> Decimal {
        ChargeBucket::all()
            .filter(|bucket| !bucket.is_service())
            .map(|bucket| self.get(bucket))
            .sum()
    }
}
