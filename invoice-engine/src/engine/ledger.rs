//! Partial settlement ledger: opening, pay, and remaining per bucket.
//!
//! Partial invoices compound: each one records the bucket amounts it
//! billed, and the next invoice over the same jobs starts from the
//! cumulative opening those records imply. The ledger lives only for one
//! invoicing session; it is rebuilt from scratch whenever the job
//! selection changes, which resets every pay amount to zero.

use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};
use tracing::debug;
use uuid::Uuid;

use billing_core::utils::numeric::round_money;

use crate::models::{ChargeAmounts, ChargeBucket, Invoice, InvoiceStatus};

/// Opening, pay, and remaining state for one charge bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BucketState {
    /// Computed bucket total for the current selection.
    pub total: Decimal,
    /// Cumulative amount already billed by prior active invoices.
    pub opening: Decimal,
    /// Amount being billed on the invoice under construction.
    pub pay: Decimal,
}

impl BucketState {
    /// Amount still billable after opening and the current pay amount.
    pub fn remaining(&self) -> Decimal {
        self.total - self.opening - self.pay
    }

    /// Ceiling for the pay amount. Floored at zero so a historically
    /// overbilled bucket reports nothing payable rather than a negative
    /// range.
    pub fn payable(&self) -> Decimal {
        (self.total - self.opening).max(Decimal::ZERO)
    }
}

/// Per-bucket settlement ledger for one invoicing session.
#[derive(Debug, Clone)]
pub struct SettlementLedger {
    buckets: HashMap<ChargeBucket, BucketState>,
}

impl SettlementLedger {
    /// Build a ledger for the current selection.
    ///
    /// The opening amount per bucket is the sum of the stored bucket
    /// amount across every prior active invoice whose covered jobs
    /// intersect the selection. Canceled invoices never contribute.
    pub fn open(
        totals: &ChargeAmounts,
        selected_jobs: &[Uuid],
        prior_invoices: &[Invoice],
    ) -> Self {
        let selection: HashSet<Uuid> = selected_jobs.iter().copied().collect();
        let mut buckets = HashMap::new();

        for bucket in ChargeBucket::all() {
            let mut opening = Decimal::ZERO;
            for invoice in prior_invoices {
                if invoice.status != InvoiceStatus::Active {
                    continue;
                }
                if !invoice.covers_any(&selection) {
                    continue;
                }
                opening += invoice.charges.get(bucket);
            }

            buckets.insert(
                bucket,
                BucketState {
                    total: totals.get(bucket),
                    opening,
                    pay: Decimal::ZERO,
                },
            );
        }

        debug!(jobs = selected_jobs.len(), "Settlement ledger opened");

        Self { buckets }
    }

    /// State for one bucket.
    pub fn bucket(&self, bucket: ChargeBucket) -> BucketState {
        self.buckets.get(&bucket).copied().unwrap_or_default()
    }

    pub fn opening(&self, bucket: ChargeBucket) -> Decimal {
        self.bucket(bucket).opening
    }

    pub fn pay(&self, bucket: ChargeBucket) -> Decimal {
        self.bucket(bucket).pay
    }

    pub fn remaining(&self, bucket: ChargeBucket) -> Decimal {
        self.bucket(bucket).remaining()
    }

    /// Set the pay amount for a bucket, clamped into `[0, total - opening]`.
    /// Out-of-range requests are clamped to the nearest bound, never
    /// rejected. Returns the clamped value.
    pub fn set_pay(&mut self, bucket: ChargeBucket, requested: Decimal) -> Decimal {
        let state = self.buckets.entry(bucket).or_default();
        let clamped = round_money(requested).clamp(Decimal::ZERO, state.payable());
        if clamped != requested {
            debug!(bucket = bucket.as_str(), %requested, %clamped, "Pay amount clamped");
        }
        state.pay = clamped;
        clamped
    }

    /// Reset every pay amount to zero, keeping totals and openings.
    pub fn reset_pay(&mut self) {
        for state in self.buckets.values_mut() {
            state.pay = Decimal::ZERO;
        }
    }

    /// Whether any bucket has a positive pay amount. Once true, the whole
    /// invoice bills pay amounts for every bucket.
    pub fn is_partial(&self) -> bool {
        self.buckets.values().any(|state| state.pay > Decimal::ZERO)
    }

    /// Effective bucket amounts for the invoice being built: pay amounts
    /// for every bucket once partial mode is triggered (untouched buckets
    /// contribute zero), full totals otherwise.
    pub fn effective_amounts(&self) -> ChargeAmounts {
        let partial = self.is_partial();
        let mut amounts = ChargeAmounts::default();
        for bucket in ChargeBucket::all() {
            let state = self.bucket(bucket);
            amounts.set(bucket, if partial { state.pay } else { state.total });
        }
        amounts
    }
}
