//! Multi-job aggregation into a consolidated invoice breakdown.

use rust_decimal::Decimal;
use tracing::{debug, instrument};
use uuid::Uuid;

use billing_core::utils::numeric::{parse_amount, round_money};

use crate::models::{
    ChargeBucket, GstRate, GstType, InvoiceBreakdown, JobServiceCharge, RemiField,
    REMI_SLOT_COUNT,
};
use crate::snapshot::BillingSnapshot;

use super::gst::apply_gst;
use super::ledger::SettlementLedger;
use super::pricing::price_job;
use super::resolver::ResolvedJobFields;

/// Caller-entered adjustments for the invoice being built.
#[derive(Debug, Clone, Copy, Default)]
pub struct Adjustments {
    pub reward_amount: Decimal,
    pub discount_amount: Decimal,
}

/// Aggregate the selected jobs into a consolidated breakdown.
///
/// Pure over the snapshot: identical inputs produce identical output,
/// and callers re-run it on any input change (selection, reward or
/// discount edit, pay-amount edit) rather than patching a prior result.
///
/// The GST classification and rate come from the first selected job; a
/// mixed-classification selection uses the first job's for the whole
/// invoice. Remi slots aggregate positionally by index, not by
/// description. When a ledger with a positive pay amount is supplied,
/// every bucket switches to its pay amount before tax and totaling.
#[instrument(skip(snapshot, ledger), fields(jobs = job_ids.len()))]
pub fn compute_breakdown(
    job_ids: &[Uuid],
    snapshot: &BillingSnapshot,
    adjustments: Adjustments,
    ledger: Option<&SettlementLedger>,
) -> InvoiceBreakdown {
    let mut breakdown = InvoiceBreakdown::default();
    let mut remi_descriptions: [Option<String>; REMI_SLOT_COUNT] = Default::default();
    let mut gst_type: Option<Option<GstType>> = None;
    let mut gst_rate: Option<GstRate> = None;

    for job_id in job_ids {
        let Some(job) = snapshot.job(*job_id) else {
            debug!(%job_id, "Selected job missing from snapshot, skipped");
            continue;
        };
        let charge = snapshot
            .service_charge(*job_id)
            .cloned()
            .unwrap_or_else(|| JobServiceCharge::empty(*job_id));
        let fields = ResolvedJobFields::resolve(snapshot.field_map(*job_id));

        let price = price_job(job, &charge, &fields);
        breakdown.charges.add(ChargeBucket::Professional, price.amount);
        breakdown
            .charges
            .add(ChargeBucket::Registration, charge.registration_other_charges);

        breakdown.ca_cert_count += fields.ca_cert_count;
        breakdown.ce_cert_count += fields.ce_cert_count;
        breakdown.charges.add(
            ChargeBucket::CaCharges,
            round_money(fields.ca_cert_count * charge.ca_charges),
        );
        breakdown.charges.add(
            ChargeBucket::CeCharges,
            round_money(fields.ce_cert_count * charge.ce_charges),
        );

        // Field value overrides the static configuration when present.
        let application_fee = fields.application_fees.unwrap_or(charge.application_fees);
        breakdown
            .charges
            .add(ChargeBucket::ApplicationFees, application_fee);

        for slot in 0..REMI_SLOT_COUNT {
            let Some(remi) = charge.remi_slot(slot) else {
                continue;
            };
            if !remi.is_populated() {
                continue;
            }
            let amount = remi.charges.as_deref().map(parse_amount).unwrap_or_default();
            breakdown.charges.add(ChargeBucket::Remi(slot), amount);
            if remi_descriptions[slot].is_none() {
                remi_descriptions[slot] = remi.description.as_deref().map(|d| d.trim().to_string());
            }
        }

        if breakdown.per_shb.is_zero() && !price.per_shb.is_zero() {
            breakdown.per_shb = price.per_shb;
        }

        match gst_type {
            None => {
                gst_type = Some(charge.gst_type);
                gst_rate = snapshot.gst_rate_for(*job_id).cloned();
            }
            Some(first) if first != charge.gst_type => {
                debug!(%job_id, "Mixed GST classification, first job's governs the invoice");
            }
            _ => {}
        }
    }

    // Overlay pay amounts once any bucket has been partially settled.
    let (amounts, partial) = match ledger {
        Some(ledger) if ledger.is_partial() => (ledger.effective_amounts(), true),
        _ => (breakdown.charges.clone(), false),
    };

    breakdown.remi_fields = remi_descriptions
        .iter()
        .enumerate()
        .filter_map(|(slot, description)| {
            description.as_ref().map(|description| RemiField {
                slot,
                description: description.clone(),
                charges: amounts.get(ChargeBucket::Remi(slot)),
            })
        })
        .collect();

    // Reward cannot exceed the base professional amount; discount cannot
    // push the taxable subtotal negative.
    let base_amount = amounts.get(ChargeBucket::Professional);
    let reward_amount = round_money(
        adjustments
            .reward_amount
            .clamp(Decimal::ZERO, base_amount.max(Decimal::ZERO)),
    );
    let service_base = amounts.service_portion();
    let discount_amount = round_money(
        adjustments
            .discount_amount
            .clamp(Decimal::ZERO, (service_base + reward_amount).max(Decimal::ZERO)),
    );
    let service_subtotal = round_money(service_base + reward_amount - discount_amount);

    let rates = gst_rate.unwrap_or_else(|| GstRate::zero(""));
    let gst = apply_gst(service_subtotal, gst_type.flatten(), &rates);
    let final_amount = round_money(service_subtotal + gst.total() + amounts.reimbursement_portion());

    breakdown.charges = amounts;
    breakdown.reward_amount = reward_amount;
    breakdown.discount_amount = discount_amount;
    breakdown.service_subtotal = service_subtotal;
    breakdown.gst = gst;
    breakdown.final_amount = final_amount;
    breakdown.partial = partial;

    breakdown
}
