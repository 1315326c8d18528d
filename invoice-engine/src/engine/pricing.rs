//! Pricing formula selection and evaluation.
//!
//! A service charge row defines up to five pricing scalars (`fixed`,
//! `in_percentage`, `min`, `max`, `per_shb`). Which formula applies is
//! decided purely by which scalars are present (greater than zero);
//! exactly twelve combinations are defined and anything else bills the
//! fixed value.

use rust_decimal::Decimal;
use tracing::debug;

use billing_core::utils::numeric::round_money;

use crate::models::{Job, JobServiceCharge};

use super::resolver::ResolvedJobFields;

/// Presence of the five pricing scalars on a service charge row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormulaKey {
    pub has_fixed: bool,
    pub has_percentage: bool,
    pub has_min: bool,
    pub has_max: bool,
    pub has_per_shb: bool,
}

impl FormulaKey {
    /// Derive the key from a charge row; a scalar is present iff positive.
    pub fn from_charge(charge: &JobServiceCharge) -> Self {
        Self {
            has_fixed: charge.fixed > Decimal::ZERO,
            has_percentage: charge.in_percentage > Decimal::ZERO,
            has_min: charge.min > Decimal::ZERO,
            has_max: charge.max > Decimal::ZERO,
            has_per_shb: charge.per_shb > Decimal::ZERO,
        }
    }
}

/// The pricing formulas, one per defined presence combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Formula {
    Fixed,
    Percentage,
    PercentageWithFloor,
    PercentageWithCap,
    PercentageClamped,
    PerUnit,
    FixedPlusPercentage,
    FixedPlusPercentageWithFloor,
    FixedPlusPercentageWithCap,
    FixedPlusPercentageClamped,
    PercentageAndPerUnit,
    FixedPercentageAndPerUnit,
    /// No defined combination matched; bills the fixed value, possibly 0.
    Fallback,
}

impl Formula {
    /// Select the formula for a presence key.
    pub fn select(key: FormulaKey) -> Formula {
        match (
            key.has_fixed,
            key.has_percentage,
            key.has_min,
            key.has_max,
            key.has_per_shb,
        ) {
            (true, false, false, false, false) => Formula::Fixed,
            (false, true, false, false, false) => Formula::Percentage,
            (false, true, true, false, false) => Formula::PercentageWithFloor,
            (false, true, false, true, false) => Formula::PercentageWithCap,
            (false, true, true, true, false) => Formula::PercentageClamped,
            (false, false, false, false, true) => Formula::PerUnit,
            (true, true, false, false, false) => Formula::FixedPlusPercentage,
            (true, true, true, false, false) => Formula::FixedPlusPercentageWithFloor,
            (true, true, false, true, false) => Formula::FixedPlusPercentageWithCap,
            (true, true, true, true, false) => Formula::FixedPlusPercentageClamped,
            (false, true, false, false, true) => Formula::PercentageAndPerUnit,
            (true, true, false, false, true) => Formula::FixedPercentageAndPerUnit,
            _ => Formula::Fallback,
        }
    }
}

/// Priced output for one job.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobPrice {
    pub quantity: Decimal,
    pub amount: Decimal,
    pub percentage_amount: Decimal,
    pub per_shb: Decimal,
}

/// Price one job from its service charge row and resolved field values.
///
/// Quantity falls back from the resolved field to the job's baseline to
/// zero. The amount is rounded to two decimals and is never negative for
/// the non-negative inputs the masters supply.
pub fn price_job(job: &Job, charge: &JobServiceCharge, fields: &ResolvedJobFields) -> JobPrice {
    let quantity = fields.quantity.or(job.quantity).unwrap_or(Decimal::ZERO);
    let percentage_amount = fields.claim_amount * charge.in_percentage / Decimal::ONE_HUNDRED;
    let per_unit_amount = quantity * charge.per_shb;

    let key = FormulaKey::from_charge(charge);
    let amount = match Formula::select(key) {
        Formula::Fixed => charge.fixed,
        Formula::Percentage => percentage_amount,
        Formula::PercentageWithFloor => percentage_amount.max(charge.min),
        Formula::PercentageWithCap => percentage_amount.min(charge.max),
        // floor first, then cap; the cap wins if a row has min > max
        Formula::PercentageClamped => percentage_amount.max(charge.min).min(charge.max),
        Formula::PerUnit => per_unit_amount,
        Formula::FixedPlusPercentage => charge.fixed + percentage_amount,
        Formula::FixedPlusPercentageWithFloor => charge.fixed + percentage_amount.max(charge.min),
        Formula::FixedPlusPercentageWithCap => charge.fixed + percentage_amount.min(charge.max),
        Formula::FixedPlusPercentageClamped => {
            charge.fixed + percentage_amount.max(charge.min).min(charge.max)
        }
        Formula::PercentageAndPerUnit => {
            if charge.percentage_per_shb {
                percentage_amount + per_unit_amount
            } else {
                percentage_amount.max(per_unit_amount)
            }
        }
        Formula::FixedPercentageAndPerUnit => {
            if charge.fixed_percentage_per_shb {
                charge.fixed + percentage_amount + per_unit_amount
            } else {
                charge.fixed + percentage_amount.max(per_unit_amount)
            }
        }
        Formula::Fallback => {
            debug!(job_id = %job.job_id, ?key, "No pricing formula matched, billing fixed value");
            charge.fixed
        }
    };

    JobPrice {
        quantity,
        amount: round_money(amount),
        percentage_amount: round_money(percentage_amount),
        per_shb: charge.per_shb,
    }
}
