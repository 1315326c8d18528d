//! Per-job annexure assembly for multi-job invoices.
//!
//! An invoice covering more than one job carries an annexure: one
//! itemized row per job plus a totals row. Columns are discovered from
//! the data — remi slots any job populates, amount fields any job
//! carries, and combined reference-number-and-date fields. The column
//! set is the union across every selected job and applies to every row,
//! totals included, so rows never misalign.

use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use billing_core::utils::numeric::{parse_amount, round_money};

use crate::models::{JobServiceCharge, REMI_SLOT_COUNT};
use crate::snapshot::BillingSnapshot;

use super::pricing::price_job;
use super::resolver::{
    resolve_known, KnownField, ResolvedJobFields, DYNAMIC_AMOUNT_FIELDS, NO_DATE_FIELDS,
};

/// One discovered annexure column.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnnexureColumn {
    /// Reimbursement slot column, labeled by the first description found.
    Remi { slot: usize, label: String },
    /// Dynamically-discovered amount column.
    Amount { field: KnownField, label: String },
    /// Combined reference number and date column.
    NoAndDate {
        no: KnownField,
        date: KnownField,
        label: String,
    },
}

impl AnnexureColumn {
    pub fn label(&self) -> &str {
        match self {
            AnnexureColumn::Remi { label, .. } => label,
            AnnexureColumn::Amount { label, .. } => label,
            AnnexureColumn::NoAndDate { label, .. } => label,
        }
    }
}

/// One cell in a dynamic column.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnnexureCell {
    Amount(Decimal),
    Text(String),
}

/// One job's annexure row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnexureRow {
    pub job_id: Uuid,
    pub job_number: String,
    pub quantity: Decimal,
    pub claim_amount: Decimal,
    pub professional_charges: Decimal,
    pub application_fees: Decimal,
    /// One cell per discovered column, in column order.
    pub cells: Vec<AnnexureCell>,
}

/// Column totals over every row, spanning the same union column set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnexureTotals {
    pub quantity: Decimal,
    pub claim_amount: Decimal,
    pub professional_charges: Decimal,
    pub application_fees: Decimal,
    pub cells: Vec<AnnexureCell>,
}

/// Itemized per-job breakdown appended to multi-job invoices.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annexure {
    pub columns: Vec<AnnexureColumn>,
    pub rows: Vec<AnnexureRow>,
    pub totals: AnnexureTotals,
}

/// Build the annexure for a selection. Single-job invoices render
/// without one, so fewer than two resolvable jobs yields `None`.
pub fn build_annexure(job_ids: &[Uuid], snapshot: &BillingSnapshot) -> Option<Annexure> {
    let jobs: Vec<_> = job_ids
        .iter()
        .filter_map(|job_id| snapshot.job(*job_id))
        .collect();
    if jobs.len() < 2 {
        return None;
    }

    let columns = discover_columns(&jobs, snapshot);

    let mut rows = Vec::with_capacity(jobs.len());
    let mut totals = AnnexureTotals {
        quantity: Decimal::ZERO,
        claim_amount: Decimal::ZERO,
        professional_charges: Decimal::ZERO,
        application_fees: Decimal::ZERO,
        cells: columns
            .iter()
            .map(|column| match column {
                AnnexureColumn::NoAndDate { .. } => AnnexureCell::Text(String::new()),
                _ => AnnexureCell::Amount(Decimal::ZERO),
            })
            .collect(),
    };

    for job in &jobs {
        let charge = snapshot
            .service_charge(job.job_id)
            .cloned()
            .unwrap_or_else(|| JobServiceCharge::empty(job.job_id));
        let values = snapshot.field_map(job.job_id);
        let fields = ResolvedJobFields::resolve(values);
        let price = price_job(job, &charge, &fields);
        let application_fees = fields.application_fees.unwrap_or(charge.application_fees);

        let cells: Vec<AnnexureCell> = columns
            .iter()
            .map(|column| match column {
                AnnexureColumn::Remi { slot, .. } => {
                    let amount = charge
                        .remi_slot(*slot)
                        .filter(|remi| remi.is_populated())
                        .and_then(|remi| remi.charges.as_deref())
                        .map(parse_amount)
                        .unwrap_or_default();
                    AnnexureCell::Amount(amount)
                }
                AnnexureColumn::Amount { field, .. } => AnnexureCell::Amount(
                    resolve_known(values, *field)
                        .map(parse_amount)
                        .unwrap_or_default(),
                ),
                AnnexureColumn::NoAndDate { no, date, .. } => {
                    let no_value = resolve_known(values, *no).unwrap_or_default();
                    let date_value = resolve_known(values, *date).unwrap_or_default();
                    AnnexureCell::Text(join_no_and_date(no_value, date_value))
                }
            })
            .collect();

        totals.quantity += price.quantity;
        totals.claim_amount += fields.claim_amount;
        totals.professional_charges += price.amount;
        totals.application_fees += application_fees;
        for (total_cell, cell) in totals.cells.iter_mut().zip(&cells) {
            if let (AnnexureCell::Amount(total), AnnexureCell::Amount(amount)) = (total_cell, cell)
            {
                *total += *amount;
            }
        }

        rows.push(AnnexureRow {
            job_id: job.job_id,
            job_number: job.job_number.clone(),
            quantity: price.quantity,
            claim_amount: fields.claim_amount,
            professional_charges: price.amount,
            application_fees,
            cells,
        });
    }

    totals.professional_charges = round_money(totals.professional_charges);
    totals.application_fees = round_money(totals.application_fees);

    Some(Annexure {
        columns,
        rows,
        totals,
    })
}

/// Discover the union column set across every selected job.
fn discover_columns(
    jobs: &[&crate::models::Job],
    snapshot: &BillingSnapshot,
) -> Vec<AnnexureColumn> {
    let mut columns = Vec::new();

    // Remi slots: a column per slot any job populates, labeled by the
    // first description encountered in selection order.
    for slot in 0..REMI_SLOT_COUNT {
        let label = jobs.iter().find_map(|job| {
            snapshot
                .service_charge(job.job_id)
                .and_then(|charge| charge.remi_slot(slot))
                .filter(|remi| remi.is_populated())
                .and_then(|remi| remi.description.as_deref())
                .map(|description| description.trim().to_string())
        });
        if let Some(label) = label {
            columns.push(AnnexureColumn::Remi { slot, label });
        }
    }

    for field in DYNAMIC_AMOUNT_FIELDS {
        let populated = jobs.iter().any(|job| {
            resolve_known(snapshot.field_map(job.job_id), *field)
                .map(|value| !value.trim().is_empty())
                .unwrap_or(false)
        });
        if populated {
            columns.push(AnnexureColumn::Amount {
                field: *field,
                label: field.label().to_string(),
            });
        }
    }

    for (no, date) in NO_DATE_FIELDS {
        let populated = jobs.iter().any(|job| {
            resolve_known(snapshot.field_map(job.job_id), *no)
                .map(|value| !value.trim().is_empty())
                .unwrap_or(false)
        });
        if populated {
            columns.push(AnnexureColumn::NoAndDate {
                no: *no,
                date: *date,
                label: format!("{} & Date", no.label()),
            });
        }
    }

    columns
}

fn join_no_and_date(no: &str, date: &str) -> String {
    match (no.trim(), date.trim()) {
        ("", "") => String::new(),
        (no, "") => no.to_string(),
        ("", date) => date.to_string(),
        (no, date) => format!("{} dt. {}", no, date),
    }
}
