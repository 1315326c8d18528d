//! Immutable master-data snapshot and its loading boundary.
//!
//! The engine never talks to the CRUD/API layer directly: the caller
//! implements [`MasterData`], [`BillingSnapshot::load`] fans the fetches
//! out concurrently and joins them, and everything downstream computes
//! synchronously over the joined snapshot. Re-fetch and rebuild on any
//! change; nothing here mutates after construction.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use once_cell::sync::Lazy;
use tracing::{debug, instrument};
use uuid::Uuid;

use billing_core::error::AppError;

use crate::models::{
    covered_job_ids, field_maps_by_job, BillingType, FieldMap, GstRate, Invoice, Job,
    JobFieldValue, JobServiceCharge,
};

static EMPTY_FIELDS: Lazy<FieldMap> = Lazy::new(FieldMap::new);

/// Read operations the surrounding application supplies to the engine.
#[async_trait]
pub trait MasterData: Send + Sync {
    /// Job records for the given ids.
    async fn fetch_jobs(&self, job_ids: &[Uuid]) -> Result<Vec<Job>, AppError>;

    /// Service charge rows for the given jobs, active and inactive.
    async fn fetch_service_charges(
        &self,
        job_ids: &[Uuid],
    ) -> Result<Vec<JobServiceCharge>, AppError>;

    /// Custom field values for the given jobs.
    async fn fetch_field_values(&self, job_ids: &[Uuid]) -> Result<Vec<JobFieldValue>, AppError>;

    /// GST rate for a job-register, if one is configured.
    async fn fetch_gst_rate(&self, register_id: Uuid) -> Result<Option<GstRate>, AppError>;

    /// Prior invoices of any status.
    async fn fetch_invoices(&self) -> Result<Vec<Invoice>, AppError>;
}

/// Immutable snapshot of everything the engine reads.
#[derive(Debug, Clone, Default)]
pub struct BillingSnapshot {
    jobs: HashMap<Uuid, Job>,
    job_order: Vec<Uuid>,
    service_charges: HashMap<Uuid, JobServiceCharge>,
    field_maps: HashMap<Uuid, FieldMap>,
    gst_rates: HashMap<Uuid, GstRate>,
    prior_invoices: Vec<Invoice>,
}

impl BillingSnapshot {
    /// Assemble a snapshot from already-fetched rows. Only the first
    /// active service charge row per job is kept.
    pub fn new(
        jobs: Vec<Job>,
        charges: Vec<JobServiceCharge>,
        field_values: Vec<JobFieldValue>,
        gst_rates: HashMap<Uuid, GstRate>,
        prior_invoices: Vec<Invoice>,
    ) -> Self {
        let job_order: Vec<Uuid> = jobs.iter().map(|job| job.job_id).collect();
        let jobs: HashMap<Uuid, Job> = jobs.into_iter().map(|job| (job.job_id, job)).collect();

        let mut service_charges = HashMap::new();
        for charge in charges {
            if !charge.active {
                continue;
            }
            service_charges.entry(charge.job_id).or_insert(charge);
        }

        Self {
            jobs,
            job_order,
            service_charges,
            field_maps: field_maps_by_job(&field_values),
            gst_rates,
            prior_invoices,
        }
    }

    /// Load a snapshot for the given jobs, fetching each dependency
    /// concurrently and joining before any computation proceeds.
    #[instrument(skip(source), fields(jobs = job_ids.len()))]
    pub async fn load(source: &dyn MasterData, job_ids: &[Uuid]) -> Result<Self, AppError> {
        let (jobs, charges, field_values, invoices) = futures::try_join!(
            source.fetch_jobs(job_ids),
            source.fetch_service_charges(job_ids),
            source.fetch_field_values(job_ids),
            source.fetch_invoices(),
        )?;

        for id in job_ids {
            if !jobs.iter().any(|job| job.job_id == *id) {
                return Err(AppError::NotFound(anyhow::anyhow!("Job {} not found", id)));
            }
        }

        let registers: HashSet<Uuid> = jobs.iter().map(|job| job.register_id).collect();
        let fetched =
            futures::future::try_join_all(registers.into_iter().map(|register_id| async move {
                Ok::<_, AppError>((register_id, source.fetch_gst_rate(register_id).await?))
            }))
            .await?;

        let mut gst_rates = HashMap::new();
        for (register_id, rate) in fetched {
            if let Some(rate) = rate {
                gst_rates.insert(register_id, rate);
            }
        }

        debug!(
            jobs = jobs.len(),
            charges = charges.len(),
            field_values = field_values.len(),
            invoices = invoices.len(),
            "Snapshot loaded"
        );

        Ok(Self::new(jobs, charges, field_values, gst_rates, invoices))
    }

    pub fn job(&self, job_id: Uuid) -> Option<&Job> {
        self.jobs.get(&job_id)
    }

    /// Jobs in the order they were supplied.
    pub fn jobs(&self) -> impl Iterator<Item = &Job> {
        self.job_order.iter().filter_map(|id| self.jobs.get(id))
    }

    /// The active service charge row for a job, if any.
    pub fn service_charge(&self, job_id: Uuid) -> Option<&JobServiceCharge> {
        self.service_charges.get(&job_id)
    }

    /// Field values for a job; empty for jobs with none.
    pub fn field_map(&self, job_id: Uuid) -> &FieldMap {
        self.field_maps.get(&job_id).unwrap_or(&EMPTY_FIELDS)
    }

    /// GST rate for a job, through its register.
    pub fn gst_rate_for(&self, job_id: Uuid) -> Option<&GstRate> {
        let job = self.jobs.get(&job_id)?;
        self.gst_rates.get(&job.register_id)
    }

    pub fn prior_invoices(&self) -> &[Invoice] {
        &self.prior_invoices
    }

    /// Jobs selectable for a new invoice of the given billing type:
    /// drops jobs already covered by an active invoice of the same
    /// billing type, keeps jobs covered only by canceled invoices or by
    /// invoices of a different billing type.
    pub fn available_jobs(&self, billing_type: BillingType) -> Vec<&Job> {
        let covered = covered_job_ids(&self.prior_invoices, billing_type);
        self.jobs()
            .filter(|job| !covered.contains(&job.job_id))
            .collect()
    }
}
