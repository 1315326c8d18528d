//! Domain models for invoice-engine.

mod breakdown;
mod bucket;
mod field_value;
mod gst_rate;
mod invoice;
mod job;
mod service_charge;

pub use breakdown::{GstBreakdown, InvoiceBreakdown, RemiField};
pub use bucket::{ChargeAmounts, ChargeBucket, REMI_SLOT_COUNT};
pub use field_value::{field_maps_by_job, FieldMap, JobFieldValue};
pub use gst_rate::GstRate;
pub use invoice::{covered_job_ids, CreateInvoice, Invoice, InvoiceStatus, InvoiceType};
pub use job::{BillingType, Job, JobStatus};
pub use service_charge::{GstType, JobServiceCharge, RemiSlot};
