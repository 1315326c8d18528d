//! Computation engine components.

pub mod aggregate;
pub mod annexure;
pub mod gst;
pub mod ledger;
pub mod pricing;
pub mod resolver;

pub use aggregate::{compute_breakdown, Adjustments};
pub use annexure::{build_annexure, Annexure, AnnexureCell, AnnexureColumn, AnnexureRow, AnnexureTotals};
pub use gst::apply_gst;
pub use ledger::{BucketState, SettlementLedger};
pub use pricing::{price_job, Formula, FormulaKey, JobPrice};
pub use resolver::{resolve, resolve_known, KnownField, ResolvedJobFields};
