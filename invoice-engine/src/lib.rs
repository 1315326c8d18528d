//! invoice-engine: Pricing, GST, aggregation, and partial settlement for
//! professional-services invoicing.
//!
//! The engine is a pure computation core: callers assemble an immutable
//! [`snapshot::BillingSnapshot`] of master data, then derive breakdowns,
//! settlement ledgers, and annexures from it. Every derivation is
//! re-run from scratch on input changes; nothing in here holds state
//! between invocations.

pub mod engine;
pub mod models;
pub mod snapshot;
