//! billing-core: Shared infrastructure for the invoice computation workspace.
pub mod error;
pub mod observability;
pub mod utils;

pub use anyhow;
pub use rust_decimal;
pub use serde;
pub use serde_json;
pub use tracing;
