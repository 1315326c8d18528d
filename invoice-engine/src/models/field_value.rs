//! Dynamic per-job custom field values.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// One (job, field name, value) triple from the fields master.
///
/// Field names are free text entered on the CRUD screens; lookup must
/// tolerate case and separator variation (see `engine::resolver`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobFieldValue {
    pub job_id: Uuid,
    pub field_name: String,
    pub value: String,
}

/// Field name to raw value map for one job.
pub type FieldMap = HashMap<String, String>;

/// Group raw field value rows into per-job maps.
pub fn field_maps_by_job(values: &[JobFieldValue]) -> HashMap<Uuid, FieldMap> {
    let mut maps: HashMap<Uuid, FieldMap> = HashMap::new();
    for value in values {
        maps.entry(value.job_id)
            .or_default()
            .insert(value.field_name.clone(), value.value.clone());
    }
    maps
}
