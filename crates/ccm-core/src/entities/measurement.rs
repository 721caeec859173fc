use chrono::NaiveDateTime;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::ReadingKey;

/// One uploaded usage figure for a period. Transient: its fields are copied
/// into a `Reading` and an `Emission`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Measurement {
    #[serde(with = "crate::timestamp::iso")]
    #[schemars(with = "String")]
    pub period_start: NaiveDateTime,
    #[serde(with = "crate::timestamp::iso")]
    #[schemars(with = "String")]
    pub period_end: NaiveDateTime,
    pub measure: String,
    pub unit: String,
    pub value: f64,
}

impl Measurement {
    /// Natural store key of this measurement for the given reporting entity.
    #[must_use]
    pub fn key_for(&self, reporting_entity: &str) -> ReadingKey {
        ReadingKey {
            reporting_entity: reporting_entity.to_string(),
            period_start: self.period_start,
            period_end: self.period_end,
            measure: self.measure.clone(),
        }
    }
}
