use chrono::NaiveDateTime;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::ReadingKey;

/// A persisted derived emission. `kg_co2e` and `co2e_calculation` are both
/// `None` when no conversion rule matched the reading.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Emission {
    pub reporting_entity: String,
    #[serde(with = "crate::timestamp::iso")]
    #[schemars(with = "String")]
    pub period_start: NaiveDateTime,
    #[serde(with = "crate::timestamp::iso")]
    #[schemars(with = "String")]
    pub period_end: NaiveDateTime,
    pub measure: String,
    pub unit: String,
    pub value: f64,
    #[serde(rename = "kgCO2e")]
    pub kg_co2e: Option<f64>,
    pub co2e_calculation: Option<String>,
}

impl Emission {
    #[must_use]
    pub fn key(&self) -> ReadingKey {
        ReadingKey {
            reporting_entity: self.reporting_entity.clone(),
            period_start: self.period_start,
            period_end: self.period_end,
            measure: self.measure.clone(),
        }
    }

    #[must_use]
    pub const fn is_converted(&self) -> bool {
        self.kg_co2e.is_some()
    }
}
