use chrono::NaiveDateTime;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Natural key shared by readings and emissions:
/// `(reporting_entity, period_start, period_end, measure)`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct ReadingKey {
    pub reporting_entity: String,
    #[serde(with = "crate::timestamp::iso")]
    #[schemars(with = "String")]
    pub period_start: NaiveDateTime,
    #[serde(with = "crate::timestamp::iso")]
    #[schemars(with = "String")]
    pub period_end: NaiveDateTime,
    pub measure: String,
}

/// A persisted raw usage figure. A later write for the same key overwrites
/// `unit` and `value`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Reading {
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
}

impl Reading {
    #[must_use]
    pub fn key(&self) -> ReadingKey {
        ReadingKey {
            reporting_entity: self.reporting_entity.clone(),
            period_start: self.period_start,
            period_end: self.period_end,
            measure: self.measure.clone(),
        }
    }
}
