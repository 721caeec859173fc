use chrono::NaiveDateTime;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A time-bounded factor mapping a (measure, unit) pair to kgCO2e per unit.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConversionRule {
    pub id: String,
    pub measure: String,
    pub unit: String,
    #[serde(with = "crate::timestamp::iso")]
    #[schemars(with = "String")]
    pub period_start: NaiveDateTime,
    #[serde(with = "crate::timestamp::iso")]
    #[schemars(with = "String")]
    pub period_end: NaiveDateTime,
    pub factor: f64,
}

impl ConversionRule {
    /// True when the window `[start, end]` lies entirely inside this rule's window.
    #[must_use]
    pub fn covers(&self, start: &NaiveDateTime, end: &NaiveDateTime) -> bool {
        self.period_start <= *start && self.period_end >= *end
    }

    /// True when this rule converts the given measure/unit over `[start, end]`.
    #[must_use]
    pub fn matches(
        &self,
        measure: &str,
        unit: &str,
        start: &NaiveDateTime,
        end: &NaiveDateTime,
    ) -> bool {
        self.measure == measure && self.unit == unit && self.covers(start, end)
    }

    /// True when both rules convert the same measure/unit and their windows share
    /// at least one instant.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.measure == other.measure
            && self.unit == other.unit
            && self.period_start <= other.period_end
            && other.period_start <= self.period_end
    }
}
