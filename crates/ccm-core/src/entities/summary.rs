use chrono::NaiveDateTime;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{Emission, ReportingEntity};

/// The published per-entity document: the entity's attributes with its full
/// emission history attached, ordered by `period_start`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct EntitySummary {
    #[serde(flatten)]
    pub entity: ReportingEntity,
    pub emissions: Vec<SummaryEmission>,
}

/// One emission row as it appears in a published summary.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SummaryEmission {
    #[serde(with = "crate::timestamp::iso")]
    #[schemars(with = "String")]
    pub period_start: NaiveDateTime,
    #[serde(with = "crate::timestamp::iso")]
    #[schemars(with = "String")]
    pub period_end: NaiveDateTime,
    pub measure: String,
    pub unit: String,
    pub value: f64,
    #[serde(rename = "kgco2e")]
    pub kg_co2e: Option<f64>,
    pub co2e_calculation: Option<String>,
}

impl From<&Emission> for SummaryEmission {
    fn from(emission: &Emission) -> Self {
        Self {
            period_start: emission.period_start,
            period_end: emission.period_end,
            measure: emission.measure.clone(),
            unit: emission.unit.clone(),
            value: emission.value,
            kg_co2e: emission.kg_co2e,
            co2e_calculation: emission.co2e_calculation.clone(),
        }
    }
}

impl EntitySummary {
    /// Attach `emissions` to `entity`, keeping the order given.
    #[must_use]
    pub fn new(entity: ReportingEntity, emissions: &[Emission]) -> Self {
        Self {
            entity,
            emissions: emissions.iter().map(SummaryEmission::from).collect(),
        }
    }
}
