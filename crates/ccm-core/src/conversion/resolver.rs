use std::sync::Arc;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::conversion::ConversionTable;
use crate::entities::{ConversionRule, Measurement};

/// The derived emission for one measurement and the rule that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conversion {
    pub kg_co2e: f64,
    pub calculation_id: String,
}

/// Selects the conversion rule for a measurement and computes its kgCO2e.
///
/// Rules are scanned in table order and the first one whose measure and unit
/// match and whose window fully contains the measurement window is used.
/// No match is a normal outcome: the emission is recorded without a CO2e value.
#[derive(Debug, Clone)]
pub struct FactorResolver {
    table: Arc<ConversionTable>,
}

impl FactorResolver {
    #[must_use]
    pub const fn new(table: Arc<ConversionTable>) -> Self {
        Self { table }
    }

    #[must_use]
    pub fn table(&self) -> &ConversionTable {
        &self.table
    }

    #[must_use]
    pub fn find_rule(
        &self,
        measure: &str,
        unit: &str,
        period_start: &NaiveDateTime,
        period_end: &NaiveDateTime,
    ) -> Option<&ConversionRule> {
        self.table
            .rules()
            .iter()
            .find(|rule| rule.matches(measure, unit, period_start, period_end))
    }

    /// Convert `value` using the first applicable rule.
    #[must_use]
    pub fn resolve(
        &self,
        measure: &str,
        unit: &str,
        period_start: &NaiveDateTime,
        period_end: &NaiveDateTime,
        value: f64,
    ) -> Option<Conversion> {
        self.find_rule(measure, unit, period_start, period_end)
            .map(|rule| Conversion {
                kg_co2e: rule.factor * value,
                calculation_id: rule.id.clone(),
            })
    }

    #[must_use]
    pub fn resolve_measurement(&self, measurement: &Measurement) -> Option<Conversion> {
        self.resolve(
            &measurement.measure,
            &measurement.unit,
            &measurement.period_start,
            &measurement.period_end,
            measurement.value,
        )
    }
}
