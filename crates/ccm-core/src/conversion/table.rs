//! Immutable, ordered table of time-bounded conversion rules.
//!
//! Source format: `{"co2eConversion": [ConversionRule, ...]}`. Rule order is
//! significant: resolution takes the first matching rule, so overlapping
//! windows for the same measure/unit are reported as warnings but kept.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::entities::ConversionRule;
use crate::errors::CoreError;

#[derive(Debug, Deserialize)]
struct TableDocument {
    #[serde(rename = "co2eConversion")]
    rules: Vec<ConversionRule>,
}

/// Two rules for the same measure/unit whose validity windows intersect.
/// `first` precedes `second` in table order and therefore wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleOverlap {
    pub measure: String,
    pub unit: String,
    pub first: String,
    pub second: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversionTable {
    rules: Vec<ConversionRule>,
}

impl ConversionTable {
    /// Build a table from rules in priority order.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Config` if a rule has a non-finite factor or a
    /// window that ends before it starts.
    pub fn new(rules: Vec<ConversionRule>) -> Result<Self, CoreError> {
        for (index, rule) in rules.iter().enumerate() {
            validate_rule(index, rule)?;
        }
        Ok(Self { rules })
    }

    /// Parse a table from its JSON source.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Config` if the JSON is malformed, a required field is
    /// missing, a timestamp does not parse, or a rule fails validation.
    pub fn from_json_str(json: &str) -> Result<Self, CoreError> {
        let document: TableDocument = serde_json::from_str(json)
            .map_err(|e| CoreError::Config(format!("malformed conversion table: {e}")))?;
        let table = Self::new(document.rules)?;
        for overlap in table.overlapping_rules() {
            tracing::warn!(
                measure = %overlap.measure,
                unit = %overlap.unit,
                first = %overlap.first,
                second = %overlap.second,
                "overlapping conversion windows; the first rule wins"
            );
        }
        Ok(table)
    }

    /// Read and parse a table from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Config` if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            CoreError::Config(format!(
                "failed to read conversion table {}: {e}",
                path.display()
            ))
        })?;
        let table = Self::from_json_str(&json)?;
        tracing::info!(path = %path.display(), rules = table.len(), "loaded conversion table");
        Ok(table)
    }

    #[must_use]
    pub fn rules(&self) -> &[ConversionRule] {
        &self.rules
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Every pair of rules whose windows intersect for the same measure/unit,
    /// in table order.
    #[must_use]
    pub fn overlapping_rules(&self) -> Vec<RuleOverlap> {
        let mut overlaps = Vec::new();
        for (i, first) in self.rules.iter().enumerate() {
            for second in &self.rules[i + 1..] {
                if first.overlaps(second) {
                    overlaps.push(RuleOverlap {
                        measure: first.measure.clone(),
                        unit: first.unit.clone(),
                        first: first.id.clone(),
                        second: second.id.clone(),
                    });
                }
            }
        }
        overlaps
    }
}

fn validate_rule(index: usize, rule: &ConversionRule) -> Result<(), CoreError> {
    if !rule.factor.is_finite() {
        return Err(CoreError::Config(format!(
            "conversion rule #{index} ('{}') has a non-finite factor",
            rule.id
        )));
    }
    if rule.period_end < rule.period_start {
        return Err(CoreError::Config(format!(
            "conversion rule #{index} ('{}') ends before it starts",
            rule.id
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    const TABLE: &str = r#"{
        "co2eConversion": [
            {"id": "grid-2022", "measure": "electricity", "unit": "kWh",
             "periodStart": "2022-01-01", "periodEnd": "2022-12-31T23:59:59", "factor": 0.193},
            {"id": "grid-2023", "measure": "electricity", "unit": "kWh",
             "periodStart": "2023-01-01", "periodEnd": "2023-12-31T23:59:59", "factor": 0.233},
            {"id": "gas-2023", "measure": "gas", "unit": "kWh",
             "periodStart": "2023-01-01", "periodEnd": "2023-12-31T23:59:59", "factor": 0.183}
        ]
    }"#;

    #[test]
    fn parses_rules_in_source_order() {
        let table = ConversionTable::from_json_str(TABLE).unwrap();
        let ids: Vec<&str> = table.rules().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["grid-2022", "grid-2023", "gas-2023"]);
        assert!((table.rules()[1].factor - 0.233).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_rule_list_is_valid() {
        let table = ConversionTable::from_json_str(r#"{"co2eConversion": []}"#).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn missing_rule_list_is_config_error() {
        let err = ConversionTable::from_json_str(r#"{"rules": []}"#).unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));
    }

    #[test]
    fn missing_factor_is_config_error() {
        let json = r#"{"co2eConversion": [
            {"id": "x", "measure": "gas", "unit": "kWh",
             "periodStart": "2023-01-01", "periodEnd": "2023-12-31"}
        ]}"#;
        let err = ConversionTable::from_json_str(json).unwrap_err();
        assert!(matches!(err, CoreError::Config(msg) if msg.contains("factor")));
    }

    #[test]
    fn bad_timestamp_is_config_error() {
        let json = r#"{"co2eConversion": [
            {"id": "x", "measure": "gas", "unit": "kWh",
             "periodStart": "soon", "periodEnd": "2023-12-31", "factor": 1.0}
        ]}"#;
        assert!(matches!(
            ConversionTable::from_json_str(json),
            Err(CoreError::Config(_))
        ));
    }

    #[test]
    fn inverted_window_is_config_error() {
        let json = r#"{"co2eConversion": [
            {"id": "backwards", "measure": "gas", "unit": "kWh",
             "periodStart": "2023-12-31", "periodEnd": "2023-01-01", "factor": 1.0}
        ]}"#;
        let err = ConversionTable::from_json_str(json).unwrap_err();
        assert!(err.to_string().contains("backwards"));
    }

    #[test]
    fn disjoint_windows_do_not_overlap() {
        let table = ConversionTable::from_json_str(TABLE).unwrap();
        assert!(table.overlapping_rules().is_empty());
    }

    #[test]
    fn overlapping_windows_are_reported_not_rejected() {
        let json = r#"{"co2eConversion": [
            {"id": "a", "measure": "gas", "unit": "kWh",
             "periodStart": "2023-01-01", "periodEnd": "2023-12-31", "factor": 1.0},
            {"id": "b", "measure": "gas", "unit": "kWh",
             "periodStart": "2023-06-01", "periodEnd": "2024-05-31", "factor": 2.0},
            {"id": "c", "measure": "gas", "unit": "m3",
             "periodStart": "2023-01-01", "periodEnd": "2023-12-31", "factor": 3.0}
        ]}"#;
        let table = ConversionTable::from_json_str(json).unwrap();
        assert_eq!(
            table.overlapping_rules(),
            vec![RuleOverlap {
                measure: "gas".into(),
                unit: "kWh".into(),
                first: "a".into(),
                second: "b".into(),
            }]
        );
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(TABLE.as_bytes()).unwrap();
        let table = ConversionTable::load(file.path()).unwrap();
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn load_missing_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ConversionTable::load(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, CoreError::Config(msg) if msg.contains("absent.json")));
    }
}
