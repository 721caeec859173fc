use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A tracked subject (facility, site) whose usage and emissions are recorded.
///
/// Created with only `id` populated the first time an upload names it. The
/// descriptive attributes are maintained outside this processor and are never
/// mutated here. Unset attributes are omitted from serialized output.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReportingEntity {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// OpenStreetMap element reference, e.g. `way/123456`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub osm_entity: Option<String>,
    /// Path (relative to the data root) of the entity's GeoJSON outline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geojson: Option<String>,
}

impl ReportingEntity {
    /// An entity carrying only its id, as stored on first sight.
    #[must_use]
    pub fn bare(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            osm_entity: None,
            geojson: None,
        }
    }
}
