//! Serialization of published artifacts.
//!
//! Output is compact JSON. Rendering the same value twice yields the same
//! bytes, which is what makes republication idempotent.

use ccm_core::entities::EntitySummary;

use crate::PublishError;

/// `index.json`: a JSON array of entity ids.
pub fn render_index(ids: &[String]) -> Result<Vec<u8>, PublishError> {
    Ok(serde_json::to_vec(ids)?)
}

/// `{id}.json`: entity attributes plus its `emissions` array.
pub fn render_summary(summary: &EntitySummary) -> Result<Vec<u8>, PublishError> {
    Ok(serde_json::to_vec(summary)?)
}
