//! JSON upload decoding.
//!
//! A structured upload is a single object `{ "id": ..., "emissions": [...] }`.
//! A record without an id or without an emissions list is skipped, not
//! rejected; a malformed measurement inside the list fails the whole file.

use ccm_core::entities::Measurement;
use serde::Deserialize;

use crate::IngestError;
use crate::batch::{EntityBatch, ParsedFile};

/// Upload shape with both top-level fields optional.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    emissions: Option<Vec<Measurement>>,
}

/// Decode a structured upload.
///
/// # Errors
///
/// Returns `IngestError::Parse` if the body is not a JSON object or any
/// measurement is missing a field or has an unparsable timestamp.
pub fn parse_structured(bytes: &[u8]) -> Result<ParsedFile, IngestError> {
    let value: serde_json::Value = serde_json::from_slice(bytes)
        .map_err(|e| IngestError::Parse(format!("invalid JSON: {e}")))?;
    if !value.is_object() {
        return Err(IngestError::Parse("expected a JSON object".into()));
    }
    let record: RawRecord = serde_json::from_value(value)
        .map_err(|e| IngestError::Parse(format!("invalid emissions record: {e}")))?;

    match record {
        RawRecord {
            id: Some(id),
            emissions: Some(measurements),
        } if !id.trim().is_empty() => Ok(ParsedFile {
            batches: vec![EntityBatch {
                entity_id: id,
                measurements,
            }],
            skipped: 0,
        }),
        RawRecord { id, emissions } => {
            tracing::warn!(
                has_id = id.is_some_and(|id| !id.trim().is_empty()),
                has_emissions = emissions.is_some(),
                "structured record skipped"
            );
            Ok(ParsedFile {
                batches: Vec::new(),
                skipped: 1,
            })
        }
    }
}
