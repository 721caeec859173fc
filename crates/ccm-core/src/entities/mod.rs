//! Entity structs for the carbon map domain.
//!
//! `Reading`, `Emission` and `ReportingEntity` map to tables in the libSQL
//! store. `EntitySummary` is the published per-entity document. All structs
//! derive `Serialize`, `Deserialize`, and `JsonSchema`; JSON field names are
//! camelCase to match the upload and publication formats.

mod conversion_rule;
mod emission;
mod measurement;
mod reading;
mod reporting_entity;
mod summary;

pub use conversion_rule::ConversionRule;
pub use emission::Emission;
pub use measurement::Measurement;
pub use reading::{Reading, ReadingKey};
pub use reporting_entity::ReportingEntity;
pub use summary::{EntitySummary, SummaryEmission};
