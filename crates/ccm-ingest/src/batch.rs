//! Decoded file contents: measurements grouped by reporting entity.

use ccm_core::entities::Measurement;

/// All measurements of one reporting entity from one file, in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityBatch {
    pub entity_id: String,
    pub measurements: Vec<Measurement>,
}

/// A decoded input file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedFile {
    /// Batches in order of each entity's first appearance.
    pub batches: Vec<EntityBatch>,
    /// Records dropped for lacking an entity id or measurement list.
    pub skipped: usize,
}

impl ParsedFile {
    #[must_use]
    pub fn measurement_count(&self) -> usize {
        self.batches.iter().map(|b| b.measurements.len()).sum()
    }

    /// Append `measurement` to the batch for `entity_id`, opening one if needed.
    pub fn push(&mut self, entity_id: &str, measurement: Measurement) {
        if let Some(batch) = self.batches.iter_mut().find(|b| b.entity_id == entity_id) {
            batch.measurements.push(measurement);
        } else {
            self.batches.push(EntityBatch {
                entity_id: entity_id.to_string(),
                measurements: vec![measurement],
            });
        }
    }
}
