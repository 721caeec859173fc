//! Republication of the entity index and per-entity summaries.
//!
//! Both artifacts are full overwrites regenerated from the store, never
//! incremental edits of the previous object.

use std::sync::Arc;

use ccm_config::{OutputConfig, StorageConfig};
use ccm_core::entities::{EntitySummary, ReportingEntity};
use ccm_db::service::CcmService;
use object_store::path::Path;
use object_store::{ObjectStore, PutPayload};

use crate::render::{render_index, render_summary};
use crate::storage::open_bucket;
use crate::PublishError;

const INDEX_FILE: &str = "index.json";

/// Writes published artifacts under a key prefix of one bucket.
#[derive(Debug, Clone)]
pub struct Publisher {
    store: Arc<dyn ObjectStore>,
    prefix: Path,
}

impl Publisher {
    pub fn new(store: Arc<dyn ObjectStore>, prefix: &str) -> Self {
        Self {
            store,
            prefix: Path::from(prefix),
        }
    }

    /// Open the configured output bucket.
    ///
    /// # Errors
    ///
    /// Returns `PublishError` if the bucket cannot be opened.
    pub fn from_config(storage: &StorageConfig, output: &OutputConfig) -> Result<Self, PublishError> {
        let store = open_bucket(storage, &output.bucket)?;
        Ok(Self::new(store, &output.prefix))
    }

    pub fn store(&self) -> &Arc<dyn ObjectStore> {
        &self.store
    }

    /// `{prefix}/index.json`
    pub fn index_path(&self) -> Path {
        self.prefix.child(INDEX_FILE)
    }

    /// `{prefix}/{id}.json`
    ///
    /// The id is used verbatim, so `/` in an id becomes a key delimiter.
    ///
    /// # Errors
    ///
    /// Returns `PublishError::InvalidKey` if the id yields an empty, `.` or
    /// `..` path segment.
    pub fn summary_path(&self, entity_id: &str) -> Result<Path, PublishError> {
        let key = if self.prefix.as_ref().is_empty() {
            format!("{entity_id}.json")
        } else {
            format!("{}/{entity_id}.json", self.prefix)
        };
        Path::parse(&key).map_err(|source| PublishError::InvalidKey { key, source })
    }

    /// Overwrite the index with every entity id in the store, ascending.
    ///
    /// Returns the published ids.
    ///
    /// # Errors
    ///
    /// Returns `PublishError` if the store read or the object write fails.
    pub async fn publish_entity_index(&self, svc: &CcmService) -> Result<Vec<String>, PublishError> {
        let ids = svc.list_reporting_entity_ids().await?;
        let body = render_index(&ids)?;
        let path = self.index_path();
        self.store.put(&path, PutPayload::from(body)).await?;
        tracing::info!(path = %path, entities = ids.len(), "published entity index");
        Ok(ids)
    }

    /// Overwrite the summary of `entity` with its attributes and every stored
    /// emission.
    ///
    /// # Errors
    ///
    /// Returns `PublishError` if the store read or the object write fails, or if
    /// the entity id cannot form an object key.
    pub async fn publish_entity_summary(
        &self,
        svc: &CcmService,
        entity: &ReportingEntity,
    ) -> Result<EntitySummary, PublishError> {
        let emissions = svc.list_emissions_for_entity(&entity.id).await?;
        let summary = EntitySummary::new(entity.clone(), &emissions);
        let body = render_summary(&summary)?;
        let path = self.summary_path(&entity.id)?;
        self.store.put(&path, PutPayload::from(body)).await?;
        tracing::info!(
            path = %path,
            emissions = summary.emissions.len(),
            "published entity summary"
        );
        Ok(summary)
    }
}
