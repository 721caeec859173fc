//! Reporting entity resolution.
//!
//! First sight of an id creates a bare entity row and then republishes the
//! entity index. This is the only path that changes the index.

use ccm_core::entities::ReportingEntity;
use ccm_db::error::DatabaseError;
use ccm_db::service::CcmService;
use ccm_publish::Publisher;

use crate::IngestError;

/// A resolved entity and whether this call created it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnsuredEntity {
    pub entity: ReportingEntity,
    pub created: bool,
}

pub struct EntityRegistry<'a> {
    svc: &'a CcmService,
    publisher: &'a Publisher,
}

impl<'a> EntityRegistry<'a> {
    pub const fn new(svc: &'a CcmService, publisher: &'a Publisher) -> Self {
        Self { svc, publisher }
    }

    /// Load the entity `id`, creating it if unknown.
    ///
    /// Existing entities are returned with their stored attributes and never
    /// trigger publication. When several invocations race to create the same
    /// id, only the one whose insert lands republishes the index.
    ///
    /// # Errors
    ///
    /// Returns `IngestError::Database` if the lookup or insert fails and
    /// `IngestError::Publish` if the index cannot be written. The entity row
    /// stays committed in the latter case.
    pub async fn ensure_entity(&self, id: &str) -> Result<EnsuredEntity, IngestError> {
        if let Some(entity) = self.svc.get_reporting_entity(id).await? {
            return Ok(EnsuredEntity {
                entity,
                created: false,
            });
        }

        let created = self.svc.insert_reporting_entity(id).await?;
        if created {
            tracing::info!(entity = id, "new reporting entity");
            self.publisher.publish_entity_index(self.svc).await?;
        }

        let entity = self
            .svc
            .get_reporting_entity(id)
            .await?
            .ok_or(DatabaseError::NoResult)?;
        Ok(EnsuredEntity { entity, created })
    }
}
