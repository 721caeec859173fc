//! Reporting entity repository.
//!
//! Entities are created bare by the processor. Display attributes (name,
//! OSM reference, geometry location) are maintained elsewhere and only read
//! here.

use ccm_core::entities::ReportingEntity;

use crate::error::DatabaseError;
use crate::helpers::get_opt_string;
use crate::service::CcmService;

fn row_to_entity(row: &libsql::Row) -> Result<ReportingEntity, DatabaseError> {
    Ok(ReportingEntity {
        id: row.get::<String>(0)?,
        name: get_opt_string(row, 1)?,
        osm_entity: get_opt_string(row, 2)?,
        geojson: get_opt_string(row, 3)?,
    })
}

impl CcmService {
    pub async fn get_reporting_entity(
        &self,
        id: &str,
    ) -> Result<Option<ReportingEntity>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT id, name, osm_entity, geojson FROM reporting_entities WHERE id = ?1",
                [id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_entity(&row)?)),
            None => Ok(None),
        }
    }

    /// Register a bare entity.
    ///
    /// Returns `true` only for the call that actually created the row; a
    /// concurrent or repeated insert of the same id returns `false`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the statement fails.
    pub async fn insert_reporting_entity(&self, id: &str) -> Result<bool, DatabaseError> {
        let affected = self
            .db()
            .conn()
            .execute(
                "INSERT INTO reporting_entities (id) VALUES (?1) ON CONFLICT(id) DO NOTHING",
                [id],
            )
            .await?;
        Ok(affected == 1)
    }

    /// All entity ids, ascending.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_reporting_entity_ids(&self) -> Result<Vec<String>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query("SELECT id FROM reporting_entities ORDER BY id", ())
            .await?;
        let mut ids = Vec::new();
        while let Some(row) = rows.next().await? {
            ids.push(row.get::<String>(0)?);
        }
        Ok(ids)
    }
}
