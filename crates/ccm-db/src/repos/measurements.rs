//! Paired reading + emission writes.
//!
//! Both upserts for one measurement run in a single transaction: either
//! both rows change or neither does.

use ccm_core::conversion::Conversion;
use ccm_core::entities::Measurement;

use super::emissions::upsert_emission_on;
use super::readings::upsert_reading_on;
use crate::error::DatabaseError;
use crate::service::CcmService;

impl CcmService {
    /// Persist one measurement for `reporting_entity` as a reading and its
    /// derived emission.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if either upsert fails. The transaction is
    /// rolled back first, so no partial pair is ever visible.
    pub async fn record_measurement(
        &self,
        reporting_entity: &str,
        measurement: &Measurement,
        conversion: Option<&Conversion>,
    ) -> Result<(), DatabaseError> {
        let key = measurement.key_for(reporting_entity);
        let tx = self.db().conn().transaction().await?;

        let written = async {
            upsert_reading_on(&tx, &key, &measurement.unit, measurement.value).await?;
            upsert_emission_on(&tx, &key, &measurement.unit, measurement.value, conversion).await
        }
        .await;

        match written {
            Ok(()) => {
                tx.commit().await?;
                tracing::debug!(
                    reporting_entity,
                    measure = %measurement.measure,
                    converted = conversion.is_some(),
                    "measurement recorded"
                );
                Ok(())
            }
            Err(e) => {
                if let Err(rollback) = tx.rollback().await {
                    tracing::warn!(error = %rollback, "rollback after failed measurement write failed");
                }
                Err(e)
            }
        }
    }
}
