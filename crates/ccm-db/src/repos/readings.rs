//! Reading store: raw usage figures keyed by entity, window and measure.

use ccm_core::entities::{Reading, ReadingKey};

use crate::error::DatabaseError;
use crate::helpers::{parse_stored_timestamp, sql_timestamp};
use crate::service::CcmService;

const UPSERT_READING: &str =
    "INSERT INTO readings (reporting_entity, period_start, period_end, measure, unit, value)
     VALUES (?1, ?2, ?3, ?4, ?5, ?6)
     ON CONFLICT(reporting_entity, period_start, period_end, measure)
     DO UPDATE SET unit = ?5, value = ?6";

fn row_to_reading(row: &libsql::Row) -> Result<Reading, DatabaseError> {
    Ok(Reading {
        reporting_entity: row.get::<String>(0)?,
        period_start: parse_stored_timestamp(&row.get::<String>(1)?)?,
        period_end: parse_stored_timestamp(&row.get::<String>(2)?)?,
        measure: row.get::<String>(3)?,
        unit: row.get::<String>(4)?,
        value: row.get::<f64>(5)?,
    })
}

/// Insert-or-overwrite on the given connection (or transaction, via deref).
pub(crate) async fn upsert_reading_on(
    conn: &libsql::Connection,
    key: &ReadingKey,
    unit: &str,
    value: f64,
) -> Result<(), DatabaseError> {
    conn.execute(
        UPSERT_READING,
        libsql::params![
            key.reporting_entity.as_str(),
            sql_timestamp(&key.period_start),
            sql_timestamp(&key.period_end),
            key.measure.as_str(),
            unit,
            value
        ],
    )
    .await?;
    Ok(())
}

impl CcmService {
    /// Insert a reading, or overwrite `unit` and `value` if the key exists.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the statement fails, including when the
    /// reporting entity is unknown.
    pub async fn upsert_reading(
        &self,
        key: &ReadingKey,
        unit: &str,
        value: f64,
    ) -> Result<(), DatabaseError> {
        upsert_reading_on(self.db().conn(), key, unit, value).await
    }

    pub async fn get_reading(&self, key: &ReadingKey) -> Result<Option<Reading>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT reporting_entity, period_start, period_end, measure, unit, value
                 FROM readings
                 WHERE reporting_entity = ?1 AND period_start = ?2 AND period_end = ?3 AND measure = ?4",
                libsql::params![
                    key.reporting_entity.as_str(),
                    sql_timestamp(&key.period_start),
                    sql_timestamp(&key.period_end),
                    key.measure.as_str()
                ],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_reading(&row)?)),
            None => Ok(None),
        }
    }

    pub async fn list_readings_for_entity(
        &self,
        reporting_entity: &str,
    ) -> Result<Vec<Reading>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT reporting_entity, period_start, period_end, measure, unit, value
                 FROM readings WHERE reporting_entity = ?1
                 ORDER BY period_start, period_end, measure",
                [reporting_entity],
            )
            .await?;
        let mut readings = Vec::new();
        while let Some(row) = rows.next().await? {
            readings.push(row_to_reading(&row)?);
        }
        Ok(readings)
    }
}
