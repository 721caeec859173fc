//! Emission store: one derived emission per reading key.
//!
//! An emission without a matching conversion rule is stored with NULL
//! `kgco2e` and `co2e_calculation`. A later write clears both if the
//! rule no longer matches.

use ccm_core::conversion::Conversion;
use ccm_core::entities::{Emission, ReadingKey};

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_stored_timestamp, sql_timestamp};
use crate::service::CcmService;

const UPSERT_EMISSION: &str = "INSERT INTO emissions
     (reporting_entity, period_start, period_end, measure, unit, value, kgco2e, co2e_calculation)
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
     ON CONFLICT(reporting_entity, period_start, period_end, measure)
     DO UPDATE SET unit = ?5, value = ?6, kgco2e = ?7, co2e_calculation = ?8";

const EMISSION_COLUMNS: &str =
    "reporting_entity, period_start, period_end, measure, unit, value, kgco2e, co2e_calculation";

fn row_to_emission(row: &libsql::Row) -> Result<Emission, DatabaseError> {
    Ok(Emission {
        reporting_entity: row.get::<String>(0)?,
        period_start: parse_stored_timestamp(&row.get::<String>(1)?)?,
        period_end: parse_stored_timestamp(&row.get::<String>(2)?)?,
        measure: row.get::<String>(3)?,
        unit: row.get::<String>(4)?,
        value: row.get::<f64>(5)?,
        kg_co2e: row.get::<Option<f64>>(6)?,
        co2e_calculation: get_opt_string(row, 7)?,
    })
}

pub(crate) async fn upsert_emission_on(
    conn: &libsql::Connection,
    key: &ReadingKey,
    unit: &str,
    value: f64,
    conversion: Option<&Conversion>,
) -> Result<(), DatabaseError> {
    conn.execute(
        UPSERT_EMISSION,
        libsql::params![
            key.reporting_entity.as_str(),
            sql_timestamp(&key.period_start),
            sql_timestamp(&key.period_end),
            key.measure.as_str(),
            unit,
            value,
            conversion.map(|c| c.kg_co2e),
            conversion.map(|c| c.calculation_id.clone())
        ],
    )
    .await?;
    Ok(())
}

impl CcmService {
    /// Insert an emission, or overwrite every non-key column if the key exists.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the statement fails.
    pub async fn upsert_emission(
        &self,
        key: &ReadingKey,
        unit: &str,
        value: f64,
        conversion: Option<&Conversion>,
    ) -> Result<(), DatabaseError> {
        upsert_emission_on(self.db().conn(), key, unit, value, conversion).await
    }

    pub async fn get_emission(&self, key: &ReadingKey) -> Result<Option<Emission>, DatabaseError> {
        let sql = format!(
            "SELECT {EMISSION_COLUMNS} FROM emissions
             WHERE reporting_entity = ?1 AND period_start = ?2 AND period_end = ?3 AND measure = ?4"
        );
        let mut rows = self
            .db()
            .conn()
            .query(
                &sql,
                libsql::params![
                    key.reporting_entity.as_str(),
                    sql_timestamp(&key.period_start),
                    sql_timestamp(&key.period_end),
                    key.measure.as_str()
                ],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_emission(&row)?)),
            None => Ok(None),
        }
    }

    /// All emissions for an entity, ordered by `period_start`, then
    /// `period_end`, then `measure`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or a stored window is corrupt.
    pub async fn list_emissions_for_entity(
        &self,
        reporting_entity: &str,
    ) -> Result<Vec<Emission>, DatabaseError> {
        let sql = format!(
            "SELECT {EMISSION_COLUMNS} FROM emissions WHERE reporting_entity = ?1
             ORDER BY period_start, period_end, measure"
        );
        let mut rows = self.db().conn().query(&sql, [reporting_entity]).await?;
        let mut emissions = Vec::new();
        while let Some(row) = rows.next().await? {
            emissions.push(row_to_emission(&row)?);
        }
        Ok(emissions)
    }
}
