//! # ccm-db
//!
//! libSQL persistence for the carbon map processor.
//!
//! Holds three tables: `reporting_entities`, `readings`, and `emissions`.
//! Readings and emissions share the natural key
//! `(reporting_entity, period_start, period_end, measure)` and are written
//! with `INSERT ... ON CONFLICT ... DO UPDATE`, so concurrent invocations
//! touching the same key are serialized by the store rather than by the
//! application.
//!
//! Uses the `libsql` crate: a local file (or `:memory:` in tests), or a
//! remote database over the Hrana protocol.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod service;
pub(crate) mod test_support;

use error::DatabaseError;
use libsql::Builder;

/// Database handle: a libSQL database and its single connection.
pub struct CcmDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
    remote: bool,
}

impl CcmDb {
    /// Open a local database file (or `":memory:"`).
    ///
    /// Runs migrations automatically on open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Connection` if the database cannot be opened and
    /// `DatabaseError::Migration` if the schema cannot be applied.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path)
            .build()
            .await
            .map_err(|e| DatabaseError::Connection(format!("{path}: {e}")))?;
        let conn = db
            .connect()
            .map_err(|e| DatabaseError::Connection(format!("{path}: {e}")))?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let ccm_db = Self {
            db,
            conn,
            remote: false,
        };
        ccm_db.run_migrations().await?;
        tracing::debug!(path, "opened local database");
        Ok(ccm_db)
    }

    /// Open a remote libSQL database.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Connection` if the database is unreachable and
    /// `DatabaseError::Migration` if the schema cannot be applied.
    pub async fn open_remote(url: &str, auth_token: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_remote(url.to_string(), auth_token.to_string())
            .build()
            .await
            .map_err(|e| DatabaseError::Connection(format!("{url}: {e}")))?;
        let conn = db
            .connect()
            .map_err(|e| DatabaseError::Connection(format!("{url}: {e}")))?;

        let ccm_db = Self {
            db,
            conn,
            remote: true,
        };
        ccm_db.run_migrations().await?;
        tracing::debug!(url, "opened remote database");
        Ok(ccm_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    #[must_use]
    pub const fn is_remote(&self) -> bool {
        self.remote
    }
}
