//! Service layer exposing the reading store and entity repository.
//!
//! `CcmService` wraps `CcmDb` (raw database access). All repo methods are
//! implemented as `impl CcmService` blocks under [`crate::repos`].

use crate::CcmDb;
use crate::error::DatabaseError;

/// Store operations used by the processing pipeline and publication.
pub struct CcmService {
    db: CcmDb,
}

impl CcmService {
    /// Create a service over a local database.
    ///
    /// # Arguments
    ///
    /// * `db_path`: Path to the libSQL database file, or `":memory:"` for tests.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or migrated.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        Ok(Self {
            db: CcmDb::open_local(db_path).await?,
        })
    }

    /// Create a service over a remote libSQL database.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Connection` if the database is unreachable.
    pub async fn new_remote(url: &str, auth_token: &str) -> Result<Self, DatabaseError> {
        Ok(Self {
            db: CcmDb::open_remote(url, auth_token).await?,
        })
    }

    /// Create from an existing `CcmDb`.
    #[must_use]
    pub const fn from_db(db: CcmDb) -> Self {
        Self { db }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &CcmDb {
        &self.db
    }
}
