//! Publication error types.

use ccm_db::error::DatabaseError;

/// Errors from rendering or writing published artifacts.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    /// Reading entities or emissions from the store failed.
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// An artifact could not be serialized.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The object store rejected a read or write.
    #[error("Object store error: {0}")]
    ObjectStore(#[from] object_store::Error),

    /// An entity id does not form a valid object key.
    #[error("Invalid object key '{key}': {source}")]
    InvalidKey {
        key: String,
        source: object_store::path::Error,
    },

    /// The storage configuration cannot produce a bucket handle.
    #[error("Storage misconfigured: {0}")]
    Config(String),

    /// I/O error (local bucket directories).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
