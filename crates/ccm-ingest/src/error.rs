//! Ingestion error types.

use ccm_core::errors::CoreError;
use ccm_db::error::DatabaseError;
use ccm_publish::PublishError;

/// Errors that abort processing of one input file.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A store write or read failed. Earlier committed measurements remain.
    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error(transparent)]
    Publish(#[from] PublishError),

    /// The input object does not exist.
    #[error("Object not found: s3://{bucket}/{key}")]
    NotFound { bucket: String, key: String },

    /// The input object exists but may not be read with the current credentials.
    #[error("Access denied: s3://{bucket}/{key}")]
    AccessDenied { bucket: String, key: String },

    /// Any other object store failure while fetching input.
    #[error("Object store error: {0}")]
    ObjectStore(#[from] object_store::Error),

    /// The file body is not valid for its declared format.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The trigger event does not name an object.
    #[error("Invalid event: {0}")]
    InvalidEvent(String),
}
