//! Retrieval of uploaded objects.

use object_store::ObjectStore;
use object_store::path::Path;

use crate::IngestError;

/// Fetch the full body of `key` from `store`, which holds `bucket`.
///
/// # Errors
///
/// Returns `IngestError::NotFound` or `IngestError::AccessDenied` for those
/// store outcomes, `IngestError::ObjectStore` for anything else.
pub async fn fetch_object(
    store: &dyn ObjectStore,
    bucket: &str,
    key: &str,
) -> Result<Vec<u8>, IngestError> {
    let location = Path::parse(key).map_err(|e| IngestError::ObjectStore(e.into()))?;
    let result = match store.get(&location).await {
        Ok(result) => result,
        Err(e) => return Err(classify(e, bucket, key)),
    };
    let bytes = result.bytes().await.map_err(|e| classify(e, bucket, key))?;
    tracing::debug!(bucket, key, size = bytes.len(), "fetched object");
    Ok(bytes.to_vec())
}

fn classify(error: object_store::Error, bucket: &str, key: &str) -> IngestError {
    match error {
        object_store::Error::NotFound { .. } => IngestError::NotFound {
            bucket: bucket.to_string(),
            key: key.to_string(),
        },
        object_store::Error::PermissionDenied { .. } | object_store::Error::Unauthenticated { .. } => {
            IngestError::AccessDenied {
                bucket: bucket.to_string(),
                key: key.to_string(),
            }
        }
        other => IngestError::ObjectStore(other),
    }
}
