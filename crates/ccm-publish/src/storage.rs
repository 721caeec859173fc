//! Bucket handles built from [`StorageConfig`].
//!
//! The same factory opens the upload bucket named by an event and the
//! output bucket receiving published artifacts.

use std::path::Path;
use std::sync::Arc;

use ccm_config::{StorageBackend, StorageConfig};
use object_store::ObjectStore;
use object_store::aws::AmazonS3Builder;
use object_store::local::LocalFileSystem;

use crate::PublishError;

/// Open `bucket` on the configured backend.
///
/// For S3, credentials and region not set in `config` fall back to the
/// standard `AWS_*` environment variables.
///
/// # Errors
///
/// Returns `PublishError::Config` for an empty bucket name, `PublishError::Io`
/// if a local bucket directory cannot be created, and
/// `PublishError::ObjectStore` if the client cannot be built.
pub fn open_bucket(config: &StorageConfig, bucket: &str) -> Result<Arc<dyn ObjectStore>, PublishError> {
    if bucket.is_empty() {
        return Err(PublishError::Config("bucket name is empty".into()));
    }

    match config.backend {
        StorageBackend::S3 => {
            let mut builder = AmazonS3Builder::from_env()
                .with_bucket_name(bucket)
                .with_region(&config.region)
                .with_allow_http(config.allow_http);
            if !config.endpoint.is_empty() {
                builder = builder.with_endpoint(&config.endpoint);
            }
            if config.has_static_credentials() {
                builder = builder
                    .with_access_key_id(&config.access_key_id)
                    .with_secret_access_key(&config.secret_access_key);
            }
            tracing::debug!(bucket, region = %config.region, "opening s3 bucket");
            Ok(Arc::new(builder.build()?))
        }
        StorageBackend::Local => {
            let root = Path::new(&config.local_root).join(bucket);
            std::fs::create_dir_all(&root)?;
            tracing::debug!(bucket, root = %root.display(), "opening local bucket");
            Ok(Arc::new(LocalFileSystem::new_with_prefix(&root)?))
        }
    }
}
