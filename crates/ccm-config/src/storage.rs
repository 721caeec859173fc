//! Object storage configuration shared by input and output buckets.

use serde::{Deserialize, Serialize};

fn default_region() -> String {
    String::from("eu-west-2")
}

fn default_local_root() -> String {
    String::from("./buckets")
}

/// Which object store implementation backs bucket access.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// S3-compatible API (AWS, R2, MinIO).
    #[default]
    S3,
    /// Local directories, one per bucket under `local_root`.
    Local,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// S3 region.
    #[serde(default = "default_region")]
    pub region: String,

    /// Custom endpoint URL. If empty, the AWS endpoint for `region` is used.
    #[serde(default)]
    pub endpoint: String,

    /// Access key ID. If empty, credentials come from the environment.
    #[serde(default)]
    pub access_key_id: String,

    /// Secret access key.
    #[serde(default)]
    pub secret_access_key: String,

    /// Permit plain HTTP endpoints (local MinIO).
    #[serde(default)]
    pub allow_http: bool,

    /// Root directory for the `local` backend.
    #[serde(default = "default_local_root")]
    pub local_root: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            region: default_region(),
            endpoint: String::new(),
            access_key_id: String::new(),
            secret_access_key: String::new(),
            allow_http: false,
            local_root: default_local_root(),
        }
    }
}

impl StorageConfig {
    /// Whether explicit static credentials are configured.
    pub fn has_static_credentials(&self) -> bool {
        !self.access_key_id.is_empty() && !self.secret_access_key.is_empty()
    }
}
