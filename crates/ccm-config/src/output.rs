//! Destination of the published entity index and summaries.

use serde::{Deserialize, Serialize};

fn default_prefix() -> String {
    String::from("reporting_entities")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Bucket receiving published artifacts.
    #[serde(default)]
    pub bucket: String,

    /// Key prefix for `index.json` and `{id}.json`.
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            bucket: String::new(),
            prefix: default_prefix(),
        }
    }
}

impl OutputConfig {
    pub fn is_configured(&self) -> bool {
        !self.bucket.is_empty()
    }
}
