//! Conversion table source.

use serde::{Deserialize, Serialize};

fn default_table_path() -> String {
    String::from("co2e.json")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConversionConfig {
    /// JSON file holding the `co2eConversion` rule list.
    #[serde(default = "default_table_path")]
    pub table_path: String,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            table_path: default_table_path(),
        }
    }
}
