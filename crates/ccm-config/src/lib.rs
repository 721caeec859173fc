//! # ccm-config
//!
//! Layered configuration loading for the carbon map processor using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`CCM_*` prefix, `__` as separator)
//! 2. Project-level `ccm.toml`
//! 3. User-level `~/.config/ccm/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `CCM_OUTPUT__BUCKET` -> `output.bucket`,
//! `CCM_DATABASE__AUTH_TOKEN` -> `database.auth_token`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use ccm_config::CcmConfig;
//!
//! let config = CcmConfig::load_with_dotenv().expect("config");
//! config.validate().expect("output bucket must be set");
//! println!("publishing to {}", config.output.bucket);
//! ```

mod conversion;
mod database;
mod error;
mod output;
mod storage;

pub use conversion::ConversionConfig;
pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use output::OutputConfig;
pub use storage::{StorageBackend, StorageConfig};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Project-local config file name.
pub const PROJECT_CONFIG_FILE: &str = "ccm.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CcmConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub conversion: ConversionConfig,
}

impl CcmConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] for `.env` support.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load `.env` from the current directory (if present), then [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can layer additional providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = PathBuf::from(PROJECT_CONFIG_FILE);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("CCM_").split("__"))
    }

    /// Check the settings the processor cannot start without.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotConfigured` when no output bucket is set and
    /// `ConfigError::InvalidValue` for a half-configured remote database.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.output.is_configured() {
            return Err(ConfigError::NotConfigured {
                section: "output".into(),
            });
        }
        if self.database.url.is_empty() != self.database.auth_token.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "database".into(),
                reason: "url and auth_token must be set together".into(),
            });
        }
        if !self.database.is_remote() && self.database.path.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "database.path".into(),
                reason: "a local database path is required without a remote url".into(),
            });
        }
        if self.conversion.table_path.is_empty() {
            return Err(ConfigError::NotConfigured {
                section: "conversion".into(),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("ccm").join("config.toml"))
    }
}
