//! Errors raised while loading or validating a [`crate::CcmConfig`].

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A layer (defaults, TOML file, `CCM_*` env) could not be merged or
    /// extracted into the config struct.
    #[error("Failed to load ccm configuration: {0}")]
    Figment(#[from] figment::Error),

    /// `output` has no bucket or `conversion` has no table path.
    #[error("ccm section '{section}' is required but not set")]
    NotConfigured { section: String },

    /// A field is present but unusable, e.g. a remote `database.url` without
    /// its `auth_token`.
    #[error("ccm setting '{field}' is invalid: {reason}")]
    InvalidValue { field: String, reason: String },
}
