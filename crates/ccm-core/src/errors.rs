//! Cross-cutting error types for the carbon map processor.
//!
//! Domain-specific errors (`DatabaseError`, `PublishError`, `IngestError`) are
//! defined in their respective crates. The binary converges them with `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any `ccm` crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Startup configuration is malformed or incomplete (e.g. the conversion table).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data failed validation (timestamp format, field constraints).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
