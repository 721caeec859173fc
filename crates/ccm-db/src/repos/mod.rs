//! Repository modules for the carbon map store.
//!
//! Each module adds methods to `CcmService` via `impl CcmService` blocks.

pub mod emissions;
pub mod entities;
pub mod measurements;
pub mod readings;
