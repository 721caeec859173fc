//! # ccm-ingest
//!
//! Turns one uploaded object into store writes and republished artifacts.
//!
//! - [`format`] decides how a key is decoded from its extension
//! - [`structured`] and [`tabular`] decode JSON and CSV uploads into
//!   per-entity batches
//! - [`event`] decodes object-store notifications into a bucket and key
//! - [`registry`] creates reporting entities on first sight
//! - [`pipeline`] runs the per-file state machine

pub mod batch;
mod error;
pub mod event;
pub mod format;
pub mod pipeline;
pub mod registry;
pub mod source;
pub mod structured;
pub mod tabular;

pub use error::IngestError;
pub use event::{ObjectLocation, StorageEvent};
pub use format::{DetectedFormat, InputFormat, detect_format};
pub use pipeline::{FileOutcome, FileProcessor, ProcessReport, Stage};
