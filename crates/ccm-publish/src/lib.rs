//! # ccm-publish
//!
//! Publishes the derived artifacts that mirror the store:
//!
//! - `{prefix}/index.json`: JSON array of every reporting entity id
//! - `{prefix}/{id}.json`: one entity's attributes and full emission history
//!
//! Buckets are `object_store` handles: S3-compatible in production, local
//! directories for development, `InMemory` in tests.

mod error;
pub mod publisher;
pub mod render;
pub mod storage;

pub use error::PublishError;
pub use publisher::Publisher;
pub use storage::open_bucket;
