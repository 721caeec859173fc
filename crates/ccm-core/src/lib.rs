//! # ccm-core
//!
//! Core types, timestamp handling, and emission conversion for the carbon map
//! processor.
//!
//! This crate provides the foundational types shared across all `ccm` crates:
//! - Entity structs for readings, emissions, reporting entities, and the
//!   published summary document
//! - The immutable [`conversion::ConversionTable`] and the
//!   [`conversion::FactorResolver`] that selects a rule for a measurement
//! - ISO-8601 timestamp parsing and the serde adapter used on window fields
//! - Cross-cutting error types

pub mod conversion;
pub mod entities;
pub mod errors;
pub mod timestamp;
