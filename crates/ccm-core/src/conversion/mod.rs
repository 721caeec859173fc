//! Emission conversion: the rule table and the resolver that applies it.
//!
//! The table is loaded once per process and shared read-only behind an
//! `Arc`; every resolution borrows it without locking.

mod resolver;
mod table;

pub use resolver::{Conversion, FactorResolver};
pub use table::{ConversionTable, RuleOverlap};
