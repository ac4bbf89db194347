//! General-ledger aggregation for closed periods.
//!
//! The aggregator is pure: it receives the journal lines already selected by
//! the storage layer and folds them into per-account rows and totals.

pub mod service;
pub mod types;


pub use service::GlAggregator;
pub use types::*;
