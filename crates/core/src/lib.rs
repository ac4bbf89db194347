//! Core accounting logic for Folio.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Storage calls into it from inside its own transactions.
//!
//! # Modules
//!
//! - `ledger` - Journal entry validation and preparation
//! - `reversal` - Compensating entries
//! - `sync` - Entries derived from operational modules
//! - `closing` - Period-closing milestones and batch snapshots
//! - `reports` - General-ledger aggregation
//! - `chart` - Chart of accounts classification
//! - `fiscal` - Accounting periods and month ranges

pub mod chart;
pub mod closing;
pub mod error;
pub mod fiscal;
pub mod ledger;
pub mod reports;
pub mod reversal;
pub mod sync;

pub use error::{ErrorCategory, LedgerError};
