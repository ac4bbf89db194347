//! Double-entry journal logic.
//!
//! This module implements the journal engine's pure half:
//! - Domain types for posting and reading entries
//! - Line validation (non-empty, non-negative, balanced at currency scale)
//! - Entry preparation (period and account name resolution)

pub mod service;
pub mod types;
pub mod validation;

#[cfg(test)]
mod validation_props;

pub use service::JournalService;
pub use types::{
    EntryTotals, JournalEntry, JournalEntryWithLines, JournalLine, JournalLineInput, OriginTag,
    PostEntryInput, PreparedEntry, PreparedLine,
};
pub use validation::validate_lines;
