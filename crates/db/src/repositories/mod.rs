//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.
//! Every write runs in its own transaction; the pure decisions come from
//! `folio_core`.

pub mod account;
pub mod batch;
pub mod closing;
pub mod journal;
pub mod report;
pub mod reversal;
pub mod sync;

pub use account::AccountRepository;
pub use batch::BatchRepository;
pub use closing::ClosingRepository;
pub use journal::JournalRepository;
pub use report::ReportRepository;
pub use reversal::ReversalRepository;
pub use sync::{SourceInvoiceFeed, SyncAdapter};

use sea_orm::{DbErr, SqlErr};

use folio_core::LedgerError;

/// Maps a storage error onto the ledger error taxonomy.
///
/// Unique constraint violations become `DuplicateKey` so callers can retry
/// them once as an idempotency check; everything else is `Database`.
pub fn map_db_err(err: DbErr) -> LedgerError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => LedgerError::DuplicateKey(detail),
        _ => LedgerError::Database(err.to_string()),
    }
}
