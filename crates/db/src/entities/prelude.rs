//! Entity re-exports.

pub use super::accounts::Entity as Accounts;
pub use super::closing_batch_lines::Entity as ClosingBatchLines;
pub use super::closing_batches::Entity as ClosingBatches;
pub use super::closing_status::Entity as ClosingStatus;
pub use super::journal_entries::Entity as JournalEntries;
pub use super::journal_lines::Entity as JournalLines;
pub use super::source_invoices::Entity as SourceInvoices;
