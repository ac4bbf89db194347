//! `SeaORM` entity definitions for the ledger schema.

pub mod prelude;

pub mod accounts;
pub mod closing_batch_lines;
pub mod closing_batches;
pub mod closing_status;
pub mod journal_entries;
pub mod journal_lines;
pub mod source_invoices;
