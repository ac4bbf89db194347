//! Chart of accounts reference data.
//!
//! Accounts are loaded once and read-only while journal entries are written.
//! Level, type and parent are derived from the account code itself.

pub mod account;

pub use account::{Account, AccountType};
