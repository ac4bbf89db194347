//! Source feed contract.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use folio_shared::config::SyncRuleConfig;

use crate::error::LedgerError;

/// An operational record that may need a journal entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRecord {
    /// Record reference, stored as the entry's origin id.
    pub id: String,
    /// Record total.
    pub total: Decimal,
    /// Customer or supplier name.
    pub counterparty: String,
    /// Date the record was issued; becomes the entry date.
    pub record_date: NaiveDate,
}

/// Accounts a module's records are posted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncRule {
    /// Account debited with the record total.
    pub debit_account_code: String,
    /// Name copied onto the debit line.
    pub debit_account_name: String,
    /// Account credited with the record total.
    pub credit_account_code: String,
    /// Name copied onto the credit line.
    pub credit_account_name: String,
}

impl From<&SyncRuleConfig> for SyncRule {
    fn from(config: &SyncRuleConfig) -> Self {
        Self {
            debit_account_code: config.debit_account_code.clone(),
            debit_account_name: config.debit_account_name.clone(),
            credit_account_code: config.credit_account_code.clone(),
            credit_account_name: config.credit_account_name.clone(),
        }
    }
}

/// A source of operational records for one module tag.
#[async_trait]
pub trait SourceFeed: Send + Sync {
    /// Module tag, used as the origin of derived entries.
    fn module(&self) -> &str;

    /// Lists the module's records.
    async fn fetch(&self) -> Result<Vec<SourceRecord>, LedgerError>;
}
