//! Synchronization decisions.

use std::collections::HashSet;

use rust_decimal::Decimal;

use folio_shared::types::round_currency;

use super::feed::{SourceRecord, SyncRule};
use crate::ledger::{JournalLineInput, OriginTag, PostEntryInput};

/// Stateless synchronization service.
pub struct SyncService;

impl SyncService {
    /// Records whose id is not among `synced_ids`, in feed order.
    #[must_use]
    pub fn pending(records: Vec<SourceRecord>, synced_ids: &HashSet<String>) -> Vec<SourceRecord> {
        records
            .into_iter()
            .filter(|r| !synced_ids.contains(&r.id))
            .collect()
    }

    /// Whether a record yields an entry. Zero and negative totals do not.
    #[must_use]
    pub fn is_postable(record: &SourceRecord) -> bool {
        round_currency(record.total) > Decimal::ZERO
    }

    /// Builds the two-line entry for a record.
    #[must_use]
    pub fn derive_entry(
        origin: &OriginTag,
        rule: &SyncRule,
        record: &SourceRecord,
        created_by: &str,
    ) -> PostEntryInput {
        let amount = round_currency(record.total);
        PostEntryInput {
            entry_date: record.record_date,
            period: None,
            description: format!("{origin} {}: {}", record.id, record.counterparty),
            origin: origin.clone(),
            origin_id: Some(record.id.clone()),
            lines: vec![
                JournalLineInput::debit(&rule.debit_account_code, amount)
                    .named(&rule.debit_account_name)
                    .described(&record.counterparty),
                JournalLineInput::credit(&rule.credit_account_code, amount)
                    .named(&rule.credit_account_name)
                    .described(&record.counterparty),
            ],
            created_by: created_by.to_string(),
        }
    }
}
