//! Reversal repository: compensating entries, never deletions.

use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, TransactionTrait};

use folio_core::LedgerError;
use folio_core::reversal::ReversalService;
use folio_shared::types::JournalEntryId;

use super::journal::{insert_prepared, load_entry};
use super::map_db_err;
use crate::entities::journal_entries;

/// Reversal repository.
#[derive(Debug, Clone)]
pub struct ReversalRepository {
    db: DatabaseConnection,
}

impl ReversalRepository {
    /// Creates a new reversal repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Reverses a posted entry and flags it as reversed.
    ///
    /// The compensating entry, its lines and the flag on the original are
    /// written in one transaction. A uniqueness conflict on the reversal's
    /// origin is re-checked once, which then reports the entry as reversed.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyReversedOrMissing`, `NoLines`, or `Database`.
    pub async fn reverse_entry(
        &self,
        entry_id: JournalEntryId,
        reversed_by: &str,
    ) -> Result<JournalEntryId, LedgerError> {
        match self.try_reverse(entry_id, reversed_by).await {
            Err(err) if err.is_retryable() => {
                tracing::warn!(
                    entry_id = %entry_id,
                    error = %err,
                    "Concurrent reversal detected, re-checking"
                );
                match self.try_reverse(entry_id, reversed_by).await {
                    Err(err) if err.is_retryable() => {
                        Err(LedgerError::AlreadyReversedOrMissing(entry_id.into_inner()))
                    }
                    other => other,
                }
            }
            other => other,
        }
    }

    async fn try_reverse(
        &self,
        entry_id: JournalEntryId,
        reversed_by: &str,
    ) -> Result<JournalEntryId, LedgerError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let target = load_entry(&txn, entry_id)
            .await?
            .ok_or(LedgerError::AlreadyReversedOrMissing(entry_id.into_inner()))?;
        let prepared = ReversalService::build(&target, reversed_by)?;
        let reversal_id = insert_prepared(&txn, &prepared).await?;

        let flagged = journal_entries::Entity::update_many()
            .col_expr(journal_entries::Column::Reversed, Expr::value(true))
            .col_expr(
                journal_entries::Column::ReversalEntryId,
                Expr::value(reversal_id.into_inner()),
            )
            .filter(journal_entries::Column::Id.eq(entry_id.into_inner()))
            .filter(journal_entries::Column::Reversed.eq(false))
            .exec(&txn)
            .await
            .map_err(map_db_err)?;

        if flagged.rows_affected == 0 {
            txn.rollback().await.map_err(map_db_err)?;
            return Err(LedgerError::AlreadyReversedOrMissing(entry_id.into_inner()));
        }

        txn.commit().await.map_err(map_db_err)?;

        tracing::info!(
            original_entry_id = %entry_id,
            reversal_entry_id = %reversal_id,
            reversed_by,
            "Journal entry reversed"
        );
        Ok(reversal_id)
    }
}
