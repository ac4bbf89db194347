//! Journal repository: the journal engine's storage half.
//!
//! Validation and preparation come from `folio_core::ledger::JournalService`.
//! This module resolves account names, then writes the entry row and every
//! line row in one transaction.

use std::collections::HashSet;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};

use folio_core::LedgerError;
use folio_core::ledger::{
    JournalEntry, JournalEntryWithLines, JournalLine, JournalService, OriginTag, PostEntryInput,
    PreparedEntry, validate_lines,
};
use folio_shared::types::{JournalEntryId, JournalLineId};

use super::account::names_for;
use super::map_db_err;
use crate::entities::{journal_entries, journal_lines};

/// Journal repository for posting and reading entries.
#[derive(Debug, Clone)]
pub struct JournalRepository {
    db: DatabaseConnection,
}

impl JournalRepository {
    /// Creates a new journal repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Posts a balanced entry.
    ///
    /// Validation happens before any write. When `(origin, origin_id)`
    /// already exists with the same movement the call is idempotent and
    /// returns the existing id.
    ///
    /// # Errors
    ///
    /// Returns the validation errors of `JournalService::prepare`,
    /// `DuplicateKey` if the conflicting entry cannot be re-read or records
    /// a different movement, or `Database` on storage failure.
    pub async fn post_entry(&self, input: &PostEntryInput) -> Result<JournalEntryId, LedgerError> {
        validate_lines(&input.lines)?;

        let txn = self.db.begin().await.map_err(map_db_err)?;
        match post_in(&txn, input).await {
            Ok(id) => {
                txn.commit().await.map_err(map_db_err)?;
                tracing::info!(
                    entry_id = %id,
                    origin = %input.origin,
                    lines = input.lines.len(),
                    "Journal entry posted"
                );
                Ok(id)
            }
            Err(err) if err.is_retryable() => {
                txn.rollback().await.map_err(map_db_err)?;
                let Some(origin_id) = input.origin_id.as_deref() else {
                    return Err(err);
                };
                tracing::warn!(
                    origin = %input.origin,
                    origin_id,
                    "Duplicate origin on post, re-reading existing entry"
                );
                let Some(existing) = find_origin_in(&self.db, &input.origin, origin_id).await?
                else {
                    return Err(err);
                };
                let existing_id = JournalEntryId::from_uuid(existing.id);
                match load_entry(&self.db, existing_id).await? {
                    Some(stored) if JournalService::is_same_posting(&stored, input) => {
                        Ok(existing_id)
                    }
                    _ => {
                        tracing::warn!(
                            origin = %input.origin,
                            origin_id,
                            existing_entry_id = %existing_id,
                            "Origin already posted with a different movement"
                        );
                        Err(LedgerError::DuplicateKey(format!(
                            "{} {origin_id} is already posted as entry {existing_id}",
                            input.origin
                        )))
                    }
                }
            }
            Err(err) => Err(err),
        }
    }

    /// Reads an entry with its lines ordered by `line_no`.
    pub async fn get_entry(
        &self,
        id: JournalEntryId,
    ) -> Result<Option<JournalEntryWithLines>, LedgerError> {
        load_entry(&self.db, id).await
    }

    /// Finds the entry derived from a given source record.
    pub async fn find_by_origin(
        &self,
        origin: &OriginTag,
        origin_id: &str,
    ) -> Result<Option<JournalEntry>, LedgerError> {
        let model = find_origin_in(&self.db, origin, origin_id).await?;
        model.map(to_entry).transpose()
    }

    /// Origin ids already posted under `origin`.
    pub async fn synced_origin_ids(
        &self,
        origin: &OriginTag,
    ) -> Result<HashSet<String>, LedgerError> {
        let ids: Vec<Option<String>> = journal_entries::Entity::find()
            .select_only()
            .column(journal_entries::Column::OriginId)
            .filter(journal_entries::Column::Origin.eq(origin.as_str()))
            .filter(journal_entries::Column::OriginId.is_not_null())
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(map_db_err)?;
        Ok(ids.into_iter().flatten().collect())
    }
}

/// Prepares and writes an entry on the caller's transaction.
pub(crate) async fn post_in<C>(
    conn: &C,
    input: &PostEntryInput,
) -> Result<JournalEntryId, LedgerError>
where
    C: ConnectionTrait,
{
    let missing = JournalService::codes_missing_names(input);
    let names = names_for(conn, &missing).await?;
    let prepared = JournalService::prepare(input, |code| names.get(code).cloned())?;
    insert_prepared(conn, &prepared).await
}

/// Writes a prepared entry and its lines.
pub(crate) async fn insert_prepared<C>(
    conn: &C,
    prepared: &PreparedEntry,
) -> Result<JournalEntryId, LedgerError>
where
    C: ConnectionTrait,
{
    let id = JournalEntryId::new();

    journal_entries::ActiveModel {
        id: Set(id.into_inner()),
        entry_date: Set(prepared.entry_date),
        period: Set(prepared.period.to_string()),
        description: Set(prepared.description.clone()),
        origin: Set(prepared.origin.as_str().to_string()),
        origin_id: Set(prepared.origin_id.clone()),
        reversed: Set(false),
        reversal_entry_id: Set(None),
        created_by: Set(prepared.created_by.clone()),
        created_at: Set(Utc::now()),
    }
    .insert(conn)
    .await
    .map_err(map_db_err)?;

    let lines = prepared.lines.iter().map(|line| journal_lines::ActiveModel {
        id: Set(JournalLineId::new().into_inner()),
        entry_id: Set(id.into_inner()),
        line_no: Set(line.line_no),
        account_code: Set(line.account_code.clone()),
        account_name: Set(line.account_name.clone()),
        debit: Set(line.debit),
        credit: Set(line.credit),
        description: Set(line.description.clone()),
    });
    journal_lines::Entity::insert_many(lines)
        .exec(conn)
        .await
        .map_err(map_db_err)?;

    Ok(id)
}

pub(crate) async fn find_origin_in<C>(
    conn: &C,
    origin: &OriginTag,
    origin_id: &str,
) -> Result<Option<journal_entries::Model>, LedgerError>
where
    C: ConnectionTrait,
{
    journal_entries::Entity::find()
        .filter(journal_entries::Column::Origin.eq(origin.as_str()))
        .filter(journal_entries::Column::OriginId.eq(origin_id))
        .one(conn)
        .await
        .map_err(map_db_err)
}

pub(crate) async fn load_entry<C>(
    conn: &C,
    id: JournalEntryId,
) -> Result<Option<JournalEntryWithLines>, LedgerError>
where
    C: ConnectionTrait,
{
    let Some(model) = journal_entries::Entity::find_by_id(id.into_inner())
        .one(conn)
        .await
        .map_err(map_db_err)?
    else {
        return Ok(None);
    };

    let lines = journal_lines::Entity::find()
        .filter(journal_lines::Column::EntryId.eq(model.id))
        .order_by_asc(journal_lines::Column::LineNo)
        .all(conn)
        .await
        .map_err(map_db_err)?;

    Ok(Some(JournalEntryWithLines {
        entry: to_entry(model)?,
        lines: lines.into_iter().map(to_line).collect(),
    }))
}

fn to_entry(model: journal_entries::Model) -> Result<JournalEntry, LedgerError> {
    let period = model
        .period
        .parse()
        .map_err(|_| LedgerError::Internal(format!("stored period {} is invalid", model.period)))?;

    Ok(JournalEntry {
        id: JournalEntryId::from_uuid(model.id),
        entry_date: model.entry_date,
        period,
        description: model.description,
        origin: OriginTag::from(model.origin),
        origin_id: model.origin_id,
        reversed: model.reversed,
        reversal_entry_id: model.reversal_entry_id.map(JournalEntryId::from_uuid),
        created_by: model.created_by,
        created_at: model.created_at,
    })
}

fn to_line(model: journal_lines::Model) -> JournalLine {
    JournalLine {
        id: JournalLineId::from_uuid(model.id),
        entry_id: JournalEntryId::from_uuid(model.entry_id),
        line_no: model.line_no,
        account_code: model.account_code,
        account_name: model.account_name,
        debit: model.debit,
        credit: model.credit,
        description: model.description,
    }
}
