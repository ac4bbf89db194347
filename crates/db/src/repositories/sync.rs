//! Synchronization adapter: journal entries derived from source records.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder, TransactionTrait};

use folio_core::LedgerError;
use folio_core::ledger::OriginTag;
use folio_core::sync::{SourceFeed, SourceRecord, SyncRule, SyncService};
use folio_shared::config::LedgerConfig;

use super::journal::{JournalRepository, find_origin_in, post_in};
use super::map_db_err;
use crate::entities::source_invoices;

/// Module tag of receivable invoices.
pub const RECEIVABLES: &str = "RECEIVABLES";

/// Feed over the `source_invoices` table.
#[derive(Debug, Clone)]
pub struct SourceInvoiceFeed {
    db: DatabaseConnection,
}

impl SourceInvoiceFeed {
    /// Creates a feed reading receivable invoices.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SourceFeed for SourceInvoiceFeed {
    fn module(&self) -> &str {
        RECEIVABLES
    }

    async fn fetch(&self) -> Result<Vec<SourceRecord>, LedgerError> {
        let invoices = source_invoices::Entity::find()
            .order_by_asc(source_invoices::Column::IssuedOn)
            .order_by_asc(source_invoices::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(invoices
            .into_iter()
            .map(|invoice| SourceRecord {
                id: invoice.id,
                total: invoice.total,
                counterparty: invoice.counterparty,
                record_date: invoice.issued_on,
            })
            .collect())
    }
}

struct Registration {
    origin: OriginTag,
    feed: Arc<dyn SourceFeed>,
    rule: SyncRule,
}

/// Registry of source feeds and the rules their records are posted with.
#[derive(Clone)]
pub struct SyncAdapter {
    db: DatabaseConnection,
    feeds: HashMap<String, Arc<Registration>>,
}

impl SyncAdapter {
    /// Creates an adapter with no feeds.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            feeds: HashMap::new(),
        }
    }

    /// Creates an adapter with the receivable invoice feed registered.
    #[must_use]
    pub fn with_receivables(db: DatabaseConnection, config: &LedgerConfig) -> Self {
        let mut adapter = Self::new(db.clone());
        adapter.register(
            Arc::new(SourceInvoiceFeed::new(db)),
            SyncRule::from(&config.receivables),
        );
        adapter
    }

    /// Registers a feed. A later registration for the same module replaces it.
    pub fn register(&mut self, feed: Arc<dyn SourceFeed>, rule: SyncRule) {
        let origin = OriginTag::module(feed.module());
        self.feeds.insert(
            origin.as_str().to_string(),
            Arc::new(Registration { origin, feed, rule }),
        );
    }

    /// Module tags with a registered feed, sorted.
    #[must_use]
    pub fn modules(&self) -> Vec<String> {
        let mut modules: Vec<String> = self.feeds.keys().cloned().collect();
        modules.sort();
        modules
    }

    /// Posts an entry for every record of `module_tag` not yet synced.
    ///
    /// Returns the number of entries created. Running it twice creates
    /// nothing the second time.
    ///
    /// # Errors
    ///
    /// Returns `UnknownSourceModule` for an unregistered tag, the feed's
    /// error, or a storage error.
    pub async fn sync_source(
        &self,
        module_tag: &str,
        created_by: &str,
    ) -> Result<usize, LedgerError> {
        let key = OriginTag::module(module_tag);
        let registration = self
            .feeds
            .get(key.as_str())
            .ok_or_else(|| LedgerError::UnknownSourceModule(module_tag.to_string()))?;
        let origin = &registration.origin;

        let records = registration.feed.fetch().await?;
        let fetched = records.len();
        let synced = JournalRepository::new(self.db.clone())
            .synced_origin_ids(origin)
            .await?;

        let mut created = 0;
        for record in SyncService::pending(records, &synced) {
            if !SyncService::is_postable(&record) {
                tracing::warn!(
                    module = %origin,
                    record_id = %record.id,
                    total = %record.total,
                    "Skipping source record with non-positive total"
                );
                continue;
            }
            if self
                .post_record(origin, &registration.rule, &record, created_by)
                .await?
            {
                created += 1;
            }
        }

        tracing::info!(module = %origin, fetched, created, "Source module synchronized");
        Ok(created)
    }

    /// Posts one record in its own transaction. Returns false when it turned
    /// out to be synced already.
    async fn post_record(
        &self,
        origin: &OriginTag,
        rule: &SyncRule,
        record: &SourceRecord,
        created_by: &str,
    ) -> Result<bool, LedgerError> {
        let input = SyncService::derive_entry(origin, rule, record, created_by);

        let txn = self.db.begin().await.map_err(map_db_err)?;
        if find_origin_in(&txn, origin, &record.id).await?.is_some() {
            txn.rollback().await.map_err(map_db_err)?;
            return Ok(false);
        }

        match post_in(&txn, &input).await {
            Ok(entry_id) => {
                txn.commit().await.map_err(map_db_err)?;
                tracing::debug!(
                    module = %origin,
                    record_id = %record.id,
                    entry_id = %entry_id,
                    "Source record posted"
                );
                Ok(true)
            }
            Err(err) if err.is_retryable() => {
                txn.rollback().await.map_err(map_db_err)?;
                let existing = JournalRepository::new(self.db.clone())
                    .find_by_origin(origin, &record.id)
                    .await?;
                if existing.is_some() {
                    tracing::warn!(
                        module = %origin,
                        record_id = %record.id,
                        "Source record synced concurrently"
                    );
                    Ok(false)
                } else {
                    Err(err)
                }
            }
            Err(err) => Err(err),
        }
    }
}
