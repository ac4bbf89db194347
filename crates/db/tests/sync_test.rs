//! Integration tests for the synchronization adapter.

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal_macros::dec;
use sea_orm::{EntityTrait, PaginatorTrait};

use folio_core::LedgerError;
use folio_core::ledger::OriginTag;
use folio_core::sync::{SourceFeed, SourceRecord, SyncRule};
use folio_db::entities::journal_entries;
use folio_db::repositories::sync::RECEIVABLES;
use folio_db::{JournalRepository, SyncAdapter};
use folio_shared::config::LedgerConfig;

use common::{date, insert_invoice, setup};

const SYNC_USER: &str = "sync";

#[tokio::test]
async fn test_sync_posts_each_invoice_once() {
    let db = setup().await;
    insert_invoice(&db, "INV-1", "Cliente Uno", dec!(118), date(2024, 1, 10)).await;
    insert_invoice(&db, "INV-2", "Cliente Dos", dec!(230), date(2024, 1, 12)).await;

    let adapter = SyncAdapter::with_receivables(db.clone(), &LedgerConfig::default());

    assert_eq!(adapter.sync_source(RECEIVABLES, SYNC_USER).await.unwrap(), 2);
    assert_eq!(adapter.sync_source(RECEIVABLES, SYNC_USER).await.unwrap(), 0);
    assert_eq!(journal_entries::Entity::find().count(&db).await.unwrap(), 2);

    insert_invoice(&db, "INV-3", "Cliente Tres", dec!(50), date(2024, 1, 20)).await;
    assert_eq!(adapter.sync_source(RECEIVABLES, SYNC_USER).await.unwrap(), 1);

    let journal = JournalRepository::new(db);
    let origin = OriginTag::module(RECEIVABLES);
    let entry = journal.find_by_origin(&origin, "INV-2").await.unwrap().unwrap();
    assert_eq!(entry.entry_date, date(2024, 1, 12));
    assert_eq!(entry.description, "RECEIVABLES INV-2: Cliente Dos");
    assert_eq!(entry.created_by, SYNC_USER);

    let stored = journal.get_entry(entry.id).await.unwrap().unwrap();
    assert_eq!(stored.lines[0].account_code, "1.1.03");
    assert_eq!(stored.lines[0].account_name, "Cuentas por cobrar clientes");
    assert_eq!(stored.lines[0].debit, dec!(230));
    assert_eq!(stored.lines[1].account_code, "4.1.01");
    assert_eq!(stored.lines[1].credit, dec!(230));
}

#[tokio::test]
async fn test_sync_skips_non_positive_totals() {
    let db = setup().await;
    insert_invoice(&db, "INV-0", "Anulada", dec!(0), date(2024, 1, 10)).await;
    insert_invoice(&db, "NC-1", "Nota de credito", dec!(-15), date(2024, 1, 11)).await;
    insert_invoice(&db, "INV-9", "Cliente Nueve", dec!(9), date(2024, 1, 12)).await;

    let adapter = SyncAdapter::with_receivables(db.clone(), &LedgerConfig::default());
    assert_eq!(adapter.sync_source(RECEIVABLES, SYNC_USER).await.unwrap(), 1);

    let synced = JournalRepository::new(db)
        .synced_origin_ids(&OriginTag::module(RECEIVABLES))
        .await
        .unwrap();
    assert_eq!(synced.len(), 1);
    assert!(synced.contains("INV-9"));
}

#[tokio::test]
async fn test_unknown_module_is_rejected() {
    let db = setup().await;
    let adapter = SyncAdapter::with_receivables(db, &LedgerConfig::default());

    let err = adapter.sync_source("PAYABLES", SYNC_USER).await.unwrap_err();
    assert!(matches!(err, LedgerError::UnknownSourceModule(tag) if tag == "PAYABLES"));
}

// ============================================================================
// Custom feeds
// ============================================================================

struct PayrollFeed;

#[async_trait]
impl SourceFeed for PayrollFeed {
    fn module(&self) -> &str {
        "PAYROLL"
    }

    async fn fetch(&self) -> Result<Vec<SourceRecord>, LedgerError> {
        Ok(vec![SourceRecord {
            id: "ROL-2024-01".to_string(),
            total: dec!(1200),
            counterparty: "Nomina enero".to_string(),
            record_date: date(2024, 1, 31),
        }])
    }
}

fn payroll_rule() -> SyncRule {
    SyncRule {
        debit_account_code: "5.1.01".to_string(),
        debit_account_name: "Gastos administrativos".to_string(),
        credit_account_code: "2.1.01".to_string(),
        credit_account_name: "Proveedores".to_string(),
    }
}

#[tokio::test]
async fn test_registered_feed_syncs_under_its_own_origin() {
    let db = setup().await;
    let mut adapter = SyncAdapter::with_receivables(db.clone(), &LedgerConfig::default());
    adapter.register(Arc::new(PayrollFeed), payroll_rule());

    assert_eq!(adapter.modules(), vec!["PAYROLL".to_string(), RECEIVABLES.to_string()]);
    assert_eq!(adapter.sync_source("PAYROLL", SYNC_USER).await.unwrap(), 1);
    assert_eq!(adapter.sync_source("PAYROLL", SYNC_USER).await.unwrap(), 0);

    let journal = JournalRepository::new(db);
    let entry = journal
        .find_by_origin(&OriginTag::module("PAYROLL"), "ROL-2024-01")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(entry.period.to_string(), "2024-01");
    assert!(journal
        .find_by_origin(&OriginTag::module(RECEIVABLES), "ROL-2024-01")
        .await
        .unwrap()
        .is_none());
}
