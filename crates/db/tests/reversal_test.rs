//! Integration tests for the reversal repository.

mod common;

use rust_decimal_macros::dec;
use sea_orm::{EntityTrait, PaginatorTrait};

use folio_core::LedgerError;
use folio_core::ledger::OriginTag;
use folio_db::entities::journal_entries;
use folio_db::{JournalRepository, ReversalRepository};
use folio_shared::types::JournalEntryId;

use common::{USER, date, manual_entry, setup};

#[tokio::test]
async fn test_reversal_swaps_sides_and_flags_original() {
    let db = setup().await;
    let journal = JournalRepository::new(db.clone());
    let reversals = ReversalRepository::new(db);

    let original = journal
        .post_entry(&manual_entry(date(2024, 1, 5), "1.1.02", "4.1.01", dec!(500)))
        .await
        .unwrap();

    let reversal = reversals.reverse_entry(original, "auditor").await.unwrap();
    assert_ne!(reversal, original);

    let flagged = journal.get_entry(original).await.unwrap().unwrap();
    assert!(flagged.entry.reversed);
    assert_eq!(flagged.entry.reversal_entry_id, Some(reversal));

    let compensating = journal.get_entry(reversal).await.unwrap().unwrap();
    assert_eq!(compensating.entry.origin, OriginTag::Reversal);
    assert_eq!(compensating.entry.origin_id, Some(original.to_string()));
    assert_eq!(compensating.entry.entry_date, date(2024, 1, 5));
    assert_eq!(compensating.entry.period, flagged.entry.period);
    assert_eq!(compensating.entry.created_by, "auditor");
    assert!(!compensating.entry.reversed);

    let bancos = &compensating.lines[0];
    assert_eq!(bancos.account_code, "1.1.02");
    assert_eq!(bancos.account_name, "Bancos");
    assert_eq!(bancos.debit, dec!(0));
    assert_eq!(bancos.credit, dec!(500));

    let ingresos = &compensating.lines[1];
    assert_eq!(ingresos.account_code, "4.1.01");
    assert_eq!(ingresos.debit, dec!(500));
    assert_eq!(ingresos.credit, dec!(0));

    assert!(compensating.totals().is_balanced);
}

#[tokio::test]
async fn test_second_reversal_fails() {
    let db = setup().await;
    let journal = JournalRepository::new(db.clone());
    let reversals = ReversalRepository::new(db.clone());

    let original = journal
        .post_entry(&manual_entry(date(2024, 1, 5), "1.1.02", "4.1.01", dec!(500)))
        .await
        .unwrap();
    reversals.reverse_entry(original, USER).await.unwrap();

    let err = reversals.reverse_entry(original, USER).await.unwrap_err();
    assert!(matches!(
        err,
        LedgerError::AlreadyReversedOrMissing(id) if id == original.into_inner()
    ));
    assert_eq!(journal_entries::Entity::find().count(&db).await.unwrap(), 2);
}

#[tokio::test]
async fn test_missing_entry_cannot_be_reversed() {
    let db = setup().await;
    let reversals = ReversalRepository::new(db.clone());

    let missing = JournalEntryId::new();
    let err = reversals.reverse_entry(missing, USER).await.unwrap_err();

    assert!(matches!(err, LedgerError::AlreadyReversedOrMissing(id) if id == missing.into_inner()));
    assert_eq!(journal_entries::Entity::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_reversal_can_itself_be_reversed() {
    let db = setup().await;
    let journal = JournalRepository::new(db.clone());
    let reversals = ReversalRepository::new(db);

    let original = journal
        .post_entry(&manual_entry(date(2024, 4, 2), "5.1.01", "1.1.01", dec!(75)))
        .await
        .unwrap();
    let reversal = reversals.reverse_entry(original, USER).await.unwrap();
    let restored = reversals.reverse_entry(reversal, USER).await.unwrap();

    let entry = journal.get_entry(restored).await.unwrap().unwrap();
    assert_eq!(entry.entry.origin_id, Some(reversal.to_string()));
    assert_eq!(entry.lines[0].account_code, "5.1.01");
    assert_eq!(entry.lines[0].debit, dec!(75));
    assert_eq!(entry.lines[1].credit, dec!(75));

    let reversed_reversal = journal.get_entry(reversal).await.unwrap().unwrap();
    assert!(reversed_reversal.entry.reversed);
    assert_eq!(reversed_reversal.entry.reversal_entry_id, Some(restored));
}
