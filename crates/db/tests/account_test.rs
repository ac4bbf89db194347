//! Integration tests for the chart of accounts repository.

mod common;

use folio_core::chart::{Account, AccountType};
use folio_db::AccountRepository;

use common::{chart, setup};

#[tokio::test]
async fn test_chart_is_loaded_with_derived_fields() {
    let db = setup().await;
    let accounts = AccountRepository::new(db);

    let bancos = accounts.find("1.1.02").await.unwrap().unwrap();
    assert_eq!(bancos.name, "Bancos");
    assert_eq!(bancos.level, 3);
    assert_eq!(bancos.account_type, AccountType::Asset);
    assert_eq!(bancos.parent_code.as_deref(), Some("1.1"));

    assert!(accounts.find("9.9.99").await.unwrap().is_none());
}

#[tokio::test]
async fn test_list_is_ordered_by_code() {
    let db = setup().await;
    let accounts = AccountRepository::new(db);

    let codes: Vec<String> = accounts
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|a| a.code)
        .collect();
    assert_eq!(codes.len(), chart().len());
    assert!(codes.windows(2).all(|w| w[0] < w[1]));
}

#[tokio::test]
async fn test_reimport_renames_in_place() {
    let db = setup().await;
    let accounts = AccountRepository::new(db);

    let imported = accounts
        .import_chart(&[
            Account::new("1.1.02", "Bancos locales"),
            Account::new("6.1.01", "Costo de ventas"),
        ])
        .await
        .unwrap();
    assert_eq!(imported, 2);

    assert_eq!(accounts.find("1.1.02").await.unwrap().unwrap().name, "Bancos locales");
    let costo = accounts.find("6.1.01").await.unwrap().unwrap();
    assert_eq!(costo.account_type, AccountType::Expense);
    assert_eq!(accounts.list().await.unwrap().len(), chart().len() + 1);

    assert_eq!(accounts.import_chart(&[]).await.unwrap(), 0);
}
