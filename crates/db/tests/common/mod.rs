//! Shared fixtures for the repository integration tests.
//!
//! Every test gets its own in-memory SQLite database with the ledger schema
//! applied and a small chart of accounts loaded. Amounts in these tests are
//! whole numbers: SQLite stores decimals as REAL.

#![allow(dead_code)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};
use sea_orm_migration::MigratorTrait;

use folio_core::chart::Account;
use folio_core::ledger::{JournalLineInput, OriginTag, PostEntryInput};
use folio_db::AccountRepository;
use folio_db::entities::source_invoices;
use folio_db::migration::Migrator;

pub const COMPANY: &str = "01";
pub const LEDGER: &str = "0L";
pub const USER: &str = "contador";

/// Opens a fresh in-memory database with the schema and chart loaded.
pub async fn setup() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(options)
        .await
        .expect("Failed to open in-memory database");

    Migrator::up(&db, None).await.expect("Failed to migrate");

    AccountRepository::new(db.clone())
        .import_chart(&chart())
        .await
        .expect("Failed to import chart");

    db
}

pub fn chart() -> Vec<Account> {
    vec![
        Account::new("1.1.01", "Caja"),
        Account::new("1.1.02", "Bancos"),
        Account::new("1.1.03", "Cuentas por cobrar clientes"),
        Account::new("2.1.01", "Proveedores"),
        Account::new("3.1.01", "Capital social"),
        Account::new("4.1.01", "Ingresos"),
        Account::new("5.1.01", "Gastos administrativos"),
    ]
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A manual two-line entry: debit `debit_code`, credit `credit_code`.
pub fn manual_entry(
    entry_date: NaiveDate,
    debit_code: &str,
    credit_code: &str,
    amount: Decimal,
) -> PostEntryInput {
    PostEntryInput {
        entry_date,
        period: None,
        description: format!("Manual {debit_code} / {credit_code}"),
        origin: OriginTag::Manual,
        origin_id: None,
        lines: vec![
            JournalLineInput::debit(debit_code, amount),
            JournalLineInput::credit(credit_code, amount),
        ],
        created_by: USER.to_string(),
    }
}

pub async fn insert_invoice(
    db: &DatabaseConnection,
    id: &str,
    counterparty: &str,
    total: Decimal,
    issued_on: NaiveDate,
) {
    source_invoices::ActiveModel {
        id: Set(id.to_string()),
        counterparty: Set(counterparty.to_string()),
        total: Set(total),
        issued_on: Set(issued_on),
    }
    .insert(db)
    .await
    .expect("Failed to insert invoice");
}
