//! Database migrations.
//!
//! Migrations are managed using sea-orm-migration and written with the
//! schema builder so the same files run on PostgreSQL and SQLite.

pub use sea_orm_migration::prelude::*;

mod m20260108_000001_journal;
mod m20260108_000002_closing;

/// Precision of money columns. SQLite's schema builder rejects anything above 16.
pub(crate) const MONEY_PRECISION: u32 = 16;

/// Scale of money columns, matching `folio_shared::types::CURRENCY_SCALE`.
pub(crate) const MONEY_SCALE: u32 = 2;

/// Migrator for running database migrations.
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260108_000001_journal::Migration),
            Box::new(m20260108_000002_closing::Migration),
        ]
    }
}
