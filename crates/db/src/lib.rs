//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions for the ledger schema
//! - Repositories implementing the journal, reversal, synchronization,
//!   closing and reporting operations on top of `folio_core`
//! - Database migrations

pub mod entities;
pub mod migration;
pub mod repositories;

pub use repositories::{
    AccountRepository, BatchRepository, ClosingRepository, JournalRepository, ReportRepository,
    ReversalRepository, SourceInvoiceFeed, SyncAdapter, map_db_err,
};

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr};

use folio_shared::config::DatabaseConfig;

/// Establishes a connection to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    Database::connect(database_url).await
}

/// Establishes a pooled connection using the application's database settings.
///
/// An in-memory SQLite URL needs `max_connections = 1`: every pooled
/// connection would otherwise open its own empty database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect_with(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .sqlx_logging(config.sql_logging);

    let db = Database::connect(options).await?;
    tracing::info!(
        backend = ?db.get_database_backend(),
        max_connections = config.max_connections,
        "Database connected"
    );
    Ok(db)
}
