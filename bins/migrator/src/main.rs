//! Database migration runner for the Folio ledger.
//!
//! Usage:
//!   migrator up      - Run all pending migrations
//!   migrator down    - Rollback last migration
//!   migrator status  - Show migration status
//!   migrator fresh   - Drop all tables and re-run migrations
//!
//! The connection comes from `AppConfig` (`FOLIO__DATABASE__URL` or the
//! `config/` files).

use anyhow::{Context, bail};
use sea_orm_migration::MigratorTrait;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio_db::{connect_with, migration::Migrator};
use folio_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "folio=info,sea_orm=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let command = std::env::args().nth(1).unwrap_or_else(|| "up".to_string());

    let config = AppConfig::load().context("Failed to load configuration")?;
    let db = connect_with(&config.database)
        .await
        .context("Failed to connect to database")?;

    match command.as_str() {
        "up" => {
            Migrator::up(&db, None).await?;
            info!("Migrations applied");
        }
        "down" => {
            Migrator::down(&db, Some(1)).await?;
            info!("Last migration rolled back");
        }
        "status" => Migrator::status(&db).await?,
        "fresh" => {
            Migrator::fresh(&db).await?;
            info!("Schema recreated");
        }
        other => bail!("unknown command `{other}`, expected up, down, status or fresh"),
    }

    Ok(())
}
