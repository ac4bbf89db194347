//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Posting rules for synchronized source records.
    #[serde(default)]
    pub ledger: LedgerConfig,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL (`postgres://...` or `sqlite://...`).
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Whether SQL statements are logged through `tracing`.
    #[serde(default)]
    pub sql_logging: bool,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Ledger configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    /// Posting rule for receivable invoices.
    #[serde(default = "default_receivables_rule")]
    pub receivables: SyncRuleConfig,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            receivables: default_receivables_rule(),
        }
    }
}

/// Accounts a synchronized source record is posted against.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SyncRuleConfig {
    /// Account debited with the record total.
    pub debit_account_code: String,
    /// Name copied onto the debit line.
    pub debit_account_name: String,
    /// Account credited with the record total.
    pub credit_account_code: String,
    /// Name copied onto the credit line.
    pub credit_account_name: String,
}

fn default_receivables_rule() -> SyncRuleConfig {
    SyncRuleConfig {
        debit_account_code: "1.1.03".to_string(),
        debit_account_name: "Cuentas por cobrar clientes".to_string(),
        credit_account_code: "4.1.01".to_string(),
        credit_account_name: "Ingresos".to_string(),
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, later ones overriding earlier ones:
    /// `config/default`, `config/{RUN_MODE}`, then `FOLIO__*` variables
    /// (e.g. `FOLIO__DATABASE__URL`).
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("FOLIO")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
