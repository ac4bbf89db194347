//! Account repository for chart of accounts database operations.
//!
//! The chart is reference data: it is imported once and only read while
//! entries are posted.

use std::collections::HashMap;

use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

use folio_core::LedgerError;
use folio_core::chart::{Account, AccountType};

use super::map_db_err;
use crate::entities::accounts;

/// Account repository for chart of accounts operations.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    db: DatabaseConnection,
}

impl AccountRepository {
    /// Creates a new account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Imports a chart of accounts in one transaction.
    ///
    /// Existing codes are updated in place, so re-importing a revised chart
    /// renames accounts without touching names already copied onto lines.
    pub async fn import_chart(&self, chart: &[Account]) -> Result<usize, LedgerError> {
        if chart.is_empty() {
            return Ok(0);
        }

        let models = chart.iter().map(|account| accounts::ActiveModel {
            account_code: Set(account.code.clone()),
            account_name: Set(account.name.clone()),
            account_level: Set(account.level),
            account_type: Set(account.account_type.as_str().to_string()),
            parent_account: Set(account.parent_code.clone()),
        });

        let txn = self.db.begin().await.map_err(map_db_err)?;
        accounts::Entity::insert_many(models)
            .on_conflict(
                OnConflict::column(accounts::Column::AccountCode)
                    .update_columns([
                        accounts::Column::AccountName,
                        accounts::Column::AccountLevel,
                        accounts::Column::AccountType,
                        accounts::Column::ParentAccount,
                    ])
                    .to_owned(),
            )
            .exec(&txn)
            .await
            .map_err(map_db_err)?;
        txn.commit().await.map_err(map_db_err)?;

        tracing::info!(accounts = chart.len(), "Chart of accounts imported");
        Ok(chart.len())
    }

    /// Finds an account by code.
    pub async fn find(&self, code: &str) -> Result<Option<Account>, LedgerError> {
        let model = accounts::Entity::find_by_id(code.trim().to_string())
            .one(&self.db)
            .await
            .map_err(map_db_err)?;
        Ok(model.map(to_account))
    }

    /// Lists the chart ordered by code.
    pub async fn list(&self) -> Result<Vec<Account>, LedgerError> {
        let models = accounts::Entity::find()
            .order_by_asc(accounts::Column::AccountCode)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;
        Ok(models.into_iter().map(to_account).collect())
    }
}

/// Loads the names of the given codes, on whatever connection the caller holds.
pub(crate) async fn names_for<C>(
    conn: &C,
    codes: &[String],
) -> Result<HashMap<String, String>, LedgerError>
where
    C: ConnectionTrait,
{
    if codes.is_empty() {
        return Ok(HashMap::new());
    }

    let models = accounts::Entity::find()
        .filter(accounts::Column::AccountCode.is_in(codes.iter().cloned()))
        .all(conn)
        .await
        .map_err(map_db_err)?;

    Ok(models
        .into_iter()
        .map(|m| (m.account_code, m.account_name))
        .collect())
}

fn to_account(model: accounts::Model) -> Account {
    Account {
        account_type: AccountType::from_code(&model.account_code),
        code: model.account_code,
        name: model.account_name,
        level: model.account_level,
        parent_code: model.parent_account,
    }
}
