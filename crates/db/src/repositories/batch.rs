//! Batch repository: immutable closing snapshots.
//!
//! Batches are insert-only: there is no update or delete.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use folio_core::LedgerError;
use folio_core::closing::{
    BatchLine, BatchReport, BatchStatus, BatchTotals, ClosingBatch, ClosingScope,
    RecordBatchInput, batch_code,
};
use folio_shared::types::ClosingBatchId;
use uuid::Uuid;

use super::map_db_err;
use crate::entities::{closing_batch_lines, closing_batches};

/// Batch repository for recording and reading closing batches.
#[derive(Debug, Clone)]
pub struct BatchRepository {
    db: DatabaseConnection,
}

impl BatchRepository {
    /// Creates a new batch repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records a batch and all its lines in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPeriod` for an invalid scope or `Database`.
    pub async fn record_batch(
        &self,
        input: &RecordBatchInput,
    ) -> Result<ClosingBatchId, LedgerError> {
        input.scope.validate()?;

        let txn = self.db.begin().await.map_err(map_db_err)?;
        let id = insert_batch(&txn, input).await?;
        txn.commit().await.map_err(map_db_err)?;

        tracing::info!(
            batch_id = %id,
            batch_type = %input.batch_type,
            company_code = %input.scope.company_code,
            lines = input.lines.len(),
            "Closing batch recorded"
        );
        Ok(id)
    }

    /// Reads a batch with its lines ordered by `line_no`.
    pub async fn get_batch(&self, id: ClosingBatchId) -> Result<Option<ClosingBatch>, LedgerError> {
        let Some(header) = closing_batches::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(map_db_err)?
        else {
            return Ok(None);
        };
        self.with_lines(header).await.map(Some)
    }

    /// Batches recorded for a scope, oldest first.
    pub async fn list_for_scope(
        &self,
        scope: &ClosingScope,
    ) -> Result<Vec<ClosingBatch>, LedgerError> {
        let headers = closing_batches::Entity::find()
            .filter(closing_batches::Column::CompanyCode.eq(scope.company_code.as_str()))
            .filter(closing_batches::Column::FiscalYear.eq(scope.fiscal_year))
            .filter(closing_batches::Column::Period.eq(scope.period))
            .filter(closing_batches::Column::Ledger.eq(scope.ledger.as_str()))
            .order_by_asc(closing_batches::Column::PostedAt)
            .order_by_asc(closing_batches::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        let mut batches = Vec::with_capacity(headers.len());
        for header in headers {
            batches.push(self.with_lines(header).await?);
        }
        Ok(batches)
    }

    /// Builds the report generator payload of a batch.
    pub async fn report(&self, id: ClosingBatchId) -> Result<Option<BatchReport>, LedgerError> {
        Ok(self.get_batch(id).await?.as_ref().map(BatchReport::from))
    }

    async fn with_lines(
        &self,
        header: closing_batches::Model,
    ) -> Result<ClosingBatch, LedgerError> {
        let lines = closing_batch_lines::Entity::find()
            .filter(closing_batch_lines::Column::BatchId.eq(header.id))
            .order_by_asc(closing_batch_lines::Column::LineNo)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(ClosingBatch {
            id: ClosingBatchId::from_uuid(header.id),
            batch_type: header.batch_type.parse()?,
            scope: ClosingScope::new(
                header.company_code,
                header.fiscal_year,
                header.period,
                header.ledger,
            ),
            batch_code: header.batch_code,
            posted_by: header.posted_by,
            posted_at: header.posted_at,
            status: BatchStatus::Posted,
            totals: BatchTotals {
                total_debit: header.total_debit,
                total_credit: header.total_credit,
            },
            lines: lines
                .into_iter()
                .map(|l| BatchLine {
                    line_no: l.line_no,
                    account_code: l.account_code,
                    account_name: l.account_name,
                    debit: l.debit,
                    credit: l.credit,
                    balance: l.balance,
                })
                .collect(),
        })
    }
}

/// Writes a batch header and its lines on the caller's transaction.
pub(crate) async fn insert_batch<C>(
    conn: &C,
    input: &RecordBatchInput,
) -> Result<ClosingBatchId, LedgerError>
where
    C: ConnectionTrait,
{
    // Batch codes embed the first 8 hex digits; v7 ids share them for about a minute.
    let id = ClosingBatchId::from_uuid(Uuid::new_v4());

    closing_batches::ActiveModel {
        id: Set(id.into_inner()),
        batch_type: Set(input.batch_type.as_str().to_string()),
        company_code: Set(input.scope.company_code.clone()),
        fiscal_year: Set(input.scope.fiscal_year),
        period: Set(input.scope.period),
        ledger: Set(input.scope.ledger.clone()),
        batch_code: Set(batch_code(input.batch_type, &input.scope, id)),
        posted_by: Set(input.posted_by.clone()),
        posted_at: Set(Utc::now()),
        status: Set(BatchStatus::Posted.as_str().to_string()),
        total_debit: Set(input.totals.total_debit),
        total_credit: Set(input.totals.total_credit),
    }
    .insert(conn)
    .await
    .map_err(map_db_err)?;

    if !input.lines.is_empty() {
        let lines = input.lines.iter().map(|line| closing_batch_lines::ActiveModel {
            id: Set(Uuid::now_v7()),
            batch_id: Set(id.into_inner()),
            line_no: Set(line.line_no),
            account_code: Set(line.account_code.clone()),
            account_name: Set(line.account_name.clone()),
            debit: Set(line.debit),
            credit: Set(line.credit),
            balance: Set(line.balance),
        });
        closing_batch_lines::Entity::insert_many(lines)
            .exec(conn)
            .await
            .map_err(map_db_err)?;
    }

    Ok(id)
}
