//! Closing repository: the period-closing state machine's storage half.

use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    Set, TransactionTrait,
};

use folio_core::LedgerError;
use folio_core::closing::{
    ClosingScope, ClosingService, ClosingStatus, Milestone, MilestoneSet, MilestoneStep,
    RecordBatchInput,
};
use folio_core::fiscal::month_date_range;
use folio_core::reports::GlAggregator;
use folio_shared::types::ClosingStatusId;

use super::batch::insert_batch;
use super::map_db_err;
use super::report::gl_lines;
use crate::entities::closing_status;

/// Closing repository for milestone transitions.
#[derive(Debug, Clone)]
pub struct ClosingRepository {
    db: DatabaseConnection,
}

impl ClosingRepository {
    /// Creates a new closing repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Marks a period as closed, creating its status row on first close.
    ///
    /// Idempotent: closing again returns the same row. An insert that loses
    /// a concurrent race is retried once as an update.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPeriod` or `Database`.
    pub async fn close_period(
        &self,
        scope: &ClosingScope,
        closed_by: &str,
    ) -> Result<ClosingStatus, LedgerError> {
        scope.validate()?;

        let status = match self.try_close(scope, closed_by).await {
            Err(err) if err.is_retryable() => {
                tracing::warn!(
                    company_code = %scope.company_code,
                    fiscal_year = scope.fiscal_year,
                    period = scope.period,
                    ledger = %scope.ledger,
                    "Concurrent period close, retrying as update"
                );
                self.try_close(scope, closed_by).await?
            }
            other => other?,
        };

        tracing::info!(
            status_id = %status.id,
            company_code = %scope.company_code,
            fiscal_year = scope.fiscal_year,
            period = scope.period,
            ledger = %scope.ledger,
            closed_by,
            "Period closed"
        );
        Ok(status)
    }

    /// Reads the closing status of a scope.
    pub async fn status(
        &self,
        scope: &ClosingScope,
    ) -> Result<Option<ClosingStatus>, LedgerError> {
        Ok(find_in(&self.db, scope).await?.map(to_status))
    }

    /// Posts the next closing milestone of a scope.
    ///
    /// Milestones are strictly ordered. A milestone already set is a no-op
    /// returning the current row. Milestones with a batch type snapshot the
    /// period's general ledger in the same transaction that sets the flag.
    /// The flag is set only while still unset; a caller that loses that race
    /// rolls its batch back and gets the current row.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPeriod`, `MilestoneOutOfOrder`, `Unbalanced` when the
    /// period's ledger does not balance, or `Database`.
    pub async fn post_milestone(
        &self,
        scope: &ClosingScope,
        milestone: Milestone,
        posted_by: &str,
    ) -> Result<ClosingStatus, LedgerError> {
        scope.validate()?;

        if milestone == Milestone::PeriodClosed {
            return match self.status(scope).await? {
                Some(status) if status.milestones.period_closed => Ok(status),
                _ => self.close_period(scope, posted_by).await,
            };
        }

        let txn = self.db.begin().await.map_err(map_db_err)?;
        let row = find_in(&txn, scope).await?;
        let current = row.as_ref().map(milestones_of).unwrap_or_default();

        let batch_type = match ClosingService::plan(&current, milestone)? {
            MilestoneStep::AlreadySet => {
                txn.rollback().await.map_err(map_db_err)?;
                let row = row.ok_or_else(|| {
                    LedgerError::Internal(format!("{milestone} set without a status row"))
                })?;
                return Ok(to_status(row));
            }
            MilestoneStep::Apply { batch_type } => batch_type,
        };
        let row = row.ok_or_else(|| {
            LedgerError::Internal(format!("{milestone} allowed without a status row"))
        })?;

        if let Some(batch_type) = batch_type {
            let (date_from, date_to) = month_date_range(scope.fiscal_year, scope.period)?;
            let lines = gl_lines(&txn, date_from, date_to).await?;
            let preview =
                GlAggregator::preview(&scope.company_code, scope.fiscal_year, scope.period, lines)?;
            let (lines, totals) = ClosingService::snapshot(batch_type, &preview)?;

            let batch_id = insert_batch(
                &txn,
                &RecordBatchInput {
                    batch_type,
                    scope: scope.clone(),
                    lines,
                    totals,
                    posted_by: posted_by.to_string(),
                },
            )
            .await?;
            tracing::info!(
                batch_id = %batch_id,
                batch_type = %batch_type,
                "Closing batch recorded"
            );
        }

        // Only the caller that flips the flag keeps its batch.
        let flag = flag_column(milestone);
        let flipped = closing_status::Entity::update_many()
            .col_expr(flag, Expr::value(true))
            .col_expr(closing_status::Column::ClosedBy, Expr::value(posted_by.to_string()))
            .col_expr(closing_status::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(closing_status::Column::Id.eq(row.id))
            .filter(flag.eq(false))
            .exec(&txn)
            .await
            .map_err(map_db_err)?;

        if flipped.rows_affected == 0 {
            txn.rollback().await.map_err(map_db_err)?;
            tracing::warn!(
                status_id = %row.id,
                milestone = %milestone,
                "Milestone already posted concurrently, batch discarded"
            );
            return self.status(scope).await?.ok_or_else(|| {
                LedgerError::Internal(format!("{milestone} status row vanished"))
            });
        }

        let updated = find_in(&txn, scope).await?.ok_or_else(|| {
            LedgerError::Internal(format!("{milestone} status row vanished"))
        })?;
        txn.commit().await.map_err(map_db_err)?;

        tracing::info!(
            status_id = %updated.id,
            company_code = %scope.company_code,
            fiscal_year = scope.fiscal_year,
            period = scope.period,
            ledger = %scope.ledger,
            milestone = %milestone,
            posted_by,
            "Closing milestone posted"
        );
        Ok(to_status(updated))
    }

    async fn try_close(
        &self,
        scope: &ClosingScope,
        closed_by: &str,
    ) -> Result<ClosingStatus, LedgerError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;
        let now = Utc::now();

        let model = match find_in(&txn, scope).await? {
            Some(existing) => {
                let mut active: closing_status::ActiveModel = existing.into();
                active.period_closed = Set(true);
                active.closed_by = Set(Some(closed_by.to_string()));
                active.updated_at = Set(now);
                active.update(&txn).await.map_err(map_db_err)?
            }
            None => closing_status::ActiveModel {
                id: Set(ClosingStatusId::new().into_inner()),
                company_code: Set(scope.company_code.clone()),
                fiscal_year: Set(scope.fiscal_year),
                period: Set(scope.period),
                ledger: Set(scope.ledger.clone()),
                period_closed: Set(true),
                gl_closed: Set(false),
                tb_closed: Set(false),
                pnl_closed: Set(false),
                equity_closed: Set(false),
                fs_closed: Set(false),
                fy_opened: Set(false),
                closed_by: Set(Some(closed_by.to_string())),
                created_at: Set(now),
                updated_at: Set(now),
            }
            .insert(&txn)
            .await
            .map_err(map_db_err)?,
        };

        txn.commit().await.map_err(map_db_err)?;
        Ok(to_status(model))
    }
}

async fn find_in<C>(
    conn: &C,
    scope: &ClosingScope,
) -> Result<Option<closing_status::Model>, LedgerError>
where
    C: ConnectionTrait,
{
    closing_status::Entity::find()
        .filter(closing_status::Column::CompanyCode.eq(scope.company_code.as_str()))
        .filter(closing_status::Column::FiscalYear.eq(scope.fiscal_year))
        .filter(closing_status::Column::Period.eq(scope.period))
        .filter(closing_status::Column::Ledger.eq(scope.ledger.as_str()))
        .one(conn)
        .await
        .map_err(map_db_err)
}

const fn flag_column(milestone: Milestone) -> closing_status::Column {
    match milestone {
        Milestone::PeriodClosed => closing_status::Column::PeriodClosed,
        Milestone::GlClosed => closing_status::Column::GlClosed,
        Milestone::TbClosed => closing_status::Column::TbClosed,
        Milestone::PnlClosed => closing_status::Column::PnlClosed,
        Milestone::EquityClosed => closing_status::Column::EquityClosed,
        Milestone::FsClosed => closing_status::Column::FsClosed,
        Milestone::FyOpened => closing_status::Column::FyOpened,
    }
}

const fn milestones_of(model: &closing_status::Model) -> MilestoneSet {
    MilestoneSet {
        period_closed: model.period_closed,
        gl_closed: model.gl_closed,
        tb_closed: model.tb_closed,
        pnl_closed: model.pnl_closed,
        equity_closed: model.equity_closed,
        fs_closed: model.fs_closed,
        fy_opened: model.fy_opened,
    }
}

fn to_status(model: closing_status::Model) -> ClosingStatus {
    ClosingStatus {
        id: ClosingStatusId::from_uuid(model.id),
        milestones: milestones_of(&model),
        scope: ClosingScope::new(model.company_code, model.fiscal_year, model.period, model.ledger),
        closed_by: model.closed_by,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}
