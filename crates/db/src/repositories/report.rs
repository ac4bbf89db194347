//! Report repository: general-ledger previews of closed periods.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};

use folio_core::LedgerError;
use folio_core::fiscal::month_date_range;
use folio_core::reports::{GlAggregator, GlLine, GlPreview};

use super::map_db_err;
use crate::entities::{closing_status, journal_entries, journal_lines};

/// Report repository for general-ledger previews.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    db: DatabaseConnection,
}

impl ReportRepository {
    /// Creates a new report repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Aggregates one month of journal lines per account.
    ///
    /// Only available once the period is closed for the company on any
    /// ledger. Lines are selected by their entry's recording date, not its
    /// declared period.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPeriod`, `PeriodNotClosed`, or `Database`.
    pub async fn preview_gl(
        &self,
        company_code: &str,
        fiscal_year: i32,
        period: i32,
    ) -> Result<GlPreview, LedgerError> {
        let (date_from, date_to) = month_date_range(fiscal_year, period)?;

        let closed = closing_status::Entity::find()
            .filter(closing_status::Column::CompanyCode.eq(company_code))
            .filter(closing_status::Column::FiscalYear.eq(fiscal_year))
            .filter(closing_status::Column::Period.eq(period))
            .filter(closing_status::Column::PeriodClosed.eq(true))
            .count(&self.db)
            .await
            .map_err(map_db_err)?;
        if closed == 0 {
            return Err(LedgerError::PeriodNotClosed {
                company_code: company_code.to_string(),
                fiscal_year,
                period,
            });
        }

        let lines = gl_lines(&self.db, date_from, date_to).await?;
        let preview = GlAggregator::preview(company_code, fiscal_year, period, lines)?;

        tracing::debug!(
            company_code,
            fiscal_year,
            period,
            rows = preview.rows.len(),
            is_balanced = preview.is_balanced,
            "General ledger preview computed"
        );
        Ok(preview)
    }
}

/// Journal lines whose entry was recorded between `from` and `to`, inclusive.
pub(crate) async fn gl_lines<C>(
    conn: &C,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<GlLine>, LedgerError>
where
    C: ConnectionTrait,
{
    let rows: Vec<(String, String, Decimal, Decimal)> =
        journal_lines::Entity::find()
            .select_only()
            .column(journal_lines::Column::AccountCode)
            .column(journal_lines::Column::AccountName)
            .column(journal_lines::Column::Debit)
            .column(journal_lines::Column::Credit)
            .inner_join(journal_entries::Entity)
            .filter(journal_entries::Column::EntryDate.between(from, to))
            .order_by_asc(journal_lines::Column::AccountCode)
            .into_tuple()
            .all(conn)
            .await
            .map_err(map_db_err)?;

    Ok(rows
        .into_iter()
        .map(|(account_code, account_name, debit, credit)| GlLine {
            account_code,
            account_name,
            debit,
            credit,
        })
        .collect())
}
