//! General-ledger aggregation service.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use folio_shared::types::is_zero_at_scale;

use super::types::{GlAccountRow, GlLine, GlPreview, GlTotals};
use crate::chart::AccountType;
use crate::error::LedgerError;
use crate::fiscal::month_date_range;

/// Stateless service folding journal lines into a preview.
pub struct GlAggregator;

impl GlAggregator {
    /// Groups lines by (account code, account name) in code order.
    ///
    /// Balance is debit minus credit. Lines carrying a different name for the
    /// same code produce separate rows.
    #[must_use]
    pub fn aggregate<I>(lines: I) -> (Vec<GlAccountRow>, GlTotals, bool)
    where
        I: IntoIterator<Item = GlLine>,
    {
        let mut buckets: BTreeMap<(String, String), (Decimal, Decimal)> = BTreeMap::new();
        for line in lines {
            let bucket = buckets
                .entry((line.account_code, line.account_name))
                .or_insert((Decimal::ZERO, Decimal::ZERO));
            bucket.0 += line.debit;
            bucket.1 += line.credit;
        }

        let rows: Vec<GlAccountRow> = buckets
            .into_iter()
            .map(|((code, name), (debit, credit))| GlAccountRow {
                account_type: AccountType::from_code(&code),
                account_code: code,
                account_name: name,
                debit,
                credit,
                balance: debit - credit,
            })
            .collect();

        let totals = GlTotals {
            total_debit: rows.iter().map(|r| r.debit).sum(),
            total_credit: rows.iter().map(|r| r.credit).sum(),
        };
        let is_balanced = is_zero_at_scale(totals.total_debit - totals.total_credit);

        (rows, totals, is_balanced)
    }

    /// Builds the preview of one month from lines already restricted to it.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidPeriod` for an invalid year or month.
    pub fn preview<I>(
        company_code: &str,
        fiscal_year: i32,
        period: i32,
        lines: I,
    ) -> Result<GlPreview, LedgerError>
    where
        I: IntoIterator<Item = GlLine>,
    {
        let (date_from, date_to) = month_date_range(fiscal_year, period)?;
        let (rows, totals, is_balanced) = Self::aggregate(lines);

        Ok(GlPreview {
            company_code: company_code.to_string(),
            fiscal_year,
            period,
            date_from,
            date_to,
            rows,
            totals,
            is_balanced,
        })
    }
}
