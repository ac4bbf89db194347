//! Report data types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::chart::AccountType;

/// A journal line as selected for aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlLine {
    /// Account code.
    pub account_code: String,
    /// Account name copied on the line.
    pub account_name: String,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
}

/// Per-account aggregate of a general-ledger preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlAccountRow {
    /// Account code.
    pub account_code: String,
    /// Account name.
    pub account_name: String,
    /// Type derived from the account code.
    pub account_type: AccountType,
    /// Total debit.
    pub debit: Decimal,
    /// Total credit.
    pub credit: Decimal,
    /// Debit minus credit.
    pub balance: Decimal,
}

/// Preview totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlTotals {
    /// Total debit.
    pub total_debit: Decimal,
    /// Total credit.
    pub total_credit: Decimal,
}

/// General-ledger preview of one month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlPreview {
    /// Company code.
    pub company_code: String,
    /// Fiscal year.
    pub fiscal_year: i32,
    /// Month number.
    pub period: i32,
    /// First day of the month.
    pub date_from: NaiveDate,
    /// Last day of the month.
    pub date_to: NaiveDate,
    /// Rows ordered by account code.
    pub rows: Vec<GlAccountRow>,
    /// Totals over all rows.
    pub totals: GlTotals,
    /// Whether debits equal credits at currency scale.
    pub is_balanced: bool,
}
