//! Closing batch snapshots and the report payload built from them.
//!
//! A batch is written once when a milestone is posted and never updated.
//! Later journal activity does not touch it.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use folio_shared::types::ClosingBatchId;

use super::types::ClosingScope;
use crate::error::LedgerError;

/// Kind of closing batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BatchType {
    /// General ledger closing.
    GlClosing,
    /// Trial balance posting.
    TbPost,
    /// Profit and loss closing.
    ClosePnl,
    /// Final financial statements.
    FsFinal,
    /// Fiscal year opening.
    OpenFy,
}

impl BatchType {
    /// Returns the stored code of this batch type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::GlClosing => "GL_CLOSING",
            Self::TbPost => "TB_POST",
            Self::ClosePnl => "CLOSE_PNL",
            Self::FsFinal => "FS_FINAL",
            Self::OpenFy => "OPEN_FY",
        }
    }

    /// Report title for this batch type.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::GlClosing => "General Ledger Closing",
            Self::TbPost => "Trial Balance",
            Self::ClosePnl => "Profit and Loss Closing",
            Self::FsFinal => "Financial Statements",
            Self::OpenFy => "Fiscal Year Opening",
        }
    }
}

impl fmt::Display for BatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BatchType {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GL_CLOSING" => Ok(Self::GlClosing),
            "TB_POST" => Ok(Self::TbPost),
            "CLOSE_PNL" => Ok(Self::ClosePnl),
            "FS_FINAL" => Ok(Self::FsFinal),
            "OPEN_FY" => Ok(Self::OpenFy),
            other => Err(LedgerError::Internal(format!("unknown batch type {other}"))),
        }
    }
}

/// Lifecycle status of a batch. Only `Posted` exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BatchStatus {
    /// Written and immutable.
    #[default]
    Posted,
}

impl BatchStatus {
    /// Returns the stored code of this status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Posted => "POSTED",
        }
    }
}

/// One account row of a batch snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchLine {
    /// Position in the snapshot, starting at 1.
    pub line_no: i32,
    /// Account code.
    pub account_code: String,
    /// Account name.
    pub account_name: String,
    /// Debit total.
    pub debit: Decimal,
    /// Credit total.
    pub credit: Decimal,
    /// Debit minus credit.
    pub balance: Decimal,
}

/// Batch totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchTotals {
    /// Sum of line debits.
    pub total_debit: Decimal,
    /// Sum of line credits.
    pub total_credit: Decimal,
}

impl BatchTotals {
    /// Sums the debit and credit columns of a set of lines.
    #[must_use]
    pub fn of(lines: &[BatchLine]) -> Self {
        Self {
            total_debit: lines.iter().map(|l| l.debit).sum(),
            total_credit: lines.iter().map(|l| l.credit).sum(),
        }
    }
}

/// Input for recording a batch.
#[derive(Debug, Clone)]
pub struct RecordBatchInput {
    /// Batch type.
    pub batch_type: BatchType,
    /// Scope the batch belongs to.
    pub scope: ClosingScope,
    /// Snapshot lines.
    pub lines: Vec<BatchLine>,
    /// Snapshot totals.
    pub totals: BatchTotals,
    /// User posting the batch.
    pub posted_by: String,
}

/// A posted batch with its lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClosingBatch {
    /// Batch id.
    pub id: ClosingBatchId,
    /// Batch type.
    pub batch_type: BatchType,
    /// Scope.
    pub scope: ClosingScope,
    /// Human-readable code, see [`batch_code`].
    pub batch_code: String,
    /// User who posted the batch.
    pub posted_by: String,
    /// Posting time.
    pub posted_at: DateTime<Utc>,
    /// Status.
    pub status: BatchStatus,
    /// Totals.
    pub totals: BatchTotals,
    /// Lines ordered by `line_no`.
    pub lines: Vec<BatchLine>,
}

/// Builds `<TYPE>-<company>-<fiscal_year>-<period:02>-<ledger>-<first 8 hex of id>`.
#[must_use]
pub fn batch_code(batch_type: BatchType, scope: &ClosingScope, id: ClosingBatchId) -> String {
    let hex = id.into_inner().simple().to_string();
    format!(
        "{}-{}-{}-{:02}-{}-{}",
        batch_type.as_str(),
        scope.company_code,
        scope.fiscal_year,
        scope.period,
        scope.ledger,
        &hex[..8]
    )
}

/// Header of a batch report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReportHeader {
    /// Report title.
    pub title: String,
    /// Company code.
    pub company: String,
    /// Fiscal year.
    pub fiscal_year: i32,
    /// Period.
    pub period: i32,
    /// Ledger.
    pub ledger: String,
    /// Batch code.
    pub batch_code: String,
    /// User who posted the batch.
    pub posted_by: String,
    /// Posting time.
    pub posted_at: DateTime<Utc>,
}

/// One line of a batch report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReportLine {
    /// Account code.
    pub account_code: String,
    /// Account name.
    pub account_name: String,
    /// Debit.
    pub debit: Decimal,
    /// Credit.
    pub credit: Decimal,
    /// Balance.
    pub balance: Decimal,
}

/// Payload handed to the report generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    /// Header.
    pub header: BatchReportHeader,
    /// Lines in snapshot order.
    pub lines: Vec<BatchReportLine>,
    /// Totals.
    pub totals: BatchTotals,
}

impl BatchReport {
    /// Serializes the report to JSON.
    pub fn to_json(&self) -> Result<serde_json::Value, LedgerError> {
        serde_json::to_value(self).map_err(|e| LedgerError::Internal(e.to_string()))
    }
}

impl From<&ClosingBatch> for BatchReport {
    fn from(batch: &ClosingBatch) -> Self {
        Self {
            header: BatchReportHeader {
                title: batch.batch_type.title().to_string(),
                company: batch.scope.company_code.clone(),
                fiscal_year: batch.scope.fiscal_year,
                period: batch.scope.period,
                ledger: batch.scope.ledger.clone(),
                batch_code: batch.batch_code.clone(),
                posted_by: batch.posted_by.clone(),
                posted_at: batch.posted_at,
            },
            lines: batch
                .lines
                .iter()
                .map(|l| BatchReportLine {
                    account_code: l.account_code.clone(),
                    account_name: l.account_name.clone(),
                    debit: l.debit,
                    credit: l.credit,
                    balance: l.balance,
                })
                .collect(),
            totals: batch.totals,
        }
    }
}
