//! Closing scope and status types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use folio_shared::types::ClosingStatusId;

use super::milestone::MilestoneSet;
use crate::error::LedgerError;
use crate::fiscal::validate_period;

/// The (company, fiscal year, period, ledger) tuple a closing applies to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClosingScope {
    /// Company code.
    pub company_code: String,
    /// Fiscal year.
    pub fiscal_year: i32,
    /// Month number, 1..=12.
    pub period: i32,
    /// Ledger code (e.g. `0L` for the leading ledger).
    pub ledger: String,
}

impl ClosingScope {
    /// Creates a scope.
    pub fn new(
        company_code: impl Into<String>,
        fiscal_year: i32,
        period: i32,
        ledger: impl Into<String>,
    ) -> Self {
        Self {
            company_code: company_code.into(),
            fiscal_year,
            period,
            ledger: ledger.into(),
        }
    }

    /// Validates the fiscal year and period.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidPeriod` for a non-positive year or a period
    /// outside 1..=12.
    pub fn validate(&self) -> Result<(), LedgerError> {
        validate_period(self.fiscal_year, self.period).map(|_| ())
    }
}

/// Closing progress of one scope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClosingStatus {
    /// Row id. Stable across repeated closes of the same scope.
    pub id: ClosingStatusId,
    /// Scope this row tracks.
    pub scope: ClosingScope,
    /// Milestone flags.
    pub milestones: MilestoneSet,
    /// User who last moved a milestone.
    pub closed_by: Option<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}
