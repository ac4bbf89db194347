//! Error types for every core accounting operation.
//!
//! Errors fall into five categories the outer layers act on differently:
//! validation and reversal errors are caller-correctable, state errors are
//! workflow-ordering violations, conflicts come from storage uniqueness
//! constraints and are retried once, internal errors are surfaced opaquely.

use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use folio_shared::AppError;

use crate::closing::Milestone;

/// Broad classification of a [`LedgerError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Input rejected before any write.
    Validation,
    /// Reversal precondition failed.
    Reversal,
    /// Closing workflow ordering violation.
    State,
    /// Storage uniqueness constraint violated.
    Conflict,
    /// Unexpected storage or programming failure.
    Internal,
}

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    // ========== Validation Errors ==========
    /// Journal entry has no lines.
    #[error("Journal entry must have at least one line")]
    EmptyEntry,

    /// Journal entry is not balanced (debits != credits at currency scale).
    #[error("Journal entry is not balanced. Debit: {debit}, Credit: {credit}")]
    Unbalanced {
        /// Total debit, rounded to currency scale.
        debit: Decimal,
        /// Total credit, rounded to currency scale.
        credit: Decimal,
    },

    /// A line carries a negative debit or credit.
    #[error("Line amounts cannot be negative")]
    NegativeAmount,

    /// A line amount has more decimal places than the currency scale.
    #[error("Line amount {0} has more than 2 decimal places")]
    ExcessPrecision(Decimal),

    /// Account code is not in the chart of accounts.
    #[error("Account not found in chart of accounts: {0}")]
    UnknownAccount(String),

    /// Fiscal year, month or period string is out of range.
    #[error("Invalid accounting period: {0}")]
    InvalidPeriod(String),

    /// No feed is registered for the source module.
    #[error("No source feed registered for module {0}")]
    UnknownSourceModule(String),

    // ========== Reversal Errors ==========
    /// Target entry does not exist or has already been reversed.
    #[error("Journal entry {0} does not exist or is already reversed")]
    AlreadyReversedOrMissing(Uuid),

    /// Target entry has no lines.
    #[error("Journal entry {0} has no lines to reverse")]
    NoLines(Uuid),

    // ========== State Errors ==========
    /// Period has no closing status row with `period_closed` set.
    #[error("Period {fiscal_year}-{period:02} of company {company_code} is not closed")]
    PeriodNotClosed {
        /// Company code.
        company_code: String,
        /// Fiscal year.
        fiscal_year: i32,
        /// Period (month) number.
        period: i32,
    },

    /// Milestone requested before its predecessor.
    #[error("Cannot set {milestone}: {requires} is not set")]
    MilestoneOutOfOrder {
        /// Milestone that was requested.
        milestone: Milestone,
        /// Milestone that must be set first.
        requires: Milestone,
    },

    // ========== Conflict Errors ==========
    /// Storage rejected a duplicate natural key.
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    // ========== Internal Errors ==========
    /// Database error.
    #[error("Database error: {0}")]
    Database(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl LedgerError {
    /// Returns the category of this error.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::EmptyEntry
            | Self::Unbalanced { .. }
            | Self::NegativeAmount
            | Self::ExcessPrecision(_)
            | Self::UnknownAccount(_)
            | Self::InvalidPeriod(_)
            | Self::UnknownSourceModule(_) => ErrorCategory::Validation,
            Self::AlreadyReversedOrMissing(_) | Self::NoLines(_) => ErrorCategory::Reversal,
            Self::PeriodNotClosed { .. } | Self::MilestoneOutOfOrder { .. } => {
                ErrorCategory::State
            }
            Self::DuplicateKey(_) => ErrorCategory::Conflict,
            Self::Database(_) | Self::Internal(_) => ErrorCategory::Internal,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyEntry => "EMPTY_ENTRY",
            Self::Unbalanced { .. } => "UNBALANCED",
            Self::NegativeAmount => "NEGATIVE_AMOUNT",
            Self::ExcessPrecision(_) => "EXCESS_PRECISION",
            Self::UnknownAccount(_) => "UNKNOWN_ACCOUNT",
            Self::InvalidPeriod(_) => "INVALID_PERIOD",
            Self::UnknownSourceModule(_) => "UNKNOWN_SOURCE_MODULE",
            Self::AlreadyReversedOrMissing(_) => "ALREADY_REVERSED_OR_MISSING",
            Self::NoLines(_) => "NO_LINES",
            Self::PeriodNotClosed { .. } => "PERIOD_NOT_CLOSED",
            Self::MilestoneOutOfOrder { .. } => "MILESTONE_OUT_OF_ORDER",
            Self::DuplicateKey(_) => "DUPLICATE_KEY",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self.category() {
            ErrorCategory::Validation | ErrorCategory::Reversal => 400,
            ErrorCategory::State => 422,
            ErrorCategory::Conflict => 409,
            ErrorCategory::Internal => 500,
        }
    }

    /// Returns true if the operation may be retried as an idempotency check.
    ///
    /// Only uniqueness conflicts qualify. Internal errors are never retried.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::DuplicateKey(_))
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        let message = err.to_string();
        match err.category() {
            ErrorCategory::Validation | ErrorCategory::Reversal => Self::Validation(message),
            ErrorCategory::State => Self::BusinessRule(message),
            ErrorCategory::Conflict => Self::Conflict(message),
            ErrorCategory::Internal => match err {
                LedgerError::Database(_) => Self::Database(message),
                _ => Self::Internal(message),
            },
        }
    }
}
