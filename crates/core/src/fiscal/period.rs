//! Fiscal period types.
//!
//! A period is a (fiscal year, calendar month) bucket. Journal entries carry
//! it as a `YYYY-MM` string; closing scopes carry year and month separately.

use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

/// Validates a fiscal year and period number pair.
///
/// # Errors
///
/// Returns `LedgerError::InvalidPeriod` unless the year is positive and the
/// period is 1..=12.
pub fn validate_period(fiscal_year: i32, period: i32) -> Result<u32, LedgerError> {
    if fiscal_year <= 0 {
        return Err(LedgerError::InvalidPeriod(format!("fiscal year {fiscal_year}")));
    }
    match u32::try_from(period) {
        Ok(month @ 1..=12) => Ok(month),
        _ => Err(LedgerError::InvalidPeriod(format!("period {period}"))),
    }
}

/// Returns the first and last calendar day of a month, both inclusive.
///
/// Handles 28/29/30/31-day months, including leap-year Februaries.
///
/// # Errors
///
/// Returns `LedgerError::InvalidPeriod` for an out-of-range year or month.
pub fn month_date_range(
    fiscal_year: i32,
    period: i32,
) -> Result<(NaiveDate, NaiveDate), LedgerError> {
    let month = validate_period(fiscal_year, period)?;
    let invalid = || LedgerError::InvalidPeriod(format!("{fiscal_year}-{period:02}"));

    let first = NaiveDate::from_ymd_opt(fiscal_year, month, 1).ok_or_else(invalid)?;
    let (next_year, next_month) = if month == 12 {
        (fiscal_year + 1, 1)
    } else {
        (fiscal_year, month + 1)
    };
    let last = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .ok_or_else(invalid)?;

    Ok((first, last))
}

/// Accounting period of a journal entry (`YYYY-MM`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountingPeriod {
    year: i32,
    month: u32,
}

impl AccountingPeriod {
    /// Creates a period from year and month.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidPeriod` for an out-of-range year or month.
    pub fn new(year: i32, month: i32) -> Result<Self, LedgerError> {
        let month = validate_period(year, month)?;
        if year > 9999 {
            return Err(LedgerError::InvalidPeriod(format!("fiscal year {year}")));
        }
        Ok(Self { year, month })
    }

    /// Truncates a date to its year-month period.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidPeriod` for dates outside years 1..=9999,
    /// which a `YYYY-MM` period cannot represent.
    #[allow(clippy::cast_possible_wrap)]
    pub fn from_date(date: NaiveDate) -> Result<Self, LedgerError> {
        Self::new(date.year(), date.month() as i32)
    }

    /// Fiscal year.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Calendar month, 1..=12.
    #[must_use]
    pub const fn month(&self) -> u32 {
        self.month
    }

    /// First and last day of the period.
    ///
    /// # Errors
    ///
    /// Never fails for a period built through `new`, `from_date` or parsing.
    #[allow(clippy::cast_possible_wrap)]
    pub fn date_range(&self) -> Result<(NaiveDate, NaiveDate), LedgerError> {
        month_date_range(self.year, self.month as i32)
    }
}

impl std::fmt::Display for AccountingPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for AccountingPeriod {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || LedgerError::InvalidPeriod(s.to_string());
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: i32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month)
    }
}

impl TryFrom<String> for AccountingPeriod {
    type Error = LedgerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AccountingPeriod> for String {
    fn from(period: AccountingPeriod) -> Self {
        period.to_string()
    }
}
