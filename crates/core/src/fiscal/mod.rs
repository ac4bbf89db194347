//! Fiscal periods and their calendar date ranges.

pub mod period;

pub use period::{AccountingPeriod, month_date_range, validate_period};
