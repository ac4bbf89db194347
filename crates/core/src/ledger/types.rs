//! Journal domain types.
//!
//! Input types describe an entry a caller wants to post. Prepared types are
//! validated, period-resolved and name-resolved, ready to be written in one
//! transaction. Read models mirror what storage returns.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use folio_shared::types::{JournalEntryId, JournalLineId, round_currency};

use crate::fiscal::AccountingPeriod;

/// Where a journal entry came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OriginTag {
    /// Typed in by a user.
    Manual,
    /// Compensating entry produced by the reversal engine.
    Reversal,
    /// Derived from an operational module (e.g. `RECEIVABLES`).
    Module(String),
}

impl OriginTag {
    /// Stored code for manual entries.
    pub const MANUAL: &'static str = "MANUAL";
    /// Stored code for reversal entries.
    pub const REVERSAL: &'static str = "REVERSAL";

    /// Builds a module tag, normalized to upper case.
    pub fn module(tag: impl AsRef<str>) -> Self {
        Self::from(tag.as_ref().trim().to_uppercase().as_str())
    }

    /// Returns the stored code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Manual => Self::MANUAL,
            Self::Reversal => Self::REVERSAL,
            Self::Module(tag) => tag,
        }
    }
}

impl From<&str> for OriginTag {
    fn from(s: &str) -> Self {
        match s {
            Self::MANUAL => Self::Manual,
            Self::REVERSAL => Self::Reversal,
            other => Self::Module(other.to_string()),
        }
    }
}

impl From<String> for OriginTag {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<OriginTag> for String {
    fn from(tag: OriginTag) -> Self {
        tag.as_str().to_string()
    }
}

impl fmt::Display for OriginTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A line as submitted by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalLineInput {
    /// Account code.
    pub account_code: String,
    /// Account name. Looked up in the chart of accounts when absent.
    pub account_name: Option<String>,
    /// Debit amount (>= 0).
    pub debit: Decimal,
    /// Credit amount (>= 0).
    pub credit: Decimal,
    /// Free-text description.
    pub description: Option<String>,
}

impl JournalLineInput {
    /// A debit line.
    pub fn debit(account_code: impl Into<String>, amount: Decimal) -> Self {
        Self {
            account_code: account_code.into(),
            account_name: None,
            debit: amount,
            credit: Decimal::ZERO,
            description: None,
        }
    }

    /// A credit line.
    pub fn credit(account_code: impl Into<String>, amount: Decimal) -> Self {
        Self {
            account_code: account_code.into(),
            account_name: None,
            debit: Decimal::ZERO,
            credit: amount,
            description: None,
        }
    }

    /// Sets the account name.
    #[must_use]
    pub fn named(mut self, account_name: impl Into<String>) -> Self {
        self.account_name = Some(account_name.into());
        self
    }

    /// Sets the line description.
    #[must_use]
    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The account name, if present and not blank.
    #[must_use]
    pub fn given_name(&self) -> Option<&str> {
        self.account_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
    }
}

/// Input for posting a journal entry.
#[derive(Debug, Clone)]
pub struct PostEntryInput {
    /// Recording date.
    pub entry_date: NaiveDate,
    /// Explicit accounting period; defaults to the month of `entry_date`.
    pub period: Option<AccountingPeriod>,
    /// Entry description.
    pub description: String,
    /// Origin tag.
    pub origin: OriginTag,
    /// Reference to the source record, if any.
    pub origin_id: Option<String>,
    /// Lines, at least one.
    pub lines: Vec<JournalLineInput>,
    /// User posting the entry.
    pub created_by: String,
}

/// Entry totals at currency scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryTotals {
    /// Rounded total debit.
    pub debit: Decimal,
    /// Rounded total credit.
    pub credit: Decimal,
    /// Whether the rounded totals are equal.
    pub is_balanced: bool,
}

impl EntryTotals {
    /// Rounds both totals and compares them.
    #[must_use]
    pub fn new(debit: Decimal, credit: Decimal) -> Self {
        let debit = round_currency(debit);
        let credit = round_currency(credit);
        Self {
            debit,
            credit,
            is_balanced: debit == credit,
        }
    }
}

/// A validated line ready for storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedLine {
    /// Insertion sequence, starting at 1.
    pub line_no: i32,
    /// Account code.
    pub account_code: String,
    /// Account name copied at write time.
    pub account_name: String,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
    /// Description.
    pub description: Option<String>,
}

/// A validated entry ready for storage.
#[derive(Debug, Clone)]
pub struct PreparedEntry {
    /// Recording date.
    pub entry_date: NaiveDate,
    /// Resolved accounting period.
    pub period: AccountingPeriod,
    /// Description.
    pub description: String,
    /// Origin tag.
    pub origin: OriginTag,
    /// Source reference.
    pub origin_id: Option<String>,
    /// Author.
    pub created_by: String,
    /// Lines in insertion order.
    pub lines: Vec<PreparedLine>,
    /// Totals.
    pub totals: EntryTotals,
}

/// A stored journal entry header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Entry id.
    pub id: JournalEntryId,
    /// Recording date.
    pub entry_date: NaiveDate,
    /// Accounting period.
    pub period: AccountingPeriod,
    /// Description.
    pub description: String,
    /// Origin tag.
    pub origin: OriginTag,
    /// Source reference.
    pub origin_id: Option<String>,
    /// Set once a reversal exists.
    pub reversed: bool,
    /// The compensating entry, when reversed.
    pub reversal_entry_id: Option<JournalEntryId>,
    /// Author.
    pub created_by: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// A stored journal line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalLine {
    /// Line id.
    pub id: JournalLineId,
    /// Owning entry.
    pub entry_id: JournalEntryId,
    /// Insertion sequence.
    pub line_no: i32,
    /// Account code.
    pub account_code: String,
    /// Account name as copied at write time.
    pub account_name: String,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
    /// Description.
    pub description: Option<String>,
}

/// An entry with its lines ordered by `line_no`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntryWithLines {
    /// Header.
    pub entry: JournalEntry,
    /// Lines.
    pub lines: Vec<JournalLine>,
}

impl JournalEntryWithLines {
    /// Totals of the stored lines.
    #[must_use]
    pub fn totals(&self) -> EntryTotals {
        EntryTotals::new(
            self.lines.iter().map(|l| l.debit).sum(),
            self.lines.iter().map(|l| l.credit).sum(),
        )
    }
}
