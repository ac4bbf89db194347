//! Reversal service for compensating posted entries.
//!
//! A reversal never deletes or edits the original lines. It builds a new
//! entry whose lines swap debit and credit, which is balanced whenever the
//! original is.

use crate::error::LedgerError;
use crate::ledger::{EntryTotals, JournalEntryWithLines, OriginTag, PreparedEntry, PreparedLine};

/// Stateless service for building reversal entries.
pub struct ReversalService;

impl ReversalService {
    /// Description of the reversal of `target`.
    #[must_use]
    pub fn entry_description(target: &JournalEntryWithLines) -> String {
        format!("Reversal of journal entry {}", target.entry.id)
    }

    /// Builds the compensating entry for `target`.
    ///
    /// The reversal keeps the target's date and period, has origin
    /// `REVERSAL` and origin id equal to the target id. Each line swaps
    /// debit and credit and references the source line number.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyReversedOrMissing` if the target is already reversed
    /// and `NoLines` if it has no lines.
    pub fn build(
        target: &JournalEntryWithLines,
        reversed_by: &str,
    ) -> Result<PreparedEntry, LedgerError> {
        let target_id = target.entry.id.into_inner();
        if target.entry.reversed {
            return Err(LedgerError::AlreadyReversedOrMissing(target_id));
        }
        if target.lines.is_empty() {
            return Err(LedgerError::NoLines(target_id));
        }

        let lines: Vec<PreparedLine> = target
            .lines
            .iter()
            .map(|line| PreparedLine {
                line_no: line.line_no,
                account_code: line.account_code.clone(),
                account_name: line.account_name.clone(),
                debit: line.credit,
                credit: line.debit,
                description: Some(match line.description.as_deref() {
                    Some(text) if !text.is_empty() => {
                        format!("Reversal of line {}: {text}", line.line_no)
                    }
                    _ => format!("Reversal of line {}", line.line_no),
                }),
            })
            .collect();

        let totals = EntryTotals::new(
            lines.iter().map(|l| l.debit).sum(),
            lines.iter().map(|l| l.credit).sum(),
        );

        Ok(PreparedEntry {
            entry_date: target.entry.entry_date,
            period: target.entry.period,
            description: Self::entry_description(target),
            origin: OriginTag::Reversal,
            origin_id: Some(target.entry.id.to_string()),
            created_by: reversed_by.to_string(),
            lines,
            totals,
        })
    }
}
