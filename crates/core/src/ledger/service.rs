//! Journal service for entry validation and preparation.
//!
//! This module turns a caller's `PostEntryInput` into a `PreparedEntry`
//! before anything is written. It has no database dependency: account names
//! are resolved through a lookup closure the storage layer backs with the
//! chart of accounts read inside its own transaction.

use super::types::{JournalEntryWithLines, PostEntryInput, PreparedEntry, PreparedLine};
use super::validation::validate_lines;
use crate::error::LedgerError;
use crate::fiscal::AccountingPeriod;

/// Journal service for entry validation and preparation.
pub struct JournalService;

impl JournalService {
    /// Account codes of lines that carry no account name, deduplicated.
    #[must_use]
    pub fn codes_missing_names(input: &PostEntryInput) -> Vec<String> {
        let mut codes: Vec<String> = input
            .lines
            .iter()
            .filter(|l| l.given_name().is_none())
            .map(|l| l.account_code.trim().to_string())
            .collect();
        codes.sort();
        codes.dedup();
        codes
    }

    /// Validates an entry and resolves its period and account names.
    ///
    /// Steps:
    /// 1. Validates the lines (non-empty, non-negative, balanced)
    /// 2. Resolves the period from the override or `entry_date`
    /// 3. Copies each missing account name from `name_lookup`
    /// 4. Numbers lines from 1 in input order
    ///
    /// # Errors
    ///
    /// Returns the validation error of step 1, `InvalidPeriod` when the
    /// entry date has no representable period, or `UnknownAccount` when a
    /// line has no name and `name_lookup` does not know its code.
    pub fn prepare<F>(input: &PostEntryInput, name_lookup: F) -> Result<PreparedEntry, LedgerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let totals = validate_lines(&input.lines)?;
        let period = match input.period {
            Some(period) => period,
            None => AccountingPeriod::from_date(input.entry_date)?,
        };

        let lines = input
            .lines
            .iter()
            .zip(1..)
            .map(|(line, line_no)| {
                let account_code = line.account_code.trim().to_string();
                let account_name = match line.given_name() {
                    Some(name) => name.to_string(),
                    None => name_lookup(&account_code)
                        .ok_or_else(|| LedgerError::UnknownAccount(account_code.clone()))?,
                };
                Ok(PreparedLine {
                    line_no,
                    account_code,
                    account_name,
                    debit: line.debit,
                    credit: line.credit,
                    description: line.description.clone(),
                })
            })
            .collect::<Result<Vec<_>, LedgerError>>()?;

        Ok(PreparedEntry {
            entry_date: input.entry_date,
            period,
            description: input.description.clone(),
            origin: input.origin.clone(),
            origin_id: input.origin_id.clone(),
            created_by: input.created_by.clone(),
            lines,
            totals,
        })
    }

    /// Returns true when `stored` records the same movement as `input`:
    /// same entry date, same period, and the same account code, debit and
    /// credit on every line in order.
    ///
    /// Descriptions, account names and authorship are not compared.
    #[must_use]
    pub fn is_same_posting(stored: &JournalEntryWithLines, input: &PostEntryInput) -> bool {
        let period = match input.period {
            Some(period) => Some(period),
            None => AccountingPeriod::from_date(input.entry_date).ok(),
        };

        stored.entry.entry_date == input.entry_date
            && Some(stored.entry.period) == period
            && stored.lines.len() == input.lines.len()
            && stored.lines.iter().zip(&input.lines).all(|(line, wanted)| {
                line.account_code == wanted.account_code.trim()
                    && line.debit == wanted.debit
                    && line.credit == wanted.credit
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use folio_shared::types::{JournalEntryId, JournalLineId};
    use rust_decimal_macros::dec;

    use crate::ledger::types::{JournalEntry, JournalLine, JournalLineInput, OriginTag};

    fn chart(code: &str) -> Option<String> {
        match code {
            "1.1.02" => Some("Bancos".to_string()),
            "4.1.01" => Some("Ingresos".to_string()),
            _ => None,
        }
    }

    fn input(lines: Vec<JournalLineInput>) -> PostEntryInput {
        PostEntryInput {
            entry_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            period: None,
            description: "Cash sale".to_string(),
            origin: OriginTag::Manual,
            origin_id: None,
            lines,
            created_by: "alice".to_string(),
        }
    }

    #[test]
    fn test_prepare_resolves_names_and_period() {
        let entry = input(vec![
            JournalLineInput::debit("1.1.02", dec!(500)),
            JournalLineInput::credit("4.1.01", dec!(500)).named("Ventas"),
        ]);

        let prepared = JournalService::prepare(&entry, chart).unwrap();

        assert_eq!(prepared.period.to_string(), "2024-01");
        assert_eq!(prepared.lines[0].line_no, 1);
        assert_eq!(prepared.lines[0].account_name, "Bancos");
        assert_eq!(prepared.lines[1].line_no, 2);
        assert_eq!(prepared.lines[1].account_name, "Ventas");
        assert!(prepared.totals.is_balanced);
    }

    #[test]
    fn test_prepare_keeps_explicit_period() {
        let mut entry = input(vec![
            JournalLineInput::debit("1.1.02", dec!(1)),
            JournalLineInput::credit("4.1.01", dec!(1)),
        ]);
        entry.period = Some(AccountingPeriod::new(2023, 12).unwrap());

        let prepared = JournalService::prepare(&entry, chart).unwrap();
        assert_eq!(prepared.period.to_string(), "2023-12");
    }

    #[test]
    fn test_prepare_unknown_account() {
        let entry = input(vec![
            JournalLineInput::debit("9.9.99", dec!(1)),
            JournalLineInput::credit("4.1.01", dec!(1)),
        ]);

        assert!(matches!(
            JournalService::prepare(&entry, chart),
            Err(LedgerError::UnknownAccount(code)) if code == "9.9.99"
        ));
    }

    #[test]
    fn test_prepare_rejects_date_without_period() {
        let mut entry = input(vec![
            JournalLineInput::debit("1.1.02", dec!(1)),
            JournalLineInput::credit("4.1.01", dec!(1)),
        ]);
        entry.entry_date = NaiveDate::from_ymd_opt(10_000, 1, 15).unwrap();

        assert!(matches!(
            JournalService::prepare(&entry, chart),
            Err(LedgerError::InvalidPeriod(_))
        ));
    }

    #[test]
    fn test_prepare_validates_before_lookup() {
        let entry = input(vec![JournalLineInput::debit("9.9.99", dec!(1))]);

        assert!(matches!(
            JournalService::prepare(&entry, chart),
            Err(LedgerError::Unbalanced { .. })
        ));
    }

    #[test]
    fn test_codes_missing_names() {
        let entry = input(vec![
            JournalLineInput::debit("1.1.02", dec!(1)),
            JournalLineInput::debit(" 1.1.02", dec!(1)),
            JournalLineInput::credit("4.1.01", dec!(2)).named("Ingresos"),
        ]);

        assert_eq!(JournalService::codes_missing_names(&entry), vec!["1.1.02"]);
    }

    fn stored_from(entry: &PostEntryInput) -> JournalEntryWithLines {
        let prepared = JournalService::prepare(entry, chart).unwrap();
        let id = JournalEntryId::new();
        JournalEntryWithLines {
            entry: JournalEntry {
                id,
                entry_date: prepared.entry_date,
                period: prepared.period,
                description: prepared.description,
                origin: prepared.origin,
                origin_id: prepared.origin_id,
                reversed: false,
                reversal_entry_id: None,
                created_by: prepared.created_by,
                created_at: Utc::now(),
            },
            lines: prepared
                .lines
                .into_iter()
                .map(|l| JournalLine {
                    id: JournalLineId::new(),
                    entry_id: id,
                    line_no: l.line_no,
                    account_code: l.account_code,
                    account_name: l.account_name,
                    debit: l.debit,
                    credit: l.credit,
                    description: l.description,
                })
                .collect(),
        }
    }

    fn receivable(amount: rust_decimal::Decimal) -> PostEntryInput {
        let mut entry = input(vec![
            JournalLineInput::debit("1.1.02", amount),
            JournalLineInput::credit("4.1.01", amount),
        ]);
        entry.origin = OriginTag::module("RECEIVABLES");
        entry.origin_id = Some("INV-1".to_string());
        entry
    }

    #[test]
    fn test_same_posting_ignores_text_fields() {
        let stored = stored_from(&receivable(dec!(118)));

        let mut again = receivable(dec!(118.00));
        again.description = "Retried".to_string();
        again.created_by = "bob".to_string();
        again.lines[0].account_code = " 1.1.02 ".to_string();

        assert!(JournalService::is_same_posting(&stored, &again));
    }

    #[test]
    fn test_different_amount_is_not_same_posting() {
        let stored = stored_from(&receivable(dec!(118)));
        assert!(!JournalService::is_same_posting(&stored, &receivable(dec!(9000))));
    }

    #[test]
    fn test_different_date_or_period_is_not_same_posting() {
        let stored = stored_from(&receivable(dec!(118)));

        let mut later = receivable(dec!(118));
        later.entry_date = NaiveDate::from_ymd_opt(2024, 1, 16).unwrap();
        assert!(!JournalService::is_same_posting(&stored, &later));

        let mut moved = receivable(dec!(118));
        moved.period = Some(AccountingPeriod::new(2023, 12).unwrap());
        assert!(!JournalService::is_same_posting(&stored, &moved));
    }

    #[test]
    fn test_extra_line_is_not_same_posting() {
        let stored = stored_from(&receivable(dec!(118)));

        let mut split = receivable(dec!(100));
        split.lines.push(JournalLineInput::debit("1.1.02", dec!(18)));
        split.lines.push(JournalLineInput::credit("4.1.01", dec!(18)));
        assert!(!JournalService::is_same_posting(&stored, &split));
    }
}
