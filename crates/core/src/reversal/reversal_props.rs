//! Property-based tests for ReversalService.

use chrono::{NaiveDate, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;

use folio_shared::types::{JournalEntryId, JournalLineId};

use super::service::ReversalService;
use crate::fiscal::AccountingPeriod;
use crate::ledger::{JournalEntry, JournalEntryWithLines, JournalLine, OriginTag};

/// Strategy for generating amounts with cents.
fn arb_amount() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

/// Strategy for a balanced entry made of debit/credit pairs.
fn arb_entry() -> impl Strategy<Value = JournalEntryWithLines> {
    prop::collection::vec(arb_amount(), 1..6).prop_map(|amounts| {
        let id = JournalEntryId::new();
        let lines = amounts
            .iter()
            .flat_map(|a| [(*a, Decimal::ZERO, "1.1.02"), (Decimal::ZERO, *a, "4.1.01")])
            .zip(1..)
            .map(|((debit, credit, code), line_no)| JournalLine {
                id: JournalLineId::new(),
                entry_id: id,
                line_no,
                account_code: code.to_string(),
                account_name: code.to_string(),
                debit,
                credit,
                description: None,
            })
            .collect();

        JournalEntryWithLines {
            entry: JournalEntry {
                id,
                entry_date: NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
                period: AccountingPeriod::new(2024, 6).unwrap(),
                description: "generated".into(),
                origin: OriginTag::Manual,
                origin_id: None,
                reversed: false,
                reversal_entry_id: None,
                created_by: "prop".into(),
                created_at: Utc::now(),
            },
            lines,
        }
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Each reversal line is the source line with debit and credit swapped.
    #[test]
    fn prop_reversal_swaps_every_line(target in arb_entry()) {
        let reversal = ReversalService::build(&target, "prop").unwrap();

        prop_assert_eq!(reversal.lines.len(), target.lines.len());
        for (orig, rev) in target.lines.iter().zip(&reversal.lines) {
            prop_assert_eq!(&rev.account_code, &orig.account_code);
            prop_assert_eq!(rev.debit, orig.credit);
            prop_assert_eq!(rev.credit, orig.debit);
            prop_assert_eq!(rev.line_no, orig.line_no);
        }
    }

    /// A reversal of a balanced entry is balanced with the same totals, swapped.
    #[test]
    fn prop_reversal_is_balanced(target in arb_entry()) {
        let original = target.totals();
        let reversal = ReversalService::build(&target, "prop").unwrap();

        prop_assert!(reversal.totals.is_balanced);
        prop_assert_eq!(reversal.totals.debit, original.credit);
        prop_assert_eq!(reversal.totals.credit, original.debit);
    }
}
