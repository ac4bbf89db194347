//! Property-based tests for journal line validation.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::types::JournalLineInput;
use super::validation::validate_lines;
use crate::error::LedgerError;

/// Strategy to generate a valid non-negative amount with cents.
fn amount() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate a balanced set of lines: random debits and one
/// closing credit line per debit.
fn balanced_lines() -> impl Strategy<Value = Vec<JournalLineInput>> {
    prop::collection::vec(amount(), 1..10).prop_map(|amounts| {
        amounts
            .into_iter()
            .flat_map(|a| {
                [
                    JournalLineInput::debit("1.1.02", a),
                    JournalLineInput::credit("4.1.01", a),
                ]
            })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Balanced line sets always validate and report equal totals.
    #[test]
    fn prop_balanced_lines_accepted(lines in balanced_lines()) {
        let totals = validate_lines(&lines).unwrap();
        prop_assert!(totals.is_balanced);
        prop_assert_eq!(totals.debit, totals.credit);
    }

    /// Shifting one side by at least a cent makes the set unbalanced.
    #[test]
    fn prop_off_by_cents_rejected(
        mut lines in balanced_lines(),
        cents in 1i64..1_000_000i64,
    ) {
        lines.push(JournalLineInput::debit("5.1.01", Decimal::new(cents, 2)));

        let result = validate_lines(&lines);
        prop_assert!(
            matches!(result, Err(LedgerError::Unbalanced { .. })),
            "expected Unbalanced, got {:?}",
            result
        );
    }

    /// Any negative amount is rejected regardless of balance.
    #[test]
    fn prop_negative_rejected(
        mut lines in balanced_lines(),
        cents in 1i64..1_000_000i64,
    ) {
        let negative = Decimal::new(-cents, 2);
        lines.push(JournalLineInput::debit("5.1.01", negative));
        lines.push(JournalLineInput::credit("5.1.01", negative));

        prop_assert!(matches!(validate_lines(&lines), Err(LedgerError::NegativeAmount)));
    }

    /// Amounts finer than a cent are rejected even when totals round equal.
    #[test]
    fn prop_sub_cent_amounts_rejected(
        mut lines in balanced_lines(),
        mills in 1i64..10i64,
    ) {
        lines.push(JournalLineInput::debit("5.1.01", Decimal::new(mills, 3)));

        prop_assert!(matches!(
            validate_lines(&lines),
            Err(LedgerError::ExcessPrecision(_))
        ));
    }
}
