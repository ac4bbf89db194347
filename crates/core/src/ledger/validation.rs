//! Business rule validation for journal lines.

use folio_shared::types::round_currency;
use rust_decimal::Decimal;

use super::types::{EntryTotals, JournalLineInput};
use crate::error::LedgerError;

/// Validates a set of lines and returns their rounded totals.
///
/// Rules, checked in order: at least one line, no negative amount, no amount
/// finer than the currency scale, totals equal at currency scale. A single
/// line may carry both a debit and a credit.
///
/// Amounts are stored as given and must already be at currency scale.
///
/// # Errors
///
/// Returns `EmptyEntry`, `NegativeAmount`, `ExcessPrecision` or `Unbalanced`.
pub fn validate_lines(lines: &[JournalLineInput]) -> Result<EntryTotals, LedgerError> {
    if lines.is_empty() {
        return Err(LedgerError::EmptyEntry);
    }

    let mut total_debit = Decimal::ZERO;
    let mut total_credit = Decimal::ZERO;

    for line in lines {
        if line.debit < Decimal::ZERO || line.credit < Decimal::ZERO {
            return Err(LedgerError::NegativeAmount);
        }
        for amount in [line.debit, line.credit] {
            if round_currency(amount) != amount {
                return Err(LedgerError::ExcessPrecision(amount));
            }
        }
        total_debit += line.debit;
        total_credit += line.credit;
    }

    let totals = EntryTotals::new(total_debit, total_credit);
    if !totals.is_balanced {
        return Err(LedgerError::Unbalanced {
            debit: totals.debit,
            credit: totals.credit,
        });
    }

    Ok(totals)
}
