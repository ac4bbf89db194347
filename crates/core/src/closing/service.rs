//! Closing workflow decisions.
//!
//! Storage calls these while holding its transaction: first to decide what a
//! milestone request does, then to turn the period's preview into the batch
//! snapshot recorded alongside the flag.

use folio_shared::types::round_currency;

use super::batch::{BatchLine, BatchTotals, BatchType};
use super::milestone::{Milestone, MilestoneSet};
use crate::error::LedgerError;
use crate::reports::GlPreview;

/// Outcome of planning a milestone request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MilestoneStep {
    /// The milestone is already set; nothing is written.
    AlreadySet,
    /// The flag is set, recording a batch first when `batch_type` is present.
    Apply {
        /// Batch to record with the flag.
        batch_type: Option<BatchType>,
    },
}

/// Stateless closing service.
pub struct ClosingService;

impl ClosingService {
    /// Decides what posting `milestone` on top of `current` does.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::MilestoneOutOfOrder` when the predecessor is not set.
    pub fn plan(
        current: &MilestoneSet,
        milestone: Milestone,
    ) -> Result<MilestoneStep, LedgerError> {
        if current.is_set(milestone) {
            return Ok(MilestoneStep::AlreadySet);
        }
        current.ensure_can_set(milestone)?;
        Ok(MilestoneStep::Apply {
            batch_type: milestone.batch_type(),
        })
    }

    /// Builds the batch snapshot of a period preview.
    ///
    /// `CLOSE_PNL` keeps only income and expense accounts; every other batch
    /// type keeps every row. Lines are numbered from 1 in preview order.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Unbalanced` when the preview itself does not balance.
    pub fn snapshot(
        batch_type: BatchType,
        preview: &GlPreview,
    ) -> Result<(Vec<BatchLine>, BatchTotals), LedgerError> {
        if !preview.is_balanced {
            return Err(LedgerError::Unbalanced {
                debit: round_currency(preview.totals.total_debit),
                credit: round_currency(preview.totals.total_credit),
            });
        }

        let lines: Vec<BatchLine> = preview
            .rows
            .iter()
            .filter(|row| {
                batch_type != BatchType::ClosePnl || row.account_type.is_profit_and_loss()
            })
            .zip(1..)
            .map(|(row, line_no)| BatchLine {
                line_no,
                account_code: row.account_code.clone(),
                account_name: row.account_name.clone(),
                debit: row.debit,
                credit: row.credit,
                balance: row.balance,
            })
            .collect();
        let totals = BatchTotals::of(&lines);

        Ok((lines, totals))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use crate::reports::{GlAggregator, GlLine};

    fn line(code: &str, name: &str, debit: Decimal, credit: Decimal) -> GlLine {
        GlLine {
            account_code: code.into(),
            account_name: name.into(),
            debit,
            credit,
        }
    }

    fn january_preview() -> GlPreview {
        GlAggregator::preview(
            "ACME",
            2024,
            1,
            vec![
                line("1.1.02", "Bancos", dec!(1500.00), dec!(0)),
                line("4.1.01", "Ingresos", dec!(0), dec!(1000.00)),
                line("2.1.01", "Proveedores", dec!(0), dec!(800.00)),
                line("5.1.01", "Gastos generales", dec!(300.00), dec!(0)),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_plan_already_set_is_noop() {
        let mut current = MilestoneSet::default();
        current.set(Milestone::PeriodClosed);
        current.set(Milestone::GlClosed);

        assert_eq!(
            ClosingService::plan(&current, Milestone::GlClosed).unwrap(),
            MilestoneStep::AlreadySet
        );
    }

    #[test]
    fn test_plan_apply_carries_batch_type() {
        let mut current = MilestoneSet::default();
        current.set(Milestone::PeriodClosed);

        assert_eq!(
            ClosingService::plan(&current, Milestone::GlClosed).unwrap(),
            MilestoneStep::Apply {
                batch_type: Some(BatchType::GlClosing)
            }
        );
    }

    #[test]
    fn test_plan_out_of_order() {
        let mut current = MilestoneSet::default();
        current.set(Milestone::PeriodClosed);

        assert!(matches!(
            ClosingService::plan(&current, Milestone::PnlClosed),
            Err(LedgerError::MilestoneOutOfOrder {
                milestone: Milestone::PnlClosed,
                requires: Milestone::TbClosed,
            })
        ));
    }

    #[test]
    fn test_plan_equity_has_no_batch() {
        let mut current = MilestoneSet::default();
        for m in [
            Milestone::PeriodClosed,
            Milestone::GlClosed,
            Milestone::TbClosed,
            Milestone::PnlClosed,
        ] {
            current.set(m);
        }

        assert_eq!(
            ClosingService::plan(&current, Milestone::EquityClosed).unwrap(),
            MilestoneStep::Apply { batch_type: None }
        );
    }

    #[test]
    fn test_snapshot_keeps_every_row() {
        let preview = january_preview();
        let (lines, totals) = ClosingService::snapshot(BatchType::GlClosing, &preview).unwrap();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0].line_no, 1);
        assert_eq!(lines[3].line_no, 4);
        assert_eq!(totals.total_debit, dec!(1800.00));
        assert_eq!(totals.total_credit, dec!(1800.00));
    }

    #[test]
    fn test_snapshot_close_pnl_keeps_income_and_expense() {
        let preview = january_preview();
        let (lines, totals) = ClosingService::snapshot(BatchType::ClosePnl, &preview).unwrap();

        let codes: Vec<&str> = lines.iter().map(|l| l.account_code.as_str()).collect();
        assert_eq!(codes, vec!["4.1.01", "5.1.01"]);
        assert_eq!(lines[0].line_no, 1);
        assert_eq!(lines[1].line_no, 2);
        assert_eq!(totals.total_debit, dec!(300.00));
        assert_eq!(totals.total_credit, dec!(1000.00));
    }

    #[test]
    fn test_snapshot_rejects_unbalanced_preview() {
        let preview = GlAggregator::preview(
            "ACME",
            2024,
            1,
            vec![line("1.1.02", "Bancos", dec!(10.00), dec!(0))],
        )
        .unwrap();

        assert!(matches!(
            ClosingService::snapshot(BatchType::TbPost, &preview),
            Err(LedgerError::Unbalanced { .. })
        ));
    }
}
