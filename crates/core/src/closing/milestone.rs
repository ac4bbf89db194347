//! Closing milestones and their ordering.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::batch::BatchType;
use crate::error::LedgerError;

/// One step of the period-closing workflow.
///
/// Milestones are strictly ordered: each one requires its predecessor to be
/// set, and none can ever be cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Milestone {
    /// The period accepts no further closing adjustments.
    PeriodClosed,
    /// General ledger closed.
    GlClosed,
    /// Trial balance closed.
    TbClosed,
    /// Profit and loss accounts closed.
    PnlClosed,
    /// Equity closed.
    EquityClosed,
    /// Financial statements finalized.
    FsClosed,
    /// Next fiscal year opened.
    FyOpened,
}

impl Milestone {
    /// Every milestone in workflow order.
    pub const ALL: [Self; 7] = [
        Self::PeriodClosed,
        Self::GlClosed,
        Self::TbClosed,
        Self::PnlClosed,
        Self::EquityClosed,
        Self::FsClosed,
        Self::FyOpened,
    ];

    /// The milestone that must be set before this one.
    #[must_use]
    pub const fn predecessor(self) -> Option<Self> {
        match self {
            Self::PeriodClosed => None,
            Self::GlClosed => Some(Self::PeriodClosed),
            Self::TbClosed => Some(Self::GlClosed),
            Self::PnlClosed => Some(Self::TbClosed),
            Self::EquityClosed => Some(Self::PnlClosed),
            Self::FsClosed => Some(Self::EquityClosed),
            Self::FyOpened => Some(Self::FsClosed),
        }
    }

    /// The batch recorded when this milestone is posted, if any.
    #[must_use]
    pub const fn batch_type(self) -> Option<BatchType> {
        match self {
            Self::PeriodClosed | Self::EquityClosed => None,
            Self::GlClosed => Some(BatchType::GlClosing),
            Self::TbClosed => Some(BatchType::TbPost),
            Self::PnlClosed => Some(BatchType::ClosePnl),
            Self::FsClosed => Some(BatchType::FsFinal),
            Self::FyOpened => Some(BatchType::OpenFy),
        }
    }

    /// Returns the column name of this milestone's flag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PeriodClosed => "period_closed",
            Self::GlClosed => "gl_closed",
            Self::TbClosed => "tb_closed",
            Self::PnlClosed => "pnl_closed",
            Self::EquityClosed => "equity_closed",
            Self::FsClosed => "fs_closed",
            Self::FyOpened => "fy_opened",
        }
    }
}

impl fmt::Display for Milestone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The seven closing flags of one scope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct MilestoneSet {
    /// Period closed.
    pub period_closed: bool,
    /// General ledger closed.
    pub gl_closed: bool,
    /// Trial balance closed.
    pub tb_closed: bool,
    /// Profit and loss closed.
    pub pnl_closed: bool,
    /// Equity closed.
    pub equity_closed: bool,
    /// Financial statements closed.
    pub fs_closed: bool,
    /// Fiscal year opened.
    pub fy_opened: bool,
}

impl MilestoneSet {
    /// Returns whether a milestone is set.
    #[must_use]
    pub const fn is_set(&self, milestone: Milestone) -> bool {
        match milestone {
            Milestone::PeriodClosed => self.period_closed,
            Milestone::GlClosed => self.gl_closed,
            Milestone::TbClosed => self.tb_closed,
            Milestone::PnlClosed => self.pnl_closed,
            Milestone::EquityClosed => self.equity_closed,
            Milestone::FsClosed => self.fs_closed,
            Milestone::FyOpened => self.fy_opened,
        }
    }

    /// Sets a milestone. Flags only move from false to true.
    pub const fn set(&mut self, milestone: Milestone) {
        match milestone {
            Milestone::PeriodClosed => self.period_closed = true,
            Milestone::GlClosed => self.gl_closed = true,
            Milestone::TbClosed => self.tb_closed = true,
            Milestone::PnlClosed => self.pnl_closed = true,
            Milestone::EquityClosed => self.equity_closed = true,
            Milestone::FsClosed => self.fs_closed = true,
            Milestone::FyOpened => self.fy_opened = true,
        }
    }

    /// Checks that the predecessor of `milestone` is set.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::MilestoneOutOfOrder` naming the missing predecessor.
    pub fn ensure_can_set(&self, milestone: Milestone) -> Result<(), LedgerError> {
        match milestone.predecessor() {
            Some(requires) if !self.is_set(requires) => {
                Err(LedgerError::MilestoneOutOfOrder { milestone, requires })
            }
            _ => Ok(()),
        }
    }

    /// Returns the last milestone reached in workflow order.
    #[must_use]
    pub fn latest(&self) -> Option<Milestone> {
        Milestone::ALL
            .iter()
            .rev()
            .copied()
            .find(|m| self.is_set(*m))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_all_is_chained_by_predecessor() {
        assert_eq!(Milestone::ALL[0].predecessor(), None);
        for pair in Milestone::ALL.windows(2) {
            assert_eq!(pair[1].predecessor(), Some(pair[0]));
        }
    }

    #[rstest]
    #[case(Milestone::PeriodClosed, None)]
    #[case(Milestone::GlClosed, Some(BatchType::GlClosing))]
    #[case(Milestone::TbClosed, Some(BatchType::TbPost))]
    #[case(Milestone::PnlClosed, Some(BatchType::ClosePnl))]
    #[case(Milestone::EquityClosed, None)]
    #[case(Milestone::FsClosed, Some(BatchType::FsFinal))]
    #[case(Milestone::FyOpened, Some(BatchType::OpenFy))]
    fn test_batch_type(#[case] milestone: Milestone, #[case] expected: Option<BatchType>) {
        assert_eq!(milestone.batch_type(), expected);
    }

    #[test]
    fn test_display_is_flag_name() {
        assert_eq!(Milestone::PnlClosed.to_string(), "pnl_closed");
        assert_eq!(Milestone::FyOpened.to_string(), "fy_opened");
    }

    #[test]
    fn test_set_and_is_set() {
        let mut set = MilestoneSet::default();
        assert!(!set.is_set(Milestone::GlClosed));
        set.set(Milestone::GlClosed);
        assert!(set.gl_closed);
        assert!(set.is_set(Milestone::GlClosed));
        assert!(!set.is_set(Milestone::TbClosed));
    }

    #[test]
    fn test_ensure_can_set_requires_predecessor() {
        let mut set = MilestoneSet::default();
        assert!(set.ensure_can_set(Milestone::PeriodClosed).is_ok());

        let err = set.ensure_can_set(Milestone::GlClosed).unwrap_err();
        assert!(matches!(
            err,
            LedgerError::MilestoneOutOfOrder {
                milestone: Milestone::GlClosed,
                requires: Milestone::PeriodClosed,
            }
        ));

        set.set(Milestone::PeriodClosed);
        assert!(set.ensure_can_set(Milestone::GlClosed).is_ok());
        assert!(set.ensure_can_set(Milestone::PnlClosed).is_err());
    }

    #[test]
    fn test_latest() {
        let mut set = MilestoneSet::default();
        assert_eq!(set.latest(), None);
        set.set(Milestone::PeriodClosed);
        set.set(Milestone::GlClosed);
        assert_eq!(set.latest(), Some(Milestone::GlClosed));
    }
}
