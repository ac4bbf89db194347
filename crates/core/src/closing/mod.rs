//! Period-closing state machine and batch snapshots.

pub mod batch;
pub mod milestone;
pub mod service;
pub mod types;

pub use batch::{
    BatchLine, BatchReport, BatchReportHeader, BatchReportLine, BatchStatus, BatchTotals,
    BatchType, ClosingBatch, RecordBatchInput, batch_code,
};
pub use milestone::{Milestone, MilestoneSet};
pub use service::{ClosingService, MilestoneStep};
pub use types::{ClosingScope, ClosingStatus};
