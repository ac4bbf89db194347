//! Journal entries derived from operational modules.
//!
//! A feed lists the records of one module. The service decides which ones
//! still need an entry and what that entry looks like; storage posts them.

pub mod feed;
pub mod service;

pub use feed::{SourceFeed, SourceRecord, SyncRule};
pub use service::SyncService;
