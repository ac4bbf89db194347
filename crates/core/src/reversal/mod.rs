//! Compensating entries for posted journal entries.

pub mod service;

#[cfg(test)]
mod reversal_props;

pub use service::ReversalService;
