//! Common types used across the application.

pub mod id;
pub mod money;

#[cfg(test)]
mod id_tests;

pub use id::*;
pub use money::{CURRENCY_SCALE, is_zero_at_scale, round_currency};
