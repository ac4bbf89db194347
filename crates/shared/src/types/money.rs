//! Currency precision helpers.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Every amount is a `rust_decimal::Decimal`; comparisons that decide whether
//! the books balance happen after rounding to the currency scale.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places money is compared and reported at.
pub const CURRENCY_SCALE: u32 = 2;

/// Rounds an amount to the currency scale with banker's rounding.
///
/// Uses `RoundingStrategy::MidpointNearestEven` so that repeated rounding of
/// many lines does not drift in one direction:
/// - 2.345 → 2.34
/// - 2.355 → 2.36
#[must_use]
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(CURRENCY_SCALE, RoundingStrategy::MidpointNearestEven)
}

/// Returns true if the amount is zero once rounded to the currency scale.
#[must_use]
pub fn is_zero_at_scale(amount: Decimal) -> bool {
    round_currency(amount).is_zero()
}
