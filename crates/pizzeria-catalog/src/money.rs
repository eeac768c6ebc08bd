//! Decimal money helpers
//!
//! Every monetary total in the storefront goes through [`round2`] right
//! after the multiplication that produced it, so repeated recomputation never
//! drifts.

use rust_decimal::{Decimal, RoundingStrategy};

/// Monetary amount
pub type Money = Decimal;

/// Round to two decimal places, half-up (midpoint away from zero)
#[inline]
#[must_use]
pub fn round2(amount: Money) -> Money {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// `round2(unit_price * quantity)`
#[inline]
#[must_use]
pub fn line_total(unit_price: Money, quantity: u32) -> Money {
    round2(unit_price * Decimal::from(quantity))
}
