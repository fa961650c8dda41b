//! Fixed-precision money helpers
//!
//! Prices are carried as `f64` in records and on the wire, but every
//! rounding and summation goes through `rust_decimal` so that values such as
//! `10.005` round the way they read (to `10.01`) instead of following their
//! binary approximation.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

/// Number of fractional digits kept for prices
pub const PRICE_DECIMAL_PLACES: u32 = 2;

/// Convert f64 to Decimal for calculation
///
/// Goes through the shortest round-trip text of the float, so the decimal
/// is the number as written rather than its binary expansion. Non-finite
/// input has no decimal form and becomes zero.
pub fn to_decimal(value: f64) -> Decimal {
    value
        .to_string()
        .parse::<Decimal>()
        .ok()
        .or_else(|| Decimal::from_f64(value))
        .unwrap_or_default()
}

/// Round to `places` fractional digits, ties away from zero
pub fn round_to(value: f64, places: u32) -> f64 {
    to_decimal(value)
        .round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Round a price to two decimal places, ties away from zero
///
/// `12.345 → 12.35`, `-12.345 → -12.35`, `10.005 → 10.01`.
#[inline]
pub fn round_price(value: f64) -> f64 {
    round_to(value, PRICE_DECIMAL_PLACES)
}

/// Sum optional amounts, treating missing amounts as zero
pub fn sum_amounts<I>(amounts: I) -> f64
where
    I: IntoIterator<Item = Option<f64>>,
{
    amounts
        .into_iter()
        .flatten()
        .map(to_decimal)
        .sum::<Decimal>()
        .to_f64()
        .unwrap_or_default()
}
