use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

/// Significant digits kept by [`correct_float`].
///
/// Fourteen digits drop the binary representation noise of every value the
/// layout produces (percentages in `[0, 100]`) while staying well above the
/// precision a pixel grid can observe.
pub const CORRECT_FLOAT_PRECISION: u32 = 14;

/// Absolute tolerance for comparing corrected percentages.
pub const LAYOUT_TOLERANCE: f64 = 1e-9;

/// Rounds `value` to [`CORRECT_FLOAT_PRECISION`] significant decimal digits.
///
/// `0.1 + 0.2` becomes exactly `0.3`. Non-finite values and magnitudes the
/// decimal type cannot hold are returned unchanged.
#[must_use]
pub fn correct_float(value: f64) -> f64 {
    correct_float_with_precision(value, CORRECT_FLOAT_PRECISION)
}

#[must_use]
pub fn correct_float_with_precision(value: f64, significant_digits: u32) -> f64 {
    if !value.is_finite() || value == 0.0 {
        return value;
    }
    Decimal::from_f64(value)
        .and_then(|decimal| {
            decimal.round_sf_with_strategy(
                significant_digits,
                RoundingStrategy::MidpointAwayFromZero,
            )
        })
        .and_then(|rounded| rounded.to_f64())
        .unwrap_or(value)
}

/// `true` when both values are within [`LAYOUT_TOLERANCE`] of each other.
#[must_use]
pub fn approx_eq(left: f64, right: f64) -> bool {
    (left - right).abs() <= LAYOUT_TOLERANCE
}
