//! Shared primitive types used across the simulation.

/// A simulated day. Days are 1-indexed.
pub type Day = u32;

/// A discrete demand outcome.
pub type Demand = f64;

/// A probability or cumulative probability.
pub type Probability = f64;

use rust_decimal::{Decimal, RoundingStrategy};

/// Tolerance for "already sums to 1".
pub const SUM_TOLERANCE: f64 = 1e-6;

/// Decimal digits kept in cumulative probabilities.
pub const CUMULATIVE_PRECISION: u32 = 4;

/// Round to `digits` decimal places, ties to even.
///
/// Rounds the exact decimal expansion of `value`, not `value * 10^digits`.
/// Scaling first can turn 0.268749999... into an exact .5 tie.
/// Non-finite values pass through unchanged.
pub fn round_to(value: f64, digits: u32) -> f64 {
    let Some(exact) = Decimal::from_f64_retain(value) else {
        return value;
    };
    let rounded = exact.round_dp_with_strategy(digits, RoundingStrategy::MidpointNearestEven);
    // Both parts are exact in f64 at these magnitudes, so the division is
    // the correctly rounded nearest f64 to the decimal result.
    rounded.mantissa() as f64 / 10f64.powi(rounded.scale() as i32)
}
