//! Numeric value generators.

use faker_core::FakeValue;
use rand::Rng;

/// Bounds of the default integer generator.
pub const INT_BOUND: i64 = 1_000_000;
/// Bounds of the default float generator.
pub const FLOAT_BOUND: f64 = 1_000_000.0;
/// Decimal places kept by the default float generator.
pub const FLOAT_DECIMALS: i32 = 4;

/// Generate a random integer in the given range (inclusive).
pub fn generate_int_range<R: Rng>(rng: &mut R, min: i64, max: i64) -> FakeValue {
    FakeValue::Int(rng.random_range(min..=max))
}

/// Generate a random finite float in the given range, rounded to `decimals` places.
pub fn generate_float_range<R: Rng>(rng: &mut R, min: f64, max: f64, decimals: i32) -> FakeValue {
    let scale = 10f64.powi(decimals);
    let value = (rng.random_range(min..=max) * scale).round() / scale;
    FakeValue::Float(value.clamp(min, max))
}

/// Integer with the default bounds.
pub fn generate_int<R: Rng>(rng: &mut R) -> FakeValue {
    generate_int_range(rng, -INT_BOUND, INT_BOUND)
}

/// Float with the default bounds and precision.
pub fn generate_float<R: Rng>(rng: &mut R) -> FakeValue {
    generate_float_range(rng, -FLOAT_BOUND, FLOAT_BOUND, FLOAT_DECIMALS)
}
