//! String value generator.
//!
//! Strings are made of ASCII letters only and are at least eight characters
//! long, so they never read as a number, a boolean, `null`, or any other
//! reserved token in JSON or YAML.

use faker_core::FakeValue;
use rand::Rng;

const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Shortest generated string.
pub const MIN_LEN: usize = 8;
/// Longest generated string.
pub const MAX_LEN: usize = 16;

/// Generate a random letter string of `MIN_LEN..=MAX_LEN` characters.
pub fn generate_text<R: Rng>(rng: &mut R) -> FakeValue {
    FakeValue::String(random_letters(rng, MIN_LEN, MAX_LEN))
}

/// Random string of ASCII letters with a length in `min..=max`.
pub fn random_letters<R: Rng>(rng: &mut R, min: usize, max: usize) -> String {
    let len = rng.random_range(min..=max);
    (0..len)
        .map(|_| LETTERS[rng.random_range(0..LETTERS.len())] as char)
        .collect()
}
