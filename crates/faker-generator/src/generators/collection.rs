//! Sequence and mapping length helpers.

use faker_core::FakeValue;
use rand::Rng;
use std::collections::HashSet;

/// Draws allowed per requested element before giving up on uniqueness.
const ATTEMPTS_PER_ELEMENT: usize = 16;

/// Pick a collection length in `min_length..=max_length`.
pub fn pick_length<R: Rng>(rng: &mut R, min_length: usize, max_length: usize) -> usize {
    if min_length >= max_length {
        min_length
    } else {
        rng.random_range(min_length..=max_length)
    }
}

/// Collect up to `target` values whose keys are pairwise distinct.
///
/// Duplicates are discarded and redrawn. When the key space is smaller than
/// `target` (a two-label enum, booleans) the result is shorter, never empty.
pub fn collect_unique<F, E>(target: usize, mut draw: F) -> Result<Vec<FakeValue>, E>
where
    F: FnMut() -> Result<FakeValue, E>,
{
    let mut seen = HashSet::new();
    let mut values = Vec::with_capacity(target);
    let mut attempts = 0;

    while values.len() < target && attempts < target * ATTEMPTS_PER_ELEMENT {
        attempts += 1;
        let value = draw()?;
        let key = value.key_string().unwrap_or_else(|| value.to_string());
        if seen.insert(key) {
            values.push(value);
        }
    }

    Ok(values)
}
