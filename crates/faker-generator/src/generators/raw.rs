//! Raw (encoded object) generator.
//!
//! A raw value is a small JSON object carried as text. It is compared by its
//! exact text after a round trip, so key order is fixed by a `BTreeMap`.

use super::text::random_letters;
use faker_core::FakeValue;
use rand::Rng;
use std::collections::BTreeMap;

/// Generate a JSON object with one to three string entries, as text.
pub fn generate_raw<R: Rng>(rng: &mut R) -> FakeValue {
    let entries = rng.random_range(1..=3);
    let object: BTreeMap<String, String> = (0..entries)
        .map(|_| (random_letters(rng, 4, 8), random_letters(rng, 8, 12)))
        .collect();

    // Serializing a map of strings cannot fail.
    let text = serde_json::to_string(&object).unwrap_or_else(|_| "{}".to_string());
    FakeValue::Raw(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generate_raw_is_json_object() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..20 {
            let FakeValue::Raw(text) = generate_raw(&mut rng) else {
                panic!("Expected Raw value");
            };
            let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
            let object = parsed.as_object().unwrap();
            assert!((1..=3).contains(&object.len()));
            assert!(object.values().all(|v| v.is_string()));
        }
    }
}
