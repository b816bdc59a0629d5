//! Uniform choice helpers.

use faker_core::{EnumType, FakeValue};
use rand::seq::IndexedRandom;
use rand::Rng;

/// Pick one item uniformly; `None` for an empty slice.
pub fn pick<'a, T, R: Rng>(rng: &mut R, items: &'a [T]) -> Option<&'a T> {
    items.choose(rng)
}

/// Pick one label of an enumeration.
pub fn pick_label<R: Rng>(rng: &mut R, enum_type: &EnumType) -> Option<FakeValue> {
    pick(rng, &enum_type.values).map(|label| FakeValue::Enum(label.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_pick_label_is_member() {
        let mut rng = StdRng::seed_from_u64(42);
        let shock_to = EnumType::new("ShockTo", ["ASSET", "FACTOR"]);

        for _ in 0..50 {
            let value = pick_label(&mut rng, &shock_to).unwrap();
            assert!(shock_to.contains(value.as_str().unwrap()));
        }
    }

    #[test]
    fn test_pick_empty() {
        let mut rng = StdRng::seed_from_u64(42);
        let empty: [u8; 0] = [];
        assert!(pick(&mut rng, &empty).is_none());
        assert!(pick_label(&mut rng, &EnumType::new("Empty", Vec::<String>::new())).is_none());
    }

    #[test]
    fn test_pick_reaches_every_item() {
        let mut rng = StdRng::seed_from_u64(42);
        let items = ["a", "b", "c"];
        let mut seen = std::collections::HashSet::new();
        for _ in 0..100 {
            seen.insert(*pick(&mut rng, &items).unwrap());
        }
        assert_eq!(seen.len(), 3);
    }
}
