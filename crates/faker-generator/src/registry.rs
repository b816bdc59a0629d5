//! Value generator registry.
//!
//! Built-in generators cover the primitive kinds, enumerations and records.
//! Callers register overrides keyed by the exact declared type; an override
//! always wins over the built-in for that type.

use crate::classify::Shape;
use faker_core::{EnumType, FakeValue, NamedTypes, PrimitiveKind, RecordSchema, TypeExpr, TypeKey};
use rand::rngs::StdRng;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A caller-supplied generator for one declared type.
pub type OverrideFn = Arc<dyn Fn(&mut StdRng) -> FakeValue + Send + Sync>;

/// Generator chosen for a leaf or record shape.
pub enum Generator<'a> {
    /// Caller override
    Override(&'a OverrideFn),
    /// Built-in primitive generator
    Primitive(PrimitiveKind),
    /// Uniform choice among the labels
    Enum(&'a EnumType),
    /// Recursive build of the nested record
    Record(&'a RecordSchema),
}

impl fmt::Debug for Generator<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Override(_) => f.write_str("Override"),
            Self::Primitive(kind) => write!(f, "Primitive({kind})"),
            Self::Enum(e) => write!(f, "Enum({})", e.name),
            Self::Record(schema) => write!(f, "Record({})", schema.name),
        }
    }
}

/// A registered override and the type its values decode as.
#[derive(Clone)]
struct OverrideEntry {
    generate: OverrideFn,
    decodes_as: Option<TypeExpr>,
}

/// Override table, read-only once built.
#[derive(Clone, Default)]
pub struct GeneratorRegistry {
    overrides: HashMap<TypeKey, OverrideEntry>,
}

impl GeneratorRegistry {
    /// Create a registry with built-in generators only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an override for a declared type.
    ///
    /// ```rust
    /// use faker_core::{FakeValue, TypeExpr};
    /// use faker_generator::GeneratorRegistry;
    ///
    /// let registry = GeneratorRegistry::new()
    ///     .with_override("Money", |_| FakeValue::String("EUR".to_string()))
    ///     .with_override(TypeExpr::FLOAT, |_| FakeValue::Float(0.25));
    ///
    /// assert_eq!(registry.len(), 2);
    /// ```
    pub fn with_override<K, F>(self, key: K, generator: F) -> Self
    where
        K: Into<TypeKey>,
        F: Fn(&mut StdRng) -> FakeValue + Send + Sync + 'static,
    {
        self.insert(key.into(), Arc::new(generator), None)
    }

    /// Register an override whose values decode as `decodes_as`.
    ///
    /// A custom named type carries no schema of its own, so a decoder reads
    /// it back at face value unless told what the override produces.
    ///
    /// ```rust
    /// use faker_core::{PrimitiveKind, TypeExpr, TypeKey};
    /// use faker_generator::generators::generate_primitive;
    /// use faker_generator::GeneratorRegistry;
    ///
    /// let registry = GeneratorRegistry::new()
    ///     .with_override_as("AssetId", TypeExpr::UUID, |rng| {
    ///         generate_primitive(PrimitiveKind::Uuid, rng)
    ///     });
    ///
    /// let named = registry.named_types();
    /// assert_eq!(named.get(&TypeKey::from("AssetId")), Some(&TypeExpr::UUID));
    /// ```
    pub fn with_override_as<K, F>(self, key: K, decodes_as: TypeExpr, generator: F) -> Self
    where
        K: Into<TypeKey>,
        F: Fn(&mut StdRng) -> FakeValue + Send + Sync + 'static,
    {
        self.insert(key.into(), Arc::new(generator), Some(decodes_as))
    }

    fn insert(mut self, key: TypeKey, generate: OverrideFn, decodes_as: Option<TypeExpr>) -> Self {
        self.overrides.insert(key, OverrideEntry { generate, decodes_as });
        self
    }

    /// Check whether an override is registered for a key.
    pub fn has_override(&self, key: &TypeKey) -> bool {
        self.overrides.contains_key(key)
    }

    /// Get the override registered for a key.
    pub fn get_override(&self, key: &TypeKey) -> Option<&OverrideFn> {
        self.overrides.get(key).map(|entry| &entry.generate)
    }

    /// Decoding types declared with `with_override_as`.
    pub fn named_types(&self) -> NamedTypes {
        self.overrides
            .iter()
            .filter_map(|(key, entry)| Some((key.clone(), entry.decodes_as.clone()?)))
            .collect()
    }

    /// Number of registered overrides.
    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    /// Whether no override is registered.
    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }

    /// Resolve the generator for a classified shape.
    ///
    /// Returns `None` for structural shapes (optional, union, sequence,
    /// mapping), which the builder expands itself.
    pub fn resolve<'a>(&'a self, shape: &Shape<'a>) -> Option<Generator<'a>> {
        match shape {
            Shape::Override(key) => self.get_override(key).map(Generator::Override),
            Shape::Primitive(kind) => Some(Generator::Primitive(*kind)),
            Shape::Enum(e) => Some(Generator::Enum(*e)),
            Shape::Record(schema) => Some(Generator::Record(*schema)),
            Shape::Optional(_) | Shape::Union(_) | Shape::Sequence(_) | Shape::Mapping { .. } => {
                None
            }
        }
    }
}

impl fmt::Debug for GeneratorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&str> = self.overrides.keys().map(TypeKey::as_str).collect();
        keys.sort_unstable();
        f.debug_struct("GeneratorRegistry")
            .field("overrides", &keys)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_registry_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<GeneratorRegistry>();
    }

    #[test]
    fn test_resolve_override() {
        let registry =
            GeneratorRegistry::new().with_override("Money", |_| FakeValue::Int(100));
        let shape = Shape::Override(TypeKey::from("Money"));

        let mut rng = StdRng::seed_from_u64(42);
        match registry.resolve(&shape) {
            Some(Generator::Override(f)) => assert_eq!(f(&mut rng), FakeValue::Int(100)),
            other => panic!("Expected override, got {other:?}"),
        }
    }

    #[test]
    fn test_resolve_builtins() {
        let registry = GeneratorRegistry::new();

        assert!(matches!(
            registry.resolve(&Shape::Primitive(PrimitiveKind::Uuid)),
            Some(Generator::Primitive(PrimitiveKind::Uuid))
        ));

        let shock_to = EnumType::new("ShockTo", ["ASSET", "FACTOR"]);
        assert!(matches!(
            registry.resolve(&Shape::Enum(&shock_to)),
            Some(Generator::Enum(e)) if e.name == "ShockTo"
        ));

        let element = TypeExpr::FLOAT;
        assert!(registry.resolve(&Shape::Sequence(&element)).is_none());
    }

    #[test]
    fn test_later_override_replaces_earlier() {
        let registry = GeneratorRegistry::new()
            .with_override("Money", |_| FakeValue::Int(1))
            .with_override("Money", |_| FakeValue::Int(2));
        assert_eq!(registry.len(), 1);

        let mut rng = StdRng::seed_from_u64(42);
        let f = registry.get_override(&TypeKey::from("Money")).unwrap();
        assert_eq!(f(&mut rng), FakeValue::Int(2));
    }

    #[test]
    fn test_named_types_lists_declared_decodings() {
        let registry = GeneratorRegistry::new()
            .with_override("Money", |_| FakeValue::Int(1))
            .with_override_as("TradeDate", TypeExpr::DATE, |rng| {
                crate::generators::generate_primitive(PrimitiveKind::Date, rng)
            });

        let named = registry.named_types();
        assert_eq!(named.len(), 1);
        assert_eq!(named.get(&TypeKey::from("TradeDate")), Some(&TypeExpr::DATE));

        let mut rng = StdRng::seed_from_u64(42);
        let f = registry.get_override(&TypeKey::from("TradeDate")).unwrap();
        assert!(matches!(f(&mut rng), FakeValue::Date(_)));
    }
}
