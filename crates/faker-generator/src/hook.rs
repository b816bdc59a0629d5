//! Pre-construction hooks.
//!
//! A hook sees the fully generated field map of the top-level record exactly
//! once, right before the record is constructed. Nested records are never
//! passed to it.

use faker_core::FieldMap;
use std::collections::BTreeSet;

/// Transformation applied to the assembled field map before construction.
pub trait PreConstructionHook {
    /// Return the field map to construct the record from.
    fn apply(&self, fields: FieldMap) -> FieldMap;
}

impl<F> PreConstructionHook for F
where
    F: Fn(FieldMap) -> FieldMap,
{
    fn apply(&self, fields: FieldMap) -> FieldMap {
        self(fields)
    }
}

/// Hook that leaves the field map untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl PreConstructionHook for Identity {
    fn apply(&self, fields: FieldMap) -> FieldMap {
        fields
    }
}

/// Hook that deletes a fixed set of fields.
///
/// Deleting optional fields makes them absent at construction, which is how
/// a caller clears mutually exclusive optionals:
///
/// ```rust
/// use faker_core::{FakeValue, FieldMap};
/// use faker_generator::{PreConstructionHook, RemoveFields};
///
/// let hook = RemoveFields::new(["yield_curve", "vol_surface"]);
///
/// let mut fields = FieldMap::new();
/// fields.insert("yield_curve".to_string(), FakeValue::Null);
/// fields.insert("spot".to_string(), FakeValue::Float(101.5));
///
/// let fields = hook.apply(fields);
/// assert!(!fields.contains_key("yield_curve"));
/// assert!(fields.contains_key("spot"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoveFields {
    fields: BTreeSet<String>,
}

impl RemoveFields {
    /// Create a hook removing the given fields.
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Fields this hook removes, sorted.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(String::as_str)
    }

    /// Whether the hook removes nothing.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl PreConstructionHook for RemoveFields {
    fn apply(&self, mut fields: FieldMap) -> FieldMap {
        for name in &self.fields {
            fields.remove(name);
        }
        fields
    }
}
