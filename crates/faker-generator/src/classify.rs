//! Type classification.
//!
//! Reduces a declared `TypeExpr` to the `Shape` the builder dispatches on,
//! resolving record references against the catalog and exact-type overrides
//! against the registry.

use crate::registry::GeneratorRegistry;
use faker_core::{EnumType, PrimitiveKind, RecordSchema, SchemaCatalog, TypeExpr, TypeKey};
use std::borrow::Cow;
use thiserror::Error;

/// Generation strategy of a declared type.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape<'a> {
    /// A caller override registered for the exact declared type
    Override(TypeKey),

    /// Built-in leaf
    Primitive(PrimitiveKind),

    /// Uniform choice among the labels
    Enum(&'a EnumType),

    /// Value that may be absent; generation always fills in the inner type
    Optional(Cow<'a, TypeExpr>),

    /// Null-free alternatives, one picked at random
    Union(&'a [TypeExpr]),

    /// Non-empty sequence of the element type
    Sequence(&'a TypeExpr),

    /// Non-empty mapping with unique keys
    Mapping {
        key: &'a TypeExpr,
        value: &'a TypeExpr,
    },

    /// Nested record, built recursively
    Record(&'a RecordSchema),
}

impl Shape<'_> {
    /// Short name of the shape, for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Override(_) => "override",
            Self::Primitive(_) => "primitive",
            Self::Enum(_) => "enum",
            Self::Optional(_) => "optional",
            Self::Union(_) => "union",
            Self::Sequence(_) => "sequence",
            Self::Mapping { .. } => "mapping",
            Self::Record(_) => "record",
        }
    }
}

/// A type expression with no generation strategy.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("unrecognized type '{0}'")]
pub struct Unrecognized(pub TypeExpr);

/// Classify a declared type.
pub fn classify<'a>(
    expr: &'a TypeExpr,
    catalog: &'a SchemaCatalog,
    registry: &GeneratorRegistry,
) -> Result<Shape<'a>, Unrecognized> {
    if !registry.is_empty() {
        let key = TypeKey::of(expr);
        if registry.has_override(&key) {
            return Ok(Shape::Override(key));
        }
    }

    let unrecognized = || Unrecognized(expr.clone());

    match expr {
        TypeExpr::Primitive(kind) => Ok(Shape::Primitive(*kind)),

        TypeExpr::Enum(e) if !e.values.is_empty() => Ok(Shape::Enum(e)),

        TypeExpr::Optional(inner) => Ok(Shape::Optional(Cow::Borrowed(inner.as_ref()))),

        TypeExpr::Union(alternatives) => {
            let present: Vec<&TypeExpr> = alternatives
                .iter()
                .filter(|a| !matches!(a, TypeExpr::Null))
                .collect();

            match present.as_slice() {
                [] => Err(unrecognized()),
                _ if present.len() == alternatives.len() => Ok(Shape::Union(alternatives)),
                [single] => Ok(Shape::Optional(Cow::Borrowed(*single))),
                rest => Ok(Shape::Optional(Cow::Owned(TypeExpr::Union(
                    rest.iter().map(|a| (*a).clone()).collect(),
                )))),
            }
        }

        TypeExpr::Sequence(element) => Ok(Shape::Sequence(element)),

        TypeExpr::Mapping { key, value } if is_key_type(key, registry) => Ok(Shape::Mapping {
            key: key.as_ref(),
            value: value.as_ref(),
        }),

        TypeExpr::Record(name) | TypeExpr::Named(name) => catalog
            .get_record(name)
            .map(Shape::Record)
            .ok_or_else(unrecognized),

        _ => Err(unrecognized()),
    }
}

/// Whether values of a type can serve as mapping keys.
fn is_key_type(expr: &TypeExpr, registry: &GeneratorRegistry) -> bool {
    match expr {
        TypeExpr::Primitive(kind) => kind.is_key_kind(),
        TypeExpr::Enum(e) => !e.values.is_empty(),
        TypeExpr::Named(_) => registry.has_override(&TypeKey::of(expr)),
        _ => false,
    }
}
