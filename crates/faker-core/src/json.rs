//! JSON conversions for generated values.
//!
//! - Forward: `FakeValue` → `serde_json::Value` (schema-free)
//! - Reverse: `serde_json::Value` → `FakeValue`, guided by the declared
//!   `TypeExpr` and the catalog for nested records
//!
//! The JSON rendering matches what serde derives produce for the equivalent
//! Rust types (chrono, uuid and `Option`), so typed models and dynamic
//! records share one structural view.

use crate::schema::{RecordSchema, SchemaCatalog};
use crate::types::{PrimitiveKind, TypeExpr, TypeKey};
use crate::values::{format_datetime, FakeValue, FieldMap, Record};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Errors converting JSON back into generated values.
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    /// JSON value has the wrong shape for the declared type
    #[error("Type mismatch at {path}: expected {expected}, found {found}")]
    TypeMismatch {
        path: String,
        expected: String,
        found: String,
    },

    /// Required field absent from the encoded object
    #[error("Missing required field at {path}")]
    MissingField { path: String },

    /// Encoded object carries a field the schema does not declare
    #[error("Unexpected field at {path}")]
    UnexpectedField { path: String },

    /// Label not declared by the enumeration
    #[error("Invalid label '{label}' for enum {enum_name} at {path}")]
    InvalidEnumLabel {
        path: String,
        enum_name: String,
        label: String,
    },

    /// Record reference missing from the catalog
    #[error("Unknown record '{name}' at {path}")]
    UnknownRecord { path: String, name: String },

    /// A typed value could not be rendered as JSON
    #[error("Failed to serialize value: {0}")]
    Serialize(String),
}

// ============================================================================
// Forward
// ============================================================================

impl FakeValue {
    /// Render this value as JSON.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Bool(b) => json!(*b),
            Self::Int(i) => json!(*i),
            // Non-finite floats have no JSON form
            Self::Float(f) => serde_json::Number::from_f64(*f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            Self::String(s) | Self::Raw(s) | Self::Enum(s) => json!(s),
            Self::Date(d) => json!(d.to_string()),
            Self::DateTime(dt) => json!(format_datetime(dt)),
            Self::Time(t) => json!(t.to_string()),
            Self::Uuid(u) => json!(u.to_string()),
            Self::Sequence(items) => Value::Array(items.iter().map(FakeValue::to_json).collect()),
            Self::Mapping(entries) => {
                let mut obj = Map::new();
                for (key, value) in entries {
                    let key = key.key_string().unwrap_or_else(|| key.to_json().to_string());
                    obj.insert(key, value.to_json());
                }
                Value::Object(obj)
            }
            Self::Record(record) => record.to_json(),
        }
    }
}

impl Record {
    /// Render this record as a JSON object.
    pub fn to_json(&self) -> Value {
        let obj: Map<String, Value> = self
            .fields
            .iter()
            .map(|(name, value)| (name.clone(), value.to_json()))
            .collect();
        Value::Object(obj)
    }

    /// Reconstruct a record from its JSON object form.
    ///
    /// Absent nullable fields decode as `Null`; absent required fields and
    /// undeclared fields are errors.
    pub fn from_json(
        value: &Value,
        schema: &RecordSchema,
        catalog: &SchemaCatalog,
    ) -> Result<Self, ConversionError> {
        Self::from_json_with(value, schema, catalog, &NamedTypes::new())
    }

    /// Reconstruct a record, decoding custom named types as the types in `named`.
    pub fn from_json_with(
        value: &Value,
        schema: &RecordSchema,
        catalog: &SchemaCatalog,
        named: &NamedTypes,
    ) -> Result<Self, ConversionError> {
        Decoder { catalog, named }.record(value, schema, "$")
    }
}

// ============================================================================
// Reverse
// ============================================================================

/// Decoding types for custom named types, keyed by type name.
///
/// A `Named` type that is neither a catalog record nor listed here is
/// decoded from the JSON at face value.
pub type NamedTypes = BTreeMap<TypeKey, TypeExpr>;

impl FakeValue {
    /// Reconstruct a value of the declared type from JSON.
    pub fn from_json(
        value: &Value,
        ty: &TypeExpr,
        catalog: &SchemaCatalog,
    ) -> Result<Self, ConversionError> {
        Self::from_json_with(value, ty, catalog, &NamedTypes::new())
    }

    /// Reconstruct a value, decoding custom named types as the types in `named`.
    pub fn from_json_with(
        value: &Value,
        ty: &TypeExpr,
        catalog: &SchemaCatalog,
        named: &NamedTypes,
    ) -> Result<Self, ConversionError> {
        Decoder { catalog, named }.value(value, ty, "$")
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn mismatch(path: &str, expected: impl ToString, found: &Value) -> ConversionError {
    ConversionError::TypeMismatch {
        path: path.to_string(),
        expected: expected.to_string(),
        found: json_kind(found).to_string(),
    }
}

struct Decoder<'a> {
    catalog: &'a SchemaCatalog,
    named: &'a NamedTypes,
}

impl Decoder<'_> {
    /// Decoding type registered for a custom named type.
    fn alias(&self, name: &str) -> Option<&TypeExpr> {
        self.named
            .get(&TypeKey::from(name))
            .filter(|ty| !matches!(ty, TypeExpr::Named(n) if n == name))
    }

    /// Order in which union alternatives are tried.
    ///
    /// Types that accept any JSON string or number go last, so a date, uuid
    /// or integer is not swallowed by a string or float alternative declared
    /// before it.
    fn union_rank(&self, ty: &TypeExpr) -> u8 {
        match ty {
            TypeExpr::Primitive(PrimitiveKind::Float) => 1,
            TypeExpr::Primitive(PrimitiveKind::String | PrimitiveKind::Raw) => 2,
            TypeExpr::Named(name) if !self.catalog.contains(name) => {
                match self.alias(name) {
                    Some(alias) => self.union_rank(alias),
                    None => 3,
                }
            }
            _ => 0,
        }
    }

    fn record(
        &self,
        value: &Value,
        schema: &RecordSchema,
        path: &str,
    ) -> Result<Record, ConversionError> {
        let obj = value
            .as_object()
            .ok_or_else(|| mismatch(path, format!("record<{}>", schema.name), value))?;

        if let Some(unexpected) = obj.keys().find(|k| schema.get_field(k).is_none()) {
            return Err(ConversionError::UnexpectedField {
                path: format!("{path}.{unexpected}"),
            });
        }

        let mut fields = FieldMap::with_capacity(schema.fields.len());
        for field in &schema.fields {
            let field_path = format!("{path}.{}", field.name);
            let decoded = match obj.get(&field.name) {
                Some(v) => self.value(v, &field.field_type, &field_path)?,
                None if field.field_type.is_nullable() => FakeValue::Null,
                None => return Err(ConversionError::MissingField { path: field_path }),
            };
            fields.insert(field.name.clone(), decoded);
        }

        Ok(Record::new(schema.name.clone(), fields))
    }

    fn value(
        &self,
        value: &Value,
        ty: &TypeExpr,
        path: &str,
    ) -> Result<FakeValue, ConversionError> {
        match (ty, value) {
            (TypeExpr::Null, Value::Null) => Ok(FakeValue::Null),
            (TypeExpr::Optional(_), Value::Null) => Ok(FakeValue::Null),
            (TypeExpr::Optional(inner), v) => self.value(v, inner, path),

            (TypeExpr::Union(alternatives), v) => {
                if v.is_null() && alternatives.iter().any(|a| matches!(a, TypeExpr::Null)) {
                    return Ok(FakeValue::Null);
                }
                let mut candidates: Vec<&TypeExpr> = alternatives
                    .iter()
                    .filter(|a| !matches!(a, TypeExpr::Null))
                    .collect();
                candidates.sort_by_key(|alt| self.union_rank(alt));
                candidates
                    .into_iter()
                    .find_map(|alt| self.value(v, alt, path).ok())
                    .ok_or_else(|| mismatch(path, ty, v))
            }

            (TypeExpr::Primitive(kind), v) => primitive_from_json(*kind, v, path),

            (TypeExpr::Enum(e), Value::String(label)) => {
                if e.contains(label) {
                    Ok(FakeValue::Enum(label.clone()))
                } else {
                    Err(ConversionError::InvalidEnumLabel {
                        path: path.to_string(),
                        enum_name: e.name.clone(),
                        label: label.clone(),
                    })
                }
            }

            (TypeExpr::Sequence(element), Value::Array(items)) => items
                .iter()
                .enumerate()
                .map(|(i, item)| self.value(item, element, &format!("{path}[{i}]")))
                .collect::<Result<Vec<_>, _>>()
                .map(FakeValue::Sequence),

            (TypeExpr::Mapping { key, value: value_ty }, Value::Object(obj)) => {
                let mut entries = Vec::with_capacity(obj.len());
                for (k, v) in obj {
                    let entry_path = format!("{path}[\"{k}\"]");
                    let decoded_key = self.key(k, key, &entry_path)?;
                    let decoded_value = self.value(v, value_ty, &entry_path)?;
                    entries.push((decoded_key, decoded_value));
                }
                Ok(FakeValue::Mapping(entries))
            }

            (TypeExpr::Record(name), v) => {
                let schema = self.catalog.get_record(name).ok_or_else(|| {
                    ConversionError::UnknownRecord {
                        path: path.to_string(),
                        name: name.clone(),
                    }
                })?;
                self.record(v, schema, path).map(FakeValue::Record)
            }

            (TypeExpr::Named(name), v) => match self.catalog.get_record(name) {
                Some(schema) => self.record(v, schema, path).map(FakeValue::Record),
                None => match self.alias(name) {
                    Some(alias) => self.value(v, alias, path),
                    None => Ok(infer_from_json(v)),
                },
            },

            (ty, v) => Err(mismatch(path, ty, v)),
        }
    }

    fn key(&self, key: &str, ty: &TypeExpr, path: &str) -> Result<FakeValue, ConversionError> {
        let bad_key = || ConversionError::TypeMismatch {
            path: path.to_string(),
            expected: format!("{ty} key"),
            found: format!("\"{key}\""),
        };
        match ty {
            TypeExpr::Primitive(kind) => parse_primitive_str(*kind, key).ok_or_else(bad_key),
            TypeExpr::Enum(e) if e.contains(key) => Ok(FakeValue::Enum(key.to_string())),
            TypeExpr::Optional(inner) => self.key(key, inner, path),
            TypeExpr::Named(name) if !self.catalog.contains(name) => match self.alias(name) {
                Some(alias) => self.key(key, alias, path),
                None => Ok(FakeValue::String(key.to_string())),
            },
            _ => Err(bad_key()),
        }
    }
}

fn primitive_from_json(
    kind: PrimitiveKind,
    value: &Value,
    path: &str,
) -> Result<FakeValue, ConversionError> {
    let decoded = match (kind, value) {
        (PrimitiveKind::Bool, Value::Bool(b)) => Some(FakeValue::Bool(*b)),
        (PrimitiveKind::Int, Value::Number(n)) => n.as_i64().map(FakeValue::Int),
        (PrimitiveKind::Float, Value::Number(n)) => n.as_f64().map(FakeValue::Float),
        (PrimitiveKind::Raw, Value::String(s)) => Some(FakeValue::Raw(s.clone())),
        (PrimitiveKind::Raw, v @ Value::Object(_)) => Some(FakeValue::Raw(v.to_string())),
        (kind, Value::String(s)) => parse_primitive_str(kind, s),
        _ => None,
    };
    decoded.ok_or_else(|| mismatch(path, kind, value))
}

/// Parse the textual form of a primitive (as found in JSON strings and mapping keys).
fn parse_primitive_str(kind: PrimitiveKind, s: &str) -> Option<FakeValue> {
    match kind {
        PrimitiveKind::Bool => s.parse().ok().map(FakeValue::Bool),
        PrimitiveKind::Int => s.parse().ok().map(FakeValue::Int),
        PrimitiveKind::String => Some(FakeValue::String(s.to_string())),
        PrimitiveKind::Date => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .map(FakeValue::Date),
        PrimitiveKind::DateTime => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| FakeValue::DateTime(dt.with_timezone(&Utc))),
        PrimitiveKind::Time => NaiveTime::parse_from_str(s, "%H:%M:%S%.f")
            .ok()
            .map(FakeValue::Time),
        PrimitiveKind::Uuid => Uuid::parse_str(s).ok().map(FakeValue::Uuid),
        PrimitiveKind::Float | PrimitiveKind::Raw => None,
    }
}

/// Best-effort decoding of JSON without a declared type.
fn infer_from_json(value: &Value) -> FakeValue {
    match value {
        Value::Null => FakeValue::Null,
        Value::Bool(b) => FakeValue::Bool(*b),
        Value::Number(n) => n
            .as_i64()
            .map(FakeValue::Int)
            .or_else(|| n.as_f64().map(FakeValue::Float))
            .unwrap_or(FakeValue::Null),
        Value::String(s) => FakeValue::String(s.clone()),
        Value::Array(items) => FakeValue::Sequence(items.iter().map(infer_from_json).collect()),
        Value::Object(obj) => FakeValue::Mapping(
            obj.iter()
                .map(|(k, v)| (FakeValue::String(k.clone()), infer_from_json(v)))
                .collect(),
        ),
    }
}
