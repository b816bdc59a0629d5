//! Type expressions for record fields.
//!
//! This module defines `TypeExpr`, the closed set of field shapes the faker
//! knows how to generate, together with `TypeKey`, the stable identifier used
//! to register per-type generator overrides.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// Primitive (leaf) kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    /// Boolean value
    Bool,
    /// 64-bit signed integer
    Int,
    /// 64-bit IEEE 754 floating point
    Float,
    /// UTF-8 string
    String,
    /// Calendar date (YYYY-MM-DD)
    Date,
    /// UTC timestamp
    DateTime,
    /// Time of day (HH:MM:SS)
    Time,
    /// UUID (128-bit)
    Uuid,
    /// Raw payload holding an embedded encoded object
    Raw,
}

impl PrimitiveKind {
    /// All primitive kinds, in declaration order.
    pub const ALL: [PrimitiveKind; 9] = [
        Self::Bool,
        Self::Int,
        Self::Float,
        Self::String,
        Self::Date,
        Self::DateTime,
        Self::Time,
        Self::Uuid,
        Self::Raw,
    ];

    /// Canonical keyword used in YAML schemas and type keys.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::String => "string",
            Self::Date => "date",
            Self::DateTime => "datetime",
            Self::Time => "time",
            Self::Uuid => "uuid",
            Self::Raw => "raw",
        }
    }

    /// Parse a keyword (or one of its aliases).
    pub fn from_keyword(value: &str) -> Option<Self> {
        match value {
            "bool" | "boolean" => Some(Self::Bool),
            "int" | "integer" => Some(Self::Int),
            "float" | "double" => Some(Self::Float),
            "string" | "str" | "text" => Some(Self::String),
            "date" => Some(Self::Date),
            "datetime" | "date_time" => Some(Self::DateTime),
            "time" | "time_of_day" => Some(Self::Time),
            "uuid" => Some(Self::Uuid),
            "raw" | "json" => Some(Self::Raw),
            _ => None,
        }
    }

    /// Whether values of this kind can be used as mapping keys.
    ///
    /// Floats and raw payloads have no stable textual key form.
    pub fn is_key_kind(&self) -> bool {
        !matches!(self, Self::Float | Self::Raw)
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// An enumeration: a named, ordered set of labeled constants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnumType {
    /// Enumeration name
    pub name: String,
    /// Allowed labels
    pub values: Vec<String>,
}

impl EnumType {
    /// Create a new enumeration.
    pub fn new<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Check whether `label` is one of the declared constants.
    pub fn contains(&self, label: &str) -> bool {
        self.values.iter().any(|v| v == label)
    }
}

/// Declared shape of a field.
///
/// # YAML Format
///
/// Primitives and record references are plain strings:
/// ```yaml
/// type: uuid
/// type: float
/// type: Shock
/// ```
///
/// Compound types use the object format:
/// ```yaml
/// type:
///   type: optional
///   inner: float
/// type:
///   type: mapping
///   key: uuid
///   value: float
/// type:
///   type: enum
///   name: ShockTo
///   values: [ASSET, FACTOR]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeExpr {
    /// Leaf value
    Primitive(PrimitiveKind),

    /// One of a fixed set of labels
    Enum(EnumType),

    /// Value that may be absent
    Optional(Box<TypeExpr>),

    /// Exactly one of several alternatives
    Union(Vec<TypeExpr>),

    /// Ordered sequence of elements
    Sequence(Box<TypeExpr>),

    /// Key-value mapping
    Mapping {
        /// Key type
        key: Box<TypeExpr>,
        /// Value type
        value: Box<TypeExpr>,
    },

    /// Reference to a record schema in the catalog
    Record(String),

    /// Named type that is neither a primitive nor declared inline.
    ///
    /// Resolved at classification time against the catalog, then against
    /// registered overrides.
    Named(String),

    /// The absent alternative of a union
    Null,
}

impl TypeExpr {
    pub const BOOL: TypeExpr = TypeExpr::Primitive(PrimitiveKind::Bool);
    pub const INT: TypeExpr = TypeExpr::Primitive(PrimitiveKind::Int);
    pub const FLOAT: TypeExpr = TypeExpr::Primitive(PrimitiveKind::Float);
    pub const STRING: TypeExpr = TypeExpr::Primitive(PrimitiveKind::String);
    pub const DATE: TypeExpr = TypeExpr::Primitive(PrimitiveKind::Date);
    pub const DATETIME: TypeExpr = TypeExpr::Primitive(PrimitiveKind::DateTime);
    pub const TIME: TypeExpr = TypeExpr::Primitive(PrimitiveKind::Time);
    pub const UUID: TypeExpr = TypeExpr::Primitive(PrimitiveKind::Uuid);
    pub const RAW: TypeExpr = TypeExpr::Primitive(PrimitiveKind::Raw);

    /// Create an enumeration type.
    pub fn enumeration<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Enum(EnumType::new(name, values))
    }

    /// Create an optional type.
    pub fn optional(inner: TypeExpr) -> Self {
        Self::Optional(Box::new(inner))
    }

    /// Create a union type.
    pub fn union(alternatives: Vec<TypeExpr>) -> Self {
        Self::Union(alternatives)
    }

    /// Create a sequence type.
    pub fn sequence(element: TypeExpr) -> Self {
        Self::Sequence(Box::new(element))
    }

    /// Create a mapping type.
    pub fn mapping(key: TypeExpr, value: TypeExpr) -> Self {
        Self::Mapping {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    /// Create a record reference.
    pub fn record(name: impl Into<String>) -> Self {
        Self::Record(name.into())
    }

    /// Create a named type reference.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Whether the declared type admits an absent value.
    pub fn is_nullable(&self) -> bool {
        match self {
            Self::Optional(_) | Self::Null => true,
            Self::Union(alternatives) => alternatives.iter().any(|a| matches!(a, Self::Null)),
            _ => false,
        }
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(kind) => write!(f, "{kind}"),
            Self::Enum(e) => write!(f, "enum<{}>", e.name),
            Self::Optional(inner) => write!(f, "optional<{inner}>"),
            Self::Union(alternatives) => {
                f.write_str("union<")?;
                for (i, alt) in alternatives.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" | ")?;
                    }
                    write!(f, "{alt}")?;
                }
                f.write_str(">")
            }
            Self::Sequence(element) => write!(f, "sequence<{element}>"),
            Self::Mapping { key, value } => write!(f, "mapping<{key}, {value}>"),
            Self::Record(name) => write!(f, "record<{name}>"),
            Self::Named(name) => f.write_str(name),
            Self::Null => f.write_str("null"),
        }
    }
}

/// Stable identifier of a declared type, used to key generator overrides.
///
/// The key is the canonical textual form of the type expression, so
/// `TypeKey::of(&TypeExpr::named("Money"))` and `TypeKey::from("Money")`
/// are the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeKey(String);

impl TypeKey {
    /// Key for a type expression.
    pub fn of(expr: &TypeExpr) -> Self {
        Self(expr.to_string())
    }

    /// The canonical textual form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&TypeExpr> for TypeKey {
    fn from(expr: &TypeExpr) -> Self {
        Self::of(expr)
    }
}

impl From<TypeExpr> for TypeKey {
    fn from(expr: TypeExpr) -> Self {
        Self::of(&expr)
    }
}

impl From<&str> for TypeKey {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Custom serialization/deserialization for TypeExpr
// Supports both simple string format ("uuid", "Shock") and object format ({"type": "optional", "inner": ...})

impl Serialize for TypeExpr {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeMap;

        match self {
            Self::Primitive(kind) => serializer.serialize_str(kind.keyword()),
            Self::Named(name) => serializer.serialize_str(name),
            Self::Null => serializer.serialize_str("null"),

            Self::Enum(e) => {
                let mut map = serializer.serialize_map(Some(3))?;
                map.serialize_entry("type", "enum")?;
                map.serialize_entry("name", &e.name)?;
                map.serialize_entry("values", &e.values)?;
                map.end()
            }
            Self::Optional(inner) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "optional")?;
                map.serialize_entry("inner", inner)?;
                map.end()
            }
            Self::Union(alternatives) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "union")?;
                map.serialize_entry("alternatives", alternatives)?;
                map.end()
            }
            Self::Sequence(element) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "sequence")?;
                map.serialize_entry("element", element)?;
                map.end()
            }
            Self::Mapping { key, value } => {
                let mut map = serializer.serialize_map(Some(3))?;
                map.serialize_entry("type", "mapping")?;
                map.serialize_entry("key", key)?;
                map.serialize_entry("value", value)?;
                map.end()
            }
            Self::Record(name) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "record")?;
                map.serialize_entry("name", name)?;
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for TypeExpr {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{Error, MapAccess, Visitor};

        struct TypeExprVisitor;

        impl<'de> Visitor<'de> for TypeExprVisitor {
            type Value = TypeExpr;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string or map representing a TypeExpr")
            }

            // "uuid", "float", "null", or the name of a record/custom type
            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: Error,
            {
                if value.is_empty() {
                    return Err(E::custom("type name must not be empty"));
                }
                if value == "null" {
                    return Ok(TypeExpr::Null);
                }
                Ok(PrimitiveKind::from_keyword(value)
                    .map(TypeExpr::Primitive)
                    .unwrap_or_else(|| TypeExpr::Named(value.to_string())))
            }

            // YAML `~` / JSON `null`
            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: Error,
            {
                Ok(TypeExpr::Null)
            }

            fn visit_map<M>(self, mut map: M) -> Result<Self::Value, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut type_name: Option<String> = None;
                let mut fields: HashMap<String, serde_yaml::Value> = HashMap::new();

                while let Some(key) = map.next_key::<String>()? {
                    if key == "type" {
                        type_name = Some(map.next_value()?);
                    } else {
                        fields.insert(key, map.next_value()?);
                    }
                }

                let type_name = type_name.ok_or_else(|| M::Error::missing_field("type"))?;

                if let Some(kind) = PrimitiveKind::from_keyword(&type_name) {
                    return Ok(TypeExpr::Primitive(kind));
                }

                match type_name.as_str() {
                    "null" => Ok(TypeExpr::Null),
                    "enum" => {
                        let name = get_field_required(&fields, "name")?;
                        let values = get_field_required(&fields, "values")?;
                        Ok(TypeExpr::Enum(EnumType { name, values }))
                    }
                    "optional" => {
                        let inner: TypeExpr = get_field_required(&fields, "inner")?;
                        Ok(TypeExpr::optional(inner))
                    }
                    "union" => {
                        let alternatives = get_field_required(&fields, "alternatives")?;
                        Ok(TypeExpr::Union(alternatives))
                    }
                    "sequence" | "list" => {
                        let element: TypeExpr = get_field_required(&fields, "element")?;
                        Ok(TypeExpr::sequence(element))
                    }
                    "mapping" | "map" => {
                        let key: TypeExpr = get_field_required(&fields, "key")?;
                        let value: TypeExpr = get_field_required(&fields, "value")?;
                        Ok(TypeExpr::mapping(key, value))
                    }
                    "record" => {
                        let name = get_field_required(&fields, "name")?;
                        Ok(TypeExpr::Record(name))
                    }
                    "named" => {
                        let name = get_field_required(&fields, "name")?;
                        Ok(TypeExpr::Named(name))
                    }
                    _ => Err(M::Error::custom(format!("unknown type: {type_name}"))),
                }
            }
        }

        deserializer.deserialize_any(TypeExprVisitor)
    }
}

fn get_field_required<T: for<'de> Deserialize<'de>, E: serde::de::Error>(
    fields: &HashMap<String, serde_yaml::Value>,
    key: &'static str,
) -> Result<T, E> {
    let value = fields.get(key).ok_or_else(|| E::missing_field(key))?;
    serde_yaml::from_value(value.clone())
        .map_err(|e| E::custom(format!("invalid field '{key}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_simple_string() {
        let parsed: TypeExpr = serde_yaml::from_str("uuid").unwrap();
        assert_eq!(parsed, TypeExpr::UUID);

        let parsed: TypeExpr = serde_yaml::from_str("double").unwrap();
        assert_eq!(parsed, TypeExpr::FLOAT);

        let parsed: TypeExpr = serde_yaml::from_str("Shock").unwrap();
        assert_eq!(parsed, TypeExpr::named("Shock"));

        let parsed: TypeExpr = serde_yaml::from_str("\"null\"").unwrap();
        assert_eq!(parsed, TypeExpr::Null);
    }

    #[test]
    fn test_deserialize_compound_types() {
        let yaml = r#"
type: optional
inner:
  type: mapping
  key: uuid
  value: float
"#;
        let parsed: TypeExpr = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            parsed,
            TypeExpr::optional(TypeExpr::mapping(TypeExpr::UUID, TypeExpr::FLOAT))
        );

        let yaml = r#"
type: enum
name: ShockTo
values: [ASSET, FACTOR]
"#;
        let parsed: TypeExpr = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            parsed,
            TypeExpr::enumeration("ShockTo", ["ASSET", "FACTOR"])
        );

        let yaml = r#"
type: union
alternatives: [int, string, "null"]
"#;
        let parsed: TypeExpr = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            parsed,
            TypeExpr::union(vec![TypeExpr::INT, TypeExpr::STRING, TypeExpr::Null])
        );
        assert!(parsed.is_nullable());
    }

    #[test]
    fn test_unknown_compound_type_rejected() {
        let yaml = r#"
type: tensor
rank: 3
"#;
        let result: Result<TypeExpr, _> = serde_yaml::from_str(yaml);
        assert!(result.is_err());
    }

    #[test]
    fn test_serialize_deserialize_roundtrip() {
        let types = vec![
            TypeExpr::BOOL,
            TypeExpr::RAW,
            TypeExpr::record("Shock"),
            TypeExpr::named("Money"),
            TypeExpr::sequence(TypeExpr::optional(TypeExpr::DATE)),
            TypeExpr::mapping(TypeExpr::STRING, TypeExpr::sequence(TypeExpr::INT)),
            TypeExpr::enumeration("MarkTime", ["NY_EOD", "LN_EOD"]),
            TypeExpr::union(vec![TypeExpr::UUID, TypeExpr::Null]),
        ];

        for ty in types {
            let yaml = serde_yaml::to_string(&ty).unwrap();
            let parsed: TypeExpr = serde_yaml::from_str(&yaml).unwrap();
            assert_eq!(ty, parsed);
        }
    }

    #[test]
    fn test_type_key_is_canonical() {
        let expr = TypeExpr::optional(TypeExpr::mapping(TypeExpr::UUID, TypeExpr::FLOAT));
        assert_eq!(TypeKey::of(&expr).as_str(), "optional<mapping<uuid, float>>");
        assert_eq!(TypeKey::of(&TypeExpr::named("Money")), TypeKey::from("Money"));
        assert_eq!(
            TypeKey::of(&TypeExpr::union(vec![TypeExpr::INT, TypeExpr::STRING])).as_str(),
            "union<int | string>"
        );
    }

    #[test]
    fn test_primitive_keywords() {
        for kind in PrimitiveKind::ALL {
            assert_eq!(PrimitiveKind::from_keyword(kind.keyword()), Some(kind));
        }
        assert!(!PrimitiveKind::Float.is_key_kind());
        assert!(PrimitiveKind::Uuid.is_key_kind());
    }
}
