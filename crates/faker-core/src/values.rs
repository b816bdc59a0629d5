//! Generated value representations.
//!
//! `FakeValue` is the schema-agnostic value produced by the generator and
//! reconstructed by the decoders. Records carry their field map keyed by
//! field name.

use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, Utc};
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

/// Field name to value mapping of a single record.
pub type FieldMap = HashMap<String, FakeValue>;

/// A generated value conforming to some `TypeExpr`.
#[derive(Debug, Clone, PartialEq)]
pub enum FakeValue {
    /// Boolean value
    Bool(bool),

    /// 64-bit signed integer
    Int(i64),

    /// 64-bit floating point
    Float(f64),

    /// String value
    String(String),

    /// Calendar date
    Date(NaiveDate),

    /// UTC timestamp
    DateTime(DateTime<Utc>),

    /// Time of day
    Time(NaiveTime),

    /// UUID value
    Uuid(Uuid),

    /// Encoded object embedded as text
    Raw(String),

    /// Enumeration label
    Enum(String),

    /// Ordered sequence
    Sequence(Vec<FakeValue>),

    /// Key-value pairs in generation order; keys are unique
    Mapping(Vec<(FakeValue, FakeValue)>),

    /// Nested record
    Record(Record),

    /// Absent value
    Null,
}

impl FakeValue {
    /// Short name of the value's kind, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Date(_) => "date",
            Self::DateTime(_) => "datetime",
            Self::Time(_) => "time",
            Self::Uuid(_) => "uuid",
            Self::Raw(_) => "raw",
            Self::Enum(_) => "enum",
            Self::Sequence(_) => "sequence",
            Self::Mapping(_) => "mapping",
            Self::Record(_) => "record",
            Self::Null => "null",
        }
    }

    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Try to get this value as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get this value as an i64.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get this value as an f64.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Try to get this value as a string reference (strings, labels and raw payloads).
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) | Self::Enum(s) | Self::Raw(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get this value as a UUID.
    pub fn as_uuid(&self) -> Option<&Uuid> {
        match self {
            Self::Uuid(u) => Some(u),
            _ => None,
        }
    }

    /// Try to get this value as a sequence.
    pub fn as_sequence(&self) -> Option<&[FakeValue]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Try to get this value as a mapping.
    pub fn as_mapping(&self) -> Option<&[(FakeValue, FakeValue)]> {
        match self {
            Self::Mapping(entries) => Some(entries),
            _ => None,
        }
    }

    /// Try to get this value as a record.
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(r) => Some(r),
            _ => None,
        }
    }

    /// Textual form of a mapping key.
    ///
    /// Returns `None` for values that cannot act as keys.
    pub fn key_string(&self) -> Option<String> {
        match self {
            Self::Bool(b) => Some(b.to_string()),
            Self::Int(i) => Some(i.to_string()),
            Self::String(s) | Self::Enum(s) => Some(s.clone()),
            Self::Date(d) => Some(d.to_string()),
            Self::DateTime(dt) => Some(format_datetime(dt)),
            Self::Time(t) => Some(t.to_string()),
            Self::Uuid(u) => Some(u.to_string()),
            _ => None,
        }
    }
}

impl fmt::Display for FakeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

/// RFC 3339 rendering of a timestamp, matching chrono's serde output.
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// An instance of a record schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Name of the record schema this instance conforms to
    pub schema: String,
    /// Field values keyed by field name
    pub fields: FieldMap,
}

impl Record {
    /// Create a new record.
    pub fn new(schema: impl Into<String>, fields: FieldMap) -> Self {
        Self {
            schema: schema.into(),
            fields,
        }
    }

    /// Get a field value by name.
    pub fn get_field(&self, name: &str) -> Option<&FakeValue> {
        self.fields.get(name)
    }

    /// Consume the record, returning its field map.
    pub fn into_fields(self) -> FieldMap {
        self.fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        assert_eq!(FakeValue::Bool(true).as_bool(), Some(true));
        assert_eq!(FakeValue::Int(7).as_i64(), Some(7));
        assert_eq!(FakeValue::Float(1.5).as_f64(), Some(1.5));
        assert_eq!(FakeValue::Enum("ASSET".into()).as_str(), Some("ASSET"));
        assert!(FakeValue::Null.is_null());
        assert_eq!(FakeValue::Int(7).as_f64(), None);
    }

    #[test]
    fn test_key_string() {
        let u = Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap();
        assert_eq!(
            FakeValue::Uuid(u).key_string().as_deref(),
            Some("550e8400-e29b-41d4-a716-446655440000")
        );
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(FakeValue::Date(date).key_string().as_deref(), Some("2024-02-29"));
        assert_eq!(FakeValue::Float(1.0).key_string(), None);
    }

    #[test]
    fn test_format_datetime_uses_z_suffix() {
        let dt = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        assert_eq!(format_datetime(&dt), "2023-11-14T22:13:20Z");
    }
}
