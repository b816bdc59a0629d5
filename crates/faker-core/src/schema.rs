//! Record schemas and the schema catalog.
//!
//! A `RecordSchema` is an ordered list of typed fields plus optional
//! cross-field constraints. A `SchemaCatalog` holds every record a type
//! expression can reference by name.
//!
//! ## YAML format
//!
//! ```yaml
//! version: 1
//! records:
//!   - name: Shock
//!     fields:
//!       - name: shock_id
//!         type: uuid
//!       - name: target_type
//!         type:
//!           type: enum
//!           name: ShockTo
//!           values: [ASSET, FACTOR]
//!   - name: OptionValuationRequest
//!     fields:
//!       - name: yield_curve
//!         type: { type: optional, inner: YieldCurveVersion }
//!       - name: vol_surface
//!         type: { type: optional, inner: VolatilitySurfaceVersion }
//!     constraints:
//!       - type: at_most_one_of
//!         fields: [yield_curve, vol_surface]
//! ```

use crate::types::TypeExpr;
use crate::values::FieldMap;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

// ============================================================================
// Error Types
// ============================================================================

/// Error type for schema operations.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// Error reading schema file
    #[error("Failed to read schema file: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing YAML
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Record not found in catalog
    #[error("Record not found: {0}")]
    RecordNotFound(String),

    /// Field not found in record schema
    #[error("Field '{field}' not found in record '{record}'")]
    FieldNotFound { record: String, field: String },

    /// Two different schemas registered under one name
    #[error("Conflicting definitions for record '{0}'")]
    DuplicateRecord(String),

    /// Field declared twice in one record
    #[error("Field '{field}' declared more than once in record '{record}'")]
    DuplicateField { record: String, field: String },

    /// Constraint names a field the record does not declare
    #[error("Constraint on record '{record}' references unknown field '{field}'")]
    UnknownConstraintField { record: String, field: String },
}

// ============================================================================
// Fields and Constraints
// ============================================================================

/// A single field declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Field name
    pub name: String,

    /// Declared type
    #[serde(rename = "type")]
    pub field_type: TypeExpr,
}

impl FieldDefinition {
    /// Create a new field definition.
    pub fn new(name: impl Into<String>, field_type: TypeExpr) -> Self {
        Self {
            name: name.into(),
            field_type,
        }
    }
}

/// Cross-field rule checked when a record is constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RecordConstraint {
    /// No more than one of the listed fields may be set
    AtMostOneOf { fields: Vec<String> },

    /// Exactly one of the listed fields must be set
    ExactlyOneOf { fields: Vec<String> },
}

impl RecordConstraint {
    /// Fields the constraint refers to.
    pub fn fields(&self) -> &[String] {
        match self {
            Self::AtMostOneOf { fields } | Self::ExactlyOneOf { fields } => fields,
        }
    }

    /// Check the constraint against an assembled field map.
    ///
    /// A field counts as set when it is present and not null.
    pub fn check(&self, values: &FieldMap) -> Result<(), String> {
        let set: Vec<&str> = self
            .fields()
            .iter()
            .filter(|f| values.get(f.as_str()).is_some_and(|v| !v.is_null()))
            .map(String::as_str)
            .collect();

        match self {
            Self::AtMostOneOf { fields } if set.len() > 1 => Err(format!(
                "at most one of [{}] may be set, found [{}]",
                fields.join(", "),
                set.join(", ")
            )),
            Self::ExactlyOneOf { fields } if set.len() != 1 => Err(format!(
                "exactly one of [{}] must be set, found [{}]",
                fields.join(", "),
                set.join(", ")
            )),
            _ => Ok(()),
        }
    }
}

// ============================================================================
// Record Schema
// ============================================================================

/// A named, ordered set of field declarations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordSchema {
    /// Record name
    pub name: String,

    /// Field declarations, in declaration order
    pub fields: Vec<FieldDefinition>,

    /// Cross-field constraints
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constraints: Vec<RecordConstraint>,
}

impl RecordSchema {
    /// Create a new record schema without constraints.
    pub fn new(name: impl Into<String>, fields: Vec<FieldDefinition>) -> Self {
        Self {
            name: name.into(),
            fields,
            constraints: Vec::new(),
        }
    }

    /// Add a cross-field constraint.
    pub fn with_constraint(mut self, constraint: RecordConstraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Get a field by name.
    pub fn get_field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Get the declared type of a field by name.
    pub fn get_field_type(&self, name: &str) -> Option<&TypeExpr> {
        self.get_field(name).map(|f| &f.field_type)
    }

    /// Get all field names in declaration order.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Check every declared constraint against a field map.
    pub fn check_constraints(&self, values: &FieldMap) -> Result<(), String> {
        self.constraints.iter().try_for_each(|c| c.check(values))
    }

    /// Validate the schema's internal consistency.
    pub fn validate(&self) -> Result<(), SchemaError> {
        let mut seen = HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateField {
                    record: self.name.clone(),
                    field: field.name.clone(),
                });
            }
        }
        for constraint in &self.constraints {
            if let Some(unknown) = constraint
                .fields()
                .iter()
                .find(|f| !seen.contains(f.as_str()))
            {
                return Err(SchemaError::UnknownConstraintField {
                    record: self.name.clone(),
                    field: unknown.clone(),
                });
            }
        }
        Ok(())
    }
}

// ============================================================================
// Catalog
// ============================================================================

fn default_version() -> u32 {
    1
}

/// Collection of record schemas resolvable by name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaCatalog {
    /// Catalog version
    #[serde(default = "default_version")]
    pub version: u32,

    /// Record schemas, in registration order
    records: Vec<RecordSchema>,

    /// Cached record lookup (not serialized)
    #[serde(skip)]
    record_map: HashMap<String, usize>,
}

impl SchemaCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self {
            version: default_version(),
            records: Vec::new(),
            record_map: HashMap::new(),
        }
    }

    /// Load a catalog from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SchemaError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse a catalog from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, SchemaError> {
        let parsed: SchemaCatalog = serde_yaml::from_str(yaml)?;
        let mut catalog = SchemaCatalog {
            version: parsed.version,
            ..SchemaCatalog::new()
        };
        for record in parsed.records {
            catalog.register(record)?;
        }
        Ok(catalog)
    }

    /// Add a record schema.
    ///
    /// Registering an identical schema twice is a no-op; a different schema
    /// under an existing name is rejected.
    pub fn register(&mut self, schema: RecordSchema) -> Result<(), SchemaError> {
        schema.validate()?;
        if let Some(existing) = self.get_record(&schema.name) {
            if *existing == schema {
                return Ok(());
            }
            return Err(SchemaError::DuplicateRecord(schema.name));
        }
        let idx = self.records.len();
        self.record_map.insert(schema.name.clone(), idx);
        self.records.push(schema);
        Ok(())
    }

    /// All record schemas, in registration order.
    pub fn records(&self) -> &[RecordSchema] {
        &self.records
    }

    /// Get a record schema by name.
    pub fn get_record(&self, name: &str) -> Option<&RecordSchema> {
        self.record_map
            .get(name)
            .and_then(|&idx| self.records.get(idx))
    }

    /// Get a record schema by name, failing if it is missing.
    pub fn require_record(&self, name: &str) -> Result<&RecordSchema, SchemaError> {
        self.get_record(name)
            .ok_or_else(|| SchemaError::RecordNotFound(name.to_string()))
    }

    /// Check whether a record is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.record_map.contains_key(name)
    }

    /// Get the declared type of a field in a specific record.
    pub fn get_field_type(&self, record: &str, field: &str) -> Result<&TypeExpr, SchemaError> {
        self.require_record(record)?
            .get_field_type(field)
            .ok_or_else(|| SchemaError::FieldNotFound {
                record: record.to_string(),
                field: field.to_string(),
            })
    }

    /// Get all record names in registration order.
    pub fn record_names(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values::FakeValue;

    fn test_catalog() -> SchemaCatalog {
        let yaml = r#"
version: 1
records:
  - name: Shock
    fields:
      - name: shock_id
        type: uuid
      - name: target
        type: string
      - name: target_type
        type:
          type: enum
          name: ShockTo
          values: [ASSET, FACTOR]
      - name: magnitude
        type: float
  - name: ScenarioDefinition
    fields:
      - name: scenario_id
        type: uuid
      - name: shocks
        type:
          type: sequence
          element: Shock
      - name: rates
        type:
          type: optional
          inner: { type: mapping, key: uuid, value: float }
      - name: yield_curve
        type: { type: optional, inner: uuid }
      - name: vol_surface
        type: { type: optional, inner: uuid }
    constraints:
      - type: at_most_one_of
        fields: [yield_curve, vol_surface]
"#;
        SchemaCatalog::from_yaml(yaml).unwrap()
    }

    #[test]
    fn test_parse_catalog() {
        let catalog = test_catalog();
        assert_eq!(catalog.version, 1);
        assert_eq!(catalog.record_names(), vec!["Shock", "ScenarioDefinition"]);

        let shock = catalog.get_record("Shock").unwrap();
        assert_eq!(
            shock.field_names(),
            vec!["shock_id", "target", "target_type", "magnitude"]
        );
        assert_eq!(
            catalog.get_field_type("ScenarioDefinition", "shocks").unwrap(),
            &TypeExpr::sequence(TypeExpr::named("Shock"))
        );
    }

    #[test]
    fn test_missing_lookups() {
        let catalog = test_catalog();
        assert!(matches!(
            catalog.require_record("Portfolio"),
            Err(SchemaError::RecordNotFound(_))
        ));
        assert!(matches!(
            catalog.get_field_type("Shock", "nope"),
            Err(SchemaError::FieldNotFound { .. })
        ));
    }

    #[test]
    fn test_at_most_one_of_constraint() {
        let catalog = test_catalog();
        let schema = catalog.get_record("ScenarioDefinition").unwrap();

        let mut values = FieldMap::new();
        values.insert("yield_curve".into(), FakeValue::Uuid(uuid::Uuid::nil()));
        assert!(schema.check_constraints(&values).is_ok());

        values.insert("vol_surface".into(), FakeValue::Null);
        assert!(schema.check_constraints(&values).is_ok());

        values.insert("vol_surface".into(), FakeValue::Uuid(uuid::Uuid::nil()));
        let err = schema.check_constraints(&values).unwrap_err();
        assert!(err.contains("yield_curve, vol_surface"));
    }

    #[test]
    fn test_exactly_one_of_constraint() {
        let constraint = RecordConstraint::ExactlyOneOf {
            fields: vec!["a".into(), "b".into()],
        };
        let mut values = FieldMap::new();
        assert!(constraint.check(&values).is_err());
        values.insert("a".into(), FakeValue::Int(1));
        assert!(constraint.check(&values).is_ok());
        values.insert("b".into(), FakeValue::Int(2));
        assert!(constraint.check(&values).is_err());
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let yaml = r#"
records:
  - name: Broken
    fields:
      - name: a
        type: int
      - name: a
        type: string
"#;
        assert!(matches!(
            SchemaCatalog::from_yaml(yaml),
            Err(SchemaError::DuplicateField { .. })
        ));
    }

    #[test]
    fn test_constraint_on_unknown_field_rejected() {
        let yaml = r#"
records:
  - name: Broken
    fields:
      - name: a
        type: int
    constraints:
      - type: at_most_one_of
        fields: [a, b]
"#;
        assert!(matches!(
            SchemaCatalog::from_yaml(yaml),
            Err(SchemaError::UnknownConstraintField { .. })
        ));
    }

    #[test]
    fn test_register_is_idempotent_for_identical_schemas() {
        let mut catalog = SchemaCatalog::new();
        let schema = RecordSchema::new("Pnl", vec![FieldDefinition::new("base", TypeExpr::FLOAT)]);
        catalog.register(schema.clone()).unwrap();
        catalog.register(schema).unwrap();
        assert_eq!(catalog.records().len(), 1);

        let conflicting =
            RecordSchema::new("Pnl", vec![FieldDefinition::new("base", TypeExpr::INT)]);
        assert!(matches!(
            catalog.register(conflicting),
            Err(SchemaError::DuplicateRecord(_))
        ));
    }

    #[test]
    fn test_records_and_lookup_agree() {
        let mut catalog = SchemaCatalog::new();
        for name in ["Shock", "PnL", "CurvePoint"] {
            catalog
                .register(RecordSchema::new(name, vec![FieldDefinition::new("x", TypeExpr::FLOAT)]))
                .unwrap();
        }

        let names: Vec<&str> = catalog.records().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Shock", "PnL", "CurvePoint"]);
        assert_eq!(names, catalog.record_names());
        for record in catalog.records() {
            assert_eq!(catalog.get_record(&record.name), Some(record));
        }
    }
}
