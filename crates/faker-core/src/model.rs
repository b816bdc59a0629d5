//! Capability interface for typed records.
//!
//! A typed record describes itself with explicit field descriptors instead of
//! runtime reflection, and accepts a complete field map for construction.

use crate::json::ConversionError;
use crate::schema::{FieldDefinition, RecordConstraint, RecordSchema, SchemaCatalog, SchemaError};
use crate::values::{FakeValue, FieldMap, Record};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

/// A Rust type that can be described, faked and round-tripped.
///
/// # Example
///
/// ```rust
/// use faker_core::{FieldDefinition, Model, TypeExpr};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, PartialEq, Serialize, Deserialize)]
/// struct ScenarioCloneRequest {
///     scenario_id: uuid::Uuid,
///     scenario_name: String,
/// }
///
/// impl Model for ScenarioCloneRequest {
///     const NAME: &'static str = "ScenarioCloneRequest";
///
///     fn fields() -> Vec<FieldDefinition> {
///         vec![
///             FieldDefinition::new("scenario_id", TypeExpr::UUID),
///             FieldDefinition::new("scenario_name", TypeExpr::STRING),
///         ]
///     }
/// }
///
/// let catalog = ScenarioCloneRequest::catalog().unwrap();
/// assert!(catalog.contains("ScenarioCloneRequest"));
/// ```
pub trait Model: Serialize + DeserializeOwned + Debug + PartialEq + Sized {
    /// Schema name of the record.
    const NAME: &'static str;

    /// Field descriptors, in declaration order.
    fn fields() -> Vec<FieldDefinition>;

    /// Cross-field constraints enforced by the schema.
    fn constraints() -> Vec<RecordConstraint> {
        Vec::new()
    }

    /// Register the schemas of records this one references.
    fn register_nested(_catalog: &mut SchemaCatalog) -> Result<(), SchemaError> {
        Ok(())
    }

    /// Validation run after deserialization; the error is the rejection reason.
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }

    /// The record schema built from the descriptors.
    fn schema() -> RecordSchema {
        Self::constraints()
            .into_iter()
            .fold(RecordSchema::new(Self::NAME, Self::fields()), |schema, c| {
                schema.with_constraint(c)
            })
    }

    /// Register this schema and every nested schema.
    fn register(catalog: &mut SchemaCatalog) -> Result<(), SchemaError> {
        if catalog.contains(Self::NAME) {
            return Ok(());
        }
        catalog.register(Self::schema())?;
        Self::register_nested(catalog)
    }

    /// A catalog holding this schema and its dependencies.
    fn catalog() -> Result<SchemaCatalog, SchemaError> {
        let mut catalog = SchemaCatalog::new();
        Self::register(&mut catalog)?;
        Ok(catalog)
    }

    /// Construct an instance from a complete field map.
    fn construct(fields: FieldMap) -> Result<Self, String> {
        let record = Record::new(Self::NAME, fields);
        let instance: Self = serde_json::from_value(record.to_json()).map_err(|e| e.to_string())?;
        instance.validate()?;
        Ok(instance)
    }

    /// Schema-guided structural view of this instance.
    fn to_structure(&self, catalog: &SchemaCatalog) -> Result<FakeValue, ConversionError> {
        let value =
            serde_json::to_value(self).map_err(|e| ConversionError::Serialize(e.to_string()))?;
        let schema = catalog
            .get_record(Self::NAME)
            .ok_or_else(|| ConversionError::UnknownRecord {
                path: "$".to_string(),
                name: Self::NAME.to_string(),
            })?;
        Record::from_json(&value, schema, catalog).map(FakeValue::Record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TypeExpr;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Pnl {
        base_pnl: f64,
        total_shock_pnl: f64,
    }

    impl Model for Pnl {
        const NAME: &'static str = "PnL";

        fn fields() -> Vec<FieldDefinition> {
            vec![
                FieldDefinition::new("base_pnl", TypeExpr::FLOAT),
                FieldDefinition::new("total_shock_pnl", TypeExpr::FLOAT),
            ]
        }

        fn validate(&self) -> Result<(), String> {
            if self.base_pnl.is_finite() {
                Ok(())
            } else {
                Err("base_pnl must be finite".to_string())
            }
        }
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct AssetPnl {
        asset_id: uuid::Uuid,
        asset_pnl: Pnl,
    }

    impl Model for AssetPnl {
        const NAME: &'static str = "AssetPnL";

        fn fields() -> Vec<FieldDefinition> {
            vec![
                FieldDefinition::new("asset_id", TypeExpr::UUID),
                FieldDefinition::new("asset_pnl", TypeExpr::record(Pnl::NAME)),
            ]
        }

        fn register_nested(catalog: &mut SchemaCatalog) -> Result<(), SchemaError> {
            Pnl::register(catalog)
        }
    }

    #[test]
    fn test_catalog_includes_nested() {
        let catalog = AssetPnl::catalog().unwrap();
        assert_eq!(catalog.record_names(), vec!["AssetPnL", "PnL"]);
    }

    #[test]
    fn test_construct_and_structure() {
        let catalog = AssetPnl::catalog().unwrap();

        let mut pnl = FieldMap::new();
        pnl.insert("base_pnl".into(), FakeValue::Float(-10.0));
        pnl.insert("total_shock_pnl".into(), FakeValue::Float(-1000.0));
        let mut fields = FieldMap::new();
        fields.insert("asset_id".into(), FakeValue::Uuid(uuid::Uuid::nil()));
        fields.insert("asset_pnl".into(), FakeValue::Record(Record::new("PnL", pnl)));

        let instance = AssetPnl::construct(fields.clone()).unwrap();
        assert_eq!(instance.asset_pnl.base_pnl, -10.0);

        let structure = instance.to_structure(&catalog).unwrap();
        assert_eq!(structure, FakeValue::Record(Record::new("AssetPnL", fields)));
    }

    #[test]
    fn test_construct_rejects_incomplete_map() {
        let mut fields = FieldMap::new();
        fields.insert("base_pnl".into(), FakeValue::Float(1.0));
        let err = Pnl::construct(fields).unwrap_err();
        assert!(err.contains("total_shock_pnl"));
    }
}
