//! Core types for the model-faker framework.
//!
//! This crate provides the foundational types shared by the generator and
//! the round-trip harness:
//!
//! - [`TypeExpr`] - Declared shape of a field
//! - [`RecordSchema`] / [`SchemaCatalog`] - Record definitions, loadable from YAML
//! - [`FakeValue`] / [`Record`] - Generated instances
//! - [`Model`] - Capability interface for typed Rust records
//!
//! # Architecture
//!
//! ```text
//! faker-core (this crate)
//!    │
//!    ├─── faker-generator  (classifies types, draws values, builds records)
//!    │
//!    └─── faker-verify     (encodes, decodes and compares instances)
//! ```
//!
//! # Example
//!
//! ```rust
//! use faker_core::{SchemaCatalog, TypeExpr};
//!
//! let catalog = SchemaCatalog::from_yaml(r#"
//! records:
//!   - name: Shock
//!     fields:
//!       - name: shock_id
//!         type: uuid
//!       - name: magnitude
//!         type: float
//! "#).unwrap();
//!
//! assert_eq!(
//!     catalog.get_field_type("Shock", "shock_id").unwrap(),
//!     &TypeExpr::UUID
//! );
//! ```

pub mod json;
pub mod model;
pub mod schema;
pub mod types;
pub mod values;

// Re-exports for convenience
pub use json::{ConversionError, NamedTypes};
pub use model::Model;
pub use schema::{FieldDefinition, RecordConstraint, RecordSchema, SchemaCatalog, SchemaError};
pub use types::{EnumType, PrimitiveKind, TypeExpr, TypeKey};
pub use values::{FakeValue, FieldMap, Record};
