//! Fake record generator for the model-faker framework.
//!
//! This crate provides `ModelFaker`, which walks a record schema field by
//! field and fills every field with a random value of the declared type.
//! Nested records, sequences, mappings, optionals and unions are expanded
//! recursively; everything else is drawn from a generator registry.
//!
//! # Architecture
//!
//! ```text
//! SchemaCatalog (YAML or Model descriptors)
//!        │
//!        ▼
//! ┌──────────────────────┐
//! │      ModelFaker      │
//! │                      │
//! │  classify ─► Shape   │
//! │  registry ─► value   │
//! │  rng (StdRng)        │
//! └──────────┬───────────┘
//!            │  FieldMap
//!            ▼
//!   PreConstructionHook (top level only)
//!            │
//!            ▼
//!   Record { schema, fields }
//! ```
//!
//! # Example
//!
//! ```rust
//! use faker_core::{FakeValue, SchemaCatalog};
//! use faker_generator::{FakerConfig, ModelFaker};
//!
//! let catalog = SchemaCatalog::from_yaml(r#"
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
//!       - name: magnitude
//!         type: float
//! "#).unwrap();
//!
//! let mut faker = ModelFaker::new(catalog, FakerConfig::default().with_seed(42)).unwrap();
//! let shock = faker.build("Shock", None).unwrap();
//! assert!(matches!(shock.get_field("shock_id"), Some(FakeValue::Uuid(_))));
//! ```
//!
//! # Built-in generators
//!
//! - `bool` - Fair coin
//! - `int` - Integer in [-1_000_000, 1_000_000]
//! - `float` - Finite float in [-1e6, 1e6], four decimals
//! - `string` - 8 to 16 ASCII letters
//! - `date` / `datetime` / `time` - Whole-second values between 1970 and 2037 (UTC)
//! - `uuid` - Random UUID v4
//! - `raw` - Small JSON object carried as text
//! - enumerations - Uniform choice among the labels

pub mod builder;
pub mod classify;
pub mod config;
pub mod error;
pub mod generators;
pub mod hook;
pub mod registry;

// Re-exports for convenience
pub use builder::{construct_record, ModelFaker, RecordIterator};
pub use classify::{classify, Shape, Unrecognized};
pub use config::FakerConfig;
pub use error::FakerError;
pub use hook::{Identity, PreConstructionHook, RemoveFields};
pub use registry::{Generator, GeneratorRegistry, OverrideFn};

use faker_core::{Record, SchemaCatalog};
use std::sync::Arc;

/// Build one instance of `record` with default settings.
///
/// `overrides` replaces built-in generators for the types it covers and
/// `hook` transforms the top-level field map before construction.
pub fn build(
    catalog: impl Into<Arc<SchemaCatalog>>,
    record: &str,
    overrides: Option<&GeneratorRegistry>,
    hook: Option<&dyn PreConstructionHook>,
) -> Result<Record, FakerError> {
    let mut faker = ModelFaker::new(catalog, FakerConfig::default())?;
    if let Some(registry) = overrides {
        faker = faker.with_registry(registry.clone());
    }
    faker.build(record, hook)
}
