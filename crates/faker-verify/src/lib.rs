//! Round-trip verification for the model-faker framework.
//!
//! This crate checks that generated instances survive a serialize/deserialize
//! cycle through a codec without loss or corruption. The codec is treated as
//! a black box; JSON and YAML codecs are provided.
//!
//! # Example
//!
//! ```rust
//! use faker_core::SchemaCatalog;
//! use faker_verify::JsonCodec;
//!
//! let catalog = SchemaCatalog::from_yaml(r#"
//! records:
//!   - name: CurvePoint
//!     fields:
//!       - name: tenor
//!         type: float
//!       - name: rate
//!         type: float
//! "#).unwrap();
//!
//! let point = faker_verify::verify(catalog, "CurvePoint", JsonCodec, None, None).unwrap();
//! assert_eq!(point.fields.len(), 2);
//! ```

pub mod codec;
pub mod compare;
pub mod error;
pub mod harness;
pub mod report;

pub use codec::{Codec, CodecError, JsonCodec, YamlCodec};
pub use compare::{compare_records, compare_values, CompareResult};
pub use error::VerifyError;
pub use harness::RoundTripHarness;
pub use report::{ErrorInfo, MismatchInfo, RoundTripReport};

use faker_core::{Model, Record, SchemaCatalog};
use faker_generator::{FakerConfig, GeneratorRegistry, ModelFaker, PreConstructionHook};
use std::sync::Arc;

/// Build one instance of `record` and check that it survives `codec`.
///
/// Returns the verified instance.
pub fn verify<C: Codec>(
    catalog: impl Into<Arc<SchemaCatalog>>,
    record: &str,
    codec: C,
    overrides: Option<&GeneratorRegistry>,
    hook: Option<&dyn PreConstructionHook>,
) -> Result<Record, VerifyError> {
    let mut faker = ModelFaker::new(catalog, FakerConfig::default())?;
    if let Some(registry) = overrides {
        faker = faker.with_registry(registry.clone());
    }
    RoundTripHarness::new(faker, codec).verify(record, hook)
}

/// Build one instance of a typed model and check that it survives `codec`.
///
/// Returns the decoded instance.
pub fn verify_model<M: Model, C: Codec>(
    codec: C,
    overrides: Option<&GeneratorRegistry>,
    hook: Option<&dyn PreConstructionHook>,
) -> Result<M, VerifyError> {
    let mut faker = ModelFaker::for_model::<M>(FakerConfig::default())?;
    if let Some(registry) = overrides {
        faker = faker.with_registry(registry.clone());
    }
    RoundTripHarness::new(faker, codec).verify_model::<M>(hook)
}
