//! Error types for the round-trip harness.

use crate::codec::CodecError;
use faker_core::{ConversionError, SchemaError};
use faker_generator::FakerError;
use thiserror::Error;

/// Errors that can occur during verification.
#[derive(Error, Debug)]
pub enum VerifyError {
    /// The instance could not be built.
    #[error("Generation failed: {0}")]
    Faker(#[from] FakerError),

    /// The codec failed to encode or decode.
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    /// Decoded data no longer fits the record schema.
    #[error("Decoded value does not fit the schema: {0}")]
    Conversion(#[from] ConversionError),

    /// Schema error.
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// The decoded instance differs from the original.
    #[error("Round trip of '{record}' diverged at {path}: expected {expected}, got {actual}")]
    RoundTripMismatch {
        record: String,
        path: String,
        expected: String,
        actual: String,
    },
}
