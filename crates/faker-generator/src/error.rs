//! Error types for record generation.

use faker_core::SchemaError;
use thiserror::Error;

/// Errors that can occur while building a fake record.
///
/// None of these are recovered locally: each one aborts the current build.
#[derive(Error, Debug)]
pub enum FakerError {
    /// A declared type could not be reduced to a known shape.
    #[error("Unrecognized type '{type_expr}' for field {path}")]
    UnrecognizedType { path: String, type_expr: String },

    /// Record nesting went deeper than the configured limit.
    #[error("Recursion limit of {limit} exceeded at {path}")]
    RecursionLimitExceeded { path: String, limit: usize },

    /// The record refused the assembled field map.
    #[error("Construction of '{record}' rejected: {reason}")]
    ConstructionRejected { record: String, reason: String },

    /// Record not found in the catalog.
    #[error("Record not found: {0}")]
    RecordNotFound(String),

    /// Configuration values are inconsistent.
    #[error("Invalid faker configuration: {0}")]
    InvalidConfig(String),

    /// Error reading a configuration file.
    #[error("Failed to read faker configuration: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing YAML configuration.
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Schema error
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),
}
