//! Generator configuration.
//!
//! ```yaml
//! seed: 42
//! min_collection_len: 1
//! max_collection_len: 5
//! max_depth: 32
//! ```

use crate::error::FakerError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default smallest sequence/mapping length.
pub const DEFAULT_MIN_COLLECTION_LEN: usize = 1;
/// Default largest sequence/mapping length.
pub const DEFAULT_MAX_COLLECTION_LEN: usize = 5;
/// Default record nesting ceiling.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Settings shared by every build of a `ModelFaker`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FakerConfig {
    /// Seed for the random source; `None` draws one from the OS
    pub seed: Option<u64>,

    /// Smallest sequence/mapping length (at least 1)
    pub min_collection_len: usize,

    /// Largest sequence/mapping length
    pub max_collection_len: usize,

    /// Maximum record nesting depth before the build fails
    pub max_depth: usize,
}

impl Default for FakerConfig {
    fn default() -> Self {
        Self {
            seed: None,
            min_collection_len: DEFAULT_MIN_COLLECTION_LEN,
            max_collection_len: DEFAULT_MAX_COLLECTION_LEN,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl FakerConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, FakerError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, FakerError> {
        let config: FakerConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the collection length range.
    pub fn with_collection_len(mut self, min: usize, max: usize) -> Self {
        self.min_collection_len = min;
        self.max_collection_len = max;
        self
    }

    /// Set the recursion ceiling.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Check the configuration for values the builder cannot honor.
    pub fn validate(&self) -> Result<(), FakerError> {
        if self.min_collection_len == 0 {
            return Err(FakerError::InvalidConfig(
                "min_collection_len must be at least 1".to_string(),
            ));
        }
        if self.min_collection_len > self.max_collection_len {
            return Err(FakerError::InvalidConfig(format!(
                "min_collection_len ({}) exceeds max_collection_len ({})",
                self.min_collection_len, self.max_collection_len
            )));
        }
        if self.max_depth == 0 {
            return Err(FakerError::InvalidConfig(
                "max_depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
