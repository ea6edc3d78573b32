//! Populator configuration.
//!
//! ```yaml
//! batch_mode: true
//! max_discarded_rows: 10000
//! max_string_length: 1000
//! seed: 42
//! default_schema: public
//! ```
//!
//! Every field is optional.

use crate::error::ConfigError;
use seed_core::InsertMode;
use seed_generator::generators::string::DEFAULT_MAX_LENGTH;
use seed_generator::MAX_DISCARDED_ROWS;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Settings for a [`Populator`](crate::Populator).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulateConfig {
    /// Insert each batch with one multi-row statement instead of row by row
    pub batch_mode: bool,

    /// Rejected candidate rows after which a batch is given up
    pub max_discarded_rows: usize,

    /// Upper bound on generated string length
    pub max_string_length: u32,

    /// Random seed; OS entropy when unset
    pub seed: Option<u64>,

    /// Schema for table names given without one
    pub default_schema: Option<String>,
}

impl Default for PopulateConfig {
    fn default() -> Self {
        Self {
            batch_mode: true,
            max_discarded_rows: MAX_DISCARDED_ROWS,
            max_string_length: DEFAULT_MAX_LENGTH,
            seed: None,
            default_schema: None,
        }
    }
}

impl PopulateConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_discarded_rows == 0 {
            return Err(ConfigError::Invalid {
                field: "max_discarded_rows",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.max_string_length == 0 {
            return Err(ConfigError::Invalid {
                field: "max_string_length",
                reason: "must be at least 1".to_string(),
            });
        }
        if matches!(&self.default_schema, Some(s) if s.is_empty()) {
            return Err(ConfigError::Invalid {
                field: "default_schema",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    pub fn with_batch_mode(mut self, batch_mode: bool) -> Self {
        self.batch_mode = batch_mode;
        self
    }

    pub fn with_max_discarded_rows(mut self, max_discarded_rows: usize) -> Self {
        self.max_discarded_rows = max_discarded_rows;
        self
    }

    pub fn with_max_string_length(mut self, max_string_length: u32) -> Self {
        self.max_string_length = max_string_length;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_default_schema(mut self, schema: impl Into<String>) -> Self {
        self.default_schema = Some(schema.into());
        self
    }

    /// Insert mode matching `batch_mode`.
    pub fn insert_mode(&self) -> InsertMode {
        if self.batch_mode {
            InsertMode::Batch
        } else {
            InsertMode::PerRow
        }
    }
}
