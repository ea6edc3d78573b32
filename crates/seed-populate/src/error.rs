//! Error types for the populator.

use seed_core::{Name, SchemaError};
use seed_generator::GeneratorError;
use thiserror::Error;

/// Errors that can occur while loading a [`PopulateConfig`](crate::PopulateConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Error reading the configuration file.
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing YAML.
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Setting out of range.
    #[error("Invalid setting '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Errors that can occur during population.
#[derive(Error, Debug)]
pub enum PopulateError {
    /// Schema-related error (unknown table or column, bad registration).
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Generator error.
    #[error("Generator error: {0}")]
    Generator(#[from] GeneratorError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Failure reported by the schema provider or the row source/sink.
    #[error(transparent)]
    Collaborator(#[from] anyhow::Error),
}

impl PopulateError {
    /// Whether the failure came from a collaborator rather than from the
    /// schema or the generators.
    pub fn is_collaborator(&self) -> bool {
        matches!(
            self,
            Self::Collaborator(_) | Self::Generator(GeneratorError::Source(_))
        )
    }
}

/// Errors raised by the in-memory database.
#[derive(Error, Debug)]
pub enum MemoryError {
    /// Table not known to the database.
    #[error("Table not found: {0}")]
    TableNotFound(Name),

    /// Column not found in table.
    #[error("Column '{column}' not found in table {table}")]
    ColumnNotFound { table: Name, column: String },

    /// Row with the wrong number of values.
    #[error("Expected {expected} values per row for {table}, got {actual}")]
    WidthMismatch {
        table: Name,
        expected: usize,
        actual: usize,
    },

    /// NOT NULL, UNIQUE or FOREIGN KEY violation.
    #[error("Constraint violation on {table}: {message}")]
    ConstraintViolation { table: Name, message: String },

    /// A row-by-row insert stopped after committing `inserted` rows.
    #[error("Inserted {inserted} rows into {table} before failing: {source}")]
    PartialInsert {
        table: Name,
        inserted: u64,
        #[source]
        source: Box<MemoryError>,
    },
}
