//! Error type for the generation engine.

use seed_core::{DataType, Name, SchemaError};

/// Error type for generator operations.
///
/// Everything except [`GeneratorError::Source`] is a configuration error:
/// retrying without changing the schema or the registrations will fail the
/// same way.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// Schema error
    #[error("Schema error: {0}")]
    SchemaError(#[from] SchemaError),

    /// No generator is registered for the column's declared type
    #[error("Could not find generator for column {column} of type {data_type} ({type_name})")]
    UnsupportedType {
        column: String,
        data_type: DataType,
        type_name: String,
    },

    /// A custom generator's columns were only partly available for the batch
    #[error(
        "Custom generator for {table} ({columns}) conflicts with the batch columns: \
         only some of its columns are generated"
    )]
    ConflictingGenerator { table: Name, columns: String },

    /// Custom generators claim some, but not all, source columns of a foreign key
    #[error(
        "Custom generators cover only some columns of {reference}; a foreign key \
         must be generated as a whole"
    )]
    SplitReference { reference: String },

    /// A multi-column generator returned the wrong number of values
    #[error("Expected {expected} values from generator for ({columns}), but got {actual}")]
    ArityMismatch {
        columns: String,
        expected: usize,
        actual: usize,
    },

    /// A foreign key points at a table without rows
    #[error(
        "Can't construct a generator for {reference}, because the referenced table \
         {target} contains no rows"
    )]
    EmptyReferencedTable { reference: String, target: Name },

    /// Failure reported by a collaborator, passed through unchanged
    #[error(transparent)]
    Source(#[from] anyhow::Error),
}
