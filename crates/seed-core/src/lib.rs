//! Core types for the rowseed test data generator.
//!
//! This crate provides the schema model and the collaborator interfaces the
//! generation engine is written against:
//!
//! - [`Name`] - case-insensitive, optionally schema-qualified identifiers
//! - [`Table`], [`Column`], [`UniqueConstraint`], [`Reference`] - schema model
//! - [`TableCollection`] - the per-session table cache
//! - [`Value`] / [`Row`] - database-neutral values
//! - [`SchemaProvider`], [`RowSource`], [`RowSink`] - collaborator traits
//! - [`SchemaFile`] - YAML schema declarations
//!
//! # Architecture
//!
//! ```text
//! seed-core (this crate)
//!    │
//!    ├─── seed-generator  (column plans, value generators, batch engine)
//!    │
//!    └─── seed-populate   (Populator facade, config, in-memory database)
//! ```
//!
//! # Example
//!
//! ```rust
//! use seed_core::{ColumnDefinition, DataType, Name, Table, TableCollection};
//!
//! let mut tables = TableCollection::new();
//! let foo = tables.add_table(Table::new(Name::unqualified("foo"))).unwrap();
//! foo.add_column(ColumnDefinition::varchar("name", 10)).unwrap();
//! foo.add_unique_constraint("foo_pkey", &["name"]).unwrap();
//!
//! assert!(tables.get_table(&"FOO".into()).is_ok());
//! ```

pub mod custom;
pub mod name;
pub mod schema;
pub mod schema_file;
pub mod traits;
pub mod types;
pub mod values;

// Re-exports for convenience
pub use custom::{CustomRowGenerator, CustomValueGenerator};
pub use name::Name;
pub use schema::{
    Column, ColumnDefinition, ColumnId, ColumnSetRegistration, Reference, ReferenceBuilder,
    SchemaError, Table, TableCollection, UniqueConstraint,
};
pub use schema_file::SchemaFile;
pub use traits::{InsertMode, RowSink, RowSource, SchemaProvider};
pub use types::DataType;
pub use values::{Row, Value};
