//! rowseed Library
//!
//! Random test data for relational tables that the database will accept:
//! foreign keys point at existing parent rows and unique constraints hold
//! against stored and freshly generated rows.
//!
//! # Crates
//!
//! The library is split into three crates, re-exported here:
//!
//! - [`schema`] (`seed_core`) - schema model, values and collaborator traits
//! - [`generator`] (`seed_generator`) - column plans, value generators and
//!   the batch engine
//! - [`populate`] (`seed_populate`) - the [`Populator`] facade, configuration
//!   and an in-memory database
//!
//! # Usage
//!
//! ```rust
//! use rowseed::{MemoryDatabase, Name, PopulateConfig, Populator};
//!
//! let db = MemoryDatabase::from_yaml(r#"
//! tables:
//!   - name: parent
//!     columns:
//!       - { name: id, type: integer, auto_increment: true }
//!       - { name: label, type: varchar, size: 20 }
//!     primary_key: [id]
//!   - name: child
//!     columns:
//!       - { name: parent_id, type: integer }
//!     foreign_keys:
//!       - columns: [parent_id]
//!         references: { table: parent, columns: [id] }
//! "#).unwrap();
//!
//! let mut populator =
//!     Populator::with_config(db, PopulateConfig::default().with_seed(1)).unwrap();
//! populator.populate("parent", 10).unwrap();
//! populator.populate("child", 100).unwrap();
//!
//! let child = Name::unqualified("child");
//! assert_eq!(populator.database().row_count(&child).unwrap(), 100);
//! ```
//!
//! Logging goes through `tracing`; install a subscriber with
//! [`logging::init_tracing`].

pub mod logging;

pub use seed_core as schema;
pub use seed_generator as generator;
pub use seed_populate as populate;

pub use seed_core::{
    Column, ColumnDefinition, CustomRowGenerator, CustomValueGenerator, DataType, InsertMode,
    Name, Reference, Row, RowSink, RowSource, SchemaFile, SchemaProvider, Table,
    TableCollection, UniqueConstraint, Value,
};
pub use seed_generator::{
    Batch, BatchState, DataGenerator, GeneratorError, GeneratorRegistry, ValueGenerator,
    MAX_DISCARDED_ROWS,
};
pub use seed_populate::{MemoryDatabase, PopulateConfig, PopulateError, PopulateMetrics, Populator};
