//! Constraint-aware row generation for the rowseed test data seeder.
//!
//! This crate turns a table description into random rows that a database
//! will accept: foreign keys point at existing parents and unique
//! constraints hold against both stored and newly generated rows.
//!
//! # Architecture
//!
//! ```text
//! Table + TableCollection + RowSource
//!        │
//!        ▼
//! ┌──────────────────┐
//! │   ColumnPlan     │  custom generators, foreign keys, type defaults
//! └────────┬─────────┘
//!          │ generate_row(rng)
//!          ▼
//! ┌──────────────────┐
//! │  DataGenerator   │  discard loop, bounded by max_discarded_rows
//! │                  │
//! │  - rng (StdRng)  │
//! │  - registry      │
//! └────────┬─────────┘
//!          │ add_row
//!          ▼
//!    Batch { existing rows, accepted rows, unique verifiers }
//! ```
//!
//! # Example
//!
//! ```rust
//! use seed_core::{ColumnDefinition, ColumnId, Name, Row, RowSource, Table, TableCollection};
//! use seed_generator::{Batch, BatchState, DataGenerator};
//!
//! struct Empty;
//!
//! impl RowSource for Empty {
//!     fn select_all(&self, _: &Table, _: &[ColumnId]) -> anyhow::Result<Vec<Row>> {
//!         Ok(Vec::new())
//!     }
//! }
//!
//! let mut tables = TableCollection::new();
//! let foo = tables.add_table(Table::new(Name::unqualified("foo"))).unwrap();
//! foo.add_column(ColumnDefinition::varchar("name", 10)).unwrap();
//! foo.add_unique_constraint("foo_pkey", &["name"]).unwrap();
//!
//! let foo = tables.get_table(&Name::unqualified("foo")).unwrap();
//! let mut batch = Batch::new(foo, Vec::new(), 50);
//! let state = DataGenerator::new(42).prepare(&mut batch, &tables, &Empty).unwrap();
//!
//! assert_eq!(state, BatchState::Ready);
//! assert_eq!(batch.rows_to_insert().len(), 50);
//! ```
//!
//! # Generators
//!
//! Default generators by declared type:
//!
//! - `char`, `varchar`, `text` - random strings shorter than the column size
//!   (at most 1000 characters)
//! - `boolean`, `bit` - random booleans
//! - `integer` - random 32-bit integers
//!
//! `bigint` and `uuid` generators are available for registration. Foreign key
//! columns draw from the referenced table's rows; custom generators may be
//! registered per column or per column set.

pub mod batch;
pub mod error;
pub mod generator;
pub mod generators;
pub mod plan;

// Re-exports for convenience
pub use batch::{Batch, BatchState, UniqueConstraintVerifier};
pub use error::GeneratorError;
pub use generator::{DataGenerator, MAX_DISCARDED_ROWS};
pub use generators::{
    BigIntGenerator, BooleanGenerator, GeneratorRegistry, IntegerGenerator, ReferenceGenerator,
    StringGenerator, UuidGenerator, ValueGenerator,
};
pub use plan::{ColumnPlan, ColumnSetGenerator, ColumnSlots, GeneratorKind};
