//! Populator facade for the rowseed test data seeder.
//!
//! This crate ties the schema model and the generation engine to a database:
//!
//! - [`Populator`] - loads table metadata once, generates batches and hands
//!   them to the database
//! - [`PopulateConfig`] - batch mode, discard budget, seed, default schema
//! - [`PopulateMetrics`] - counters and timings of one `populate` call
//! - [`MemoryDatabase`] - an in-memory database enforcing NOT NULL, unique
//!   and foreign key constraints
//!
//! Any type implementing [`SchemaProvider`](seed_core::SchemaProvider) and
//! [`RowSink`](seed_core::RowSink) can be populated.

pub mod config;
pub mod error;
pub mod memory;
pub mod metrics;
pub mod populator;

// Re-exports for convenience
pub use config::PopulateConfig;
pub use error::{ConfigError, MemoryError, PopulateError};
pub use memory::MemoryDatabase;
pub use metrics::PopulateMetrics;
pub use populator::Populator;
