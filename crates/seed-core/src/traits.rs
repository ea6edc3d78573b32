//! Collaborator interfaces.
//!
//! The generation engine never talks to a database directly. Schema metadata
//! comes from a [`SchemaProvider`]; existing data is read through a
//! [`RowSource`] and accepted rows leave through a [`RowSink`].
//!
//! Collaborator failures are reported as `anyhow::Error` and passed through
//! the engine untouched.

use crate::schema::{ColumnId, Table, TableCollection};
use crate::values::Row;
use serde::{Deserialize, Serialize};

/// How a sink should persist a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsertMode {
    /// One multi-row statement for the whole batch
    #[default]
    Batch,
    /// One statement per row
    PerRow,
}

/// Source of table metadata.
pub trait SchemaProvider {
    /// Discover all tables with their columns, unique constraints and
    /// foreign keys.
    fn load_tables(&self) -> anyhow::Result<TableCollection>;
}

/// Read access to existing table contents.
pub trait RowSource {
    /// Select the given columns of every row currently in `table`.
    ///
    /// Each returned row holds exactly `columns.len()` values in the order
    /// requested.
    fn select_all(&self, table: &Table, columns: &[ColumnId]) -> anyhow::Result<Vec<Row>>;
}

/// Write access for finished batches.
pub trait RowSink: RowSource {
    /// Insert `rows` into `table`, each row holding the values of `columns`
    /// in order. Returns the number of rows actually inserted.
    ///
    /// In [`InsertMode::Batch`] a failure leaves the table unchanged. In
    /// [`InsertMode::PerRow`] rows before the failing one may already be
    /// committed; the error should say how many.
    fn insert_rows(
        &mut self,
        table: &Table,
        columns: &[ColumnId],
        rows: &[Row],
        mode: InsertMode,
    ) -> anyhow::Result<u64>;
}

impl SchemaProvider for TableCollection {
    fn load_tables(&self) -> anyhow::Result<TableCollection> {
        Ok(self.clone())
    }
}
