//! In-memory database.
//!
//! [`MemoryDatabase`] stores rows per table and enforces what a relational
//! database would on insert:
//!
//! - auto-increment columns get the next counter value unless one is given
//! - NOT NULL columns reject NULL
//! - unique constraints reject duplicates; a key containing NULL never
//!   collides, following SQL
//! - foreign keys must name an existing parent tuple unless a source value
//!   is NULL
//!
//! It serves as schema provider, row source and row sink, which makes it a
//! database-free backend for seeding and for tests.

use crate::error::MemoryError;
use seed_core::{
    Column, ColumnId, DataType, InsertMode, Name, Row, RowSink, RowSource, SchemaError,
    SchemaFile, SchemaProvider, Table, TableCollection, Value,
};
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Default)]
struct TableData {
    rows: Vec<Row>,
    last_id: i64,
}

/// Rows of every table of a [`TableCollection`], held in memory.
#[derive(Debug, Default)]
pub struct MemoryDatabase {
    tables: TableCollection,
    data: HashMap<Name, TableData>,
}

impl MemoryDatabase {
    /// Empty database for the given tables.
    pub fn new(tables: TableCollection) -> Self {
        let data = tables
            .iter()
            .map(|t| (t.name().clone(), TableData::default()))
            .collect();
        Self { tables, data }
    }

    /// Empty database for the tables of a schema file.
    pub fn from_schema_file(file: &SchemaFile) -> Result<Self, SchemaError> {
        Ok(Self::new(file.to_collection()?))
    }

    /// Empty database for a YAML schema.
    pub fn from_yaml(yaml: &str) -> Result<Self, SchemaError> {
        Self::from_schema_file(&SchemaFile::from_yaml(yaml)?)
    }

    pub fn tables(&self) -> &TableCollection {
        &self.tables
    }

    /// Stored rows of `table`, one value per column in table order.
    pub fn rows(&self, table: &Name) -> Result<&[Row], MemoryError> {
        Ok(&self.data(table)?.rows)
    }

    pub fn row_count(&self, table: &Name) -> Result<usize, MemoryError> {
        Ok(self.data(table)?.rows.len())
    }

    /// Stored values of one column.
    pub fn column_values(&self, table: &Name, column: &str) -> Result<Vec<Value>, MemoryError> {
        let id = self.table(table)?.column_id(column).map_err(|_| MemoryError::ColumnNotFound {
            table: table.clone(),
            column: column.to_string(),
        })?;
        Ok(self.data(table)?.rows.iter().map(|row| row[id.index()].clone()).collect())
    }

    /// Insert one row given as `(column, value)` pairs.
    ///
    /// Omitted columns are NULL, or the next counter value for
    /// auto-increment columns.
    pub fn insert(&mut self, table: &Name, values: &[(&str, Value)]) -> Result<(), MemoryError> {
        let schema = self.table(table)?.clone();
        let columns = values
            .iter()
            .map(|(name, _)| {
                schema.column_id(name).map_err(|_| MemoryError::ColumnNotFound {
                    table: table.clone(),
                    column: name.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let row: Row = values.iter().map(|(_, v)| v.clone()).collect();

        let (rows, last_id) = self.prepare_rows(&schema, &columns, std::slice::from_ref(&row))?;
        self.commit(table, rows, last_id)
    }

    /// Remove all rows of `table`. The auto-increment counter keeps going.
    pub fn truncate(&mut self, table: &Name) -> Result<(), MemoryError> {
        self.data_mut(table)?.rows.clear();
        Ok(())
    }

    fn table(&self, name: &Name) -> Result<&Table, MemoryError> {
        self.tables
            .find_table(name)
            .ok_or_else(|| MemoryError::TableNotFound(name.clone()))
    }

    fn data(&self, name: &Name) -> Result<&TableData, MemoryError> {
        self.data
            .get(name)
            .ok_or_else(|| MemoryError::TableNotFound(name.clone()))
    }

    fn data_mut(&mut self, name: &Name) -> Result<&mut TableData, MemoryError> {
        self.data
            .get_mut(name)
            .ok_or_else(|| MemoryError::TableNotFound(name.clone()))
    }

    /// Expand `rows` to full table width and check every constraint, each
    /// row against the stored rows and the rows before it.
    fn prepare_rows(
        &self,
        table: &Table,
        columns: &[ColumnId],
        rows: &[Row],
    ) -> Result<(Vec<Row>, i64), MemoryError> {
        let stored = self.data(table.name())?;
        let mut last_id = stored.last_id;
        let mut pending: Vec<Row> = Vec::with_capacity(rows.len());

        for row in rows {
            if row.len() != columns.len() {
                return Err(MemoryError::WidthMismatch {
                    table: table.name().clone(),
                    expected: columns.len(),
                    actual: row.len(),
                });
            }

            let mut full = Vec::with_capacity(table.columns().len());
            for column in table.columns() {
                let value = match columns.iter().position(|&c| c == column.id()) {
                    Some(i) => row[i].clone(),
                    None if column.auto_increment => {
                        last_id += 1;
                        auto_value(column, last_id)
                    }
                    None => Value::Null,
                };
                full.push(value);
            }

            self.check_row(table, &stored.rows, &pending, &full)?;
            pending.push(full);
        }

        Ok((pending, last_id))
    }

    fn check_row(
        &self,
        table: &Table,
        stored: &[Row],
        pending: &[Row],
        row: &[Value],
    ) -> Result<(), MemoryError> {
        let violation = |message: String| MemoryError::ConstraintViolation {
            table: table.name().clone(),
            message,
        };

        for column in table.columns() {
            if !column.nullable && row[column.id().index()].is_null() {
                return Err(violation(format!(
                    "NOT NULL constraint violation: column '{}' cannot be NULL",
                    column.name
                )));
            }
        }

        for constraint in table.unique_constraints() {
            let key = project(row, constraint.columns());
            if key.iter().any(Value::is_null) {
                continue;
            }
            if stored
                .iter()
                .chain(pending)
                .any(|other| project(other, constraint.columns()) == key)
            {
                return Err(violation(format!(
                    "UNIQUE constraint '{}' violated: duplicate value ({})",
                    constraint.name(),
                    format_key(&key)
                )));
            }
        }

        for reference in table.foreign_keys() {
            let key = project(row, reference.source_columns());
            if key.iter().any(Value::is_null) {
                continue;
            }

            let parents = &self.data(reference.target_table())?.rows;
            let mut candidates: Box<dyn Iterator<Item = &Row>> =
                if reference.target_table() == table.name() {
                    Box::new(parents.iter().chain(pending))
                } else {
                    Box::new(parents.iter())
                };
            if !candidates.any(|parent| project(parent, reference.target_columns()) == key) {
                return Err(violation(format!(
                    "FOREIGN KEY constraint violated: {} has no row ({})",
                    reference,
                    format_key(&key)
                )));
            }
        }

        Ok(())
    }

    fn commit(&mut self, table: &Name, rows: Vec<Row>, last_id: i64) -> Result<(), MemoryError> {
        let data = self.data_mut(table)?;
        data.rows.extend(rows);
        data.last_id = last_id;
        Ok(())
    }
}

fn auto_value(column: &Column, id: i64) -> Value {
    match column.data_type {
        DataType::BigInt => Value::Int64(id),
        _ => i32::try_from(id).map_or(Value::Int64(id), Value::Int32),
    }
}

fn project(row: &[Value], columns: &[ColumnId]) -> Vec<Value> {
    columns.iter().map(|c| row[c.index()].clone()).collect()
}

fn format_key(key: &[Value]) -> String {
    key.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl SchemaProvider for MemoryDatabase {
    fn load_tables(&self) -> anyhow::Result<TableCollection> {
        Ok(self.tables.clone())
    }
}

impl RowSource for MemoryDatabase {
    fn select_all(&self, table: &Table, columns: &[ColumnId]) -> anyhow::Result<Vec<Row>> {
        let data = self.data(table.name())?;
        Ok(data.rows.iter().map(|row| project(row, columns)).collect())
    }
}

impl RowSink for MemoryDatabase {
    fn insert_rows(
        &mut self,
        table: &Table,
        columns: &[ColumnId],
        rows: &[Row],
        mode: InsertMode,
    ) -> anyhow::Result<u64> {
        let name = table.name();
        match mode {
            InsertMode::Batch => {
                let (prepared, last_id) = self.prepare_rows(table, columns, rows)?;
                self.commit(name, prepared, last_id)?;
            }
            InsertMode::PerRow => {
                for (inserted, row) in rows.iter().enumerate() {
                    let result = self
                        .prepare_rows(table, columns, std::slice::from_ref(row))
                        .and_then(|(prepared, last_id)| self.commit(name, prepared, last_id));
                    if let Err(e) = result {
                        if inserted == 0 {
                            return Err(e.into());
                        }
                        return Err(MemoryError::PartialInsert {
                            table: name.clone(),
                            inserted: inserted as u64,
                            source: Box::new(e),
                        }
                        .into());
                    }
                }
            }
        }
        debug!("Inserted {} rows into {} ({:?})", rows.len(), name, mode);
        Ok(rows.len() as u64)
    }
}
