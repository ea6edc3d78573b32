//! YAML schema files.
//!
//! A schema file declares tables the same way a database catalog would
//! report them, so tests and seeders can run without a live database:
//!
//! ```yaml
//! tables:
//!   - name: dept
//!     columns:
//!       - { name: id, type: integer, auto_increment: true }
//!       - { name: name, type: varchar, size: 10 }
//!     primary_key: [id]
//!   - name: emp
//!     columns:
//!       - { name: id, type: integer, auto_increment: true }
//!       - { name: dept_id, type: integer }
//!     primary_key: [id]
//!     foreign_keys:
//!       - columns: [dept_id]
//!         references: { table: dept, columns: [id] }
//! ```
//!
//! Unqualified foreign key targets resolve in the schema of the referencing
//! table.

use crate::name::Name;
use crate::schema::{ColumnDefinition, SchemaError, Table, TableCollection};
use crate::traits::SchemaProvider;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A unique constraint entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UniqueDefinition {
    /// Constraint name; derived from table and columns when omitted
    #[serde(default)]
    pub name: Option<String>,

    /// Constrained columns
    pub columns: Vec<String>,
}

/// Target side of a foreign key entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceTarget {
    /// Referenced table, `schema.name` or `name`
    pub table: String,

    /// Referenced columns, aligned with the source columns
    pub columns: Vec<String>,
}

/// A foreign key entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForeignKeyDefinition {
    /// Referencing columns
    pub columns: Vec<String>,

    /// Referenced table and columns
    pub references: ReferenceTarget,
}

/// A table entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableDefinition {
    /// Table schema
    #[serde(default)]
    pub schema: Option<String>,

    /// Table name
    pub name: String,

    /// Columns in table order
    pub columns: Vec<ColumnDefinition>,

    /// Primary key columns, treated as a unique constraint
    #[serde(default)]
    pub primary_key: Vec<String>,

    /// Additional unique constraints
    #[serde(default)]
    pub unique: Vec<UniqueDefinition>,

    /// Foreign keys
    #[serde(default)]
    pub foreign_keys: Vec<ForeignKeyDefinition>,
}

impl TableDefinition {
    fn table_name(&self) -> Name {
        Name::new(self.schema.clone(), self.name.as_str())
    }
}

/// A whole schema file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaFile {
    /// Table definitions
    pub tables: Vec<TableDefinition>,
}

impl SchemaFile {
    /// Load a schema file from disk.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SchemaError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse a schema from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, SchemaError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Build a validated [`TableCollection`].
    ///
    /// Tables and their own constraints are created first so that foreign
    /// keys may point at tables declared later in the file.
    pub fn to_collection(&self) -> Result<TableCollection, SchemaError> {
        let mut tables = TableCollection::new();

        for definition in &self.tables {
            let table = tables.add_table(Table::new(definition.table_name()))?;

            for column in &definition.columns {
                table.add_column(column.clone())?;
            }

            if !definition.primary_key.is_empty() {
                let columns: Vec<&str> =
                    definition.primary_key.iter().map(String::as_str).collect();
                table.add_unique_constraint(format!("{}_pkey", definition.name), &columns)?;
            }

            for unique in &definition.unique {
                let columns: Vec<&str> = unique.columns.iter().map(String::as_str).collect();
                let name = unique
                    .name
                    .clone()
                    .unwrap_or_else(|| format!("{}_{}_key", definition.name, columns.join("_")));
                table.add_unique_constraint(name, &columns)?;
            }
        }

        for definition in &self.tables {
            let source = definition.table_name();
            for foreign_key in &definition.foreign_keys {
                if foreign_key.columns.len() != foreign_key.references.columns.len() {
                    return Err(SchemaError::InvalidReference {
                        table: source,
                        reason: format!(
                            "{} source columns but {} target columns",
                            foreign_key.columns.len(),
                            foreign_key.references.columns.len()
                        ),
                    });
                }

                let mut target = Name::parse(&foreign_key.references.table);
                if target.schema.is_none() {
                    target.schema = definition.schema.clone();
                }

                let pairs: Vec<(&str, &str)> = foreign_key
                    .columns
                    .iter()
                    .zip(&foreign_key.references.columns)
                    .map(|(s, t)| (s.as_str(), t.as_str()))
                    .collect();
                tables.add_foreign_key(&source, &target, &pairs)?;
            }
        }

        Ok(tables)
    }
}

impl SchemaProvider for SchemaFile {
    fn load_tables(&self) -> anyhow::Result<TableCollection> {
        Ok(self.to_collection()?)
    }
}
