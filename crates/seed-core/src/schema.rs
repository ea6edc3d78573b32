//! In-memory schema model.
//!
//! ## Ownership
//!
//! A [`Table`] owns its columns in an arena; every other structure refers to a
//! column through its [`ColumnId`]. Foreign keys carry the [`Name`] of the
//! table on each side together with column ids valid in that table.
//!
//! ## Type Hierarchy
//!
//! - [`ColumnDefinition`] - declarative column metadata (also the YAML form)
//! - [`Column`] - a column attached to a table
//! - [`UniqueConstraint`] - uniqueness obligation over one or more columns
//! - [`Reference`] - foreign key from one table to another
//! - [`Table`] - columns, constraints, foreign keys and custom generators
//! - [`TableCollection`] - all tables of one generation session

use crate::custom::{CustomRowGenerator, CustomValueGenerator};
use crate::name::Name;
use crate::types::DataType;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// ============================================================================
// Error Types
// ============================================================================

/// Error type for schema operations.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// Error reading schema file
    #[error("Failed to read schema file: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing YAML
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Table not found in the collection
    #[error("Table not found: {0}")]
    TableNotFound(Name),

    /// Table added twice to the collection
    #[error("Table {0} already exists in the collection")]
    DuplicateTable(Name),

    /// Column not found in table
    #[error("Column '{column}' not found in table {table}")]
    ColumnNotFound { table: Name, column: String },

    /// Column added twice to a table
    #[error("Column '{column}' is already present in table {table}")]
    DuplicateColumn { table: Name, column: String },

    /// Unique constraint without a name or without columns
    #[error("Invalid unique constraint on {table}: {reason}")]
    InvalidConstraint { table: Name, reason: String },

    /// Malformed foreign key
    #[error("Invalid foreign key on {table}: {reason}")]
    InvalidReference { table: Name, reason: String },

    /// Custom generator registration overlapping an existing one
    #[error("Column '{column}' of table {table} already has a custom generator")]
    ConflictingGenerator { table: Name, column: String },
}

// ============================================================================
// Columns
// ============================================================================

/// Index of a column inside its owning table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColumnId(usize);

impl ColumnId {
    /// Position of the column in table order.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Declarative column metadata, as reported by a schema provider or written
/// in a schema file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ColumnDefinition {
    /// Column name
    pub name: String,

    /// Declared type
    #[serde(rename = "type")]
    pub data_type: DataType,

    /// Database-specific type name, defaults to the SQL spelling of `data_type`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,

    /// Whether this column is nullable
    #[serde(default)]
    pub nullable: bool,

    /// Declared size (maximum length for character types)
    #[serde(default)]
    pub size: u32,

    /// Digits after the decimal point for exact numerics
    #[serde(default)]
    pub decimal_digits: u32,

    /// Whether the database assigns the value itself
    #[serde(default)]
    pub auto_increment: bool,
}

impl ColumnDefinition {
    /// Create a new non-nullable column definition.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            type_name: None,
            nullable: false,
            size: 0,
            decimal_digits: 0,
            auto_increment: false,
        }
    }

    /// Shorthand for a `varchar(size)` column.
    pub fn varchar(name: impl Into<String>, size: u32) -> Self {
        Self::new(name, DataType::VarChar).with_size(size)
    }

    /// Shorthand for an auto-increment integer column (`serial`).
    pub fn serial(name: impl Into<String>) -> Self {
        Self::new(name, DataType::Integer).auto_increment()
    }

    /// Set the declared size.
    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    /// Set the database-specific type name.
    pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    /// Set the number of decimal digits.
    pub fn with_decimal_digits(mut self, digits: u32) -> Self {
        self.decimal_digits = digits;
        self
    }

    /// Mark the column nullable.
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Mark the column as assigned by the database.
    pub fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }
}

/// A column of a [`Table`].
#[derive(Debug, Clone)]
pub struct Column {
    id: ColumnId,
    table: Name,
    /// Column name
    pub name: String,
    /// Whether NULL is allowed
    pub nullable: bool,
    /// Declared type
    pub data_type: DataType,
    /// Database-specific type name
    pub type_name: String,
    /// Declared size
    pub size: u32,
    /// Digits after the decimal point
    pub decimal_digits: u32,
    /// Whether the database assigns the value itself
    pub auto_increment: bool,
    unique: bool,
    generator: Option<CustomValueGenerator>,
}

impl Column {
    /// Id of this column within its table.
    pub fn id(&self) -> ColumnId {
        self.id
    }

    /// Name of the owning table.
    pub fn table(&self) -> &Name {
        &self.table
    }

    /// Whether a single-column unique constraint covers this column.
    pub fn is_unique(&self) -> bool {
        self.unique
    }

    /// Explicitly registered generator, if any.
    pub fn generator(&self) -> Option<&CustomValueGenerator> {
        self.generator.as_ref()
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.table, self.name)
    }
}

// ============================================================================
// Constraints
// ============================================================================

/// A unique constraint over one or more columns of a table.
#[derive(Debug, Clone, PartialEq)]
pub struct UniqueConstraint {
    name: String,
    columns: Vec<ColumnId>,
}

impl UniqueConstraint {
    /// Constraint name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Constrained columns, in declaration order.
    pub fn columns(&self) -> &[ColumnId] {
        &self.columns
    }
}

/// A foreign key: source columns of one table paired with target columns of
/// another (or the same) table.
#[derive(Debug, Clone)]
pub struct Reference {
    source_table: Name,
    source_columns: Vec<ColumnId>,
    target_table: Name,
    target_columns: Vec<ColumnId>,
    source_names: Vec<String>,
    target_names: Vec<String>,
}

impl Reference {
    /// Start building a reference from `source` to `target`.
    pub fn builder<'a>(source: &'a Table, target: &'a Table) -> ReferenceBuilder<'a> {
        ReferenceBuilder {
            source,
            target,
            pairs: Vec::new(),
        }
    }

    /// Number of column pairs.
    pub fn column_count(&self) -> usize {
        self.source_columns.len()
    }

    /// Table holding the foreign key.
    pub fn source_table(&self) -> &Name {
        &self.source_table
    }

    /// Referencing columns.
    pub fn source_columns(&self) -> &[ColumnId] {
        &self.source_columns
    }

    /// Referenced table.
    pub fn target_table(&self) -> &Name {
        &self.target_table
    }

    /// Referenced columns, pairwise aligned with `source_columns`.
    pub fn target_columns(&self) -> &[ColumnId] {
        &self.target_columns
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) references {} ({})",
            self.source_table,
            self.source_names.join(","),
            self.target_table,
            self.target_names.join(",")
        )
    }
}

/// Builder for composite foreign keys.
pub struct ReferenceBuilder<'a> {
    source: &'a Table,
    target: &'a Table,
    pairs: Vec<(ColumnId, ColumnId)>,
}

impl ReferenceBuilder<'_> {
    /// Add a `(source column, target column)` pair.
    pub fn column(mut self, source: &str, target: &str) -> Result<Self, SchemaError> {
        let source_id = self.source.column_id(source)?;
        let target_id = self.target.column_id(target)?;
        self.pairs.push((source_id, target_id));
        Ok(self)
    }

    /// Finish the reference.
    pub fn build(self) -> Result<Reference, SchemaError> {
        if self.pairs.is_empty() {
            return Err(SchemaError::InvalidReference {
                table: self.source.name.clone(),
                reason: "no columns".to_string(),
            });
        }

        let (source_columns, target_columns): (Vec<_>, Vec<_>) =
            self.pairs.iter().copied().unzip();

        Ok(Reference {
            source_table: self.source.name.clone(),
            source_names: source_columns
                .iter()
                .map(|id| self.source.column(*id).name.clone())
                .collect(),
            target_names: target_columns
                .iter()
                .map(|id| self.target.column(*id).name.clone())
                .collect(),
            source_columns,
            target_table: self.target.name.clone(),
            target_columns,
        })
    }
}

/// A custom generator registered for a set of columns.
#[derive(Debug, Clone)]
pub struct ColumnSetRegistration {
    /// Columns the generator produces, in output order
    pub columns: Vec<ColumnId>,
    /// The generator itself
    pub generator: CustomRowGenerator,
}

// ============================================================================
// Tables
// ============================================================================

/// A table: ordered columns plus the constraints relevant to generation.
#[derive(Debug, Clone)]
pub struct Table {
    name: Name,
    columns: Vec<Column>,
    unique_constraints: Vec<UniqueConstraint>,
    foreign_keys: Vec<Reference>,
    generators: Vec<ColumnSetRegistration>,
}

impl Table {
    /// Create an empty table.
    pub fn new(name: Name) -> Self {
        Self {
            name,
            columns: Vec::new(),
            unique_constraints: Vec::new(),
            foreign_keys: Vec::new(),
            generators: Vec::new(),
        }
    }

    /// Table name.
    pub fn name(&self) -> &Name {
        &self.name
    }

    /// Append a column. Column names are unique ignoring case.
    pub fn add_column(&mut self, definition: ColumnDefinition) -> Result<ColumnId, SchemaError> {
        if self.find_column(&definition.name).is_some() {
            return Err(SchemaError::DuplicateColumn {
                table: self.name.clone(),
                column: definition.name,
            });
        }

        let id = ColumnId(self.columns.len());
        let type_name = definition
            .type_name
            .unwrap_or_else(|| definition.data_type.sql_name().to_string());

        self.columns.push(Column {
            id,
            table: self.name.clone(),
            name: definition.name,
            nullable: definition.nullable,
            data_type: definition.data_type,
            type_name,
            size: definition.size,
            decimal_digits: definition.decimal_digits,
            auto_increment: definition.auto_increment,
            unique: false,
            generator: None,
        });

        Ok(id)
    }

    /// All columns in discovery order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column by id.
    ///
    /// Ids are only meaningful for the table that issued them.
    pub fn column(&self, id: ColumnId) -> &Column {
        &self.columns[id.0]
    }

    /// Look up a column by name, ignoring case.
    pub fn find_column(&self, name: &str) -> Option<&Column> {
        self.columns
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// Look up a column by name, failing if it does not exist.
    pub fn get_column(&self, name: &str) -> Result<&Column, SchemaError> {
        self.find_column(name)
            .ok_or_else(|| SchemaError::ColumnNotFound {
                table: self.name.clone(),
                column: name.to_string(),
            })
    }

    /// Id of the named column.
    pub fn column_id(&self, name: &str) -> Result<ColumnId, SchemaError> {
        self.get_column(name).map(Column::id)
    }

    /// Columns the generator has to fill in (everything but auto-increment).
    pub fn non_auto_increment_columns(&self) -> Vec<ColumnId> {
        self.columns
            .iter()
            .filter(|c| !c.auto_increment)
            .map(Column::id)
            .collect()
    }

    /// Add a unique constraint over the named columns.
    pub fn add_unique_constraint(
        &mut self,
        name: impl Into<String>,
        columns: &[&str],
    ) -> Result<(), SchemaError> {
        let name = name.into();
        if name.is_empty() {
            return Err(SchemaError::InvalidConstraint {
                table: self.name.clone(),
                reason: "empty name".to_string(),
            });
        }
        if columns.is_empty() {
            return Err(SchemaError::InvalidConstraint {
                table: self.name.clone(),
                reason: format!("constraint {name} has no columns"),
            });
        }

        let ids = columns
            .iter()
            .map(|c| self.column_id(c))
            .collect::<Result<Vec<_>, _>>()?;

        if let [single] = ids.as_slice() {
            self.columns[single.0].unique = true;
        }

        self.unique_constraints.push(UniqueConstraint { name, columns: ids });
        Ok(())
    }

    /// Unique constraints in declaration order.
    pub fn unique_constraints(&self) -> &[UniqueConstraint] {
        &self.unique_constraints
    }

    /// Add a foreign key whose source side is this table.
    pub fn add_foreign_key(&mut self, reference: Reference) -> Result<(), SchemaError> {
        if reference.source_table != self.name {
            return Err(SchemaError::InvalidReference {
                table: self.name.clone(),
                reason: format!("reference {reference} does not originate from this table"),
            });
        }
        if reference.source_columns.len() != reference.target_columns.len() {
            return Err(SchemaError::InvalidReference {
                table: self.name.clone(),
                reason: format!("reference {reference} has mismatched arity"),
            });
        }
        self.foreign_keys.push(reference);
        Ok(())
    }

    /// Foreign keys in declaration order.
    pub fn foreign_keys(&self) -> &[Reference] {
        &self.foreign_keys
    }

    /// Foreign keys having `column` among their source columns.
    pub fn references_from(&self, column: ColumnId) -> impl Iterator<Item = &Reference> + '_ {
        self.foreign_keys
            .iter()
            .filter(move |r| r.source_columns.contains(&column))
    }

    /// Register a custom generator for a single column.
    ///
    /// Replaces an earlier single-column registration for the same column.
    pub fn register_column_generator(
        &mut self,
        column: &str,
        generator: CustomValueGenerator,
    ) -> Result<(), SchemaError> {
        let id = self.column_id(column)?;
        if self.generators.iter().any(|g| g.columns.contains(&id)) {
            return Err(SchemaError::ConflictingGenerator {
                table: self.name.clone(),
                column: self.columns[id.0].name.clone(),
            });
        }
        self.columns[id.0].generator = Some(generator);
        Ok(())
    }

    /// Register a custom generator producing several columns at once.
    ///
    /// Registering the exact same column list again replaces the earlier
    /// generator; any other overlap is a conflict.
    pub fn register_generator(
        &mut self,
        columns: &[&str],
        generator: CustomRowGenerator,
    ) -> Result<(), SchemaError> {
        if columns.is_empty() {
            return Err(SchemaError::InvalidConstraint {
                table: self.name.clone(),
                reason: "custom generator registered for no columns".to_string(),
            });
        }

        let ids = columns
            .iter()
            .map(|c| self.column_id(c))
            .collect::<Result<Vec<_>, _>>()?;

        for (i, id) in ids.iter().enumerate() {
            if ids[..i].contains(id) {
                return Err(SchemaError::InvalidConstraint {
                    table: self.name.clone(),
                    reason: format!(
                        "column '{}' listed twice for one generator",
                        self.columns[id.0].name
                    ),
                });
            }
        }

        if let Some(existing) = self.generators.iter_mut().find(|g| g.columns == ids) {
            existing.generator = generator;
            return Ok(());
        }

        let overlapping = ids.iter().find(|id| {
            self.columns[id.0].generator.is_some()
                || self.generators.iter().any(|g| g.columns.contains(id))
        });
        if let Some(id) = overlapping {
            return Err(SchemaError::ConflictingGenerator {
                table: self.name.clone(),
                column: self.columns[id.0].name.clone(),
            });
        }

        self.generators.push(ColumnSetRegistration {
            columns: ids,
            generator,
        });
        Ok(())
    }

    /// Custom multi-column generators in registration order.
    pub fn generators(&self) -> &[ColumnSetRegistration] {
        &self.generators
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Table {}", self.name)
    }
}

// ============================================================================
// Table Collection
// ============================================================================

/// All tables known to one generation session.
///
/// Not necessarily a single database schema: it may hold tables from several
/// schemas, or only a subset of one.
#[derive(Debug, Clone, Default)]
pub struct TableCollection {
    tables: Vec<Table>,
    table_map: HashMap<Name, usize>,
}

impl TableCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a table, failing if one with the same name exists.
    pub fn add_table(&mut self, table: Table) -> Result<&mut Table, SchemaError> {
        if self.table_map.contains_key(table.name()) {
            return Err(SchemaError::DuplicateTable(table.name.clone()));
        }
        let idx = self.tables.len();
        self.table_map.insert(table.name.clone(), idx);
        self.tables.push(table);
        Ok(&mut self.tables[idx])
    }

    /// Look up a table.
    pub fn find_table(&self, name: &Name) -> Option<&Table> {
        self.table_map.get(name).map(|&idx| &self.tables[idx])
    }

    /// Look up a table, failing with [`SchemaError::TableNotFound`].
    pub fn get_table(&self, name: &Name) -> Result<&Table, SchemaError> {
        self.find_table(name)
            .ok_or_else(|| SchemaError::TableNotFound(name.clone()))
    }

    /// Mutable lookup, failing with [`SchemaError::TableNotFound`].
    pub fn get_table_mut(&mut self, name: &Name) -> Result<&mut Table, SchemaError> {
        match self.table_map.get(name) {
            Some(&idx) => Ok(&mut self.tables[idx]),
            None => Err(SchemaError::TableNotFound(name.clone())),
        }
    }

    /// Declare a foreign key from `source` to `target` over the given
    /// `(source column, target column)` pairs.
    pub fn add_foreign_key(
        &mut self,
        source: &Name,
        target: &Name,
        pairs: &[(&str, &str)],
    ) -> Result<(), SchemaError> {
        let reference = {
            let source_table = self.get_table(source)?;
            let target_table = self.get_table(target)?;
            let mut builder = Reference::builder(source_table, target_table);
            for (source_column, target_column) in pairs {
                builder = builder.column(source_column, target_column)?;
            }
            builder.build()?
        };
        self.get_table_mut(source)?.add_foreign_key(reference)
    }

    /// Iterate over the tables in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Table> {
        self.tables.iter()
    }

    /// Names of all tables in insertion order.
    pub fn table_names(&self) -> Vec<&Name> {
        self.tables.iter().map(Table::name).collect()
    }

    /// Number of tables.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values::Value;

    fn foo() -> Table {
        Table::new(Name::unqualified("foo"))
    }

    #[test]
    fn test_column_lookup() {
        let mut table = foo();
        let id = table.add_column(ColumnDefinition::varchar("bar", 10)).unwrap();

        assert_eq!(table.get_column("bar").unwrap().id(), id);
        assert_eq!(table.column(id).name, "bar");
        assert_eq!(table.column(id).type_name, "varchar");
        assert_eq!(table.column(id).table(), &Name::unqualified("foo"));
    }

    #[test]
    fn test_column_lookup_is_case_insensitive() {
        let mut table = foo();
        let id = table.add_column(ColumnDefinition::varchar("bar", 10)).unwrap();

        assert_eq!(table.column_id("BAR").unwrap(), id);
    }

    #[test]
    fn test_column_lookup_for_nonexistent_column_fails() {
        let table = foo();
        assert!(matches!(
            table.get_column("bar"),
            Err(SchemaError::ColumnNotFound { .. })
        ));
    }

    #[test]
    fn test_cant_add_same_column_twice() {
        let mut table = foo();
        table.add_column(ColumnDefinition::varchar("foo", 1)).unwrap();
        let result = table.add_column(ColumnDefinition::new("FOO", DataType::Integer));
        assert!(matches!(result, Err(SchemaError::DuplicateColumn { .. })));
    }

    #[test]
    fn test_adding_unique_constraints() {
        let mut table = foo();
        let c1 = table.add_column(ColumnDefinition::varchar("column1", 5)).unwrap();
        let c2 = table.add_column(ColumnDefinition::varchar("column2", 5)).unwrap();

        table
            .add_unique_constraint("my-constraint", &["column1", "column2"])
            .unwrap();

        assert_eq!(table.unique_constraints().len(), 1);
        assert_eq!(table.unique_constraints()[0].name(), "my-constraint");
        assert_eq!(table.unique_constraints()[0].columns(), &[c1, c2]);

        // Composite constraints do not make individual columns unique
        assert!(!table.column(c1).is_unique());
    }

    #[test]
    fn test_single_column_constraint_marks_column_unique() {
        let mut table = foo();
        let id = table.add_column(ColumnDefinition::varchar("name", 5)).unwrap();
        table.add_unique_constraint("foo_pkey", &["name"]).unwrap();
        assert!(table.column(id).is_unique());
    }

    #[test]
    fn test_invalid_unique_constraints() {
        let mut table = foo();
        table.add_column(ColumnDefinition::varchar("a", 5)).unwrap();

        assert!(table.add_unique_constraint("", &["a"]).is_err());
        assert!(table.add_unique_constraint("k", &[]).is_err());
        assert!(table.add_unique_constraint("k", &["missing"]).is_err());
    }

    #[test]
    fn test_non_auto_increment_columns() {
        let mut table = foo();
        table.add_column(ColumnDefinition::serial("id")).unwrap();
        let name = table.add_column(ColumnDefinition::varchar("name", 5)).unwrap();

        assert_eq!(table.non_auto_increment_columns(), vec![name]);
    }

    #[test]
    fn test_collection_rejects_duplicates_and_unknown_tables() {
        let mut tables = TableCollection::new();
        tables.add_table(foo()).unwrap();

        assert!(matches!(
            tables.add_table(Table::new(Name::unqualified("FOO"))),
            Err(SchemaError::DuplicateTable(_))
        ));
        assert!(matches!(
            tables.get_table(&Name::unqualified("bar")),
            Err(SchemaError::TableNotFound(_))
        ));
        assert_eq!(tables.len(), 1);
    }

    #[test]
    fn test_composite_foreign_key() {
        let mut tables = TableCollection::new();
        let parent = tables.add_table(Table::new(Name::unqualified("parent"))).unwrap();
        parent.add_column(ColumnDefinition::new("x", DataType::Integer)).unwrap();
        parent.add_column(ColumnDefinition::new("y", DataType::Integer)).unwrap();

        let child = tables.add_table(Table::new(Name::unqualified("child"))).unwrap();
        child.add_column(ColumnDefinition::serial("id")).unwrap();
        child.add_column(ColumnDefinition::new("parent_x", DataType::Integer)).unwrap();
        child.add_column(ColumnDefinition::new("parent_y", DataType::Integer)).unwrap();

        tables
            .add_foreign_key(
                &Name::unqualified("child"),
                &Name::unqualified("parent"),
                &[("parent_x", "x"), ("parent_y", "y")],
            )
            .unwrap();

        let child = tables.get_table(&Name::unqualified("child")).unwrap();
        let reference = &child.foreign_keys()[0];
        assert_eq!(reference.column_count(), 2);
        assert_eq!(reference.target_table(), &Name::unqualified("parent"));
        assert_eq!(
            reference.to_string(),
            "child (parent_x,parent_y) references parent (x,y)"
        );

        let parent_x = child.column_id("parent_x").unwrap();
        assert_eq!(child.references_from(parent_x).count(), 1);
        let id = child.column_id("id").unwrap();
        assert_eq!(child.references_from(id).count(), 0);
    }

    #[test]
    fn test_empty_reference_is_rejected() {
        let table = foo();
        let result = Reference::builder(&table, &table).build();
        assert!(matches!(result, Err(SchemaError::InvalidReference { .. })));
    }

    #[test]
    fn test_reference_from_other_table_is_rejected() {
        let mut a = Table::new(Name::unqualified("a"));
        a.add_column(ColumnDefinition::new("x", DataType::Integer)).unwrap();
        let mut b = Table::new(Name::unqualified("b"));
        b.add_column(ColumnDefinition::new("y", DataType::Integer)).unwrap();

        let reference = Reference::builder(&a, &b).column("x", "y").unwrap().build().unwrap();
        assert!(b.add_foreign_key(reference).is_err());
    }

    #[test]
    fn test_generator_registration_conflicts() {
        let mut table = foo();
        table.add_column(ColumnDefinition::new("a", DataType::Integer)).unwrap();
        table.add_column(ColumnDefinition::new("b", DataType::Integer)).unwrap();
        table.add_column(ColumnDefinition::new("c", DataType::Integer)).unwrap();

        let pair = CustomRowGenerator::new(|_| vec![Value::Int32(1), Value::Int32(2)]);
        table.register_generator(&["a", "b"], pair.clone()).unwrap();

        // Same column list replaces
        table.register_generator(&["a", "b"], pair.clone()).unwrap();
        assert_eq!(table.generators().len(), 1);

        // Overlap is a conflict
        assert!(matches!(
            table.register_generator(&["b", "c"], pair.clone()),
            Err(SchemaError::ConflictingGenerator { .. })
        ));
        assert!(matches!(
            table.register_column_generator("a", CustomValueGenerator::new(|_| Value::Null)),
            Err(SchemaError::ConflictingGenerator { .. })
        ));

        // Duplicate column within one registration
        assert!(table.register_generator(&["c", "C"], pair).is_err());

        table
            .register_column_generator("c", CustomValueGenerator::new(|_| Value::Int32(3)))
            .unwrap();
        let c = table.column_id("c").unwrap();
        assert!(table.column(c).generator().is_some());
    }
}
