//! End-to-end population through the rowseed facade.

use rowseed::schema::ColumnId;
use rowseed::{
    ColumnDefinition, CustomValueGenerator, DataType, InsertMode, MemoryDatabase, Name,
    PopulateConfig, PopulateError, Populator, Row, RowSink, RowSource, SchemaFile,
    SchemaProvider, Table, TableCollection, Value,
};
use std::collections::HashSet;
use std::fs;

const SHOP: &str = r#"
tables:
  - schema: app
    name: customer
    columns:
      - { name: id, type: integer, auto_increment: true }
      - { name: email, type: varchar, size: 30 }
      - { name: vip, type: boolean }
    primary_key: [id]
    unique:
      - columns: [email]
  - schema: app
    name: orders
    columns:
      - { name: id, type: integer, auto_increment: true }
      - { name: customer_id, type: integer }
      - { name: note, type: text, size: 50, nullable: true }
    primary_key: [id]
    foreign_keys:
      - columns: [customer_id]
        references: { table: customer, columns: [id] }
"#;

fn init_logging() {
    rowseed::logging::init_test_tracing("seed_populate=debug,seed_generator=debug");
}

/// Delegates to a [`MemoryDatabase`] and records every insert call.
struct RecordingDatabase {
    inner: MemoryDatabase,
    inserts: Vec<(Name, usize, InsertMode)>,
}

impl SchemaProvider for RecordingDatabase {
    fn load_tables(&self) -> anyhow::Result<TableCollection> {
        self.inner.load_tables()
    }
}

impl RowSource for RecordingDatabase {
    fn select_all(&self, table: &Table, columns: &[ColumnId]) -> anyhow::Result<Vec<Row>> {
        self.inner.select_all(table, columns)
    }
}

impl RowSink for RecordingDatabase {
    fn insert_rows(
        &mut self,
        table: &Table,
        columns: &[ColumnId],
        rows: &[Row],
        mode: InsertMode,
    ) -> anyhow::Result<u64> {
        self.inserts.push((table.name().clone(), rows.len(), mode));
        self.inner.insert_rows(table, columns, rows, mode)
    }
}

/// Knows the schema but cannot read or write.
struct Unreachable(TableCollection);

impl SchemaProvider for Unreachable {
    fn load_tables(&self) -> anyhow::Result<TableCollection> {
        Ok(self.0.clone())
    }
}

impl RowSource for Unreachable {
    fn select_all(&self, table: &Table, _columns: &[ColumnId]) -> anyhow::Result<Vec<Row>> {
        anyhow::bail!("connection refused while reading {}", table.name())
    }
}

impl RowSink for Unreachable {
    fn insert_rows(
        &mut self,
        _table: &Table,
        _columns: &[ColumnId],
        _rows: &[Row],
        _mode: InsertMode,
    ) -> anyhow::Result<u64> {
        anyhow::bail!("connection refused")
    }
}

#[test]
fn test_populate_from_schema_and_config_files() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let schema_path = dir.path().join("schema.yaml");
    let config_path = dir.path().join("config.yaml");
    fs::write(&schema_path, SHOP).unwrap();
    fs::write(
        &config_path,
        "seed: 7\ndefault_schema: app\nmax_string_length: 12\n",
    )
    .unwrap();

    let schema = SchemaFile::from_file(&schema_path).unwrap();
    let config = PopulateConfig::from_file(&config_path).unwrap();
    let db = MemoryDatabase::from_schema_file(&schema).unwrap();
    let mut populator = Populator::with_config(db, config).unwrap();

    assert_eq!(populator.populate("customer", 20).unwrap(), 20);
    assert_eq!(populator.populate("orders", 200).unwrap(), 200);

    let db = populator.database();
    let customer = Name::parse("app.customer");
    let orders = Name::parse("app.orders");

    let emails: HashSet<String> = db
        .column_values(&customer, "email")
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect();
    assert_eq!(emails.len(), 20);
    assert!(emails.iter().all(|e| e.len() < 12));

    let ids: HashSet<i64> = db
        .column_values(&customer, "id")
        .unwrap()
        .iter()
        .map(|v| v.as_i64().unwrap())
        .collect();
    let referenced: HashSet<i64> = db
        .column_values(&orders, "customer_id")
        .unwrap()
        .iter()
        .map(|v| v.as_i64().unwrap())
        .collect();
    assert!(referenced.is_subset(&ids));
}

#[test]
fn test_insert_mode_reaches_the_sink() {
    init_logging();
    let db = RecordingDatabase {
        inner: MemoryDatabase::from_yaml(SHOP).unwrap(),
        inserts: Vec::new(),
    };
    let config = PopulateConfig::default()
        .with_seed(3)
        .with_default_schema("app");
    let mut populator = Populator::with_config(db, config).unwrap();

    populator.populate("customer", 5).unwrap();
    populator.set_batch_mode(false);
    populator.populate("orders", 8).unwrap();

    let inserts = &populator.database().inserts;
    assert_eq!(inserts.len(), 2);
    assert_eq!(inserts[0], (Name::parse("app.customer"), 5, InsertMode::Batch));
    assert_eq!(inserts[1], (Name::parse("app.orders"), 8, InsertMode::PerRow));
}

#[test]
fn test_exhausted_table_inserts_partial_batch_once() {
    init_logging();
    let db = RecordingDatabase {
        inner: MemoryDatabase::from_yaml(SHOP).unwrap(),
        inserts: Vec::new(),
    };
    let mut populator = Populator::with_config(
        db,
        PopulateConfig::default()
            .with_seed(11)
            .with_default_schema("app")
            .with_max_discarded_rows(500),
    )
    .unwrap();

    // A constant email leaves room for a single customer.
    populator
        .register_generator_for_column(
            "customer",
            "email",
            CustomValueGenerator::new(|_| Value::from("same@example.com")),
        )
        .unwrap();
    let metrics = populator
        .populate_with_metrics(&Name::parse("app.customer"), 10)
        .unwrap();

    assert_eq!(metrics.rows_inserted, 1);
    assert_eq!(metrics.discarded, 500);
    assert!(metrics.is_partial());
    assert_eq!(populator.database().inserts.len(), 1);

    // Nothing left to generate: the sink is not called at all.
    let again = populator.populate("customer", 10).unwrap();
    assert_eq!(again, 0);
    assert_eq!(populator.database().inserts.len(), 1);
}

#[test]
fn test_collaborator_errors_pass_through() {
    init_logging();
    let mut tables = TableCollection::new();
    let t = tables.add_table(Table::new(Name::unqualified("t"))).unwrap();
    t.add_column(ColumnDefinition::new("n", DataType::Integer)).unwrap();

    let mut populator = Populator::new(Unreachable(tables));
    let err = populator.populate("t", 5).unwrap_err();

    assert!(err.is_collaborator());
    assert!(matches!(err, PopulateError::Collaborator(_)));
    assert!(err.to_string().contains("connection refused"));
}

#[test]
fn test_table_collection_as_schema_provider() {
    init_logging();
    let mut tables = TableCollection::new();
    let t = tables.add_table(Table::new(Name::unqualified("t"))).unwrap();
    t.add_column(ColumnDefinition::varchar("code", 4)).unwrap();
    t.add_unique_constraint("t_pkey", &["code"]).unwrap();

    let loaded = tables.load_tables().unwrap();
    assert_eq!(loaded.len(), 1);

    let db = MemoryDatabase::new(loaded);
    let mut populator =
        Populator::with_config(db, PopulateConfig::default().with_seed(5)).unwrap();
    assert_eq!(populator.populate("t", 30).unwrap(), 30);
}
