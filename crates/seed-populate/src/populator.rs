//! Populator that generates and inserts test data.

use crate::config::PopulateConfig;
use crate::error::PopulateError;
use crate::metrics::PopulateMetrics;
use seed_core::{
    CustomRowGenerator, CustomValueGenerator, DataType, Name, RowSink, SchemaProvider,
    TableCollection,
};
use seed_generator::{Batch, DataGenerator, GeneratorRegistry, ValueGenerator};
use std::time::Instant;
use tracing::{debug, info};

/// Fills tables with random rows that satisfy their constraints.
///
/// Table metadata is loaded from the database on first use and cached for
/// the lifetime of the populator. Custom generators are registered on that
/// cache, so they must be registered before the `populate` call they should
/// affect.
///
/// Parent tables must be populated before the tables referencing them:
/// foreign key columns only draw from rows that already exist.
///
/// # Example
///
/// ```rust
/// use seed_populate::{MemoryDatabase, PopulateConfig, Populator};
///
/// let db = MemoryDatabase::from_yaml(r#"
/// tables:
///   - name: foo
///     columns:
///       - { name: name, type: varchar, size: 10 }
///     primary_key: [name]
/// "#).unwrap();
///
/// let mut populator =
///     Populator::with_config(db, PopulateConfig::default().with_seed(42)).unwrap();
/// assert_eq!(populator.populate("foo", 50).unwrap(), 50);
/// ```
pub struct Populator<D> {
    db: D,
    config: PopulateConfig,
    generator: DataGenerator,
    tables: Option<TableCollection>,
}

impl<D> Populator<D>
where
    D: SchemaProvider + RowSink,
{
    /// Create a populator with the default configuration.
    pub fn new(db: D) -> Self {
        Self::build(db, PopulateConfig::default())
    }

    /// Create a populator with the given configuration.
    ///
    /// Fails with [`ConfigError::Invalid`](crate::ConfigError::Invalid) if
    /// the configuration is out of range.
    pub fn with_config(db: D, config: PopulateConfig) -> Result<Self, PopulateError> {
        config.validate()?;
        Ok(Self::build(db, config))
    }

    fn build(db: D, config: PopulateConfig) -> Self {
        let generator = match config.seed {
            Some(seed) => DataGenerator::new(seed),
            None => DataGenerator::from_entropy(),
        }
        .with_max_discarded_rows(config.max_discarded_rows)
        .with_registry(GeneratorRegistry::with_max_string_length(
            config.max_string_length,
        ));

        Self {
            db,
            config,
            generator,
            tables: None,
        }
    }

    pub fn config(&self) -> &PopulateConfig {
        &self.config
    }

    pub fn database(&self) -> &D {
        &self.db
    }

    pub fn database_mut(&mut self) -> &mut D {
        &mut self.db
    }

    pub fn into_database(self) -> D {
        self.db
    }

    pub fn is_batch_mode(&self) -> bool {
        self.config.batch_mode
    }

    pub fn set_batch_mode(&mut self, batch_mode: bool) {
        self.config.batch_mode = batch_mode;
    }

    /// Table metadata, loaded through the schema provider on first use.
    pub fn tables(&mut self) -> Result<&TableCollection, PopulateError> {
        Ok(cached_tables(&mut self.tables, &self.db)?)
    }

    /// Resolve a table name; names without a schema get the configured
    /// default schema.
    pub fn table_name(&self, table: &str) -> Name {
        let mut name = Name::parse(table);
        if name.schema.is_none() {
            name.schema = self.config.default_schema.clone();
        }
        name
    }

    /// Generate and insert up to `count` rows into `table`.
    ///
    /// Returns the number of rows inserted, which is less than `count` when
    /// unique constraints cannot accommodate more rows.
    pub fn populate(&mut self, table: &str, count: usize) -> Result<u64, PopulateError> {
        let name = self.table_name(table);
        self.populate_name(&name, count)
    }

    /// Like [`populate`](Self::populate), with an already resolved name.
    pub fn populate_name(&mut self, name: &Name, count: usize) -> Result<u64, PopulateError> {
        Ok(self.populate_with_metrics(name, count)?.rows_inserted)
    }

    /// Generate and insert up to `count` rows, reporting counters and
    /// timings.
    pub fn populate_with_metrics(
        &mut self,
        name: &Name,
        count: usize,
    ) -> Result<PopulateMetrics, PopulateError> {
        let start_time = Instant::now();
        let mode = self.config.insert_mode();

        let tables: &TableCollection = cached_tables(&mut self.tables, &self.db)?;
        let table = tables.get_table(name)?;

        info!("Populating table '{}' with {} rows", table.name(), count);

        let gen_start = Instant::now();
        let existing = self
            .db
            .select_all(table, &table.non_auto_increment_columns())?;
        let mut batch = Batch::new(table, existing, count);
        self.generator.prepare(&mut batch, tables, &self.db)?;
        let generation_duration = gen_start.elapsed();

        let discarded = batch.discarded() as u64;
        let columns = batch.columns().to_vec();
        let rows = batch.into_rows();

        let insert_start = Instant::now();
        let rows_inserted = if rows.is_empty() {
            debug!("Nothing to insert into {}", table.name());
            0
        } else {
            self.db.insert_rows(table, &columns, &rows, mode)?
        };
        let insert_duration = insert_start.elapsed();

        let metrics = PopulateMetrics {
            rows_requested: count as u64,
            rows_generated: rows.len() as u64,
            rows_inserted,
            discarded,
            generation_duration,
            insert_duration,
            total_duration: start_time.elapsed(),
        };

        info!(
            "Population complete: {} rows in {:?} ({:.2} rows/sec)",
            metrics.rows_inserted,
            metrics.total_duration,
            metrics.rows_per_second()
        );

        Ok(metrics)
    }

    /// Use `generator` for `column` of `table` instead of the default or
    /// foreign key generator.
    pub fn register_generator_for_column(
        &mut self,
        table: &str,
        column: &str,
        generator: CustomValueGenerator,
    ) -> Result<(), PopulateError> {
        let name = self.table_name(table);
        cached_tables(&mut self.tables, &self.db)?
            .get_table_mut(&name)?
            .register_column_generator(column, generator)?;
        debug!("Registered custom generator for {}.{}", name, column);
        Ok(())
    }

    /// Use `generator` to produce `columns` of `table` together, one value
    /// per column in the given order.
    pub fn register_generator_for_columns(
        &mut self,
        table: &str,
        columns: &[&str],
        generator: CustomRowGenerator,
    ) -> Result<(), PopulateError> {
        let name = self.table_name(table);
        cached_tables(&mut self.tables, &self.db)?
            .get_table_mut(&name)?
            .register_generator(columns, generator)?;
        debug!(
            "Registered custom generator for {} ({})",
            name,
            columns.join(",")
        );
        Ok(())
    }

    /// Use `generator` for every column of `data_type` without a more
    /// specific generator.
    pub fn register_type_generator<G>(&mut self, data_type: DataType, generator: G)
    where
        G: ValueGenerator + 'static,
    {
        self.generator.registry_mut().register(data_type, generator);
    }
}

fn cached_tables<'a, D>(
    cache: &'a mut Option<TableCollection>,
    db: &D,
) -> anyhow::Result<&'a mut TableCollection>
where
    D: SchemaProvider,
{
    let tables = match cache.take() {
        Some(tables) => tables,
        None => {
            let tables = db.load_tables()?;
            debug!("Loaded {} tables", tables.len());
            tables
        }
    };
    Ok(cache.insert(tables))
}
