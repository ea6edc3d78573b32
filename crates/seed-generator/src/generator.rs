//! Row synthesis for batches.

use crate::batch::{Batch, BatchState};
use crate::error::GeneratorError;
use crate::generators::GeneratorRegistry;
use crate::plan::ColumnPlan;
use rand::rngs::StdRng;
use rand::SeedableRng;
use seed_core::{RowSource, TableCollection};
use tracing::{debug, warn};

/// Default number of rejected candidate rows after which a batch is given up.
///
/// A safety bound against constraints that cannot be satisfied (a boolean
/// primary key holds at most two rows), not a correctness guarantee.
pub const MAX_DISCARDED_ROWS: usize = 10_000;

/// Fills batches with random rows that satisfy their unique constraints.
///
/// The random source is owned by the generator and handed to every value
/// generator explicitly, so two generators built with the same seed produce
/// the same rows for the same schema and data.
#[derive(Debug)]
pub struct DataGenerator {
    rng: StdRng,
    max_discarded_rows: usize,
    registry: GeneratorRegistry,
}

impl DataGenerator {
    /// Generator seeded with `seed`.
    pub fn new(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    /// Generator seeded from operating system entropy.
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Generator using the given random source.
    pub fn with_rng(rng: StdRng) -> Self {
        Self {
            rng,
            max_discarded_rows: MAX_DISCARDED_ROWS,
            registry: GeneratorRegistry::default(),
        }
    }

    /// Set the discard budget per batch.
    pub fn with_max_discarded_rows(mut self, max_discarded_rows: usize) -> Self {
        self.max_discarded_rows = max_discarded_rows;
        self
    }

    /// Replace the type-to-generator registry.
    pub fn with_registry(mut self, registry: GeneratorRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn max_discarded_rows(&self) -> usize {
        self.max_discarded_rows
    }

    pub fn registry(&self) -> &GeneratorRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut GeneratorRegistry {
        &mut self.registry
    }

    /// Generate rows into `batch` until it is full or the discard budget is
    /// spent.
    ///
    /// Running out of budget is not an error: the batch ends up
    /// [`BatchState::Exhausted`] with fewer rows than requested, and a
    /// warning is logged.
    pub fn prepare<S>(
        &mut self,
        batch: &mut Batch<'_>,
        tables: &TableCollection,
        source: &S,
    ) -> Result<BatchState, GeneratorError>
    where
        S: RowSource + ?Sized,
    {
        let table = batch.table();
        let plan = ColumnPlan::resolve(table, batch.slots(), tables, source, &self.registry)?;
        debug!("Column plan for {}: {}", table.name(), plan);

        while !batch.is_ready() && batch.discarded() < self.max_discarded_rows {
            let row = plan.generate_row(&mut self.rng)?;
            batch.add_row(row);
        }

        if !batch.is_ready() {
            batch.mark_exhausted();
            warn!(
                "Caller requested {} rows to be generated for {}, but could only produce {} rows \
                 satisfying unique constraints. (Discarded {} random rows.)",
                batch.requested_size(),
                table.name(),
                batch.current_size(),
                batch.discarded()
            );
        } else {
            debug!(
                "Generated {} rows for {} ({} discarded)",
                batch.current_size(),
                table.name(),
                batch.discarded()
            );
        }

        Ok(batch.state())
    }
}
