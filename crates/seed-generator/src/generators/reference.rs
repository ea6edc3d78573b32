//! Foreign key values.

use crate::error::GeneratorError;
use rand::{Rng, RngCore};
use seed_core::{Reference, Row, RowSource, TableCollection, Value};

/// Generator for the source columns of one foreign key.
///
/// All target tuples are read once, when the generator is built. Every draw
/// picks one tuple uniformly at random, with replacement, and writes all of
/// its values at once, so a composite key always names an existing parent.
/// Rows added to the target table afterwards are not seen.
#[derive(Debug, Clone)]
pub struct ReferenceGenerator {
    reference: String,
    slots: Vec<usize>,
    values: Vec<Row>,
}

impl ReferenceGenerator {
    /// Snapshot the target values of `reference`.
    ///
    /// `slots[i]` is the row buffer position of the reference's i-th source
    /// column. Fails with [`GeneratorError::EmptyReferencedTable`] when the
    /// target table has no rows.
    pub fn new<S>(
        reference: &Reference,
        slots: Vec<usize>,
        tables: &TableCollection,
        source: &S,
    ) -> Result<Self, GeneratorError>
    where
        S: RowSource + ?Sized,
    {
        let target = tables.get_table(reference.target_table())?;
        let values = source.select_all(target, reference.target_columns())?;

        if values.is_empty() {
            return Err(GeneratorError::EmptyReferencedTable {
                reference: reference.to_string(),
                target: target.name().clone(),
            });
        }

        let expected = reference.column_count();
        if let Some(row) = values.iter().find(|row| row.len() != expected) {
            return Err(GeneratorError::ArityMismatch {
                columns: reference.to_string(),
                expected,
                actual: row.len(),
            });
        }

        Ok(Self {
            reference: reference.to_string(),
            slots,
            values,
        })
    }

    /// Display form of the foreign key.
    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// Row buffer positions written by this generator.
    pub fn slots(&self) -> &[usize] {
        &self.slots
    }

    /// Number of parent tuples in the snapshot.
    pub fn pool_size(&self) -> usize {
        self.values.len()
    }

    /// Pick a parent tuple.
    pub fn random_values(&self, rng: &mut dyn RngCore) -> &[Value] {
        let idx = rng.random_range(0..self.values.len());
        &self.values[idx]
    }

    /// Write a random parent tuple into `row`.
    pub fn fill(&self, rng: &mut dyn RngCore, row: &mut [Value]) {
        let values = self.random_values(rng);
        for (&slot, value) in self.slots.iter().zip(values) {
            row[slot] = value.clone();
        }
    }
}
