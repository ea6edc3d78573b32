//! Column plans: which generator fills which column of a batch.
//!
//! A batch generates values for a fixed list of columns (every column the
//! database does not assign itself). [`ColumnSlots`] fixes the position of
//! each of those columns in the row buffer once, up front. [`ColumnPlan`]
//! then binds generators to slots:
//!
//! 1. custom multi-column generators, in registration order
//! 2. custom single-column generators
//! 3. foreign keys, each claimed as a unit
//! 4. the registry's default for the column's declared type
//!
//! Every slot ends up with exactly one generator. A foreign key is either
//! generated whole or left entirely to custom generators; custom generators
//! covering only part of a key fail with [`GeneratorError::SplitReference`].

use crate::error::GeneratorError;
use crate::generators::{GeneratorRegistry, ReferenceGenerator, ValueGenerator};
use rand::RngCore;
use seed_core::{
    Column, ColumnId, CustomRowGenerator, CustomValueGenerator, Reference, Row, RowSource, Table,
    TableCollection, Value,
};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Mapping from batch columns to row buffer positions.
///
/// Built once per batch and never changed afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSlots {
    columns: Vec<ColumnId>,
    slots: HashMap<ColumnId, usize>,
}

impl ColumnSlots {
    /// Slots for `columns`, in the given order.
    pub fn new(columns: Vec<ColumnId>) -> Self {
        let slots = columns
            .iter()
            .enumerate()
            .map(|(slot, &id)| (id, slot))
            .collect();
        Self { columns, slots }
    }

    /// Slots for every non-auto-increment column of `table`, in table order.
    pub fn for_table(table: &Table) -> Self {
        Self::new(table.non_auto_increment_columns())
    }

    /// Buffer position of `column`, if it is part of the batch.
    pub fn slot(&self, column: ColumnId) -> Option<usize> {
        self.slots.get(&column).copied()
    }

    /// Batch columns, indexed by slot.
    pub fn columns(&self) -> &[ColumnId] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Whether every one of `columns` is part of the batch.
    pub fn contains_all(&self, columns: &[ColumnId]) -> bool {
        columns.iter().all(|c| self.slots.contains_key(c))
    }

    /// Buffer positions of `columns`, or `None` if any is not in the batch.
    pub fn slots_for(&self, columns: &[ColumnId]) -> Option<Vec<usize>> {
        columns.iter().map(|&c| self.slot(c)).collect()
    }
}

/// What kind of generator fills a set of slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorKind {
    /// Caller-registered single-column generator
    Custom,
    /// Caller-registered multi-column generator
    CustomSet,
    /// Foreign key values
    Reference,
    /// Registry default for the declared type
    Default,
}

/// A generator bound to one or more slots of the row buffer.
#[derive(Debug)]
pub enum ColumnSetGenerator {
    Custom {
        slot: usize,
        generator: CustomValueGenerator,
    },
    CustomSet {
        slots: Vec<usize>,
        columns: String,
        generator: CustomRowGenerator,
    },
    Reference(ReferenceGenerator),
    Default {
        slot: usize,
        column: Column,
        generator: Arc<dyn ValueGenerator>,
    },
}

impl ColumnSetGenerator {
    pub fn kind(&self) -> GeneratorKind {
        match self {
            Self::Custom { .. } => GeneratorKind::Custom,
            Self::CustomSet { .. } => GeneratorKind::CustomSet,
            Self::Reference(_) => GeneratorKind::Reference,
            Self::Default { .. } => GeneratorKind::Default,
        }
    }

    /// Slots written by this generator.
    pub fn slots(&self) -> Vec<usize> {
        match self {
            Self::Custom { slot, .. } | Self::Default { slot, .. } => vec![*slot],
            Self::CustomSet { slots, .. } => slots.clone(),
            Self::Reference(generator) => generator.slots().to_vec(),
        }
    }

    /// Write this generator's values into `row`.
    pub fn fill(&self, rng: &mut dyn RngCore, row: &mut [Value]) -> Result<(), GeneratorError> {
        match self {
            Self::Custom { slot, generator } => {
                row[*slot] = generator.random_value(rng);
            }
            Self::CustomSet {
                slots,
                columns,
                generator,
            } => {
                let values = generator.random_values(rng);
                if values.len() != slots.len() {
                    return Err(GeneratorError::ArityMismatch {
                        columns: columns.clone(),
                        expected: slots.len(),
                        actual: values.len(),
                    });
                }
                for (&slot, value) in slots.iter().zip(values) {
                    row[slot] = value;
                }
            }
            Self::Reference(generator) => generator.fill(rng, row),
            Self::Default {
                slot,
                column,
                generator,
            } => {
                row[*slot] = generator.random_value(rng, column);
            }
        }
        Ok(())
    }
}

/// The generators for one batch, covering every slot exactly once.
#[derive(Debug)]
pub struct ColumnPlan {
    width: usize,
    generators: Vec<ColumnSetGenerator>,
}

impl ColumnPlan {
    /// Bind a generator to every slot of `slots`.
    ///
    /// Reference generators read their target tables through `source`
    /// while the plan is built.
    pub fn resolve<S>(
        table: &Table,
        slots: &ColumnSlots,
        tables: &TableCollection,
        source: &S,
        registry: &GeneratorRegistry,
    ) -> Result<Self, GeneratorError>
    where
        S: RowSource + ?Sized,
    {
        let mut work: Vec<(usize, ColumnId)> =
            slots.columns().iter().copied().enumerate().collect();
        let mut generators = Vec::new();

        for registration in table.generators() {
            let claimed: Vec<usize> = registration
                .columns
                .iter()
                .filter_map(|&id| take(&mut work, id))
                .collect();

            let columns = column_names(table, &registration.columns);
            if claimed.is_empty() {
                debug!(
                    "Skipping custom generator for {} ({}): none of its columns are generated",
                    table.name(),
                    columns
                );
                continue;
            }
            if claimed.len() != registration.columns.len() {
                return Err(GeneratorError::ConflictingGenerator {
                    table: table.name().clone(),
                    columns,
                });
            }

            generators.push(ColumnSetGenerator::CustomSet {
                slots: claimed,
                columns,
                generator: registration.generator.clone(),
            });
        }

        let mut remaining = Vec::with_capacity(work.len());
        for (slot, id) in work {
            match table.column(id).generator() {
                Some(generator) => generators.push(ColumnSetGenerator::Custom {
                    slot,
                    generator: generator.clone(),
                }),
                None => remaining.push((slot, id)),
            }
        }
        let mut work = remaining;
        check_references(table, &work)?;

        while let Some(reference) = next_reference(table, &work) {
            let claimed: Vec<usize> = reference
                .source_columns()
                .iter()
                .filter_map(|&id| take(&mut work, id))
                .collect();
            debug!("Using reference generator for {}", reference);
            generators.push(ColumnSetGenerator::Reference(ReferenceGenerator::new(
                reference, claimed, tables, source,
            )?));
        }

        for (slot, id) in work {
            let column = table.column(id);
            generators.push(ColumnSetGenerator::Default {
                slot,
                column: column.clone(),
                generator: registry.generator_for(column)?,
            });
        }

        Ok(Self {
            width: slots.len(),
            generators,
        })
    }

    /// Number of values in a generated row.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Bound generators, in resolution order.
    pub fn generators(&self) -> &[ColumnSetGenerator] {
        &self.generators
    }

    /// Generator kinds and their slots, in resolution order.
    pub fn layout(&self) -> Vec<(GeneratorKind, Vec<usize>)> {
        self.generators.iter().map(|g| (g.kind(), g.slots())).collect()
    }

    /// Generate one candidate row, indexed by slot.
    pub fn generate_row(&self, rng: &mut dyn RngCore) -> Result<Row, GeneratorError> {
        let mut row = vec![Value::Null; self.width];
        for generator in &self.generators {
            generator.fill(rng, &mut row)?;
        }
        Ok(row)
    }
}

impl fmt::Display for ColumnPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .layout()
            .into_iter()
            .map(|(kind, slots)| format!("{kind:?}{slots:?}"))
            .collect();
        write!(f, "{}", parts.join(" "))
    }
}

/// Remove `column` from the work list, returning its slot.
fn take(work: &mut Vec<(usize, ColumnId)>, column: ColumnId) -> Option<usize> {
    let idx = work.iter().position(|&(_, id)| id == column)?;
    Some(work.remove(idx).0)
}

/// Fail if a foreign key has some, but not all, source columns left in the
/// work list.
fn check_references(table: &Table, work: &[(usize, ColumnId)]) -> Result<(), GeneratorError> {
    for reference in table.foreign_keys() {
        let unclaimed = reference
            .source_columns()
            .iter()
            .filter(|&&id| work.iter().any(|&(_, w)| w == id))
            .count();
        if unclaimed > 0 && unclaimed < reference.column_count() {
            return Err(GeneratorError::SplitReference {
                reference: reference.to_string(),
            });
        }
    }
    Ok(())
}

/// First foreign key, scanning the work list in order, whose source columns
/// are all still unclaimed.
fn next_reference<'t>(table: &'t Table, work: &[(usize, ColumnId)]) -> Option<&'t Reference> {
    let unclaimed = |id: &ColumnId| work.iter().any(|(_, w)| w == id);
    work.iter().find_map(|&(_, id)| {
        table
            .references_from(id)
            .find(|r| r.source_columns().iter().all(unclaimed))
    })
}

fn column_names(table: &Table, columns: &[ColumnId]) -> String {
    columns
        .iter()
        .map(|&id| table.column(id).name.as_str())
        .collect::<Vec<_>>()
        .join(",")
}
