//! Batches of rows waiting to be inserted.

use crate::plan::ColumnSlots;
use seed_core::{ColumnId, Row, Table, Value};

/// Progress of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchState {
    /// Fewer rows than requested, budget not yet spent
    Accumulating,
    /// All requested rows were produced
    Ready,
    /// The discard budget ran out before the batch was full
    Exhausted,
}

/// Checks one unique constraint against rows indexed by slot.
///
/// Values compare with `==`, so two NULLs are equal.
#[derive(Debug, Clone)]
pub struct UniqueConstraintVerifier {
    name: String,
    slots: Vec<usize>,
}

impl UniqueConstraintVerifier {
    /// Verifiers for every constraint of `table` whose columns are all part
    /// of the batch. Constraints over other columns, such as an
    /// auto-increment primary key, are left to the database.
    pub fn for_table(table: &Table, slots: &ColumnSlots) -> Vec<Self> {
        table
            .unique_constraints()
            .iter()
            .filter_map(|constraint| {
                slots.slots_for(constraint.columns()).map(|slots| Self {
                    name: constraint.name().to_string(),
                    slots,
                })
            })
            .collect()
    }

    /// Constraint name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether `a` and `b` agree on every constrained column.
    pub fn matches(&self, a: &[Value], b: &[Value]) -> bool {
        self.slots.iter().all(|&slot| a[slot] == b[slot])
    }

    /// Whether `candidate` collides with none of `rows`.
    pub fn satisfies<'r, I>(&self, rows: I, candidate: &Row) -> bool
    where
        I: IntoIterator<Item = &'r Row>,
    {
        !rows.into_iter().any(|row| self.matches(row, candidate))
    }
}

/// Rows generated for one table in one `populate` call.
///
/// Rows hold one value per batch column, in slot order. Accepted rows are
/// never removed.
#[derive(Debug)]
pub struct Batch<'a> {
    table: &'a Table,
    requested_size: usize,
    slots: ColumnSlots,
    existing_rows: Vec<Row>,
    rows: Vec<Row>,
    verifiers: Vec<UniqueConstraintVerifier>,
    discarded: usize,
    state: BatchState,
}

impl<'a> Batch<'a> {
    /// Create a batch for every non-auto-increment column of `table`.
    ///
    /// `existing_rows` are the rows already stored in the table, projected
    /// onto the batch columns.
    pub fn new(table: &'a Table, existing_rows: Vec<Row>, requested_size: usize) -> Self {
        let slots = ColumnSlots::for_table(table);
        let verifiers = UniqueConstraintVerifier::for_table(table, &slots);
        let state = if requested_size == 0 {
            BatchState::Ready
        } else {
            BatchState::Accumulating
        };

        Self {
            table,
            requested_size,
            slots,
            existing_rows,
            rows: Vec::with_capacity(requested_size),
            verifiers,
            discarded: 0,
            state,
        }
    }

    /// Offer a candidate row.
    ///
    /// The row is accepted only if no unique constraint is violated by it,
    /// neither against the existing rows nor against rows accepted earlier.
    /// Rejected rows count as discarded.
    pub fn add_row(&mut self, row: Row) -> bool {
        let accepted = self.verifiers.iter().all(|verifier| {
            verifier.satisfies(&self.existing_rows, &row) && verifier.satisfies(&self.rows, &row)
        });

        if accepted {
            self.rows.push(row);
            if self.is_ready() {
                self.state = BatchState::Ready;
            }
        } else {
            self.discarded += 1;
        }
        accepted
    }

    /// Give up on the remaining rows.
    pub fn mark_exhausted(&mut self) {
        if !self.is_ready() {
            self.state = BatchState::Exhausted;
        }
    }

    pub fn table(&self) -> &'a Table {
        self.table
    }

    pub fn requested_size(&self) -> usize {
        self.requested_size
    }

    /// Number of rows accepted so far.
    pub fn current_size(&self) -> usize {
        self.rows.len()
    }

    pub fn is_ready(&self) -> bool {
        self.rows.len() >= self.requested_size
    }

    pub fn state(&self) -> BatchState {
        self.state
    }

    /// Number of candidate rows rejected so far.
    pub fn discarded(&self) -> usize {
        self.discarded
    }

    /// Batch columns, in slot order.
    pub fn columns(&self) -> &[ColumnId] {
        self.slots.columns()
    }

    pub fn slots(&self) -> &ColumnSlots {
        &self.slots
    }

    pub fn existing_rows(&self) -> &[Row] {
        &self.existing_rows
    }

    /// Accepted rows, in acceptance order.
    pub fn rows_to_insert(&self) -> &[Row] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }
}
