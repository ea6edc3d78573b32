//! Boolean value generator.

use super::ValueGenerator;
use rand::{Rng, RngCore};
use seed_core::{Column, Value};

/// Uniformly random `true`/`false`, used for `boolean` and `bit` columns.
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanGenerator;

impl ValueGenerator for BooleanGenerator {
    fn random_value(&self, rng: &mut dyn RngCore, _column: &Column) -> Value {
        Value::Bool(rng.random_bool(0.5))
    }
}
