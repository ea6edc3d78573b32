//! Caller-supplied generators attached to tables.
//!
//! These wrap plain closures so the schema model can carry them without
//! depending on the generator crate. The random source is always passed in by
//! the caller.

use crate::values::Value;
use rand::RngCore;
use std::fmt;
use std::sync::Arc;

type ValueFn = dyn Fn(&mut dyn RngCore) -> Value + Send + Sync;
type RowFn = dyn Fn(&mut dyn RngCore) -> Vec<Value> + Send + Sync;

/// Custom generator producing the value of a single column.
#[derive(Clone)]
pub struct CustomValueGenerator(Arc<ValueFn>);

impl CustomValueGenerator {
    /// Wrap a closure.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&mut dyn RngCore) -> Value + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Produce one value.
    pub fn random_value(&self, rng: &mut dyn RngCore) -> Value {
        (self.0)(rng)
    }
}

impl fmt::Debug for CustomValueGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CustomValueGenerator(..)")
    }
}

/// Custom generator producing the values of several columns at once.
///
/// The number of values returned per call must match the number of columns
/// the generator was registered for; the engine rejects anything else.
#[derive(Clone)]
pub struct CustomRowGenerator(Arc<RowFn>);

impl CustomRowGenerator {
    /// Wrap a closure.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&mut dyn RngCore) -> Vec<Value> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Produce one tuple of values.
    pub fn random_values(&self, rng: &mut dyn RngCore) -> Vec<Value> {
        (self.0)(rng)
    }
}

impl fmt::Debug for CustomRowGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CustomRowGenerator(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_custom_value_generator_uses_given_rng() {
        let generator = CustomValueGenerator::new(|rng| Value::Int32(rng.random_range(0..10)));

        let mut rng1 = StdRng::seed_from_u64(7);
        let mut rng2 = StdRng::seed_from_u64(7);
        assert_eq!(
            generator.random_value(&mut rng1),
            generator.random_value(&mut rng2)
        );
    }

    #[test]
    fn test_custom_row_generator() {
        let generator = CustomRowGenerator::new(|_| vec![Value::Int32(1), Value::Null]);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            generator.random_values(&mut rng),
            vec![Value::Int32(1), Value::Null]
        );
    }
}
