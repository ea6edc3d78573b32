//! Numeric value generators.

use super::ValueGenerator;
use rand::{Rng, RngCore};
use seed_core::{Column, Value};

/// Uniformly random 32-bit integers over the full range.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntegerGenerator;

impl ValueGenerator for IntegerGenerator {
    fn random_value(&self, rng: &mut dyn RngCore, _column: &Column) -> Value {
        Value::Int32(rng.random())
    }
}

/// Uniformly random 64-bit integers, optionally restricted to a range.
///
/// Not registered by default; callers opt in for `bigint` columns.
#[derive(Debug, Clone, Copy)]
pub struct BigIntGenerator {
    min: i64,
    max: i64,
}

impl BigIntGenerator {
    /// Generator over `min..=max`.
    pub fn new(min: i64, max: i64) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self { min, max }
    }
}

impl Default for BigIntGenerator {
    fn default() -> Self {
        Self::new(i64::MIN, i64::MAX)
    }
}

impl ValueGenerator for BigIntGenerator {
    fn random_value(&self, rng: &mut dyn RngCore, _column: &Column) -> Value {
        Value::Int64(rng.random_range(self.min..=self.max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use seed_core::{ColumnDefinition, DataType, Name, Table};

    fn column(data_type: DataType) -> Column {
        let mut table = Table::new(Name::unqualified("t"));
        let id = table.add_column(ColumnDefinition::new("n", data_type)).unwrap();
        table.column(id).clone()
    }

    #[test]
    fn test_integer_generator() {
        let mut rng = StdRng::seed_from_u64(42);
        let n = column(DataType::Integer);

        let values: Vec<_> = (0..100)
            .map(|_| IntegerGenerator.random_value(&mut rng, &n))
            .collect();
        assert!(values.iter().all(|v| matches!(v, Value::Int32(_))));

        // 100 draws from 2^32 values should not all coincide
        assert!(values.iter().any(|v| v != &values[0]));
    }

    #[test]
    fn test_bigint_range() {
        let mut rng = StdRng::seed_from_u64(42);
        let n = column(DataType::BigInt);
        let generator = BigIntGenerator::new(20, 10);

        for _ in 0..100 {
            match generator.random_value(&mut rng, &n) {
                Value::Int64(v) => assert!((10..=20).contains(&v)),
                other => panic!("Expected Int64 value, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_deterministic_with_seed() {
        let n = column(DataType::Integer);
        let mut rng1 = StdRng::seed_from_u64(7);
        let mut rng2 = StdRng::seed_from_u64(7);

        assert_eq!(
            IntegerGenerator.random_value(&mut rng1, &n),
            IntegerGenerator.random_value(&mut rng2, &n)
        );
    }
}
