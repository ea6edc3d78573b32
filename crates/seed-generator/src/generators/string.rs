//! Random character data.

use super::ValueGenerator;
use rand::{Rng, RngCore};
use seed_core::{Column, Value};

/// Characters random strings are drawn from.
pub const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789-_ ";

/// Upper bound on generated string length when the caller sets none.
pub const DEFAULT_MAX_LENGTH: u32 = 1000;

/// Random strings over [`ALPHABET`].
///
/// The length is drawn uniformly from `[0, min(column.size, max_length))`,
/// so a value always fits the column. A column of size 0 yields empty
/// strings.
#[derive(Debug, Clone)]
pub struct StringGenerator {
    max_length: u32,
}

impl StringGenerator {
    pub fn new(max_length: u32) -> Self {
        Self { max_length }
    }

    pub fn max_length(&self) -> u32 {
        self.max_length
    }
}

impl Default for StringGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LENGTH)
    }
}

impl ValueGenerator for StringGenerator {
    fn random_value(&self, rng: &mut dyn RngCore, column: &Column) -> Value {
        let bound = column.size.min(self.max_length) as usize;
        if bound == 0 {
            return Value::String(String::new());
        }

        let len = rng.random_range(0..bound);
        let s: String = (0..len)
            .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
            .collect();
        Value::String(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use seed_core::{ColumnDefinition, Name, Table};

    fn varchar(size: u32) -> Column {
        let mut table = Table::new(Name::unqualified("t"));
        let id = table.add_column(ColumnDefinition::varchar("s", size)).unwrap();
        table.column(id).clone()
    }

    fn draw(generator: &StringGenerator, column: &Column, rng: &mut StdRng) -> String {
        match generator.random_value(rng, column) {
            Value::String(s) => s,
            other => panic!("Expected string, got {other:?}"),
        }
    }

    #[test]
    fn test_length_below_column_size() {
        let mut rng = StdRng::seed_from_u64(42);
        let column = varchar(10);
        let generator = StringGenerator::default();

        for _ in 0..200 {
            let s = draw(&generator, &column, &mut rng);
            assert!(s.len() < 10, "{s:?} too long");
            assert!(s.bytes().all(|b| ALPHABET.contains(&b)));
        }
    }

    #[test]
    fn test_length_capped_by_max_length() {
        let mut rng = StdRng::seed_from_u64(42);
        let column = varchar(1_000_000);
        let generator = StringGenerator::new(5);

        for _ in 0..100 {
            assert!(draw(&generator, &column, &mut rng).len() < 5);
        }
    }

    #[test]
    fn test_zero_size_column() {
        let mut rng = StdRng::seed_from_u64(42);
        let column = varchar(0);
        assert_eq!(draw(&StringGenerator::default(), &column, &mut rng), "");
    }

    #[test]
    fn test_size_one_column_is_always_empty() {
        let mut rng = StdRng::seed_from_u64(42);
        let column = varchar(1);
        for _ in 0..10 {
            assert_eq!(draw(&StringGenerator::default(), &column, &mut rng), "");
        }
    }
}
