//! Individual value generators for different data types.
//!
//! Single-column generators implement [`ValueGenerator`]: a pure function of
//! the random source and the column's metadata. They never look at other
//! rows, so uniqueness is entirely the batch engine's business.
//!
//! [`GeneratorRegistry`] maps declared column types to generators. The
//! defaults cover character, boolean and integer columns; callers register
//! more without touching the engine.

pub mod boolean;
pub mod numeric;
pub mod reference;
pub mod string;
pub mod uuid;

use crate::error::GeneratorError;
use rand::RngCore;
use seed_core::{Column, CustomValueGenerator, DataType, Value};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

pub use self::boolean::BooleanGenerator;
pub use self::numeric::{BigIntGenerator, IntegerGenerator};
pub use self::reference::ReferenceGenerator;
pub use self::string::StringGenerator;
pub use self::uuid::UuidGenerator;

/// Trait for generating the value of one column.
pub trait ValueGenerator: Send + Sync + fmt::Debug {
    /// Generate a value for `column` using the given random source.
    fn random_value(&self, rng: &mut dyn RngCore, column: &Column) -> Value;
}

impl ValueGenerator for CustomValueGenerator {
    fn random_value(&self, rng: &mut dyn RngCore, _column: &Column) -> Value {
        CustomValueGenerator::random_value(self, rng)
    }
}

/// Registry of default generators keyed by declared type.
#[derive(Clone)]
pub struct GeneratorRegistry {
    generators: HashMap<DataType, Arc<dyn ValueGenerator>>,
}

impl GeneratorRegistry {
    /// A registry without any generators.
    pub fn empty() -> Self {
        Self {
            generators: HashMap::new(),
        }
    }

    /// A registry with the built-in defaults:
    ///
    /// | Declared type | Generator |
    /// |---|---|
    /// | char / varchar / text | [`StringGenerator`] |
    /// | boolean / bit | [`BooleanGenerator`] |
    /// | integer | [`IntegerGenerator`] |
    pub fn with_defaults() -> Self {
        Self::with_max_string_length(string::DEFAULT_MAX_LENGTH)
    }

    /// Defaults, with strings capped at `max_length` characters.
    pub fn with_max_string_length(max_length: u32) -> Self {
        let mut registry = Self::empty();
        let strings = StringGenerator::new(max_length);
        registry.register(DataType::Char, strings.clone());
        registry.register(DataType::VarChar, strings.clone());
        registry.register(DataType::Text, strings);
        registry.register(DataType::Boolean, BooleanGenerator);
        registry.register(DataType::Bit, BooleanGenerator);
        registry.register(DataType::Integer, IntegerGenerator);
        registry
    }

    /// Register (or replace) the generator used for `data_type`.
    pub fn register<G>(&mut self, data_type: DataType, generator: G)
    where
        G: ValueGenerator + 'static,
    {
        self.generators.insert(data_type, Arc::new(generator));
    }

    /// Whether a generator exists for `data_type`.
    pub fn supports(&self, data_type: DataType) -> bool {
        self.generators.contains_key(&data_type)
    }

    /// Generator for the column's declared type.
    pub fn generator_for(&self, column: &Column) -> Result<Arc<dyn ValueGenerator>, GeneratorError> {
        self.generators
            .get(&column.data_type)
            .cloned()
            .ok_or_else(|| GeneratorError::UnsupportedType {
                column: column.to_string(),
                data_type: column.data_type,
                type_name: column.type_name.clone(),
            })
    }
}

impl Default for GeneratorRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl fmt::Debug for GeneratorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut types: Vec<_> = self.generators.keys().map(DataType::sql_name).collect();
        types.sort_unstable();
        f.debug_struct("GeneratorRegistry")
            .field("types", &types)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use seed_core::{ColumnDefinition, Name, Table};

    fn column(definition: ColumnDefinition) -> Column {
        let mut table = Table::new(Name::unqualified("t"));
        let id = table.add_column(definition).unwrap();
        table.column(id).clone()
    }

    #[test]
    fn test_default_type_mapping() {
        let registry = GeneratorRegistry::with_defaults();
        let mut rng = StdRng::seed_from_u64(42);

        let name = column(ColumnDefinition::varchar("name", 10));
        let value = registry
            .generator_for(&name)
            .unwrap()
            .random_value(&mut rng, &name);
        assert!(matches!(value, Value::String(s) if s.len() < 10));

        let flag = column(ColumnDefinition::new("flag", DataType::Bit));
        let value = registry
            .generator_for(&flag)
            .unwrap()
            .random_value(&mut rng, &flag);
        assert!(matches!(value, Value::Bool(_)));

        let counter = column(ColumnDefinition::new("counter", DataType::Integer));
        let value = registry
            .generator_for(&counter)
            .unwrap()
            .random_value(&mut rng, &counter);
        assert!(matches!(value, Value::Int32(_)));
    }

    #[test]
    fn test_unsupported_type() {
        let registry = GeneratorRegistry::with_defaults();
        let created = column(
            ColumnDefinition::new("created", DataType::Timestamp).with_type_name("timestamptz"),
        );

        let err = registry.generator_for(&created).unwrap_err();
        assert!(matches!(
            err,
            GeneratorError::UnsupportedType {
                data_type: DataType::Timestamp,
                ..
            }
        ));
        assert!(err.to_string().contains("t.created"));
        assert!(err.to_string().contains("timestamptz"));
    }

    #[test]
    fn test_register_extends_defaults() {
        let mut registry = GeneratorRegistry::with_defaults();
        assert!(!registry.supports(DataType::Uuid));

        registry.register(DataType::Uuid, UuidGenerator);
        assert!(registry.supports(DataType::Uuid));

        let id = column(ColumnDefinition::new("id", DataType::Uuid));
        let mut rng = StdRng::seed_from_u64(1);
        let value = registry.generator_for(&id).unwrap().random_value(&mut rng, &id);
        assert!(matches!(value, Value::Uuid(_)));
    }

    #[test]
    fn test_custom_generator_as_value_generator() {
        let mut registry = GeneratorRegistry::empty();
        registry.register(
            DataType::Integer,
            CustomValueGenerator::new(|_| Value::Int32(5)),
        );

        let c = column(ColumnDefinition::new("c", DataType::Integer));
        let mut rng = StdRng::seed_from_u64(1);
        let value = registry.generator_for(&c).unwrap().random_value(&mut rng, &c);
        assert_eq!(value, Value::Int32(5));
    }
}
