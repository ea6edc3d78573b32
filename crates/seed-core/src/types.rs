//! Declared column types.
//!
//! `DataType` is the type tag a schema provider reports for a column. The
//! generator registry dispatches on it to pick a default value generator.
//!
//! # YAML Format
//!
//! Types are written as plain strings; common SQL spellings are accepted as
//! aliases:
//! ```yaml
//! type: varchar
//! type: integer
//! type: boolean
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared data type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    /// Boolean value
    #[serde(alias = "bool")]
    Boolean,

    /// Single bit, usually boolean-like
    Bit,

    /// 16-bit signed integer
    #[serde(alias = "smallint", alias = "int2")]
    SmallInt,

    /// 32-bit signed integer
    #[serde(alias = "int", alias = "int4")]
    Integer,

    /// 64-bit signed integer
    #[serde(alias = "bigint", alias = "int8")]
    BigInt,

    /// 32-bit floating point
    #[serde(alias = "float4")]
    Real,

    /// 64-bit floating point
    #[serde(alias = "float8", alias = "double_precision")]
    Double,

    /// Exact decimal; precision and scale live on the column
    #[serde(alias = "numeric")]
    Decimal,

    /// Fixed-length character string
    Char,

    /// Variable-length character string
    #[serde(alias = "varchar", alias = "character_varying")]
    VarChar,

    /// Unbounded text
    Text,

    /// Binary data
    #[serde(alias = "bytea", alias = "blob")]
    Binary,

    /// Date only
    Date,

    /// Time only
    Time,

    /// Timestamp
    #[serde(alias = "timestamptz", alias = "datetime")]
    Timestamp,

    /// UUID
    Uuid,

    /// Anything the provider could not classify
    Other,
}

impl DataType {
    /// Whether this is a character string type.
    pub fn is_string(&self) -> bool {
        matches!(self, Self::Char | Self::VarChar | Self::Text)
    }

    /// Whether this is a boolean-like type.
    pub fn is_boolean(&self) -> bool {
        matches!(self, Self::Boolean | Self::Bit)
    }

    /// Whether this is an integer type.
    pub fn is_integer(&self) -> bool {
        matches!(self, Self::SmallInt | Self::Integer | Self::BigInt)
    }

    /// Conventional SQL spelling, used as the default type name.
    pub fn sql_name(&self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Bit => "bit",
            Self::SmallInt => "smallint",
            Self::Integer => "integer",
            Self::BigInt => "bigint",
            Self::Real => "real",
            Self::Double => "double precision",
            Self::Decimal => "decimal",
            Self::Char => "char",
            Self::VarChar => "varchar",
            Self::Text => "text",
            Self::Binary => "binary",
            Self::Date => "date",
            Self::Time => "time",
            Self::Timestamp => "timestamp",
            Self::Uuid => "uuid",
            Self::Other => "<unknown>",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sql_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        let parsed: Vec<DataType> =
            serde_yaml::from_str("[int, integer, varchar, var_char, bool, boolean, bit]").unwrap();
        assert_eq!(
            parsed,
            vec![
                DataType::Integer,
                DataType::Integer,
                DataType::VarChar,
                DataType::VarChar,
                DataType::Boolean,
                DataType::Boolean,
                DataType::Bit,
            ]
        );
    }

    #[test]
    fn test_categories() {
        assert!(DataType::VarChar.is_string());
        assert!(DataType::Text.is_string());
        assert!(DataType::Bit.is_boolean());
        assert!(DataType::BigInt.is_integer());
        assert!(!DataType::Uuid.is_string());
    }

    #[test]
    fn test_serialize_simple_string() {
        let yaml = serde_yaml::to_string(&DataType::SmallInt).unwrap();
        assert_eq!(yaml.trim(), "small_int");
    }
}
