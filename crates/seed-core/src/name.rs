//! Possibly schema-qualified database identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A possibly qualified database name, such as `public.users` or `users`.
///
/// Comparison and hashing ignore ASCII case. A name without a schema only
/// equals another name without a schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Name {
    /// Schema part, if qualified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Unqualified name
    pub name: String,
}

impl Name {
    /// Create a new name with an optional schema.
    pub fn new(schema: Option<String>, name: impl Into<String>) -> Self {
        Self {
            schema,
            name: name.into(),
        }
    }

    /// Create a name without a schema.
    pub fn unqualified(name: impl Into<String>) -> Self {
        Self {
            schema: None,
            name: name.into(),
        }
    }

    /// Create a schema-qualified name.
    pub fn qualified(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema: Some(schema.into()),
            name: name.into(),
        }
    }

    /// Parse `schema.name` or `name`.
    ///
    /// The table name is the part after the last dot, so `a.b.c` names
    /// table `c` in schema `a.b`.
    pub fn parse(s: &str) -> Self {
        match s.rsplit_once('.') {
            Some((schema, name)) => Self::qualified(schema, name),
            None => Self::unqualified(s),
        }
    }
}

impl PartialEq for Name {
    fn eq(&self, other: &Self) -> bool {
        let schemas_match = match (&self.schema, &other.schema) {
            (Some(a), Some(b)) => a.eq_ignore_ascii_case(b),
            (None, None) => true,
            _ => false,
        };
        schemas_match && self.name.eq_ignore_ascii_case(&other.name)
    }
}

impl Eq for Name {}

impl Hash for Name {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.schema
            .as_ref()
            .map(|s| s.to_ascii_lowercase())
            .hash(state);
        self.name.to_ascii_lowercase().hash(state);
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.schema {
            Some(schema) => write!(f, "{schema}.{}", self.name),
            None => f.write_str(&self.name),
        }
    }
}

impl From<&str> for Name {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}
