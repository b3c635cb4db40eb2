use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Looks up candidate values for enum placeholders. Candidates are either a
/// bare value or a `stored=display` pair.
pub trait EnumResolver {
    fn enum_values(&self, fact_type: &str, field: &str) -> Option<Vec<String>>;
}

impl<F> EnumResolver for F
where
    F: Fn(&str, &str) -> Option<Vec<String>>,
{
    fn enum_values(&self, fact_type: &str, field: &str) -> Option<Vec<String>> {
        self(fact_type, field)
    }
}

/// Resolver for definitions without enum placeholders.
pub struct NoEnumerations;

impl EnumResolver for NoEnumerations {
    fn enum_values(&self, _fact_type: &str, _field: &str) -> Option<Vec<String>> {
        None
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enumeration {
    pub fact_type: String,
    pub field: String,
    #[serde(default)]
    pub values: Vec<String>,
}

/// A fixed table of enumerations, typically read from the settings file.
#[derive(Debug, Clone, Default)]
pub struct StaticEnumResolver {
    kept: HashMap<(String, String), Vec<String>>,
}

impl StaticEnumResolver {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn insert(&mut self, fact_type: &str, field: &str, values: Vec<String>) {
        self.kept.insert((fact_type.to_string(), field.to_string()), values);
    }
    pub fn len(&self) -> usize {
        self.kept.len()
    }
    pub fn is_empty(&self) -> bool {
        self.kept.is_empty()
    }
}

impl From<Vec<Enumeration>> for StaticEnumResolver {
    fn from(enumerations: Vec<Enumeration>) -> Self {
        let mut resolver = Self::new();
        for e in enumerations {
            resolver.insert(&e.fact_type, &e.field, e.values);
        }
        resolver
    }
}

impl EnumResolver for StaticEnumResolver {
    fn enum_values(&self, fact_type: &str, field: &str) -> Option<Vec<String>> {
        self.kept.get(&(fact_type.to_string(), field.to_string())).cloned()
    }
}
