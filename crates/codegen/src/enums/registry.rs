//! Enumeration registry
//!
//! Maps each enumeration name to its literals. Literals are self-valued: the
//! constant `Active` has the value `'Active'`, so a pair is always
//! `(name, name)`. Built once per run and shared by the enum emitter and by
//! default-value checks.

use schemaforge_ir::{Enumeration, Schema};
use std::collections::HashMap;

/// Name → literal list for every enumeration of a schema
#[derive(Debug, Clone, Default)]
pub struct EnumRegistry {
    /// Enumerations in diagram order
    entries: Vec<(String, Vec<String>)>,

    /// Lookup: enumeration name → index into `entries`
    index: HashMap<String, usize>,
}

impl EnumRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the registry for all enumerations of a schema
    pub fn from_schema(schema: &Schema) -> Self {
        let mut registry = Self::new();
        for enumeration in &schema.enumerations {
            registry.register(enumeration);
        }
        registry
    }

    /// Register an enumeration. A later enumeration with the same name
    /// replaces the earlier one.
    pub fn register(&mut self, enumeration: &Enumeration) {
        let literals: Vec<String> =
            enumeration.literal_names().into_iter().map(String::from).collect();
        match self.index.get(&enumeration.name) {
            Some(&i) => self.entries[i].1 = literals,
            None => {
                self.index.insert(enumeration.name.clone(), self.entries.len());
                self.entries.push((enumeration.name.clone(), literals));
            }
        }
    }

    /// Whether an enumeration with this name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Number of registered enumerations
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered enumeration names in diagram order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    fn literals(&self, name: &str) -> Option<&[String]> {
        self.index.get(name).map(|&i| self.entries[i].1.as_slice())
    }

    /// Constant name → value pairs of an enumeration, in declaration order
    pub fn pairs(&self, name: &str) -> Option<Vec<(&str, &str)>> {
        self.literals(name)
            .map(|lits| lits.iter().map(|l| (l.as_str(), l.as_str())).collect())
    }

    /// Constant names of an enumeration
    pub fn keys(&self, name: &str) -> Option<Vec<&str>> {
        self.pairs(name)
            .map(|pairs| pairs.into_iter().map(|(k, _)| k).collect())
    }

    /// Constant values of an enumeration
    pub fn values(&self, name: &str) -> Option<Vec<&str>> {
        self.pairs(name)
            .map(|pairs| pairs.into_iter().map(|(_, v)| v).collect())
    }

    /// Whether `key` is a constant name of the enumeration (case-sensitive)
    pub fn is_valid_key(&self, name: &str, key: &str) -> bool {
        self.pairs(name)
            .is_some_and(|pairs| pairs.iter().any(|(k, _)| *k == key))
    }

    /// Whether `value` is a constant value of the enumeration
    pub fn is_valid_value(&self, name: &str, value: &str) -> bool {
        self.pairs(name)
            .is_some_and(|pairs| pairs.iter().any(|(_, v)| *v == value))
    }

    /// Whether `text` is either a key or a value of the enumeration
    pub fn is_valid(&self, name: &str, text: &str) -> bool {
        self.is_valid_key(name, text) || self.is_valid_value(name, text)
    }
}
