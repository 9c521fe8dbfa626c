//! Field Registry
//!
//! Holds the current value of every scalar placeholder detected in a
//! template. One registry is owned by the caller per render; there is no
//! process-wide state and no timing behaviour. Persisting or debouncing edits
//! is left to the form layer.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Placeholder name -> current value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldRegistry {
    values: HashMap<String, String>,
}

impl FieldRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with an empty value for each name
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            values: names
                .into_iter()
                .map(|name| (name.into(), String::new()))
                .collect(),
        }
    }

    /// Current value of a field
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Set the value of a field.
    ///
    /// Names that the scanner never produced are stored but have no effect
    /// on the rendered document.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// All `(name, value)` pairs, in no particular order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Copy values from `other` for the names this registry already knows
    pub fn fill_from(&mut self, other: &FieldRegistry) {
        for (name, value) in self.values.iter_mut() {
            if let Some(v) = other.get(name) {
                *value = v.to_string();
            }
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FieldRegistry {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_names_defaults_to_empty() {
        let registry = FieldRegistry::from_names(["Client Name", "date"]);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("Client Name"), Some(""));
        assert_eq!(registry.get("date"), Some(""));
        assert_eq!(registry.get("missing"), None);
    }

    #[test]
    fn test_set_and_get() {
        let mut registry = FieldRegistry::new();
        assert!(registry.is_empty());

        registry.set("a", "X");
        registry.set("a", "Y");
        assert_eq!(registry.get("a"), Some("Y"));
        assert!(registry.contains("a"));
        assert!(!registry.contains("A"));
    }

    #[test]
    fn test_entries() {
        let registry: FieldRegistry = [("a", "1"), ("b", "2")].into_iter().collect();
        let mut entries: Vec<_> = registry.entries().collect();
        entries.sort();
        assert_eq!(entries, vec![("a", "1"), ("b", "2")]);
    }

    #[test]
    fn test_fill_from_only_known_names() {
        let mut registry = FieldRegistry::from_names(["a", "b"]);
        let saved: FieldRegistry = [("a", "1"), ("z", "ignored")].into_iter().collect();
        registry.fill_from(&saved);

        assert_eq!(registry.get("a"), Some("1"));
        assert_eq!(registry.get("b"), Some(""));
        assert!(!registry.contains("z"));
    }

    #[test]
    fn test_deserialize_from_map() {
        let registry: FieldRegistry =
            serde_json::from_str(r#"{"Client Name": "Ravi", "date": ""}"#).unwrap();
        assert_eq!(registry.get("Client Name"), Some("Ravi"));
        assert_eq!(registry.get("date"), Some(""));
    }
}
