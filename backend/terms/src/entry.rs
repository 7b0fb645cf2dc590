use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One dictionary term. `name` is the display form, not the key.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub description: String,
}

impl Entry {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    pub fn key(&self) -> String {
        term_key(&self.name)
    }
}

/// Persisted form of the glossary, keyed by [`term_key`].
pub type Dictionary = BTreeMap<String, Entry>;

pub fn term_key(name: &str) -> String {
    name.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_is_lowercase() {
        assert_eq!(term_key("Cat"), "cat");
        assert_eq!(term_key("CAT"), "cat");
        assert_eq!(term_key("Rust Lang"), "rust lang");
    }

    #[test]
    fn test_key_keeps_spacing() {
        assert_eq!(term_key("Hello  World"), "hello  world");
    }

    #[test]
    fn test_entry_key_ignores_display_case() {
        let entry = Entry::new("TypeScript", "typed js");

        assert_eq!(entry.key(), "typescript");
        assert_eq!(entry.name, "TypeScript");
    }

    #[test]
    fn test_dictionary_json_shape() {
        let mut dictionary = Dictionary::new();
        let entry = Entry::new("Foo", "bar");
        dictionary.insert(entry.key(), entry);

        let json = serde_json::to_value(&dictionary).unwrap();

        assert_eq!(
            json,
            serde_json::json!({ "foo": { "name": "Foo", "description": "bar" } })
        );
    }
}
