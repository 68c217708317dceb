//! Symbol-meaning table - user-maintained descriptions of atomic propositions.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::TranslateError;

/// Mapping from proposition symbols to free-text descriptions of their
/// real-world meaning. Keys are free-form as entered; only entries whose key
/// is a single uppercase ASCII letter ever reach the model as context.
///
/// Lives for the duration of an interactive session; the composing layer may
/// additionally persist it as a YAML file between one-shot invocations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MeaningTable(BTreeMap<String, String>);

impl MeaningTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Placeholder table for a fresh session.
    pub fn seeded() -> Self {
        let mut table = Self::new();
        table.set("P", "first proposition");
        table.set("Q", "second proposition");
        table
    }

    pub fn set(&mut self, symbol: &str, description: &str) {
        self.0.insert(symbol.to_string(), description.to_string());
    }

    pub fn remove(&mut self, symbol: &str) -> Option<String> {
        self.0.remove(symbol)
    }

    pub fn get(&self, symbol: &str) -> Option<&str> {
        self.0.get(symbol).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Entries eligible as model context: single-uppercase-letter keys only.
    /// Other entries stay in the table but are silently excluded here.
    pub fn valid_view(&self) -> BTreeMap<&str, &str> {
        self.0
            .iter()
            .filter(|(symbol, _)| is_atom_symbol(symbol))
            .map(|(symbol, description)| (symbol.as_str(), description.as_str()))
            .collect()
    }

    /// Merge raw parsed suggestions, keeping only single-uppercase-letter
    /// symbols. Returns how many entries were merged. Existing symbols are
    /// overwritten.
    pub fn merge_suggestions(&mut self, suggestions: BTreeMap<String, String>) -> usize {
        let mut merged = 0;
        for (symbol, description) in suggestions {
            if is_atom_symbol(&symbol) {
                self.0.insert(symbol, description);
                merged += 1;
            }
        }
        merged
    }

    /// Load a table from a YAML file
    pub fn load(path: &Path) -> Result<Self, TranslateError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            TranslateError::Meanings(format!("failed to read {}: {e}", path.display()))
        })?;
        let table: Self = serde_yaml::from_str(&content).map_err(|e| {
            TranslateError::Meanings(format!("failed to parse {}: {e}", path.display()))
        })?;
        Ok(table)
    }

    /// Write the table to a YAML file
    pub fn save(&self, path: &Path) -> Result<(), TranslateError> {
        let content = serde_yaml::to_string(self).map_err(|e| {
            TranslateError::Meanings(format!("failed to serialize meanings table: {e}"))
        })?;
        std::fs::write(path, content).map_err(|e| {
            TranslateError::Meanings(format!("failed to write {}: {e}", path.display()))
        })
    }
}

/// True for a single uppercase ASCII letter.
pub fn is_atom_symbol(symbol: &str) -> bool {
    let mut chars = symbol.chars();
    matches!(
        (chars.next(), chars.next()),
        (Some(c), None) if c.is_ascii_uppercase()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_atom_symbol() {
        assert!(is_atom_symbol("P"));
        assert!(is_atom_symbol("Z"));
        assert!(!is_atom_symbol("p"));
        assert!(!is_atom_symbol("PQ"));
        assert!(!is_atom_symbol(""));
        assert!(!is_atom_symbol("¬"));
    }

    #[test]
    fn test_valid_view_excludes_foreign_keys() {
        let mut table = MeaningTable::new();
        table.set("P", "it is raining");
        table.set("p", "lowercase key");
        table.set("PQ", "two letters");
        table.set("Q", "the ground is wet");

        let view = table.valid_view();
        assert_eq!(view.len(), 2);
        assert_eq!(view.get("P"), Some(&"it is raining"));
        assert_eq!(view.get("Q"), Some(&"the ground is wet"));
        // The table itself keeps everything.
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn test_merge_suggestions_filters_and_overwrites() {
        let mut table = MeaningTable::new();
        table.set("P", "old description");

        let mut suggestions = BTreeMap::new();
        suggestions.insert("P".to_string(), "new description".to_string());
        suggestions.insert("Q".to_string(), "fresh symbol".to_string());
        suggestions.insert("nope".to_string(), "discarded".to_string());

        let merged = table.merge_suggestions(suggestions);
        assert_eq!(merged, 2);
        assert_eq!(table.get("P"), Some("new description"));
        assert_eq!(table.get("Q"), Some("fresh symbol"));
        assert_eq!(table.get("nope"), None);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("meanings.yaml");

        let table = MeaningTable::seeded();
        table.save(&path).unwrap();

        let loaded = MeaningTable::load(&path).unwrap();
        assert_eq!(loaded, table);
    }

    #[test]
    fn test_load_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = MeaningTable::load(&dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(err, TranslateError::Meanings(_)));
    }
}
