//! Observation metadata for annotated abundance tables.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Delimiter used by BIOM-style taxonomy strings.
pub const LINEAGE_DELIMITER: char = ';';

/// Metadata attached to a single observation (row).
///
/// Each key maps to an ordered list of string tokens. A taxonomy annotation
/// such as `k__Bacteria; p__Firmicutes; c__Clostridia` is stored as the three
/// tokens `["k__Bacteria", "p__Firmicutes", "c__Clostridia"]`, and a scalar
/// annotation is stored as a single token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservationMetadata {
    fields: BTreeMap<String, Vec<String>>,
}

impl ObservationMetadata {
    /// Create empty metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field with the given tokens.
    pub fn with<K, I, S>(mut self, key: K, tokens: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(key, tokens);
        self
    }

    /// Add a field parsed from a delimited lineage string.
    pub fn with_lineage<K: Into<String>>(mut self, key: K, lineage: &str) -> Self {
        self.insert(key, split_lineage(lineage, LINEAGE_DELIMITER));
        self
    }

    /// Insert or replace a field.
    pub fn insert<K, I, S>(&mut self, key: K, tokens: I)
    where
        K: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields
            .insert(key.into(), tokens.into_iter().map(Into::into).collect());
    }

    /// Tokens stored under `key`.
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.fields.get(key).map(Vec::as_slice)
    }

    /// Check if a field exists.
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Field names, sorted.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if there are no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Split a delimited lineage string into trimmed, non-empty tokens.
pub fn split_lineage(lineage: &str, delimiter: char) -> Vec<String> {
    lineage
        .split(delimiter)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_tokens() {
        let md = ObservationMetadata::new()
            .with("taxonomy", ["k__Bacteria", "f__Enterobacteriaceae"])
            .with("confidence", ["0.97"]);

        assert_eq!(md.len(), 2);
        assert!(md.contains_key("taxonomy"));
        assert_eq!(
            md.get("taxonomy").unwrap(),
            &["k__Bacteria", "f__Enterobacteriaceae"]
        );
        assert_eq!(md.get("confidence").unwrap(), &["0.97"]);
        assert!(md.get("missing").is_none());
    }

    #[test]
    fn test_with_lineage() {
        let md = ObservationMetadata::new().with_lineage(
            "taxonomy",
            "k__Bacteria; p__Proteobacteria;  ; f__Pasteurellaceae ",
        );

        assert_eq!(
            md.get("taxonomy").unwrap(),
            &["k__Bacteria", "p__Proteobacteria", "f__Pasteurellaceae"]
        );
    }

    #[test]
    fn test_keys_sorted() {
        let md = ObservationMetadata::new()
            .with("taxonomy", ["x"])
            .with("confidence", ["1.0"]);
        let keys: Vec<&str> = md.keys().collect();
        assert_eq!(keys, vec!["confidence", "taxonomy"]);
    }

    #[test]
    fn test_insert_replaces() {
        let mut md = ObservationMetadata::new().with("taxonomy", ["a"]);
        md.insert("taxonomy", vec!["b".to_string(), "c".to_string()]);
        assert_eq!(md.get("taxonomy").unwrap(), &["b", "c"]);
    }

    #[test]
    fn test_empty() {
        let md = ObservationMetadata::default();
        assert!(md.is_empty());
        assert_eq!(split_lineage("", ';'), Vec::<String>::new());
    }
}
