//! Index configuration: metadata key plus membership sets.

use super::dysbiosis::{compute_index, IndexIter};
use crate::data::ObservationTable;
use crate::error::{DysbiosisError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// Greengenes families observed to increase in Crohn's disease.
const GEVERS_INCREASED: &[&str] = &[
    "f__Enterobacteriaceae",
    "f__Pasteurellaceae",
    "f__Veillonellaceae",
    "f__Fusobacteriaceae",
    "f__Neisseriaceae",
    "f__Gemellaceae",
];

/// Greengenes orders and families observed to decrease in Crohn's disease.
const GEVERS_DECREASED: &[&str] = &[
    "o__Bacteroidales",
    "o__Clostridiales",
    "f__Erysipelotrichaceae",
    "f__Bifidobacteriaceae",
];

/// A named index definition.
///
/// Loadable from YAML:
///
/// ```yaml
/// name: crohns
/// key: taxonomy
/// increased:
///   - f__Enterobacteriaceae
/// decreased:
///   - o__Bacteroidales
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Name of the index.
    pub name: String,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Observation metadata key holding the comparable tokens.
    pub key: String,
    /// Tokens of items observed to increase.
    pub increased: BTreeSet<String>,
    /// Tokens of items observed to decrease.
    pub decreased: BTreeSet<String>,
}

impl IndexConfig {
    /// Create a new, unnamed configuration.
    pub fn new<I, D, S>(key: &str, increased: I, decreased: D) -> Self
    where
        I: IntoIterator<Item = S>,
        D: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: "unnamed".to_string(),
            description: None,
            key: key.to_string(),
            increased: increased.into_iter().map(Into::into).collect(),
            decreased: decreased.into_iter().map(Into::into).collect(),
        }
    }

    /// The Crohn's disease microbial dysbiosis index of Gevers et al. 2014,
    /// matched against Greengenes-style taxonomy tokens.
    pub fn gevers_2014() -> Self {
        Self::new(
            "taxonomy",
            GEVERS_INCREASED.iter().copied(),
            GEVERS_DECREASED.iter().copied(),
        )
        .name("gevers_2014")
        .description("Microbial dysbiosis index for Crohn's disease (Gevers et al. 2014)")
    }

    /// Set the name.
    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Set the description.
    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Use a different metadata key.
    pub fn with_key(mut self, key: &str) -> Self {
        self.key = key.to_string();
        self
    }

    /// Load from YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(DysbiosisError::from)
    }

    /// Save to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(DysbiosisError::from)
    }

    /// Load from JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(DysbiosisError::from)
    }

    /// Save to JSON string.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(DysbiosisError::from)
    }

    /// Reject an empty key or an empty membership set.
    pub fn validate(&self) -> Result<()> {
        if self.key.trim().is_empty() {
            return Err(DysbiosisError::InvalidParameter(
                "Metadata key must not be empty".to_string(),
            ));
        }
        if self.increased.is_empty() {
            return Err(DysbiosisError::InvalidParameter(
                "Increased set must not be empty".to_string(),
            ));
        }
        if self.decreased.is_empty() {
            return Err(DysbiosisError::InvalidParameter(
                "Decreased set must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Tokens listed in both sets.
    pub fn overlap(&self) -> Vec<&str> {
        self.increased
            .intersection(&self.decreased)
            .map(String::as_str)
            .collect()
    }

    /// Validate, then compute the index over `table`.
    pub fn compute<T: ObservationTable>(&self, table: &T) -> Result<IndexIter<T>> {
        self.validate()?;
        let increased: HashSet<String> = self.increased.iter().cloned().collect();
        let decreased: HashSet<String> = self.decreased.iter().cloned().collect();
        tracing::debug!(index = %self.name, key = %self.key, "computing index");
        compute_index(table, &increased, &decreased, &self.key)
    }
}
