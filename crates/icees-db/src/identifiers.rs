//! Feature ↔ curie mapping, the one place where ontology identifiers meet
//! feature-table names.
//!
//! ```yaml
//! patient:
//!   Prednisone: ["MESH:D011241", "CHEBI:8382"]
//!   AsthmaDx: ["MONDO:0004979"]
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{DbError, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdentifierCatalog {
    tables: BTreeMap<String, BTreeMap<String, Vec<String>>>,
}

impl IdentifierCatalog {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let catalog = Self::from_yaml_str(&content)?;
        tracing::debug!(
            path = %path.as_ref().display(),
            tables = catalog.tables.len(),
            "Loaded identifier catalog"
        );
        Ok(catalog)
    }

    /// Map a feature to its identifiers.
    pub fn with(mut self, table: &str, feature: &str, ids: &[&str]) -> Self {
        self.tables
            .entry(table.to_string())
            .or_default()
            .insert(feature.to_string(), ids.iter().map(|s| s.to_string()).collect());
        self
    }

    /// Identifiers recorded for a feature, in file order. Unknown tables or
    /// features yield an empty list.
    pub fn get_identifiers(&self, table: &str, feature: &str) -> Vec<String> {
        self.tables
            .get(table)
            .and_then(|features| features.get(feature))
            .cloned()
            .unwrap_or_default()
    }

    /// Every feature in `table` that carries `curie`.
    pub fn get_features_by_identifier(&self, table: &str, curie: &str) -> Result<Vec<String>> {
        let features = self
            .tables
            .get(table)
            .ok_or_else(|| DbError::TableNotFound(table.to_string()))?;

        let matched: Vec<String> = features
            .iter()
            .filter(|(_, ids)| ids.iter().any(|id| id == curie))
            .map(|(name, _)| name.clone())
            .collect();

        if matched.is_empty() {
            return Err(DbError::IdentifierNotFound {
                table: table.to_string(),
                curie: curie.to_string(),
            });
        }
        Ok(matched)
    }
}
