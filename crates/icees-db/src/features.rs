//! Static feature metadata, keyed by table then feature name.
//!
//! Loaded once from YAML:
//!
//! ```yaml
//! patient:
//!   Sex2:
//!     type: string
//!     enum: [Male, Female]
//!     biolink_class: PhenotypicFeature
//!   TotalEDVisits:
//!     type: integer
//!     minimum: 0
//!     maximum: 2
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use crate::error::{DbError, Result};

/// Column type of a feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureType {
    String,
    Integer,
    Number,
    Boolean,
    #[serde(other)]
    Other,
}

impl FeatureType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureType::String => "string",
            FeatureType::Integer => "integer",
            FeatureType::Number => "number",
            FeatureType::Boolean => "boolean",
            FeatureType::Other => "other",
        }
    }
}

impl fmt::Display for FeatureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Definition of one feature column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureDef {
    #[serde(rename = "type")]
    pub feature_type: FeatureType,
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub biolink_class: Option<String>,
}

/// `features_dict[table][feature]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureCatalog {
    tables: BTreeMap<String, BTreeMap<String, FeatureDef>>,
}

impl FeatureCatalog {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let catalog = Self::from_yaml_str(&content)?;
        tracing::debug!(
            path = %path.as_ref().display(),
            tables = catalog.tables.len(),
            "Loaded feature catalog"
        );
        Ok(catalog)
    }

    /// Add or replace a feature definition.
    pub fn with(mut self, table: &str, feature: &str, def: FeatureDef) -> Self {
        self.tables
            .entry(table.to_string())
            .or_default()
            .insert(feature.to_string(), def);
        self
    }

    pub fn features(&self, table: &str) -> Result<&BTreeMap<String, FeatureDef>> {
        self.tables
            .get(table)
            .ok_or_else(|| DbError::TableNotFound(table.to_string()))
    }

    pub fn get(&self, table: &str, feature: &str) -> Result<&FeatureDef> {
        self.features(table)?
            .get(feature)
            .ok_or_else(|| DbError::FeatureNotFound {
                table: table.to_string(),
                feature: feature.to_string(),
            })
    }
}
