//! Row types exchanged with the association store.

use icees_common::{FeatureFilters, Qualifier};
use serde::{Deserialize, Serialize};

/// One side of an association row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssociatedFeature {
    pub feature_name: String,
    /// Biolink class as stored, e.g. `ChemicalSubstance`
    #[serde(default)]
    pub biolink_class: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub feature_qualifiers: Vec<Qualifier>,
}

/// A (feature, other-feature) pairing computed over a cohort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Association {
    pub feature_a: AssociatedFeature,
    pub feature_b: AssociatedFeature,
    pub p_value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chi_squared: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

/// A persisted cohort: the filters that define it and how many patients match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CohortDefinition {
    pub cohort_id: String,
    pub table: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub features: FeatureFilters,
    pub size: u64,
}

/// Contingency result for two qualified features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureMatrix {
    pub p_value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chi_squared: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}
