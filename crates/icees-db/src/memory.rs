//! In-memory association store backed by a YAML fixture.
//!
//! ```yaml
//! cohorts:
//!   - cohort_id: "COHORT:1"
//!     table: patient
//!     year: 2010
//!     size: 120
//! associations:
//!   - cohort_id: "COHORT:1"
//!     feature_a: { feature_name: AgeStudyStart }
//!     feature_b: { feature_name: AsthmaDx, biolink_class: Disease }
//!     p_value: 0.01
//! feature_matrices:
//!   - table: patient
//!     year: 2010
//!     feature_a: Sex2
//!     feature_b: AsthmaDx
//!     p_value: 0.2
//! ```

use async_trait::async_trait;
use icees_common::{FeatureFilters, FeatureSpec};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::error::{DbError, Result};
use crate::schema::{Association, CohortDefinition, FeatureMatrix};
use crate::store::{AssociationStore, ClassPredicate};

/// Association row tagged with the cohort it was computed over.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct AssociationRow {
    cohort_id: String,
    #[serde(flatten)]
    association: Association,
}

/// Precomputed p-value for a pair of feature names, over every value of
/// both features.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct MatrixRow {
    table: String,
    #[serde(default)]
    year: Option<i32>,
    #[serde(default)]
    cohort_features: FeatureFilters,
    feature_a: String,
    feature_b: String,
    #[serde(flatten)]
    matrix: FeatureMatrix,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryStore {
    #[serde(default)]
    cohorts: Vec<CohortDefinition>,
    #[serde(default)]
    associations: Vec<AssociationRow>,
    #[serde(default)]
    feature_matrices: Vec<MatrixRow>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let store = Self::from_yaml_str(&content)?;
        debug!(
            path = %path.as_ref().display(),
            cohorts = store.cohorts.len(),
            associations = store.associations.len(),
            "Loaded memory store"
        );
        Ok(store)
    }

    /// Add a cohort definition.
    pub fn with_cohort(mut self, cohort: CohortDefinition) -> Self {
        self.cohorts.push(cohort);
        self
    }

    /// Add an association computed over `cohort_id`.
    pub fn with_association(mut self, cohort_id: &str, association: Association) -> Self {
        self.associations.push(AssociationRow {
            cohort_id: cohort_id.to_string(),
            association,
        });
        self
    }

    /// Add a p-value for `feature_a` × `feature_b` over the unfiltered
    /// population of `table`/`year`.
    pub fn with_feature_matrix(
        mut self,
        table: &str,
        year: Option<i32>,
        feature_a: &str,
        feature_b: &str,
        p_value: f64,
    ) -> Self {
        self.feature_matrices.push(MatrixRow {
            table: table.to_string(),
            year,
            cohort_features: FeatureFilters::new(),
            feature_a: feature_a.to_string(),
            feature_b: feature_b.to_string(),
            matrix: FeatureMatrix {
                p_value,
                chi_squared: None,
                total: None,
            },
        });
        self
    }

    fn cohort(&self, cohort_id: &str) -> Option<&CohortDefinition> {
        self.cohorts.iter().find(|c| c.cohort_id == cohort_id)
    }
}

fn describe_filters(features: &FeatureFilters) -> String {
    let parts: Vec<String> = features
        .iter()
        .map(|(name, qualifier)| format!("{name}{qualifier}"))
        .collect();
    format!("{{{}}}", parts.join(", "))
}

#[async_trait]
impl AssociationStore for MemoryStore {
    async fn get_ids_by_feature(
        &self,
        table: &str,
        year: Option<i32>,
        features: &FeatureFilters,
    ) -> Result<(String, u64)> {
        self.cohorts
            .iter()
            .find(|c| c.table == table && c.year == year && &c.features == features)
            .map(|c| (c.cohort_id.clone(), c.size))
            .ok_or_else(|| DbError::CohortNotFound {
                table: table.to_string(),
                features: describe_filters(features),
            })
    }

    async fn get_cohort_definition_by_id(&self, cohort_id: &str) -> Result<Option<CohortDefinition>> {
        Ok(self.cohort(cohort_id).cloned())
    }

    async fn select_associations_to_all_features(
        &self,
        table: &str,
        year: Option<i32>,
        cohort_id: &str,
        feature: &FeatureSpec,
        maximum_p_value: f64,
        predicate: Option<&ClassPredicate>,
    ) -> Result<Vec<Association>> {
        match self.cohort(cohort_id) {
            Some(cohort) if cohort.table == table && cohort.year == year => {}
            _ => return Err(DbError::UnknownCohort(cohort_id.to_string())),
        }

        let rows: Vec<Association> = self
            .associations
            .iter()
            .filter(|row| row.cohort_id == cohort_id)
            .map(|row| &row.association)
            .filter(|a| a.feature_a.feature_name == feature.feature_name)
            // Rows without qualifiers were computed over every value of feature_a.
            .filter(|a| {
                a.feature_a.feature_qualifiers.is_empty()
                    || a.feature_a.feature_qualifiers == feature.feature_qualifiers
            })
            .filter(|a| a.p_value <= maximum_p_value)
            .filter(|a| predicate.map_or(true, |p| p(a.feature_b.biolink_class.as_str())))
            .cloned()
            .collect();

        debug!(
            cohort_id,
            feature = %feature.feature_name,
            n_associations = rows.len(),
            "Selected associations"
        );
        Ok(rows)
    }

    async fn select_feature_matrix(
        &self,
        table: &str,
        year: Option<i32>,
        cohort_features: &FeatureFilters,
        feature_a: &FeatureSpec,
        feature_b: &FeatureSpec,
    ) -> Result<FeatureMatrix> {
        self.feature_matrices
            .iter()
            .find(|row| {
                row.table == table
                    && row.year == year
                    && &row.cohort_features == cohort_features
                    && row.feature_a == feature_a.feature_name
                    && row.feature_b == feature_b.feature_name
            })
            .map(|row| row.matrix.clone())
            .ok_or_else(|| DbError::MatrixNotFound {
                table: table.to_string(),
                feature_a: feature_a.feature_name.clone(),
                feature_b: feature_b.feature_name.clone(),
            })
    }
}
