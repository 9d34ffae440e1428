//! Association store trait.
//!
//! Abstraction over the cohort feature tables so the reasoner core does not
//! depend on the storage engine behind them.

use async_trait::async_trait;
use icees_common::{FeatureFilters, FeatureSpec};

use crate::error::Result;
use crate::schema::{Association, CohortDefinition, FeatureMatrix};

/// Filter over the biolink class of an association's `feature_b`.
pub type ClassPredicate = dyn Fn(&str) -> bool + Send + Sync;

/// Read-only access to cohorts and their feature associations.
///
/// Implementations can use:
/// - a relational ICEES database
/// - a YAML fixture ([`crate::MemoryStore`])
#[async_trait]
pub trait AssociationStore: Send + Sync {
    /// Resolve the cohort matching `features` to its id and size.
    async fn get_ids_by_feature(
        &self,
        table: &str,
        year: Option<i32>,
        features: &FeatureFilters,
    ) -> Result<(String, u64)>;

    /// Load a previously persisted cohort, `None` if the id is unknown.
    async fn get_cohort_definition_by_id(&self, cohort_id: &str) -> Result<Option<CohortDefinition>>;

    /// Associations between `feature` and every other feature of the
    /// cohort with `p_value <= maximum_p_value`, restricted to rows whose
    /// `feature_b` class satisfies `predicate` when one is given.
    async fn select_associations_to_all_features(
        &self,
        table: &str,
        year: Option<i32>,
        cohort_id: &str,
        feature: &FeatureSpec,
        maximum_p_value: f64,
        predicate: Option<&ClassPredicate>,
    ) -> Result<Vec<Association>>;

    /// Contingency result of two qualified features over the cohort
    /// defined by `cohort_features`.
    async fn select_feature_matrix(
        &self,
        table: &str,
        year: Option<i32>,
        cohort_features: &FeatureFilters,
        feature_a: &FeatureSpec,
        feature_b: &FeatureSpec,
    ) -> Result<FeatureMatrix>;
}
