//! Shared testing utilities for the ICEES workspace.
//!
//! - [`fixtures`]: a small asthma cohort with feature, identifier and
//!   association tables
//! - [`CountingStore`]: an [`AssociationStore`] wrapper that counts calls
//! - [`queries`]: JSON request builders

pub mod fixtures;
pub mod queries;

use async_trait::async_trait;
use icees_common::{FeatureFilters, FeatureSpec};
use icees_db::{Association, AssociationStore, ClassPredicate, CohortDefinition, FeatureMatrix, Result};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub use fixtures::Fixture;

/// Forwards to an inner store and records how many calls were made.
pub struct CountingStore {
    inner: Arc<dyn AssociationStore>,
    calls: AtomicUsize,
}

impl CountingStore {
    pub fn new(inner: Arc<dyn AssociationStore>) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl AssociationStore for CountingStore {
    async fn get_ids_by_feature(
        &self,
        table: &str,
        year: Option<i32>,
        features: &FeatureFilters,
    ) -> Result<(String, u64)> {
        self.record();
        self.inner.get_ids_by_feature(table, year, features).await
    }

    async fn get_cohort_definition_by_id(&self, cohort_id: &str) -> Result<Option<CohortDefinition>> {
        self.record();
        self.inner.get_cohort_definition_by_id(cohort_id).await
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
        self.record();
        self.inner
            .select_associations_to_all_features(table, year, cohort_id, feature, maximum_p_value, predicate)
            .await
    }

    async fn select_feature_matrix(
        &self,
        table: &str,
        year: Option<i32>,
        cohort_features: &FeatureFilters,
        feature_a: &FeatureSpec,
        feature_b: &FeatureSpec,
    ) -> Result<FeatureMatrix> {
        self.record();
        self.inner
            .select_feature_matrix(table, year, cohort_features, feature_a, feature_b)
            .await
    }
}
