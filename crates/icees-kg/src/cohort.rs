//! Cohort resolution from `query_options`.

use icees_common::FeatureFilters;
use icees_db::AssociationStore;
use serde::Serialize;
use tracing::info;

use crate::error::{KgError, Result};
use crate::model::QueryOptions;

/// The patient population a query is evaluated over.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cohort {
    pub cohort_id: String,
    pub table: String,
    pub year: Option<i32>,
    pub features: FeatureFilters,
    pub size: u64,
}

/// Resolve the cohort named by `options`: a stored `cohort_id` when given,
/// otherwise the cohort matching `table`/`year`/`cohort_features`.
pub async fn message_cohort(
    store: &dyn AssociationStore,
    options: &QueryOptions,
    default_table: &str,
) -> Result<Cohort> {
    let cohort = match options.cohort_id.as_deref() {
        Some(cohort_id) => {
            let definition = store
                .get_cohort_definition_by_id(cohort_id)
                .await?
                .ok_or_else(|| KgError::CohortNotFound(cohort_id.to_string()))?;
            Cohort {
                cohort_id: definition.cohort_id,
                table: definition.table,
                year: definition.year,
                features: definition.features,
                size: definition.size,
            }
        }
        None => {
            let table = options.table.as_deref().unwrap_or(default_table);
            let (cohort_id, size) = store
                .get_ids_by_feature(table, options.year, &options.cohort_features)
                .await?;
            Cohort {
                cohort_id,
                table: table.to_string(),
                year: options.year,
                features: options.cohort_features.clone(),
                size,
            }
        }
    };

    info!(
        cohort_id = %cohort.cohort_id,
        table = %cohort.table,
        size = cohort.size,
        "Resolved cohort"
    );
    Ok(cohort)
}
