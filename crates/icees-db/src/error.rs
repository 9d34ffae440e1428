//! Database error types.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DbError>;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Table not found: {0}")]
    TableNotFound(String),

    #[error("Feature {feature} not found in table {table}")]
    FeatureNotFound { table: String, feature: String },

    #[error("Cannot find identifier {curie} in table {table}")]
    IdentifierNotFound { table: String, curie: String },

    #[error("No cohort in table {table} matches features {features}")]
    CohortNotFound { table: String, features: String },

    #[error("Unknown cohort: {0}")]
    UnknownCohort(String),

    #[error("No feature matrix for {feature_a} x {feature_b} in table {table}")]
    MatrixNotFound {
        table: String,
        feature_a: String,
        feature_b: String,
    },
}
