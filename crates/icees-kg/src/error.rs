//! Errors raised while translating a reasoner query.
//!
//! Every variant ends up as the `code_description` of an `Error` message;
//! none of them escapes the [`crate::Reasoner`] entry points.

use icees_common::CommonError;
use icees_db::{DbError, FeatureType};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KgError {
    // ── Request ─────────────────────────────────────────────────────────────
    #[error("Malformed query: {0}")]
    MalformedQuery(#[from] serde_json::Error),

    #[error("Message has no query_graph or machine_question")]
    MissingQueryGraph,

    #[error("Message has no knowledge_graph")]
    MissingKnowledgeGraph,

    #[error("query_options.feature is required")]
    MissingFeature,

    #[error(transparent)]
    Feature(#[from] CommonError),

    #[error("Invalid regex {pattern}: {source}")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    // ── Shape ───────────────────────────────────────────────────────────────
    #[error("Number of nodes in query graph must be 2, found {0}")]
    NodeCount(usize),

    #[error("Number of edges in query graph must be 1, found {0}")]
    EdgeCount(usize),

    #[error("Query node has neither id nor node_id")]
    MissingNodeId,

    #[error("Query edge has neither id nor edge_id")]
    MissingEdgeId,

    #[error("Query edge {edge} has no {endpoint}")]
    MissingEdgeEndpoint { edge: String, endpoint: &'static str },

    #[error("Edge references unknown query node {0}")]
    UnknownQueryNode(String),

    #[error("Query node {0} has no type")]
    MissingNodeType(String),

    // ── Schema ──────────────────────────────────────────────────────────────
    #[error("Source node must be one of [{}], found {found}", .allowed.join(", "))]
    UnsupportedSourceType { found: String, allowed: Vec<String> },

    #[error("Target node must be one of [{}], found {found}", .allowed.join(", "))]
    UnsupportedTargetType { found: String, allowed: Vec<String> },

    #[error("Edge must be one of [{}], found {found}", .allowed.join(", "))]
    UnsupportedEdgeType { found: String, allowed: Vec<String> },

    // ── Resolution ──────────────────────────────────────────────────────────
    #[error("no curie specified at node {0}")]
    MissingCurie(String),

    #[error("cohort with cohort_id {0} not found")]
    CohortNotFound(String),

    #[error("no edge found between {0} and {1}")]
    NoCoOccurrence(String, String),

    // ── Feature definitions ─────────────────────────────────────────────────
    #[error("feature {0} has type string but has no enum")]
    MissingEnum(String),

    #[error("feature {0} has type integer but has no maximum or has no minimum")]
    MissingRange(String),

    #[error("feature {feature} has {size} integer values ({minimum}..={maximum}), more than {limit}")]
    RangeTooLarge {
        feature: String,
        minimum: i64,
        maximum: i64,
        size: i128,
        limit: usize,
    },

    #[error("feature {feature} has unsupported type {feature_type}")]
    UnsupportedFeatureType { feature: String, feature_type: FeatureType },

    // ── Store ───────────────────────────────────────────────────────────────
    #[error(transparent)]
    Store(#[from] DbError),
}

pub type Result<T> = std::result::Result<T, KgError>;
