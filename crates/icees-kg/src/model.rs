//! Reasoner wire types: the incoming query message and the outgoing
//! knowledge graph / answers / reasoner message.

use icees_common::{FeatureFilters, QualifierSet};
use icees_db::Association;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::error::{KgError, Result};

// ---------------------------------------------------------------------------
// Query graph
// ---------------------------------------------------------------------------

/// A node of the question graph. Older clients send `node_id` instead of `id`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub node_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub curie: Option<String>,
}

impl QNode {
    /// `id`, falling back to `node_id`.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref().or(self.node_id.as_deref())
    }

    pub fn require_id(&self) -> Result<&str> {
        self.id().ok_or(KgError::MissingNodeId)
    }

    pub fn require_type(&self) -> Result<&str> {
        self.node_type
            .as_deref()
            .ok_or_else(|| KgError::MissingNodeType(self.id().unwrap_or_default().to_string()))
    }

    pub fn require_curie(&self) -> Result<&str> {
        self.curie
            .as_deref()
            .ok_or_else(|| KgError::MissingCurie(self.id().unwrap_or_default().to_string()))
    }
}

/// An edge of the question graph. Older clients send `edge_id` instead of `id`.
///
/// Endpoints are optional here: knowledge-graph input edges are copied as
/// given, and only hop queries require both ends.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QEdge {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edge_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_id: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub edge_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub negated: Option<bool>,
}

impl QEdge {
    /// `id`, falling back to `edge_id`.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref().or(self.edge_id.as_deref())
    }

    pub fn require_id(&self) -> Result<&str> {
        self.id().ok_or(KgError::MissingEdgeId)
    }

    pub fn require_source_id(&self) -> Result<&str> {
        self.source_id.as_deref().ok_or_else(|| self.missing_endpoint("source_id"))
    }

    pub fn require_target_id(&self) -> Result<&str> {
        self.target_id.as_deref().ok_or_else(|| self.missing_endpoint("target_id"))
    }

    fn missing_endpoint(&self, endpoint: &'static str) -> KgError {
        KgError::MissingEdgeEndpoint {
            edge: self.id().unwrap_or_default().to_string(),
            endpoint,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QueryGraph {
    #[serde(default)]
    pub nodes: Vec<QNode>,
    #[serde(default)]
    pub edges: Vec<QEdge>,
}

// ---------------------------------------------------------------------------
// Query message
// ---------------------------------------------------------------------------

/// `message.query_options`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QueryOptions {
    #[serde(default)]
    pub cohort_id: Option<String>,
    #[serde(default)]
    pub table: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub cohort_features: FeatureFilters,
    /// `{feature_name: qualifier | [qualifier]}`, exactly one entry
    #[serde(default)]
    pub feature: Option<BTreeMap<String, QualifierSet>>,
    #[serde(default)]
    pub maximum_p_value: Option<f64>,
    #[serde(default)]
    pub regex: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QueryMessage {
    #[serde(default, alias = "machine_question")]
    pub query_graph: Option<QueryGraph>,
    #[serde(default)]
    pub knowledge_graph: Option<QueryGraph>,
    #[serde(default)]
    pub query_options: QueryOptions,
}

impl QueryMessage {
    /// Parse a request, either `{"message": {...}}` or the bare message.
    pub fn from_query(query: &Value) -> Result<Self> {
        let message = query.get("message").unwrap_or(query);
        Ok(QueryMessage::deserialize(message)?)
    }
}

// ---------------------------------------------------------------------------
// Knowledge graph
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KgNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub id: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub node_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub curie: Option<String>,
}

/// p-value of one (source feature, target feature) pair of an overlay edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoOccurrence {
    pub src_feature: String,
    pub tgt_feature: String,
    pub p_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EdgeAttributes {
    Association(Box<Association>),
    CoOccurrence(Vec<CoOccurrence>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KgEdge {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub edge_type: Option<String>,
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub negated: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edge_attributes: Option<EdgeAttributes>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct KnowledgeGraph {
    pub nodes: Vec<KgNode>,
    pub edges: Vec<KgEdge>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub node_bindings: BTreeMap<String, String>,
    pub edge_bindings: BTreeMap<String, Vec<String>>,
    pub score: f64,
    pub score_name: String,
}

// ---------------------------------------------------------------------------
// Reasoner message
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageCode {
    #[serde(rename = "OK")]
    Ok,
    Error,
}

/// The response body of every entry point. On `Error` only the header and
/// `code_description` are present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReasonerMessage {
    pub reasoner_id: String,
    pub tool_version: String,
    pub datetime: String,
    pub message_code: MessageCode,
    pub code_description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_graph: Option<QueryGraph>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub knowledge_graph: Option<KnowledgeGraph>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answers: Option<Vec<Answer>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n_results: Option<usize>,
}

impl ReasonerMessage {
    pub fn is_ok(&self) -> bool {
        self.message_code == MessageCode::Ok
    }
}
