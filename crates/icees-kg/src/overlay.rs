//! Co-occurrence overlay: p-value edges between every ordered pair of nodes
//! of a caller-supplied knowledge graph, self-pairs included.

use icees_db::FeatureMatrix;
use serde_json::Value;
use tracing::{debug, info};

use crate::cohort::{message_cohort, Cohort};
use crate::error::{KgError, Result};
use crate::features::query_feature;
use crate::identifiers::icees_identifiers;
use crate::model::{CoOccurrence, EdgeAttributes, KgEdge, KgNode, KnowledgeGraph, QEdge, QNode, QueryMessage};
use crate::reasoner::{Outcome, Reasoner};
use crate::schema::ASSOCIATION;

/// `<source>_<target>`.
pub fn generate_edge_id(source_id: &str, target_id: &str) -> String {
    format!("{source_id}_{target_id}")
}

/// Copy the canonical attributes of a question node.
pub fn convert_qnode_to_node(qnode: &QNode) -> Result<KgNode> {
    Ok(KgNode {
        name: None,
        id: qnode.require_id()?.to_string(),
        node_type: qnode.node_type.clone(),
        curie: qnode.curie.clone(),
    })
}

/// Copy the canonical attributes of a question edge.
pub fn convert_qedge_to_edge(qedge: &QEdge) -> Result<KgEdge> {
    Ok(KgEdge {
        edge_type: qedge.edge_type.clone(),
        id: qedge.require_id()?.to_string(),
        source_id: qedge.source_id.clone(),
        target_id: qedge.target_id.clone(),
        relation: qedge.relation.clone(),
        negated: qedge.negated,
        edge_attributes: None,
    })
}

async fn co_occurrence_edge(
    reasoner: &Reasoner,
    cohort: &Cohort,
    source: &QNode,
    target: &QNode,
) -> Result<Vec<CoOccurrence>> {
    let table = cohort.table.as_str();
    let source_features = icees_identifiers(reasoner.identifiers(), table, source)?;
    let target_features = icees_identifiers(reasoner.identifiers(), table, target)?;

    let mut pairs = Vec::with_capacity(source_features.len() * target_features.len());
    for src_feature in &source_features {
        let src_spec = query_feature(reasoner.features(), table, src_feature)?;
        for tgt_feature in &target_features {
            let tgt_spec = query_feature(reasoner.features(), table, tgt_feature)?;
            let FeatureMatrix { p_value, .. } = reasoner
                .store()
                .select_feature_matrix(table, cohort.year, &cohort.features, &src_spec, &tgt_spec)
                .await?;
            pairs.push(CoOccurrence {
                src_feature: src_feature.clone(),
                tgt_feature: tgt_feature.clone(),
                p_value,
            });
        }
    }

    if pairs.is_empty() {
        return Err(KgError::NoCoOccurrence(
            source.id().unwrap_or_default().to_string(),
            target.id().unwrap_or_default().to_string(),
        ));
    }
    Ok(pairs)
}

pub(crate) async fn co_occurrence_overlay(reasoner: &Reasoner, query: &Value) -> Result<Outcome> {
    let message = QueryMessage::from_query(query)?;
    let graph = message.knowledge_graph.as_ref().ok_or(KgError::MissingKnowledgeGraph)?;

    let nodes = graph
        .nodes
        .iter()
        .map(convert_qnode_to_node)
        .collect::<Result<Vec<_>>>()?;
    let mut edges = graph
        .edges
        .iter()
        .map(convert_qedge_to_edge)
        .collect::<Result<Vec<_>>>()?;

    let cohort = message_cohort(
        reasoner.store(),
        &message.query_options,
        &reasoner.settings().default_table,
    )
    .await?;

    let caller_edges = edges.len();
    for source in &graph.nodes {
        for target in &graph.nodes {
            let pairs = co_occurrence_edge(reasoner, &cohort, source, target).await?;
            let source_id = source.require_id()?;
            let target_id = target.require_id()?;
            debug!(source_id, target_id, n_pairs = pairs.len(), "Computed co-occurrence edge");

            edges.push(KgEdge {
                edge_type: Some(ASSOCIATION.to_string()),
                id: generate_edge_id(source_id, target_id),
                source_id: Some(source_id.to_string()),
                target_id: Some(target_id.to_string()),
                relation: None,
                negated: None,
                edge_attributes: Some(EdgeAttributes::CoOccurrence(pairs)),
            });
        }
    }

    info!(
        cohort_id = %cohort.cohort_id,
        n_nodes = nodes.len(),
        overlay_edges = edges.len() - caller_edges,
        "Built co-occurrence overlay"
    );
    Ok(Outcome {
        question_graph: graph.clone(),
        knowledge_graph: KnowledgeGraph { nodes, edges },
        answers: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_convert_copies_present_attributes_only() {
        let qnode: QNode = serde_json::from_value(json!({"node_id": "n0", "curie": "MONDO:1"})).unwrap();
        let node = convert_qnode_to_node(&qnode).unwrap();
        assert_eq!(
            serde_json::to_value(&node).unwrap(),
            json!({"id": "n0", "curie": "MONDO:1"})
        );

        let qedge: QEdge = serde_json::from_value(json!({
            "edge_id": "e0", "source_id": "n0", "target_id": "n1", "negated": false
        }))
        .unwrap();
        let edge = convert_qedge_to_edge(&qedge).unwrap();
        assert_eq!(
            serde_json::to_value(&edge).unwrap(),
            json!({"id": "e0", "source_id": "n0", "target_id": "n1", "negated": false})
        );
    }

    #[test]
    fn test_convert_edge_without_endpoints() {
        let qedge: QEdge = serde_json::from_value(json!({"id": "e0", "type": "association"})).unwrap();
        let edge = convert_qedge_to_edge(&qedge).unwrap();
        assert_eq!(
            serde_json::to_value(&edge).unwrap(),
            json!({"id": "e0", "type": "association"})
        );
    }

    #[test]
    fn test_convert_requires_id() {
        assert!(matches!(convert_qnode_to_node(&QNode::default()), Err(KgError::MissingNodeId)));
    }

    #[test]
    fn test_generate_edge_id() {
        assert_eq!(generate_edge_id("n0", "n0"), "n0_n0");
        assert_eq!(generate_edge_id("n0", "n1"), "n0_n1");
    }
}
