//! Request builders.

use serde_json::{json, Value};

use crate::fixtures::YEAR;

/// `{"message": ...}` around a two-node query graph `n0 -e0-> n1`.
pub fn hop_query(mut source: Value, mut target: Value, edge_type: &str, query_options: Value) -> Value {
    source["id"] = json!("n0");
    target["id"] = json!("n1");
    json!({
        "message": {
            "query_graph": {
                "nodes": [source, target],
                "edges": [{"id": "e0", "source_id": "n0", "target_id": "n1", "type": edge_type}]
            },
            "query_options": query_options
        }
    })
}

/// Cohort → `target_type` query over the 2010 cohort, asking about
/// `AgeStudyStart = 0-2`.
pub fn get_query(source_type: &str, target_type: &str, edge_type: &str) -> Value {
    hop_query(
        json!({"type": source_type}),
        json!({"type": target_type}),
        edge_type,
        json!({
            "year": YEAR,
            "feature": {"AgeStudyStart": {"operator": "=", "value": "0-2"}}
        }),
    )
}

/// `curie` (typed `source_type`) → `target_type` query over the 2010 cohort.
pub fn one_hop_query(curie: &str, source_type: &str, target_type: &str) -> Value {
    hop_query(
        json!({"type": source_type, "curie": curie}),
        json!({"type": target_type}),
        "association",
        json!({"year": YEAR}),
    )
}

/// Overlay request over `(id, curie)` nodes, with one caller edge between
/// the first two.
pub fn overlay_query(nodes: &[(&str, &str)]) -> Value {
    let kg_nodes: Vec<Value> = nodes
        .iter()
        .map(|(id, curie)| json!({"id": id, "curie": curie, "type": "named_thing"}))
        .collect();
    let kg_edges: Vec<Value> = match nodes {
        [(a, _), (b, _), ..] => vec![json!({"id": "e0", "source_id": a, "target_id": b, "type": "association"})],
        _ => Vec::new(),
    };
    json!({
        "message": {
            "knowledge_graph": {"nodes": kg_nodes, "edges": kg_edges},
            "query_options": {"year": YEAR}
        }
    })
}
