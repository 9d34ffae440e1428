//! End-to-end behaviour of the cohort → feature query.

use icees_kg::{MessageCode, Reasoner};
use icees_test_utils::fixtures::{ASTHMA_HP, ASTHMA_MONDO, COHORT_ALL, OBESITY_MONDO};
use icees_test_utils::queries::{get_query, hop_query};
use icees_test_utils::{CountingStore, Fixture};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;

fn reasoner() -> Reasoner {
    let fixture = Fixture::new();
    Reasoner::new(fixture.store, fixture.features, fixture.identifiers)
}

fn counting_reasoner() -> (Reasoner, Arc<CountingStore>) {
    let counting = Arc::new(CountingStore::new(Fixture::new().store));
    let fixture = Fixture::with_store(counting.clone());
    (
        Reasoner::new(fixture.store, fixture.features, fixture.identifiers),
        counting,
    )
}

#[tokio::test]
async fn test_population_to_disease() {
    let query = get_query("population_of_individual_organisms", "disease", "association");
    let message = reasoner().get(&query).await;

    assert_eq!(message.message_code, MessageCode::Ok, "{}", message.code_description);
    assert_eq!(message.code_description, "");
    assert_eq!(message.n_results, Some(2));

    let kg = message.knowledge_graph.unwrap();
    let node_ids: Vec<&str> = kg.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(node_ids, vec![COHORT_ALL, ASTHMA_MONDO, ASTHMA_HP]);
    assert_eq!(kg.nodes[0].name.as_deref(), Some("cohort"));
    assert_eq!(kg.nodes[0].node_type.as_deref(), Some("population_of_individual_organisms"));
    assert_eq!(kg.nodes[1].name.as_deref(), Some("AsthmaDx"));
    assert_eq!(kg.nodes[1].node_type.as_deref(), Some("Disease"));

    let edge_ids: Vec<&str> = kg.edges.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(
        edge_ids,
        vec!["COHORT:1_AsthmaDx_MONDO:0004979", "COHORT:1_AsthmaDx_HP:0002099"]
    );
    assert!(kg.edges.iter().all(|e| e.source_id.as_deref() == Some(COHORT_ALL)));
    assert_eq!(kg.edges[1].target_id.as_deref(), Some(ASTHMA_HP));

    let answers = message.answers.unwrap();
    assert_eq!(answers.len(), 2);
    assert_eq!(answers[0].node_bindings["n0"], COHORT_ALL);
    assert_eq!(answers[0].node_bindings["n1"], ASTHMA_MONDO);
    assert_eq!(answers[0].edge_bindings["e0"], vec!["COHORT:1_AsthmaDx_MONDO:0004979"]);
    assert_eq!(answers[0].score, 0.01);
    assert_eq!(answers[0].score_name, "p value");

    let question_graph = message.question_graph.unwrap();
    assert_eq!(question_graph.nodes.len(), 2);
}

#[tokio::test]
async fn test_edge_attributes_carry_association() {
    let query = get_query("population_of_individual_organisms", "disease", "association");
    let value = serde_json::to_value(reasoner().get(&query).await).unwrap();

    let attributes = &value["knowledge_graph"]["edges"][0]["edge_attributes"];
    assert_eq!(attributes["p_value"], json!(0.01));
    assert_eq!(attributes["feature_b"]["feature_name"], "AsthmaDx");
    assert_eq!(value["knowledge_graph"]["edges"][0]["type"], "association");
}

#[tokio::test]
async fn test_subtype_closure_widens_target() {
    let query = get_query("population_of_individual_organisms", "disease_or_phenotypic_feature", "association");
    let message = reasoner().get(&query).await;

    let kg = message.knowledge_graph.unwrap();
    let names: Vec<&str> = kg.nodes.iter().filter_map(|n| n.name.as_deref()).collect();
    assert_eq!(names, vec!["cohort", "AsthmaDx", "AsthmaDx", "ObesityDx"]);
    assert_eq!(kg.nodes[3].id, OBESITY_MONDO);
    assert_eq!(message.n_results, Some(3));
}

#[tokio::test]
async fn test_maximum_p_value_and_regex() {
    let query = hop_query(
        json!({"type": "population_of_individual_organisms"}),
        json!({"type": "named_thing"}),
        "association",
        json!({
            "year": 2010,
            "feature": {"AgeStudyStart": [{"operator": "=", "value": "0-2"}]},
            "maximum_p_value": 0.05,
            "regex": "MONDO"
        }),
    );
    let message = reasoner().get(&query).await;

    let answers = message.answers.unwrap();
    let bound: Vec<&str> = answers.iter().map(|a| a.node_bindings["n1"].as_str()).collect();
    assert_eq!(bound, vec![ASTHMA_MONDO, OBESITY_MONDO]);
}

#[tokio::test]
async fn test_cohort_by_id() {
    let query = hop_query(
        json!({"type": "population_of_individual_organisms"}),
        json!({"type": "disease"}),
        "association",
        json!({
            "cohort_id": COHORT_ALL,
            "feature": {"AgeStudyStart": {"operator": "=", "value": "0-2"}}
        }),
    );
    let message = reasoner().get(&query).await;
    assert!(message.is_ok(), "{}", message.code_description);
    assert_eq!(message.n_results, Some(2));
}

#[tokio::test]
async fn test_unsupported_types_make_no_store_calls() {
    for (source, target, edge) in [
        ("gene", "disease", "association"),
        ("population_of_individual_organisms", "gene", "association"),
        ("population_of_individual_organisms", "disease", "treats"),
    ] {
        let (reasoner, counting) = counting_reasoner();
        let message = reasoner.get(&get_query(source, target, edge)).await;

        assert_eq!(message.message_code, MessageCode::Error);
        assert!(message.code_description.contains("must be one of"), "{}", message.code_description);
        assert_eq!(counting.calls(), 0);
    }
}

#[tokio::test]
async fn test_shape_errors() {
    let three_nodes = json!({
        "message": {
            "query_graph": {
                "nodes": [{"id": "a"}, {"id": "b"}, {"id": "c"}],
                "edges": [{"id": "e", "source_id": "a", "target_id": "b"}]
            },
            "query_options": {"feature": {"AgeStudyStart": {"operator": "=", "value": "0-2"}}}
        }
    });
    let message = reasoner().get(&three_nodes).await;
    assert_eq!(message.message_code, MessageCode::Error);
    assert!(message.code_description.contains("Number of nodes"));
    assert!(message.answers.is_none());

    let two_edges = json!({
        "message": {
            "query_graph": {
                "nodes": [{"id": "a"}, {"id": "b"}],
                "edges": [
                    {"id": "e0", "source_id": "a", "target_id": "b"},
                    {"id": "e1", "source_id": "a", "target_id": "b"}
                ]
            },
            "query_options": {"feature": {"AgeStudyStart": {"operator": "=", "value": "0-2"}}}
        }
    });
    let message = reasoner().get(&two_edges).await;
    assert!(message.code_description.contains("Number of edges"));
}

#[tokio::test]
async fn test_missing_feature_and_unknown_cohort() {
    let mut query = get_query("population_of_individual_organisms", "disease", "association");
    query["message"]["query_options"]
        .as_object_mut()
        .unwrap()
        .remove("feature");
    let message = reasoner().get(&query).await;
    assert_eq!(message.code_description, "query_options.feature is required");

    let mut query = get_query("population_of_individual_organisms", "disease", "association");
    query["message"]["query_options"]["year"] = json!(1999);
    let message = reasoner().get(&query).await;
    assert_eq!(message.message_code, MessageCode::Error);
    assert!(message.knowledge_graph.is_none());
}

#[tokio::test]
async fn test_error_response_shape() {
    let query = get_query("gene", "disease", "association");
    let value = serde_json::to_value(reasoner().get(&query).await).unwrap();
    let mut keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
    keys.sort();
    assert_eq!(
        keys,
        vec!["code_description", "datetime", "message_code", "reasoner_id", "tool_version"]
    );
    assert_eq!(value["message_code"], "Error");
}
