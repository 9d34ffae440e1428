use icees_kg::{MessageCode, Reasoner};
use icees_test_utils::fixtures::{ASTHMA_HP, ASTHMA_MONDO, DEMOGRAPHICS_NCIT, OBESITY_MONDO, PREDNISONE_CHEBI, PREDNISONE_MESH};
use icees_test_utils::queries::{hop_query, one_hop_query};
use icees_test_utils::{CountingStore, Fixture};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;

fn reasoner() -> Reasoner {
    let fixture = Fixture::new();
    Reasoner::new(fixture.store, fixture.features, fixture.identifiers)
}

#[tokio::test]
async fn test_disease_to_chemical_substance() {
    let message = reasoner()
        .one_hop(&one_hop_query(ASTHMA_MONDO, "disease", "chemical_substance"))
        .await;
    assert!(message.is_ok(), "{}", message.code_description);

    let kg = message.knowledge_graph.unwrap();
    assert_eq!(kg.nodes[0].id, "n0");
    assert_eq!(kg.nodes[0].curie.as_deref(), Some(ASTHMA_MONDO));
    assert_eq!(kg.nodes[0].node_type.as_deref(), Some("disease"));
    let bound: Vec<&str> = kg.nodes[1..].iter().map(|n| n.id.as_str()).collect();
    assert_eq!(bound, vec![PREDNISONE_MESH, PREDNISONE_CHEBI]);

    assert_eq!(kg.edges[0].id, "n0_Prednisone_MESH:D011241");
    assert_eq!(kg.edges[0].source_id.as_deref(), Some("n0"));

    let answers = message.answers.unwrap();
    assert_eq!(message.n_results, Some(answers.len()));
    assert_eq!(answers[1].node_bindings["n0"], "n0");
    assert_eq!(answers[1].node_bindings["n1"], PREDNISONE_CHEBI);
    assert_eq!(answers[1].edge_bindings["e0"], vec!["n0_Prednisone_CHEBI:8382"]);
    assert_eq!(answers[1].score, 0.001);
}

#[tokio::test]
async fn test_curie_shared_by_several_features() {
    let message = reasoner()
        .one_hop(&one_hop_query(DEMOGRAPHICS_NCIT, "named_thing", "disease_or_phenotypic_feature"))
        .await;
    assert!(message.is_ok(), "{}", message.code_description);
    assert_eq!(message.n_results, Some(5));

    let answers = message.answers.unwrap();
    let scores: Vec<f64> = answers.iter().map(|a| a.score).collect();
    assert_eq!(scores, vec![0.01, 0.01, 0.04, 0.02, 0.02]);
    let targets: Vec<&str> = answers.iter().map(|a| a.node_bindings["n1"].as_str()).collect();
    assert_eq!(targets, vec![ASTHMA_MONDO, ASTHMA_HP, OBESITY_MONDO, ASTHMA_MONDO, ASTHMA_HP]);

    let kg = message.knowledge_graph.unwrap();
    assert_eq!(kg.nodes.len(), 6);
    let edge_ids: Vec<&str> = kg.edges.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(
        edge_ids,
        vec![
            "n0_AsthmaDx_MONDO:0004979",
            "n0_AsthmaDx_HP:0002099",
            "n0_ObesityDx_MONDO:0011122",
            "n0_AsthmaDx_MONDO:0004979",
            "n0_AsthmaDx_HP:0002099",
        ]
    );
}

#[tokio::test]
async fn test_closure_and_p_value_filter() {
    let query = hop_query(
        json!({"type": "disease", "curie": ASTHMA_MONDO}),
        json!({"type": "named_thing"}),
        "association",
        json!({"year": 2010, "maximum_p_value": 0.1}),
    );
    let message = reasoner().one_hop(&query).await;
    let kg = message.knowledge_graph.unwrap();
    let names: Vec<&str> = kg.nodes[1..].iter().filter_map(|n| n.name.as_deref()).collect();
    assert_eq!(names, vec!["Prednisone", "Prednisone"]);
}

#[tokio::test]
async fn test_cohort_source_is_rejected_before_store() {
    let counting = Arc::new(CountingStore::new(Fixture::new().store));
    let fixture = Fixture::with_store(counting.clone());
    let reasoner = Reasoner::new(fixture.store, fixture.features, fixture.identifiers);

    let message = reasoner
        .one_hop(&one_hop_query(ASTHMA_MONDO, "population_of_individual_organisms", "disease"))
        .await;
    assert_eq!(message.message_code, MessageCode::Error);
    assert!(message.code_description.starts_with("Source node must be one of"));

    let message = reasoner
        .one_hop(&one_hop_query(ASTHMA_MONDO, "disease", "gene"))
        .await;
    assert_eq!(message.message_code, MessageCode::Error);
    assert_eq!(counting.calls(), 0);
}

#[tokio::test]
async fn test_source_without_curie() {
    let query = hop_query(
        json!({"type": "disease"}),
        json!({"type": "drug"}),
        "association",
        json!({"year": 2010}),
    );
    let message = reasoner().one_hop(&query).await;
    assert_eq!(message.code_description, "no curie specified at node n0");
}

#[tokio::test]
async fn test_unknown_curie() {
    let message = reasoner()
        .one_hop(&one_hop_query("MONDO:9999999", "disease", "drug"))
        .await;
    assert_eq!(message.message_code, MessageCode::Error);
    assert!(message.code_description.contains("MONDO:9999999"));
}
