//! Feature → feature hop: the source node is a curie, resolved to the
//! features that carry it.

use serde_json::Value;
use tracing::info;

use crate::cohort::message_cohort;
use crate::error::{KgError, Result};
use crate::features::query_feature;
use crate::identifiers::icees_identifiers;
use crate::model::QueryMessage;
use crate::overlay::convert_qnode_to_node;
use crate::reasoner::{Outcome, Reasoner};
use crate::schema::get_schema;
use crate::translator::{associations_to_type, HopQuery, ResultBuilder, SearchOptions};

pub(crate) async fn one_hop(reasoner: &Reasoner, query: &Value) -> Result<Outcome> {
    let message = QueryMessage::from_query(query)?;
    let options = &message.query_options;
    let search = SearchOptions::resolve(options, reasoner.settings())?;

    let graph = message.query_graph.as_ref().ok_or(KgError::MissingQueryGraph)?;
    let hop = HopQuery::parse(graph)?;
    get_schema().validate_one_hop(hop.source_type, hop.target_type, hop.edge_type)?;
    let curie = hop.source.require_curie()?;

    let cohort = message_cohort(reasoner.store(), options, &reasoner.settings().default_table).await?;
    let source_features = icees_identifiers(reasoner.identifiers(), &cohort.table, hop.source)?;

    let mut associations = Vec::new();
    for source_feature in &source_features {
        let feature = query_feature(reasoner.features(), &cohort.table, source_feature)?;
        associations.extend(
            associations_to_type(
                reasoner.store(),
                &cohort,
                &feature,
                search.maximum_p_value,
                hop.target_type,
            )
            .await?,
        );
    }

    // The source stays the question node: edges and bindings refer to its id.
    let mut builder = ResultBuilder::new(reasoner.identifiers(), &cohort.table, &search.filter, &hop);
    builder.push_node(convert_qnode_to_node(hop.source)?);
    for association in &associations {
        builder.add_association(hop.source_id, association);
    }

    let outcome = builder.finish(graph.clone());
    info!(
        curie,
        cohort_id = %cohort.cohort_id,
        source_features = source_features.len(),
        n_results = outcome.answers.as_ref().map_or(0, Vec::len),
        "Resolved one-hop query"
    );
    Ok(outcome)
}
