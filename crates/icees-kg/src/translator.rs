//! Two-node / one-edge query translation.
//!
//! [`HopQuery`] checks the shape of a question graph, [`ResultBuilder`]
//! turns associations into knowledge-graph nodes, edges and answers, and
//! [`get`] ties them together for the cohort → feature case.

use icees_common::{to_qualifiers, FeatureSpec, ReasonerSettings};
use icees_db::{Association, AssociationStore, ClassPredicate, IdentifierCatalog};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::cohort::{message_cohort, Cohort};
use crate::error::{KgError, Result};
use crate::identifiers::{name_to_ids, IdFilter};
use crate::model::{
    Answer, EdgeAttributes, KgEdge, KgNode, KnowledgeGraph, QNode, QueryGraph, QueryMessage, QueryOptions,
};
use crate::reasoner::{Outcome, Reasoner};
use crate::schema::{closure_subtype, get_schema, underscore, ASSOCIATION, POPULATION_OF_INDIVIDUAL_ORGANISMS};

pub const SCORE_NAME: &str = "p value";

/// `<source>_<feature>_<node>`.
pub fn gen_edge_id(source_id: &str, feature_name: &str, node_id: &str) -> String {
    format!("{source_id}_{feature_name}_{node_id}")
}

// ---------------------------------------------------------------------------
// Request options
// ---------------------------------------------------------------------------

/// Per-request thresholds, with settings as fallback.
#[derive(Debug)]
pub(crate) struct SearchOptions {
    pub maximum_p_value: f64,
    pub filter: IdFilter,
}

impl SearchOptions {
    pub fn resolve(options: &QueryOptions, settings: &ReasonerSettings) -> Result<Self> {
        let pattern = options.regex.as_deref().unwrap_or(&settings.regex);
        Ok(Self {
            maximum_p_value: options.maximum_p_value.unwrap_or(settings.maximum_p_value),
            filter: IdFilter::new(pattern)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Query shape
// ---------------------------------------------------------------------------

/// A validated two-node / one-edge question graph.
#[derive(Debug)]
pub(crate) struct HopQuery<'a> {
    pub source: &'a QNode,
    pub source_id: &'a str,
    pub source_type: &'a str,
    pub target_id: &'a str,
    pub target_type: &'a str,
    pub edge_id: &'a str,
    pub edge_type: Option<&'a str>,
}

impl<'a> HopQuery<'a> {
    pub fn parse(graph: &'a QueryGraph) -> Result<Self> {
        if graph.nodes.len() != 2 {
            return Err(KgError::NodeCount(graph.nodes.len()));
        }
        if graph.edges.len() != 1 {
            return Err(KgError::EdgeCount(graph.edges.len()));
        }

        let mut nodes = BTreeMap::new();
        for node in &graph.nodes {
            nodes.insert(node.require_id()?, node);
        }
        let lookup = |id: &str| {
            nodes
                .get(id)
                .copied()
                .ok_or_else(|| KgError::UnknownQueryNode(id.to_string()))
        };

        let edge = &graph.edges[0];
        let source_id = edge.require_source_id()?;
        let target_id = edge.require_target_id()?;
        let source = lookup(source_id)?;
        let target = lookup(target_id)?;

        Ok(Self {
            source,
            source_id,
            source_type: source.require_type()?,
            target_id,
            target_type: target.require_type()?,
            edge_id: edge.require_id()?,
            edge_type: edge.edge_type.as_deref(),
        })
    }
}

// ---------------------------------------------------------------------------
// Association lookup
// ---------------------------------------------------------------------------

/// Associations of `feature` over the cohort whose `feature_b` class falls
/// within the subtype closure of `target_type`.
pub(crate) async fn associations_to_type(
    store: &dyn AssociationStore,
    cohort: &Cohort,
    feature: &FeatureSpec,
    maximum_p_value: f64,
    target_type: &str,
) -> Result<Vec<Association>> {
    let supported_types = closure_subtype(target_type);
    let accepts: &ClassPredicate = &move |class: &str| supported_types.contains(&underscore(class));

    let associations = store
        .select_associations_to_all_features(
            &cohort.table,
            cohort.year,
            &cohort.cohort_id,
            feature,
            maximum_p_value,
            Some(accepts),
        )
        .await?;

    debug!(
        feature = %feature.feature_name,
        target_type,
        n_associations = associations.len(),
        "Fetched associations"
    );
    Ok(associations)
}

// ---------------------------------------------------------------------------
// Result assembly
// ---------------------------------------------------------------------------

/// Accumulates knowledge-graph nodes, edges and answers for one hop.
pub(crate) struct ResultBuilder<'a> {
    identifiers: &'a IdentifierCatalog,
    table: &'a str,
    filter: &'a IdFilter,
    hop: &'a HopQuery<'a>,
    knowledge_graph: KnowledgeGraph,
    answers: Vec<Answer>,
}

impl<'a> ResultBuilder<'a> {
    pub fn new(identifiers: &'a IdentifierCatalog, table: &'a str, filter: &'a IdFilter, hop: &'a HopQuery<'a>) -> Self {
        Self {
            identifiers,
            table,
            filter,
            hop,
            knowledge_graph: KnowledgeGraph::default(),
            answers: Vec::new(),
        }
    }

    pub fn push_node(&mut self, node: KgNode) {
        self.knowledge_graph.nodes.push(node);
    }

    /// One node, edge and answer per identifier of `feature_b`, bound to
    /// `bound_source` on the source side.
    pub fn add_association(&mut self, bound_source: &str, association: &Association) {
        let feature_name = &association.feature_b.feature_name;

        for node_id in name_to_ids(self.identifiers, self.table, self.filter, feature_name) {
            let edge_id = gen_edge_id(bound_source, feature_name, &node_id);

            self.knowledge_graph.nodes.push(KgNode {
                name: Some(feature_name.clone()),
                id: node_id.clone(),
                node_type: Some(association.feature_b.biolink_class.clone()),
                curie: None,
            });
            self.knowledge_graph.edges.push(KgEdge {
                edge_type: Some(ASSOCIATION.to_string()),
                id: edge_id.clone(),
                source_id: Some(bound_source.to_string()),
                target_id: Some(node_id.clone()),
                relation: None,
                negated: None,
                edge_attributes: Some(EdgeAttributes::Association(Box::new(association.clone()))),
            });

            let mut node_bindings = BTreeMap::new();
            node_bindings.insert(self.hop.source_id.to_string(), bound_source.to_string());
            node_bindings.insert(self.hop.target_id.to_string(), node_id);
            let mut edge_bindings = BTreeMap::new();
            edge_bindings.insert(self.hop.edge_id.to_string(), vec![edge_id]);

            self.answers.push(Answer {
                node_bindings,
                edge_bindings,
                score: association.p_value,
                score_name: SCORE_NAME.to_string(),
            });
        }
    }

    pub fn finish(self, question_graph: QueryGraph) -> Outcome {
        Outcome {
            question_graph,
            knowledge_graph: self.knowledge_graph,
            answers: Some(self.answers),
        }
    }
}

// ---------------------------------------------------------------------------
// get
// ---------------------------------------------------------------------------

pub(crate) async fn get(reasoner: &Reasoner, query: &Value) -> Result<Outcome> {
    let message = QueryMessage::from_query(query)?;
    let options = &message.query_options;
    let search = SearchOptions::resolve(options, reasoner.settings())?;
    let feature = to_qualifiers(options.feature.as_ref().ok_or(KgError::MissingFeature)?)?;

    let graph = message.query_graph.as_ref().ok_or(KgError::MissingQueryGraph)?;
    let hop = HopQuery::parse(graph)?;
    get_schema().validate(hop.source_type, hop.target_type, hop.edge_type)?;

    let cohort = message_cohort(reasoner.store(), options, &reasoner.settings().default_table).await?;
    let associations = associations_to_type(
        reasoner.store(),
        &cohort,
        &feature,
        search.maximum_p_value,
        hop.target_type,
    )
    .await?;

    let mut builder = ResultBuilder::new(reasoner.identifiers(), &cohort.table, &search.filter, &hop);
    builder.push_node(KgNode {
        name: Some("cohort".to_string()),
        id: cohort.cohort_id.clone(),
        node_type: Some(POPULATION_OF_INDIVIDUAL_ORGANISMS.to_string()),
        curie: None,
    });
    for association in &associations {
        builder.add_association(&cohort.cohort_id, association);
    }

    let outcome = builder.finish(graph.clone());
    info!(
        cohort_id = %cohort.cohort_id,
        feature = %feature.feature_name,
        n_results = outcome.answers.as_ref().map_or(0, Vec::len),
        "Translated query"
    );
    Ok(outcome)
}
