//! The reasoner facade: three entry points that never fail, each turning
//! a query into a [`ReasonerMessage`].

use chrono::Local;
use icees_common::ReasonerSettings;
use icees_db::{AssociationStore, FeatureCatalog, IdentifierCatalog};
use serde_json::Value;
use std::sync::Arc;
use tracing::error;

use crate::error::Result;
use crate::model::{Answer, KnowledgeGraph, MessageCode, QueryGraph, ReasonerMessage};
use crate::schema::{get_schema, TypeSchema};
use crate::{one_hop, overlay, translator};

/// What a successful operation hands back before the response header is
/// attached.
#[derive(Debug)]
pub(crate) struct Outcome {
    pub question_graph: QueryGraph,
    pub knowledge_graph: KnowledgeGraph,
    pub answers: Option<Vec<Answer>>,
}

/// Query translator over a cohort association store.
///
/// Cheap to share: collaborators sit behind `Arc` and every entry point
/// takes `&self`.
pub struct Reasoner {
    store: Arc<dyn AssociationStore>,
    features: Arc<FeatureCatalog>,
    identifiers: Arc<IdentifierCatalog>,
    settings: ReasonerSettings,
}

impl Reasoner {
    pub fn new(
        store: Arc<dyn AssociationStore>,
        features: Arc<FeatureCatalog>,
        identifiers: Arc<IdentifierCatalog>,
    ) -> Self {
        Self {
            store,
            features,
            identifiers,
            settings: ReasonerSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: ReasonerSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &ReasonerSettings {
        &self.settings
    }

    /// The static type schema queries are validated against.
    pub fn schema(&self) -> &'static TypeSchema {
        get_schema()
    }

    pub(crate) fn store(&self) -> &dyn AssociationStore {
        self.store.as_ref()
    }

    pub(crate) fn features(&self) -> &FeatureCatalog {
        &self.features
    }

    pub(crate) fn identifiers(&self) -> &IdentifierCatalog {
        &self.identifiers
    }

    /// Associations between the cohort (source node) and features of the
    /// target node's type.
    pub async fn get(&self, query: &Value) -> ReasonerMessage {
        self.respond("get", translator::get(self, query).await)
    }

    /// Associations between the features carrying the source node's curie
    /// and features of the target node's type.
    pub async fn one_hop(&self, query: &Value) -> ReasonerMessage {
        self.respond("one_hop", one_hop::one_hop(self, query).await)
    }

    /// Pairwise co-occurrence edges between every node of the caller's
    /// knowledge graph.
    pub async fn co_occurrence_overlay(&self, query: &Value) -> ReasonerMessage {
        self.respond(
            "co_occurrence_overlay",
            overlay::co_occurrence_overlay(self, query).await,
        )
    }

    fn respond(&self, operation: &'static str, outcome: Result<Outcome>) -> ReasonerMessage {
        let datetime = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

        match outcome {
            Ok(outcome) => ReasonerMessage {
                reasoner_id: self.settings.reasoner_id.clone(),
                tool_version: self.settings.tool_version.clone(),
                datetime,
                message_code: MessageCode::Ok,
                code_description: String::new(),
                question_graph: Some(outcome.question_graph),
                knowledge_graph: Some(outcome.knowledge_graph),
                n_results: outcome.answers.as_ref().map(Vec::len),
                answers: outcome.answers,
            },
            Err(err) => {
                error!(operation, error = %err, details = ?err, "Query failed");
                ReasonerMessage {
                    reasoner_id: self.settings.reasoner_id.clone(),
                    tool_version: self.settings.tool_version.clone(),
                    datetime,
                    message_code: MessageCode::Error,
                    code_description: err.to_string(),
                    question_graph: None,
                    knowledge_graph: None,
                    answers: None,
                    n_results: None,
                }
            }
        }
    }
}
