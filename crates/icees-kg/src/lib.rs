//! ICEES knowledge-graph reasoner core.
//!
//! Translates two-node / one-edge question graphs into cohort feature
//! associations and packages them as knowledge-graph answers.
//!
//! # Example
//!
//! ```rust,no_run
//! use icees_db::{FeatureCatalog, IdentifierCatalog, MemoryStore};
//! use icees_kg::Reasoner;
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let reasoner = Reasoner::new(
//!     Arc::new(MemoryStore::load("./data/store.yml")?),
//!     Arc::new(FeatureCatalog::load("./data/features.yml")?),
//!     Arc::new(IdentifierCatalog::load("./data/identifiers.yml")?),
//! );
//! let query = serde_json::from_str(&std::fs::read_to_string("./demos/get.json")?)?;
//! let message = reasoner.get(&query).await;
//! println!("{}", serde_json::to_string_pretty(&message)?);
//! # Ok(())
//! # }
//! ```

pub mod cohort;
pub mod error;
pub mod features;
pub mod identifiers;
pub mod model;
pub mod one_hop;
pub mod overlay;
pub mod reasoner;
pub mod schema;
pub mod translator;

pub use cohort::{message_cohort, Cohort};
pub use error::{KgError, Result};
pub use features::query_feature;
pub use identifiers::{icees_identifiers, name_to_ids, IdFilter};
pub use model::{
    Answer, CoOccurrence, EdgeAttributes, KgEdge, KgNode, KnowledgeGraph, MessageCode, QEdge, QNode, QueryGraph,
    QueryMessage, QueryOptions, ReasonerMessage,
};
pub use overlay::{convert_qedge_to_edge, convert_qnode_to_node, generate_edge_id};
pub use reasoner::Reasoner;
pub use schema::{closure_subtype, get_schema, underscore, TypeSchema};
pub use translator::gen_edge_id;
