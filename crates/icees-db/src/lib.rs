//! ICEES data layer
//!
//! Collaborator surfaces the reasoner core talks to:
//!
//! - [`AssociationStore`]: cohort resolution and association/p-value lookups
//!   against the cohort feature tables
//! - [`FeatureCatalog`]: static per-table feature metadata (type, enum, range)
//! - [`IdentifierCatalog`]: mapping between feature names and ontology curies
//!
//! [`MemoryStore`] implements [`AssociationStore`] over a YAML fixture and
//! backs the CLI and the test suites.
//!
//! # Example
//!
//! ```rust,no_run
//! use icees_db::{FeatureCatalog, IdentifierCatalog, MemoryStore};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let features = FeatureCatalog::load("./data/features.yml")?;
//!     let identifiers = IdentifierCatalog::load("./data/identifiers.yml")?;
//!     let store = MemoryStore::load("./data/store.yml")?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod features;
pub mod identifiers;
pub mod memory;
pub mod schema;
pub mod store;

pub use error::{DbError, Result};
pub use features::{FeatureCatalog, FeatureDef, FeatureType};
pub use identifiers::IdentifierCatalog;
pub use memory::MemoryStore;
pub use schema::{AssociatedFeature, Association, CohortDefinition, FeatureMatrix};
pub use store::{AssociationStore, ClassPredicate};
