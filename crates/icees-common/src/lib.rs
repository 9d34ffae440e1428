//! Shared types used across the ICEES reasoner crates.

pub mod error;
pub mod qualifiers;
pub mod settings;

// Re-export commonly used types
pub use error::{CommonError, Result};
pub use qualifiers::{to_qualifiers, FeatureFilters, FeatureSpec, FeatureValue, Qualifier, QualifierSet};
pub use settings::ReasonerSettings;
