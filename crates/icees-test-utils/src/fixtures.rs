//! An asthma cohort fixture.
//!
//! `COHORT:1` is the whole `patient` table for 2010 (120 patients),
//! `COHORT:2` its female subset (64 patients). Associations are computed
//! over `COHORT:1`:
//!
//! | feature_a     | feature_b  | class              | p     |
//! |---------------|------------|--------------------|-------|
//! | AgeStudyStart | AsthmaDx   | Disease            | 0.01  |
//! | AgeStudyStart | ObesityDx  | PhenotypicFeature  | 0.04  |
//! | AgeStudyStart | Prednisone | ChemicalSubstance  | 0.2   |
//! | AsthmaDx      | Prednisone | ChemicalSubstance  | 0.001 |
//! | AsthmaDx      | ObesityDx  | PhenotypicFeature  | 0.3   |
//! | Sex2          | AsthmaDx   | Disease            | 0.02  |
//!
//! `DEMOGRAPHICS_NCIT` is carried by both `AgeStudyStart` and `Sex2`.

use icees_common::{FeatureFilters, Qualifier};
use icees_db::{
    AssociatedFeature, Association, AssociationStore, CohortDefinition, FeatureCatalog, FeatureDef, FeatureType,
    IdentifierCatalog, MemoryStore,
};
use std::sync::Arc;

pub const TABLE: &str = "patient";
pub const YEAR: i32 = 2010;
pub const COHORT_ALL: &str = "COHORT:1";
pub const COHORT_FEMALE: &str = "COHORT:2";

pub const ASTHMA_MONDO: &str = "MONDO:0004979";
pub const ASTHMA_HP: &str = "HP:0002099";
pub const PREDNISONE_MESH: &str = "MESH:D011241";
pub const PREDNISONE_CHEBI: &str = "CHEBI:8382";
pub const OBESITY_MONDO: &str = "MONDO:0011122";
pub const DEMOGRAPHICS_NCIT: &str = "NCIT:C16495";

/// Collaborators for a `Reasoner`, each behind an `Arc`.
pub struct Fixture {
    pub store: Arc<dyn AssociationStore>,
    pub features: Arc<FeatureCatalog>,
    pub identifiers: Arc<IdentifierCatalog>,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_store(Arc::new(memory_store()))
    }

    /// The fixture catalogs around a different store.
    pub fn with_store(store: Arc<dyn AssociationStore>) -> Self {
        Self {
            store,
            features: Arc::new(feature_catalog()),
            identifiers: Arc::new(identifier_catalog()),
        }
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

fn string_feature(values: &[&str], class: &str) -> FeatureDef {
    FeatureDef {
        feature_type: FeatureType::String,
        enum_values: Some(values.iter().map(|v| v.to_string()).collect()),
        minimum: None,
        maximum: None,
        biolink_class: Some(class.to_string()),
    }
}

fn integer_feature(minimum: i64, maximum: i64, class: &str) -> FeatureDef {
    FeatureDef {
        feature_type: FeatureType::Integer,
        enum_values: None,
        minimum: Some(minimum),
        maximum: Some(maximum),
        biolink_class: Some(class.to_string()),
    }
}

pub fn feature_catalog() -> FeatureCatalog {
    FeatureCatalog::default()
        .with(
            TABLE,
            "AgeStudyStart",
            string_feature(&["0-2", "3-17", "18-34", "35-50", "51-69", "70-89"], "PopulationOfIndividualOrganisms"),
        )
        .with(TABLE, "Sex2", string_feature(&["Male", "Female"], "PopulationOfIndividualOrganisms"))
        .with(TABLE, "AsthmaDx", integer_feature(0, 1, "Disease"))
        .with(TABLE, "ObesityDx", integer_feature(0, 1, "PhenotypicFeature"))
        .with(TABLE, "Prednisone", integer_feature(0, 1, "ChemicalSubstance"))
        .with(TABLE, "TotalEDVisits", integer_feature(0, 2, "ActivityAndBehavior"))
        .with(
            TABLE,
            "Weight",
            FeatureDef {
                feature_type: FeatureType::Number,
                enum_values: None,
                minimum: None,
                maximum: None,
                biolink_class: None,
            },
        )
}

pub fn identifier_catalog() -> IdentifierCatalog {
    IdentifierCatalog::default()
        .with(TABLE, "AgeStudyStart", &[DEMOGRAPHICS_NCIT])
        .with(TABLE, "Sex2", &[DEMOGRAPHICS_NCIT])
        .with(TABLE, "AsthmaDx", &[ASTHMA_MONDO, ASTHMA_HP])
        .with(TABLE, "ObesityDx", &[OBESITY_MONDO])
        .with(TABLE, "Prednisone", &[PREDNISONE_MESH, PREDNISONE_CHEBI, PREDNISONE_MESH])
        .with(TABLE, "Weight", &["LOINC:29463-7"])
}

/// `feature_a` → `feature_b` association row.
pub fn association(feature_a: &str, feature_b: &str, class: &str, p_value: f64) -> Association {
    Association {
        feature_a: AssociatedFeature {
            feature_name: feature_a.to_string(),
            biolink_class: String::new(),
            feature_qualifiers: Vec::new(),
        },
        feature_b: AssociatedFeature {
            feature_name: feature_b.to_string(),
            biolink_class: class.to_string(),
            feature_qualifiers: Vec::new(),
        },
        p_value,
        chi_squared: None,
        total: None,
    }
}

pub fn memory_store() -> MemoryStore {
    let mut female = FeatureFilters::new();
    female.insert("Sex2".to_string(), Qualifier::equals("Female"));

    MemoryStore::new()
        .with_cohort(CohortDefinition {
            cohort_id: COHORT_ALL.to_string(),
            table: TABLE.to_string(),
            year: Some(YEAR),
            features: FeatureFilters::new(),
            size: 120,
        })
        .with_cohort(CohortDefinition {
            cohort_id: COHORT_FEMALE.to_string(),
            table: TABLE.to_string(),
            year: Some(YEAR),
            features: female,
            size: 64,
        })
        .with_association(COHORT_ALL, association("AgeStudyStart", "AsthmaDx", "Disease", 0.01))
        .with_association(COHORT_ALL, association("AgeStudyStart", "ObesityDx", "PhenotypicFeature", 0.04))
        .with_association(COHORT_ALL, association("AgeStudyStart", "Prednisone", "ChemicalSubstance", 0.2))
        .with_association(COHORT_ALL, association("AsthmaDx", "Prednisone", "ChemicalSubstance", 0.001))
        .with_association(COHORT_ALL, association("AsthmaDx", "ObesityDx", "PhenotypicFeature", 0.3))
        .with_association(COHORT_ALL, association("Sex2", "AsthmaDx", "Disease", 0.02))
        .with_feature_matrix(TABLE, Some(YEAR), "AsthmaDx", "AsthmaDx", 0.0)
        .with_feature_matrix(TABLE, Some(YEAR), "AsthmaDx", "Prednisone", 0.001)
        .with_feature_matrix(TABLE, Some(YEAR), "Prednisone", "AsthmaDx", 0.001)
        .with_feature_matrix(TABLE, Some(YEAR), "Prednisone", "Prednisone", 0.0)
}
