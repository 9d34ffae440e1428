//! Static type schema: which (source type, target type, edge type) triples a
//! query may ask for, and the subtype hierarchy used to widen target types.

use regex::Regex;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

use crate::error::{KgError, Result};

pub const POPULATION_OF_INDIVIDUAL_ORGANISMS: &str = "population_of_individual_organisms";
pub const ASSOCIATION: &str = "association";

const TARGET_TYPES: &[&str] = &[
    "activity_and_behavior",
    "chemical_substance",
    "disease",
    "disease_or_phenotypic_feature",
    "drug",
    "environment",
    "named_thing",
    "phenotypic_feature",
];

const SUBTYPES: &[(&str, &[&str])] = &[
    ("chemical_substance", &["drug"]),
    ("disease_or_phenotypic_feature", &["disease", "phenotypic_feature"]),
    ("named_thing", &["chemical_substance", "disease_or_phenotypic_feature", "environment"]),
];

/// `source_type → target_type → [edge_type]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TypeSchema {
    triples: BTreeMap<String, BTreeMap<String, Vec<String>>>,
}

impl TypeSchema {
    fn icees() -> Self {
        let targets = TARGET_TYPES
            .iter()
            .map(|t| (t.to_string(), vec![ASSOCIATION.to_string()]))
            .collect();
        let mut triples = BTreeMap::new();
        triples.insert(POPULATION_OF_INDIVIDUAL_ORGANISMS.to_string(), targets);
        Self { triples }
    }

    pub fn source_types(&self) -> Vec<String> {
        self.triples.keys().cloned().collect()
    }

    /// Check a (source, target, edge) triple, naming the legal alternatives
    /// of the first level that fails.
    pub fn validate(&self, source: &str, target: &str, edge_type: Option<&str>) -> Result<()> {
        let targets = self
            .triples
            .get(source)
            .ok_or_else(|| KgError::UnsupportedSourceType {
                found: source.to_string(),
                allowed: self.source_types(),
            })?;

        let edge_types = targets
            .get(target)
            .ok_or_else(|| KgError::UnsupportedTargetType {
                found: target.to_string(),
                allowed: targets.keys().cloned().collect(),
            })?;

        match edge_type {
            Some(edge) if edge_types.iter().any(|e| e == edge) => Ok(()),
            other => Err(KgError::UnsupportedEdgeType {
                found: other.unwrap_or("none").to_string(),
                allowed: edge_types.clone(),
            }),
        }
    }

    /// Check a feature-to-feature hop: `source` must itself be a feature
    /// type, and the cohort-level triple for `target` must be allowed.
    pub fn validate_one_hop(&self, source: &str, target: &str, edge_type: Option<&str>) -> Result<()> {
        let cohort_type = self
            .triples
            .iter()
            .find(|(_, targets)| targets.contains_key(source))
            .map(|(cohort_type, _)| cohort_type.as_str())
            .ok_or_else(|| KgError::UnsupportedSourceType {
                found: source.to_string(),
                allowed: self.feature_types(),
            })?;
        self.validate(cohort_type, target, edge_type)
    }

    fn feature_types(&self) -> Vec<String> {
        let mut types: Vec<String> = self
            .triples
            .values()
            .flat_map(|targets| targets.keys().cloned())
            .collect();
        types.sort();
        types.dedup();
        types
    }
}

/// The process-wide schema.
pub fn get_schema() -> &'static TypeSchema {
    static SCHEMA: OnceLock<TypeSchema> = OnceLock::new();
    SCHEMA.get_or_init(TypeSchema::icees)
}

fn subtypes() -> &'static HashMap<&'static str, &'static [&'static str]> {
    static SUBTYPE_MAP: OnceLock<HashMap<&'static str, &'static [&'static str]>> = OnceLock::new();
    SUBTYPE_MAP.get_or_init(|| SUBTYPES.iter().copied().collect())
}

/// `node_type` followed by the pre-order expansion of its subtypes.
///
/// The subtype table is assumed acyclic.
pub fn closure_subtype(node_type: &str) -> Vec<String> {
    let mut closure = vec![node_type.to_string()];
    for subtype in subtypes().get(node_type).copied().unwrap_or_default() {
        closure.extend(closure_subtype(subtype));
    }
    closure
}

fn camel_boundaries() -> &'static (Regex, Regex) {
    static RE: OnceLock<(Regex, Regex)> = OnceLock::new();
    RE.get_or_init(|| {
        (
            Regex::new(r"([A-Z]+)([A-Z][a-z])").unwrap(),
            Regex::new(r"([a-z\d])([A-Z])").unwrap(),
        )
    })
}

/// Snake-case a biolink class: `ChemicalSubstance` → `chemical_substance`.
/// A leading `biolink:` prefix is dropped.
pub fn underscore(class: &str) -> String {
    let class = class.strip_prefix("biolink:").unwrap_or(class);
    let (acronym, lower_upper) = camel_boundaries();
    let word = acronym.replace_all(class, "${1}_${2}");
    let word = lower_upper.replace_all(&word, "${1}_${2}");
    word.replace('-', "_").to_lowercase()
}
