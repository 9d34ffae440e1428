//! Feature name ↔ curie resolution on top of the identifier catalog.

use icees_db::IdentifierCatalog;
use regex::Regex;
use std::collections::HashSet;

use crate::error::{KgError, Result};
use crate::model::QNode;

/// Identifier filter from `query_options.regex`, matched at the start of the
/// identifier.
#[derive(Debug, Clone)]
pub struct IdFilter {
    pattern: String,
    regex: Regex,
}

impl IdFilter {
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(&format!("^(?:{pattern})")).map_err(|source| KgError::InvalidRegex {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self {
            pattern: pattern.to_string(),
            regex,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn is_match(&self, id: &str) -> bool {
        self.regex.is_match(id)
    }
}

/// Distinct identifiers of `feature` in first-seen order, filtered.
pub fn name_to_ids(catalog: &IdentifierCatalog, table: &str, filter: &IdFilter, feature: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    catalog
        .get_identifiers(table, feature)
        .into_iter()
        .filter(|id| seen.insert(id.clone()))
        .filter(|id| filter.is_match(id))
        .collect()
}

/// Feature names carrying the node's curie.
pub fn icees_identifiers(catalog: &IdentifierCatalog, table: &str, node: &QNode) -> Result<Vec<String>> {
    let curie = node.require_curie()?;
    Ok(catalog.get_features_by_identifier(table, curie)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use icees_db::DbError;
    use pretty_assertions::assert_eq;

    fn catalog() -> IdentifierCatalog {
        IdentifierCatalog::default()
            .with("patient", "AsthmaDx", &["MONDO:0004979", "HP:0002099", "MONDO:0004979"])
            .with("patient", "AsthmaDxOther", &["HP:0002099"])
    }

    #[test]
    fn test_name_to_ids_dedupes_in_order() {
        let all = IdFilter::new(".*").unwrap();
        assert_eq!(
            name_to_ids(&catalog(), "patient", &all, "AsthmaDx"),
            vec!["MONDO:0004979", "HP:0002099"]
        );
    }

    #[test]
    fn test_name_to_ids_regex_anchored_at_start() {
        let mondo = IdFilter::new("MONDO").unwrap();
        assert_eq!(name_to_ids(&catalog(), "patient", &mondo, "AsthmaDx"), vec!["MONDO:0004979"]);

        let inner = IdFilter::new("0004979").unwrap();
        assert!(name_to_ids(&catalog(), "patient", &inner, "AsthmaDx").is_empty());
    }

    #[test]
    fn test_name_to_ids_unknown_feature_is_empty() {
        let all = IdFilter::new(".*").unwrap();
        assert!(name_to_ids(&catalog(), "patient", &all, "Nope").is_empty());
        assert!(name_to_ids(&catalog(), "visit", &all, "AsthmaDx").is_empty());
    }

    #[test]
    fn test_invalid_regex() {
        let err = IdFilter::new("(").unwrap_err();
        assert!(matches!(err, KgError::InvalidRegex { .. }));
    }

    #[test]
    fn test_icees_identifiers() {
        let node = QNode {
            id: Some("n0".to_string()),
            curie: Some("HP:0002099".to_string()),
            ..QNode::default()
        };
        assert_eq!(
            icees_identifiers(&catalog(), "patient", &node).unwrap(),
            vec!["AsthmaDx", "AsthmaDxOther"]
        );

        let no_curie = QNode {
            id: Some("n1".to_string()),
            ..QNode::default()
        };
        let err = icees_identifiers(&catalog(), "patient", &no_curie).unwrap_err();
        assert_eq!(err.to_string(), "no curie specified at node n1");

        let unknown = QNode {
            curie: Some("MONDO:9".to_string()),
            ..QNode::default()
        };
        assert!(matches!(
            icees_identifiers(&catalog(), "patient", &unknown),
            Err(KgError::Store(DbError::IdentifierNotFound { .. }))
        ));
    }
}
