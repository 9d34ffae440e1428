//! Feature qualifiers as they appear in `query_options`.
//!
//! A qualifier pairs a comparison operator with one or more feature values,
//! e.g. `{"operator": "=", "value": 2}` or
//! `{"operator": "between", "value_a": 1, "value_b": 3}`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{CommonError, Result};

/// A single feature value. Integers are tried before floats so that `2`
/// stays an integer on the way through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureValue::Integer(v) => write!(f, "{v}"),
            FeatureValue::Float(v) => write!(f, "{v}"),
            FeatureValue::Text(v) => write!(f, "{v}"),
        }
    }
}

impl From<i64> for FeatureValue {
    fn from(v: i64) -> Self {
        FeatureValue::Integer(v)
    }
}

impl From<i32> for FeatureValue {
    fn from(v: i32) -> Self {
        FeatureValue::Integer(i64::from(v))
    }
}

impl From<f64> for FeatureValue {
    fn from(v: f64) -> Self {
        FeatureValue::Float(v)
    }
}

impl From<&str> for FeatureValue {
    fn from(v: &str) -> Self {
        FeatureValue::Text(v.to_string())
    }
}

impl From<String> for FeatureValue {
    fn from(v: String) -> Self {
        FeatureValue::Text(v)
    }
}

/// Comparison applied to a feature column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "operator")]
pub enum Qualifier {
    #[serde(rename = "=")]
    Eq { value: FeatureValue },
    #[serde(rename = "<>")]
    Ne { value: FeatureValue },
    #[serde(rename = "<")]
    Lt { value: FeatureValue },
    #[serde(rename = ">")]
    Gt { value: FeatureValue },
    #[serde(rename = "<=")]
    Le { value: FeatureValue },
    #[serde(rename = ">=")]
    Ge { value: FeatureValue },
    #[serde(rename = "between")]
    Between { value_a: FeatureValue, value_b: FeatureValue },
    #[serde(rename = "in")]
    In { values: Vec<FeatureValue> },
}

impl Qualifier {
    /// Equality qualifier, the form used when enumerating feature values.
    pub fn equals(value: impl Into<FeatureValue>) -> Self {
        Qualifier::Eq { value: value.into() }
    }

    pub fn operator(&self) -> &'static str {
        match self {
            Qualifier::Eq { .. } => "=",
            Qualifier::Ne { .. } => "<>",
            Qualifier::Lt { .. } => "<",
            Qualifier::Gt { .. } => ">",
            Qualifier::Le { .. } => "<=",
            Qualifier::Ge { .. } => ">=",
            Qualifier::Between { .. } => "between",
            Qualifier::In { .. } => "in",
        }
    }
}

impl fmt::Display for Qualifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Qualifier::Eq { value }
            | Qualifier::Ne { value }
            | Qualifier::Lt { value }
            | Qualifier::Gt { value }
            | Qualifier::Le { value }
            | Qualifier::Ge { value } => write!(f, "{}{}", self.operator(), value),
            Qualifier::Between { value_a, value_b } => write!(f, "between {value_a} and {value_b}"),
            Qualifier::In { values } => {
                let joined: Vec<String> = values.iter().map(ToString::to_string).collect();
                write!(f, "in [{}]", joined.join(", "))
            }
        }
    }
}

/// Either a single qualifier or a list of them; both shapes are accepted
/// in `query_options.feature`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QualifierSet {
    One(Qualifier),
    Many(Vec<Qualifier>),
}

impl QualifierSet {
    pub fn to_vec(&self) -> Vec<Qualifier> {
        match self {
            QualifierSet::One(q) => vec![q.clone()],
            QualifierSet::Many(qs) => qs.clone(),
        }
    }
}

/// A feature together with the value bins to compare against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSpec {
    pub feature_name: String,
    pub feature_qualifiers: Vec<Qualifier>,
}

/// Cohort filters: feature name → qualifier a patient must satisfy.
pub type FeatureFilters = BTreeMap<String, Qualifier>;

/// Turn the `{feature_name: qualifier(s)}` object of a query into a
/// [`FeatureSpec`]. Exactly one feature must be named.
pub fn to_qualifiers(feature: &BTreeMap<String, QualifierSet>) -> Result<FeatureSpec> {
    let mut entries = feature.iter();
    let (name, set) = match (entries.next(), entries.next()) {
        (Some(entry), None) => entry,
        _ => {
            return Err(CommonError::InvalidFeature(format!(
                "expected exactly one feature, found {}",
                feature.len()
            )))
        }
    };

    let feature_qualifiers = set.to_vec();
    if feature_qualifiers.is_empty() {
        return Err(CommonError::InvalidFeature(format!(
            "feature {name} has no qualifiers"
        )));
    }

    Ok(FeatureSpec {
        feature_name: name.clone(),
        feature_qualifiers,
    })
}
