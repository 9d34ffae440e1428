//! Value enumeration for a feature, used when no qualifiers are given.

use icees_common::{FeatureSpec, Qualifier};
use icees_db::{FeatureCatalog, FeatureType};

use crate::error::{KgError, Result};

/// Largest integer range enumerated into `=` qualifiers.
pub const MAX_INTEGER_VALUES: usize = 1024;

/// One `=` qualifier per possible value of `feature`: every enum member of a
/// string feature, every integer of `minimum..=maximum` of an integer one.
pub fn query_feature(catalog: &FeatureCatalog, table: &str, feature: &str) -> Result<FeatureSpec> {
    let def = catalog.get(table, feature)?;

    let feature_qualifiers = match def.feature_type {
        FeatureType::String => def
            .enum_values
            .as_ref()
            .ok_or_else(|| KgError::MissingEnum(feature.to_string()))?
            .iter()
            .map(|value| Qualifier::equals(value.as_str()))
            .collect(),
        FeatureType::Integer => match (def.minimum, def.maximum) {
            (Some(minimum), Some(maximum)) => {
                let size = i128::from(maximum) - i128::from(minimum) + 1;
                if size > MAX_INTEGER_VALUES as i128 {
                    return Err(KgError::RangeTooLarge {
                        feature: feature.to_string(),
                        minimum,
                        maximum,
                        size,
                        limit: MAX_INTEGER_VALUES,
                    });
                }
                (minimum..=maximum).map(Qualifier::equals).collect()
            }
            _ => return Err(KgError::MissingRange(feature.to_string())),
        },
        other => {
            return Err(KgError::UnsupportedFeatureType {
                feature: feature.to_string(),
                feature_type: other,
            })
        }
    };

    Ok(FeatureSpec {
        feature_name: feature.to_string(),
        feature_qualifiers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use icees_db::FeatureDef;
    use pretty_assertions::assert_eq;

    fn def(feature_type: FeatureType) -> FeatureDef {
        FeatureDef {
            feature_type,
            enum_values: None,
            minimum: None,
            maximum: None,
            biolink_class: None,
        }
    }

    fn catalog() -> FeatureCatalog {
        FeatureCatalog::default()
            .with(
                "patient",
                "Sex2",
                FeatureDef {
                    enum_values: Some(vec!["Male".to_string(), "Female".to_string()]),
                    ..def(FeatureType::String)
                },
            )
            .with(
                "patient",
                "TotalEDVisits",
                FeatureDef {
                    minimum: Some(0),
                    maximum: Some(2),
                    ..def(FeatureType::Integer)
                },
            )
            .with("patient", "Race", def(FeatureType::String))
            .with(
                "patient",
                "Open",
                FeatureDef {
                    minimum: Some(0),
                    ..def(FeatureType::Integer)
                },
            )
            .with("patient", "Weight", def(FeatureType::Number))
            .with(
                "patient",
                "PatientId",
                FeatureDef {
                    minimum: Some(i64::MIN),
                    maximum: Some(i64::MAX),
                    ..def(FeatureType::Integer)
                },
            )
    }

    #[test]
    fn test_integer_range_is_inclusive() {
        let spec = query_feature(&catalog(), "patient", "TotalEDVisits").unwrap();
        assert_eq!(
            spec.feature_qualifiers,
            vec![Qualifier::equals(0), Qualifier::equals(1), Qualifier::equals(2)]
        );
    }

    #[test]
    fn test_integer_range_is_capped() {
        let catalog = catalog().with(
            "patient",
            "Visits",
            FeatureDef {
                minimum: Some(1),
                maximum: Some(MAX_INTEGER_VALUES as i64),
                ..def(FeatureType::Integer)
            },
        );
        let spec = query_feature(&catalog, "patient", "Visits").unwrap();
        assert_eq!(spec.feature_qualifiers.len(), MAX_INTEGER_VALUES);

        let err = query_feature(&catalog, "patient", "PatientId").unwrap_err();
        assert!(matches!(
            err,
            KgError::RangeTooLarge { size, .. } if size == 1i128 << 64
        ));
    }

    #[test]
    fn test_string_enum() {
        let spec = query_feature(&catalog(), "patient", "Sex2").unwrap();
        assert_eq!(spec.feature_name, "Sex2");
        assert_eq!(
            spec.feature_qualifiers,
            vec![Qualifier::equals("Male"), Qualifier::equals("Female")]
        );
    }

    #[test]
    fn test_incomplete_definitions() {
        let catalog = catalog();
        assert!(matches!(
            query_feature(&catalog, "patient", "Race"),
            Err(KgError::MissingEnum(_))
        ));
        assert!(matches!(
            query_feature(&catalog, "patient", "Open"),
            Err(KgError::MissingRange(_))
        ));
        let err = query_feature(&catalog, "patient", "Weight").unwrap_err();
        assert_eq!(err.to_string(), "feature Weight has unsupported type number");
        assert!(matches!(
            query_feature(&catalog, "patient", "Missing"),
            Err(KgError::Store(_))
        ));
    }
}
