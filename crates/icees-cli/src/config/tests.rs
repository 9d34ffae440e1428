use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_empty_config_uses_defaults() {
    let config = Config::from_toml_str("").unwrap();
    assert_eq!(config.reasoner, ReasonerSettings::default());
    assert_eq!(config.data.store, PathBuf::from("data/store.yml"));
    assert_eq!(config.logging.filter, default_filter());
}

#[test]
fn test_partial_sections() {
    let config = Config::from_toml_str(
        r#"
        [reasoner]
        maximum_p_value = 0.05
        regex = "MONDO"

        [data]
        store = "/srv/icees/store.yml"
        "#,
    )
    .unwrap();

    assert_eq!(config.reasoner.maximum_p_value, 0.05);
    assert_eq!(config.reasoner.regex, "MONDO");
    assert_eq!(config.reasoner.reasoner_id, "ICEES");
    assert_eq!(config.data.store, PathBuf::from("/srv/icees/store.yml"));
    assert_eq!(config.data.features, PathBuf::from("data/features.yml"));
}

#[test]
fn test_example_config_parses() {
    let example = include_str!("../../../../icees.example.toml");
    let config = Config::from_toml_str(example).unwrap();
    assert_eq!(config.reasoner.tool_version, "3.0.0");
    assert_eq!(config.reasoner.default_table, "patient");
}

#[test]
fn test_missing_file() {
    let err = Config::load_from(Path::new("/nonexistent/icees.toml")).unwrap_err();
    assert!(err.to_string().contains("Config file not found"));
}
