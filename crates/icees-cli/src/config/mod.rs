//! Configuration loading for the icees binary.
//! Reads icees.toml from the current directory or the path in ICEES_CONFIG.

use icees_common::ReasonerSettings;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub reasoner: ReasonerSettings,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Paths of the YAML data files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_features_path")]
    pub features: PathBuf,
    #[serde(default = "default_identifiers_path")]
    pub identifiers: PathBuf,
    #[serde(default = "default_store_path")]
    pub store: PathBuf,
}

fn default_features_path()    -> PathBuf { PathBuf::from("data/features.yml") }
fn default_identifiers_path() -> PathBuf { PathBuf::from("data/identifiers.yml") }
fn default_store_path()       -> PathBuf { PathBuf::from("data/store.yml") }

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            features: default_features_path(),
            identifiers: default_identifiers_path(),
            store: default_store_path(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directives, overridden by `RUST_LOG`
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_filter() -> String { "icees_kg=info,icees_db=info,warn".to_string() }

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { filter: default_filter() }
    }
}

impl Config {
    /// Load from `ICEES_CONFIG`, or `icees.toml` when unset.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("ICEES_CONFIG")
            .unwrap_or_else(|_| "icees.toml".to_string());
        Self::load_from(Path::new(&path))
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            anyhow::bail!(
                "Config file not found: {}\n\
                 Copy icees.example.toml to icees.toml and edit it.",
                path.display()
            );
        }

        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests;
