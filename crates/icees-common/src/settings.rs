//! Reasoner settings shared by the core pipeline and the binary.
//!
//! Every field has a serde default so an empty `[reasoner]` table (or none
//! at all) yields the stock ICEES behaviour.

use serde::{Deserialize, Serialize};

/// Identity and query defaults of the reasoner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReasonerSettings {
    /// Value of `reasoner_id` in every response
    #[serde(default = "default_reasoner_id")]
    pub reasoner_id: String,

    /// Value of `tool_version` in every response
    #[serde(default = "default_tool_version")]
    pub tool_version: String,

    /// Cohort table used when the query names none
    #[serde(default = "default_table")]
    pub default_table: String,

    /// Upper bound on association p-values when the query gives none
    #[serde(default = "default_maximum_p_value")]
    pub maximum_p_value: f64,

    /// Identifier filter applied when the query gives none
    #[serde(default = "default_regex")]
    pub regex: String,
}

fn default_reasoner_id() -> String { "ICEES".to_string() }
fn default_tool_version() -> String { "3.0.0".to_string() }
fn default_table() -> String { "patient".to_string() }
fn default_maximum_p_value() -> f64 { 1.0 }
fn default_regex() -> String { ".*".to_string() }

impl Default for ReasonerSettings {
    fn default() -> Self {
        Self {
            reasoner_id: default_reasoner_id(),
            tool_version: default_tool_version(),
            default_table: default_table(),
            maximum_p_value: default_maximum_p_value(),
            regex: default_regex(),
        }
    }
}
