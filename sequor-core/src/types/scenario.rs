use std::collections::BTreeMap;

use crate::types::{AnyValue, Extensions, ValidationRule};

/// An ordered suite of scenarios. Declaration order is the execution order;
/// later scenarios may consume variables a prior scenario extracted.
pub type ScenarioSuite = Vec<Scenario>;

/// One declarative HTTP test case, immutable once parsed.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Scenario {
    pub name: String,

    pub method: String,

    /// Request url; joined onto the environment base endpoint unless it is
    /// already absolute. May contain `{name}` path-parameter markers.
    pub url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "path_params")]
    pub path_params: Option<BTreeMap<String, AnyValue>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, AnyValue>>,

    /// Query parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<BTreeMap<String, AnyValue>>,

    /// Form body (mapping, urlencoded) or raw body (string). Ignored when
    /// `json` is present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<AnyValue>,

    /// JSON body; takes precedence over `data`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json: Option<AnyValue>,

    /// Per-scenario request timeout in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,

    /// TLS certificate verification for this scenario.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verify: Option<bool>,

    /// Variables this scenario provides: new variable name -> extraction
    /// expression rooted at `content`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extract: Option<BTreeMap<String, String>>,

    /// Ordered assertion rules evaluated against the response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validate: Option<Vec<ValidationRule>>,

    #[serde(flatten, default)]
    pub extensions: Extensions,
}
