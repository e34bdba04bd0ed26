use std::collections::BTreeMap;

use sequor_core::parser::{parse_str, DocumentFormat};
use sequor_core::types::AnyValue;
use sequor_core::ParseError;

/// One environment out of the config document.
///
/// Fields beyond the engine defaults land in `vars` and serve as template
/// resolution fallbacks (credentials for an initial login scenario, host
/// aliases, and the like).
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EnvConfig {
    pub base_url: String,

    /// Engine-wide request timeout in seconds; scenarios may override.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Engine-wide TLS verification default; scenarios may override.
    #[serde(default = "default_verify")]
    pub verify: bool,

    #[serde(flatten, default)]
    pub vars: BTreeMap<String, AnyValue>,
}

fn default_timeout() -> u64 {
    30
}

fn default_verify() -> bool {
    true
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout: default_timeout(),
            verify: default_verify(),
            vars: BTreeMap::new(),
        }
    }
}

/// The whole config file: environment name -> environment object.
pub type EnvDocument = BTreeMap<String, EnvConfig>;

pub fn parse_env_document(input: &str) -> Result<EnvDocument, ParseError> {
    let (doc, _format) = parse_str::<EnvDocument>(input, DocumentFormat::Auto)?;
    Ok(doc)
}

pub fn select_env(doc: &EnvDocument, name: &str) -> Result<EnvConfig, ConfigError> {
    doc.get(name)
        .cloned()
        .ok_or_else(|| ConfigError::UnknownEnvironment {
            name: name.to_string(),
            known: doc.keys().cloned().collect(),
        })
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown environment `{name}` (known: {})", known.join(", "))]
    UnknownEnvironment { name: String, known: Vec<String> },
}
