use serde::de::DeserializeOwned;

use crate::error::ParseError;
use crate::types::ScenarioSuite;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
    Auto,
}

#[derive(Debug, Clone)]
pub struct ParsedSuite {
    pub suite: ScenarioSuite,
    pub format: DocumentFormat,
}

pub fn parse_suite_str(input: &str, format: DocumentFormat) -> Result<ParsedSuite, ParseError> {
    let (suite, format) = parse_str(input, format)?;
    Ok(ParsedSuite { suite, format })
}

/// Parse any document in the suite/config family with format auto-detection.
pub fn parse_str<T: DeserializeOwned>(
    input: &str,
    format: DocumentFormat,
) -> Result<(T, DocumentFormat), ParseError> {
    match format {
        DocumentFormat::Json => Ok((serde_json::from_str::<T>(input)?, format)),
        DocumentFormat::Yaml => Ok((serde_yaml::from_str::<T>(input)?, format)),
        DocumentFormat::Auto => parse_str_auto(input),
    }
}

fn parse_str_auto<T: DeserializeOwned>(input: &str) -> Result<(T, DocumentFormat), ParseError> {
    // Heuristic: JSON always starts with `{` or `[` after trimming.
    let trimmed = input.trim_start();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        match serde_json::from_str::<T>(input) {
            Ok(doc) => return Ok((doc, DocumentFormat::Json)),
            Err(e) => {
                // If JSON parsing fails, try YAML as fallback.
                if let Ok(doc) = serde_yaml::from_str::<T>(input) {
                    return Ok((doc, DocumentFormat::Yaml));
                }
                // Return the JSON error since we tried JSON first.
                return Err(ParseError::Json(e));
            }
        }
    }

    match serde_yaml::from_str::<T>(input) {
        Ok(doc) => Ok((doc, DocumentFormat::Yaml)),
        Err(e) => {
            if let Ok(doc) = serde_json::from_str::<T>(input) {
                return Ok((doc, DocumentFormat::Json));
            }
            Err(ParseError::Yaml(e))
        }
    }
}
