use std::collections::BTreeMap;
use std::time::Duration;

use sequor_core::types::{AnyValue, Scenario};

use crate::config::EnvConfig;

/// A fully compiled request, consumed only by the transport.
#[derive(Debug, Clone)]
pub struct RequestParts {
    pub method: String,
    pub url: url::Url,
    pub headers: BTreeMap<String, String>,
    pub body: Option<Vec<u8>>,
    pub timeout: Duration,
    pub verify: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error("invalid url `{url}`: {message}")]
    InvalidUrl { url: String, message: String },
    #[error("body must be a JSON value, a form mapping, or a raw string")]
    UnsupportedBody,
    #[error("failed to serialize JSON body: {0}")]
    BodySerialize(#[from] serde_json::Error),
}

/// Turn a template-resolved scenario into concrete request parts.
///
/// `{name}` path-parameter markers are substituted (percent-encoded) before
/// the url is joined onto the base endpoint; an occurrence preceded by `$`
/// is a template placeholder, never a path marker. Body encoding precedence:
/// `json`, then mapping-typed `data` (urlencoded), then string `data` (raw).
pub fn compile_request(scenario: &Scenario, env: &EnvConfig) -> Result<RequestParts, CompileError> {
    let mut raw_url = scenario.url.clone();
    if let Some(path_params) = &scenario.path_params {
        for (name, value) in path_params {
            let encoded = urlencoding::encode(&scalar_string(value)).into_owned();
            raw_url = substitute_path_param(&raw_url, name, &encoded);
        }
    }

    let absolute = if is_absolute(&raw_url) {
        raw_url
    } else {
        let base = env.base_url.trim_end_matches('/');
        if raw_url.starts_with('/') {
            format!("{base}{raw_url}")
        } else {
            format!("{base}/{raw_url}")
        }
    };

    let mut url = url::Url::parse(&absolute).map_err(|e| CompileError::InvalidUrl {
        url: absolute.clone(),
        message: e.to_string(),
    })?;

    if let Some(params) = &scenario.params {
        let mut qp = url.query_pairs_mut();
        for (k, v) in params {
            // A sequence value appends one pair per element (repeated keys).
            match v {
                AnyValue::Array(items) => {
                    for item in items {
                        qp.append_pair(k, &scalar_string(item));
                    }
                }
                other => {
                    qp.append_pair(k, &scalar_string(other));
                }
            }
        }
    }

    let mut headers = BTreeMap::<String, String>::new();
    if let Some(map) = &scenario.headers {
        for (k, v) in map {
            headers.insert(k.clone(), scalar_string(v));
        }
    }

    let body = encode_body(scenario, &mut headers)?;

    Ok(RequestParts {
        method: scenario.method.to_ascii_uppercase(),
        url,
        headers,
        body,
        timeout: Duration::from_secs(scenario.timeout.unwrap_or(env.timeout)),
        verify: scenario.verify.unwrap_or(env.verify),
    })
}

fn encode_body(
    scenario: &Scenario,
    headers: &mut BTreeMap<String, String>,
) -> Result<Option<Vec<u8>>, CompileError> {
    if let Some(json) = &scenario.json {
        let bytes = serde_json::to_vec(json)?;
        set_default_content_type(headers, "application/json");
        return Ok(Some(bytes));
    }

    match &scenario.data {
        None => Ok(None),
        Some(AnyValue::Object(map)) => {
            let mut form = url::form_urlencoded::Serializer::new(String::new());
            for (k, v) in map {
                form.append_pair(k, &scalar_string(v));
            }
            set_default_content_type(headers, "application/x-www-form-urlencoded");
            Ok(Some(form.finish().into_bytes()))
        }
        Some(AnyValue::String(s)) => Ok(Some(s.clone().into_bytes())),
        Some(_) => Err(CompileError::UnsupportedBody),
    }
}

/// Default the content type only when the caller has not set one already.
fn set_default_content_type(headers: &mut BTreeMap<String, String>, value: &str) {
    let already_set = headers
        .keys()
        .any(|k| k.eq_ignore_ascii_case("content-type"));
    if !already_set {
        headers.insert("Content-Type".to_string(), value.to_string());
    }
}

fn is_absolute(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Replace `{name}` occurrences unless preceded by `$`, so an unresolved
/// `${name}` template placeholder is never mistaken for a path parameter.
fn substitute_path_param(url: &str, name: &str, value: &str) -> String {
    let marker = format!("{{{name}}}");
    let mut out = String::with_capacity(url.len());
    let mut rest = url;
    while let Some(pos) = rest.find(&marker) {
        let preceded_by_dollar = pos > 0 && rest.as_bytes()[pos - 1] == b'$';
        out.push_str(&rest[..pos]);
        if preceded_by_dollar {
            out.push_str(&marker);
        } else {
            out.push_str(value);
        }
        rest = &rest[pos + marker.len()..];
    }
    out.push_str(rest);
    out
}

fn scalar_string(v: &AnyValue) -> String {
    match v {
        AnyValue::String(s) => s.clone(),
        AnyValue::Number(n) => n.to_string(),
        AnyValue::Bool(b) => b.to_string(),
        AnyValue::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_marker_preceded_by_dollar_is_left_alone() {
        let out = substitute_path_param("/users/${id}/pets/{id}", "id", "7");
        assert_eq!(out, "/users/${id}/pets/7");
    }

    #[test]
    fn path_marker_value_is_percent_encoded() {
        let out = substitute_path_param("/files/{name}", "name", "a%2Fb");
        assert_eq!(out, "/files/a%2Fb");
    }
}
