use crate::expressions::ExtractPath;
use crate::types::AnyValue;

/// Why an extraction path could not be followed through a decoded body.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    #[error("key `{key}` not found at `{at}`")]
    MissingKey { key: String, at: String },
    #[error("index `{index}` out of range (len {len}) at `{at}`")]
    IndexOutOfRange {
        index: String,
        len: usize,
        at: String,
    },
    #[error("cannot descend into {found} with segment `{segment}` at `{at}`")]
    TypeMismatch {
        segment: String,
        found: &'static str,
        at: String,
    },
}

/// Walk `body` along `path`, one segment at a time.
///
/// Mappings require the segment to be an existing key; sequences require it
/// to parse as an in-bounds non-negative index. Every other value type ends
/// the descent.
pub fn extract_value(body: &AnyValue, path: &ExtractPath) -> Result<AnyValue, PathError> {
    let mut current = body;
    let mut walked = vec!["content"];

    for segment in path.segments() {
        let at = walked.join(".");
        match current {
            AnyValue::Object(map) => {
                current = map.get(segment).ok_or_else(|| PathError::MissingKey {
                    key: segment.clone(),
                    at,
                })?;
            }
            AnyValue::Array(items) => {
                let index = segment
                    .parse::<usize>()
                    .ok()
                    .filter(|i| *i < items.len())
                    .ok_or_else(|| PathError::IndexOutOfRange {
                        index: segment.clone(),
                        len: items.len(),
                        at,
                    })?;
                current = &items[index];
            }
            other => {
                return Err(PathError::TypeMismatch {
                    segment: segment.clone(),
                    found: type_name(other),
                    at,
                });
            }
        }
        walked.push(segment.as_str());
    }

    Ok(current.clone())
}

fn type_name(v: &AnyValue) -> &'static str {
    match v {
        AnyValue::Null => "null",
        AnyValue::Bool(_) => "boolean",
        AnyValue::Number(_) => "number",
        AnyValue::String(_) => "string",
        AnyValue::Array(_) => "array",
        AnyValue::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn path(expr: &str) -> ExtractPath {
        ExtractPath::parse(expr).unwrap()
    }

    #[test]
    fn walks_mappings_and_sequences() {
        let body = json!({"data": {"items": [{"id": 1}, {"id": 42}]}});
        let v = extract_value(&body, &path("content.data.items.1.id")).unwrap();
        assert_eq!(v, json!(42));
    }

    #[test]
    fn missing_key_is_explicit() {
        let body = json!({"data": {"items": [{"id": 1}, {"id": 42}]}});
        let err = extract_value(&body, &path("content.data.missing")).unwrap_err();
        assert!(matches!(err, PathError::MissingKey { ref key, .. } if key == "missing"));
        assert!(err.to_string().contains("content.data"));
    }

    #[test]
    fn out_of_range_index_is_explicit() {
        let body = json!({"items": [1, 2]});
        let err = extract_value(&body, &path("content.items.5")).unwrap_err();
        assert!(
            matches!(err, PathError::IndexOutOfRange { ref index, len: 2, .. } if index == "5")
        );
    }

    #[test]
    fn non_numeric_segment_on_sequence_is_out_of_range() {
        let body = json!({"items": [1, 2]});
        let err = extract_value(&body, &path("content.items.first")).unwrap_err();
        assert!(matches!(err, PathError::IndexOutOfRange { .. }));
    }

    #[test]
    fn descending_into_a_scalar_is_a_type_mismatch() {
        let body = json!({"token": "xyz"});
        let err = extract_value(&body, &path("content.token.inner")).unwrap_err();
        assert!(matches!(
            err,
            PathError::TypeMismatch { found: "string", .. }
        ));
    }
}
