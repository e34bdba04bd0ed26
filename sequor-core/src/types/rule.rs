use std::collections::BTreeMap;

use crate::types::{AnyValue, Extensions};

/// One assertion rule: `{equals: {field: expected}}`.
///
/// `field` is a dotted path into the decoded response body (the implicit
/// `content.` root is prepended at evaluation time). Unknown rule kinds land
/// in `extensions` and are rejected by validation.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ValidationRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equals: Option<BTreeMap<String, AnyValue>>,

    #[serde(flatten, default)]
    pub extensions: Extensions,
}
