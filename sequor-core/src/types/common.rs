use std::collections::BTreeMap;

pub type AnyValue = serde_json::Value;

/// Unknown fields captured from a suite document.
///
/// Scenarios and rules deserialize "extra" fields into this map; validation
/// rejects anything that is not an `x-` prefixed extension.
pub type Extensions = BTreeMap<String, serde_json::Value>;
