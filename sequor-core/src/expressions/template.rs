use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

/// `${name}` template placeholder. Distinct from `{name}` path-parameter
/// markers, which the request compiler substitutes after resolution.
pub static VAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{(\w+)\}").expect("valid"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Var(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub segments: Vec<Segment>,
}

impl Template {
    pub fn has_vars(&self) -> bool {
        self.segments
            .iter()
            .any(|s| matches!(s, Segment::Var(_)))
    }

    pub fn var_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Var(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }
}

/// Split a string into literal and placeholder segments, left to right.
///
/// Substituting each `Var` segment exactly once guarantees termination: text
/// produced by a substitution is never re-scanned.
pub fn parse_template(input: &str) -> Template {
    let mut segments = Vec::new();
    let mut last = 0;
    for m in VAR_RE.find_iter(input) {
        if m.start() > last {
            segments.push(Segment::Literal(input[last..m.start()].to_string()));
        }
        // Strip the `${` and `}` delimiters.
        segments.push(Segment::Var(input[m.start() + 2..m.end() - 1].to_string()));
        last = m.end();
    }
    if last < input.len() {
        segments.push(Segment::Literal(input[last..].to_string()));
    }
    Template { segments }
}

/// Byte offset of the first `${` that does not open a well-formed
/// placeholder, if any. Used by suite validation.
pub fn malformed_placeholder(input: &str) -> Option<usize> {
    let valid: BTreeSet<usize> = VAR_RE.find_iter(input).map(|m| m.start()).collect();
    input
        .match_indices("${")
        .map(|(i, _)| i)
        .find(|i| !valid.contains(i))
}
