/// A parsed extraction expression: `content.<seg>.<seg>...`.
///
/// Segments stay untyped strings; whether a segment acts as a mapping key or
/// a sequence index is decided against the body at traversal time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractPath {
    raw: String,
    segments: Vec<String>,
}

impl ExtractPath {
    pub fn parse(expr: &str) -> Result<Self, PathParseError> {
        // The root alone carries no segment to walk.
        if expr == "content" {
            return Err(PathParseError::EmptySegment);
        }
        let rest = expr
            .strip_prefix("content.")
            .ok_or(PathParseError::MissingRoot)?;
        if rest.is_empty() {
            return Err(PathParseError::EmptySegment);
        }
        let segments: Vec<String> = rest.split('.').map(|s| s.to_string()).collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(PathParseError::EmptySegment);
        }
        Ok(Self {
            raw: expr.to_string(),
            segments,
        })
    }

    /// Parse a bare field path as used in assertion rules, where the
    /// `content.` root is implicit.
    pub fn parse_field(field: &str) -> Result<Self, PathParseError> {
        Self::parse(&format!("content.{field}"))
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathParseError {
    #[error("extraction expression must start with the root token `content.`")]
    MissingRoot,
    #[error("extraction expression must have at least one non-empty segment after `content`")]
    EmptySegment,
}
