mod path;
mod template;

pub use path::{ExtractPath, PathParseError};
pub use template::{malformed_placeholder, parse_template, Segment, Template, VAR_RE};
