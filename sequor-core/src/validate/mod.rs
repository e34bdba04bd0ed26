mod rules;
mod validator;

pub use validator::Validator;

use crate::error::ValidationError;
use crate::types::ScenarioSuite;

/// Structural validation of a parsed suite: run before execution so that a
/// malformed scenario fails the whole document, not scenario N at runtime.
pub fn validate_suite(suite: &ScenarioSuite) -> Result<(), ValidationError> {
    let mut v = Validator::new();
    v.validate_suite(suite);
    v.finish()
}
