mod common;
mod rule;
mod scenario;

pub use common::{AnyValue, Extensions};
pub use rule::ValidationRule;
pub use scenario::{Scenario, ScenarioSuite};
