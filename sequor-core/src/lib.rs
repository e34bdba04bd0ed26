#![forbid(unsafe_code)]

pub mod error;
pub mod expressions;
pub mod extract;
pub mod parser;
pub mod planner;
pub mod types;
pub mod validate;

pub use crate::error::{ParseError, SequorError, ValidationError};
pub use crate::extract::{extract_value, PathError};
pub use crate::parser::{parse_suite_str, DocumentFormat, ParsedSuite};
pub use crate::planner::{plan_suite, Plan, ScenarioIo};
pub use crate::types::{Scenario, ScenarioSuite};
pub use crate::validate::validate_suite;
