pub mod plan;
pub mod run;
pub mod validate;
pub mod vars;
