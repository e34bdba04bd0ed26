#![forbid(unsafe_code)]

pub mod config;
pub mod executor;

pub use config::{parse_env_document, select_env, ConfigError, EnvConfig, EnvDocument};
pub use executor::{
    CompositeEventSink, Event, EventSink, HttpError, HttpTransport, Leniency, NoOpEventSink,
    ReplayTransport, ReqwestTransport, RunReport, Runner, RunnerConfig, ScenarioOutcome,
    ScenarioStatus, Stage, StdoutEventSink,
};
