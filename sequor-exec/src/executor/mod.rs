mod assertions;
mod events;
mod http;
mod outcome;
mod replay;
mod request;
mod resolve;
mod response;
mod runner;

pub use assertions::{evaluate_rules, AssertError};
pub use events::{CompositeEventSink, Event, EventSink, NoOpEventSink, StdoutEventSink};
pub use http::{HttpError, HttpTransport, ReqwestTransport};
pub use outcome::{RunReport, ScenarioOutcome, ScenarioStatus, Stage};
pub use replay::{ReplayEntry, ReplayTransport};
pub use request::{compile_request, CompileError, RequestParts};
pub use resolve::{
    resolve_scenario, resolve_value, Leniency, ResolveContext, ResolveError, ResolveOutput,
};
pub use response::{DecodeError, ResponseRecord};
pub use runner::{Runner, RunnerConfig};
