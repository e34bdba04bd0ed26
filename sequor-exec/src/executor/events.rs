use async_trait::async_trait;
use serde_json::json;

use crate::executor::outcome::Stage;

/// What the runner reports as it walks a suite. Formatting and aggregation
/// live behind the sink; the engine only emits.
#[derive(Debug, Clone)]
pub enum Event {
    RunStarted {
        scenarios: usize,
    },
    ScenarioStarted {
        name: String,
    },
    VariableStored {
        scenario: String,
        name: String,
    },
    /// Lenient mode only: a placeholder stayed unresolved and was left as-is.
    VariableUnresolved {
        scenario: String,
        name: String,
    },
    ExtractionFailed {
        scenario: String,
        expression: String,
        message: String,
    },
    ScenarioPassed {
        name: String,
    },
    ScenarioFailed {
        name: String,
        stage: Stage,
        message: String,
    },
    RunFinished {
        passed: usize,
        failed: usize,
        errored: usize,
    },
}

#[async_trait]
pub trait EventSink: Send + Sync {
    async fn emit(&self, event: Event);
}

pub struct NoOpEventSink;

#[async_trait]
impl EventSink for NoOpEventSink {
    async fn emit(&self, _event: Event) {}
}

/// JSON lines on stdout, one object per event.
pub struct StdoutEventSink;

#[async_trait]
impl EventSink for StdoutEventSink {
    async fn emit(&self, event: Event) {
        let json = match event {
            Event::RunStarted { scenarios } => {
                json!({ "type": "run.started", "scenarios": scenarios })
            }
            Event::ScenarioStarted { name } => {
                json!({ "type": "scenario.started", "name": name })
            }
            Event::VariableStored { scenario, name } => {
                json!({ "type": "variable.stored", "scenario": scenario, "name": name })
            }
            Event::VariableUnresolved { scenario, name } => {
                json!({ "type": "variable.unresolved", "scenario": scenario, "name": name })
            }
            Event::ExtractionFailed {
                scenario,
                expression,
                message,
            } => {
                json!({
                    "type": "extraction.failed",
                    "scenario": scenario,
                    "expression": expression,
                    "message": message,
                })
            }
            Event::ScenarioPassed { name } => {
                json!({ "type": "scenario.passed", "name": name })
            }
            Event::ScenarioFailed {
                name,
                stage,
                message,
            } => {
                json!({
                    "type": "scenario.failed",
                    "name": name,
                    "stage": stage.as_str(),
                    "message": message,
                })
            }
            Event::RunFinished {
                passed,
                failed,
                errored,
            } => {
                json!({
                    "type": "run.finished",
                    "passed": passed,
                    "failed": failed,
                    "errored": errored,
                })
            }
        };
        println!("{}", serde_json::to_string(&json).unwrap_or_default());
    }
}

pub struct CompositeEventSink {
    sinks: Vec<Box<dyn EventSink>>,
}

impl Default for CompositeEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl CompositeEventSink {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn add(&mut self, sink: Box<dyn EventSink>) {
        self.sinks.push(sink);
    }
}

#[async_trait]
impl EventSink for CompositeEventSink {
    async fn emit(&self, event: Event) {
        for sink in &self.sinks {
            sink.emit(event.clone()).await;
        }
    }
}
