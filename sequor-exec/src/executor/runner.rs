use std::sync::Arc;

use sequor_core::expressions::ExtractPath;
use sequor_core::extract::extract_value;
use sequor_core::types::{AnyValue, Scenario};
use sequor_store::{VarMap, VariableStore};

use crate::config::EnvConfig;
use crate::executor::assertions::{evaluate_rules, AssertError};
use crate::executor::events::{Event, EventSink};
use crate::executor::http::HttpTransport;
use crate::executor::outcome::{RunReport, ScenarioOutcome, Stage};
use crate::executor::request::compile_request;
use crate::executor::resolve::{resolve_scenario, Leniency, ResolveContext};
use crate::executor::response::ResponseRecord;

#[derive(Debug, Clone, Copy, Default)]
pub struct RunnerConfig {
    pub leniency: Leniency,
}

/// Sequential scenario orchestrator.
///
/// Scenario N+1 never starts before scenario N completes; the store is the
/// only shared mutable resource and each write is a full load-modify-store
/// cycle, which is safe precisely because execution is single-writer and
/// in order. A failed scenario never halts the run; a later scenario that
/// needed its variables fails its own RESOLVE stage instead.
pub struct Runner {
    store: Arc<dyn VariableStore>,
    transport: Arc<dyn HttpTransport>,
    sink: Arc<dyn EventSink>,
    env: EnvConfig,
    config: RunnerConfig,
}

impl Runner {
    pub fn new(
        store: Arc<dyn VariableStore>,
        transport: Arc<dyn HttpTransport>,
        sink: Arc<dyn EventSink>,
        env: EnvConfig,
    ) -> Self {
        Self {
            store,
            transport,
            sink,
            env,
            config: RunnerConfig::default(),
        }
    }

    pub fn with_config(mut self, config: RunnerConfig) -> Self {
        self.config = config;
        self
    }

    pub async fn run(&self, suite: &[Scenario]) -> RunReport {
        self.sink
            .emit(Event::RunStarted {
                scenarios: suite.len(),
            })
            .await;

        let mut report = RunReport::default();
        for scenario in suite {
            self.sink
                .emit(Event::ScenarioStarted {
                    name: scenario.name.clone(),
                })
                .await;

            let outcome = self.run_scenario(scenario).await;
            match &outcome.stage {
                None => {
                    self.sink
                        .emit(Event::ScenarioPassed {
                            name: outcome.name.clone(),
                        })
                        .await;
                }
                Some(stage) => {
                    self.sink
                        .emit(Event::ScenarioFailed {
                            name: outcome.name.clone(),
                            stage: *stage,
                            message: outcome.detail.clone().unwrap_or_default(),
                        })
                        .await;
                }
            }
            report.record(outcome);
        }

        self.sink
            .emit(Event::RunFinished {
                passed: report.passed_count(),
                failed: report.failed_count(),
                errored: report.errored_count(),
            })
            .await;
        report
    }

    /// RESOLVE -> COMPILE -> DISPATCH -> EXTRACT -> ASSERT for one scenario.
    /// Any stage failure ends the scenario and reports the stage it died in.
    async fn run_scenario(&self, scenario: &Scenario) -> ScenarioOutcome {
        let name = scenario.name.as_str();

        // RESOLVE
        let ctx = ResolveContext {
            store: self.store.as_ref(),
            env: &self.env,
            leniency: self.config.leniency,
        };
        let resolved = match resolve_scenario(scenario, &ctx).await {
            Ok(r) => r,
            Err(e) => return ScenarioOutcome::error(name, Stage::Resolve, e.to_string()),
        };
        for var in &resolved.unresolved {
            self.sink
                .emit(Event::VariableUnresolved {
                    scenario: name.to_string(),
                    name: var.clone(),
                })
                .await;
        }

        // COMPILE
        let parts = match compile_request(&resolved.scenario, &self.env) {
            Ok(p) => p,
            Err(e) => return ScenarioOutcome::error(name, Stage::Compile, e.to_string()),
        };

        // DISPATCH
        let record = match self.transport.send(parts).await {
            Ok(r) => r,
            Err(e) => return ScenarioOutcome::error(name, Stage::Dispatch, e.to_string()),
        };

        // EXTRACT
        let mut decoded: Option<AnyValue> = None;
        if let Some(extract) = &resolved.scenario.extract {
            if !extract.is_empty() {
                let body = match self.decode(&record, &mut decoded, Stage::Extract, name) {
                    Ok(b) => b,
                    Err(outcome) => return *outcome,
                };
                for (var, expr) in extract {
                    match extract_one(&body, expr) {
                        Ok(value) => {
                            let mut vars = VarMap::new();
                            vars.insert(var.clone(), value);
                            if let Err(e) = self.store.update(vars).await {
                                return ScenarioOutcome::error(
                                    name,
                                    Stage::Extract,
                                    e.to_string(),
                                );
                            }
                            self.sink
                                .emit(Event::VariableStored {
                                    scenario: name.to_string(),
                                    name: var.clone(),
                                })
                                .await;
                        }
                        Err(message) => {
                            // The failed expression never writes its key.
                            self.sink
                                .emit(Event::ExtractionFailed {
                                    scenario: name.to_string(),
                                    expression: expr.clone(),
                                    message: message.clone(),
                                })
                                .await;
                            if self.config.leniency == Leniency::Strict {
                                return ScenarioOutcome::error(
                                    name,
                                    Stage::Extract,
                                    format!("{expr}: {message}"),
                                );
                            }
                        }
                    }
                }
            }
        }

        // ASSERT
        if let Some(rules) = &resolved.scenario.validate {
            if !rules.is_empty() {
                let body = match self.decode(&record, &mut decoded, Stage::Assert, name) {
                    Ok(b) => b,
                    Err(outcome) => return *outcome,
                };
                match evaluate_rules(rules, &body) {
                    Ok(()) => {}
                    Err(e @ AssertError::Mismatch { .. }) => {
                        return ScenarioOutcome::failed(name, Stage::Assert, e.to_string());
                    }
                    Err(e) => {
                        return ScenarioOutcome::error(name, Stage::Assert, e.to_string());
                    }
                }
            }
        }

        ScenarioOutcome::passed(name)
    }

    /// Decode the body once and reuse it across EXTRACT and ASSERT. An
    /// undecodable body fails the requesting stage explicitly.
    fn decode(
        &self,
        record: &ResponseRecord,
        cache: &mut Option<AnyValue>,
        stage: Stage,
        name: &str,
    ) -> Result<AnyValue, Box<ScenarioOutcome>> {
        if let Some(body) = cache {
            return Ok(body.clone());
        }
        match record.decode_body() {
            Ok(body) => {
                *cache = Some(body.clone());
                Ok(body)
            }
            Err(e) => Err(Box::new(ScenarioOutcome::error(
                name,
                stage,
                e.to_string(),
            ))),
        }
    }
}

fn extract_one(body: &AnyValue, expr: &str) -> Result<AnyValue, String> {
    let path = ExtractPath::parse(expr).map_err(|e| e.to_string())?;
    extract_value(body, &path).map_err(|e| e.to_string())
}
