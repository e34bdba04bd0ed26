/// The stage of the per-scenario state machine that produced an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Resolve,
    Compile,
    Dispatch,
    Extract,
    Assert,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Resolve => "resolve",
            Stage::Compile => "compile",
            Stage::Dispatch => "dispatch",
            Stage::Extract => "extract",
            Stage::Assert => "assert",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioStatus {
    /// All stages completed and every assertion held.
    Passed,
    /// An assertion mismatch.
    Failed,
    /// Any other stage failure (resolution, compilation, transport,
    /// extraction, decoding).
    Error,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct ScenarioOutcome {
    pub name: String,
    pub status: ScenarioStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<Stage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ScenarioOutcome {
    pub fn passed(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: ScenarioStatus::Passed,
            stage: None,
            detail: None,
        }
    }

    pub fn failed(name: impl Into<String>, stage: Stage, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: ScenarioStatus::Failed,
            stage: Some(stage),
            detail: Some(detail.into()),
        }
    }

    pub fn error(name: impl Into<String>, stage: Stage, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: ScenarioStatus::Error,
            stage: Some(stage),
            detail: Some(detail.into()),
        }
    }
}

#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct RunReport {
    pub outcomes: Vec<ScenarioOutcome>,
}

impl RunReport {
    pub fn record(&mut self, outcome: ScenarioOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn passed_count(&self) -> usize {
        self.count(ScenarioStatus::Passed)
    }

    pub fn failed_count(&self) -> usize {
        self.count(ScenarioStatus::Failed)
    }

    pub fn errored_count(&self) -> usize {
        self.count(ScenarioStatus::Error)
    }

    /// True when every scenario passed; drives the process exit status.
    pub fn ok(&self) -> bool {
        self.outcomes
            .iter()
            .all(|o| o.status == ScenarioStatus::Passed)
    }

    fn count(&self, status: ScenarioStatus) -> usize {
        self.outcomes.iter().filter(|o| o.status == status).count()
    }
}
