use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;
use sequor_core::types::ScenarioSuite;
use sequor_exec::executor::{
    HttpError, HttpTransport, Leniency, NoOpEventSink, RequestParts, ResponseRecord, Runner,
    RunnerConfig, ScenarioStatus, Stage,
};
use sequor_exec::EnvConfig;
use sequor_store::{FileStore, MemoryStore, VariableStore};

/// Canned transport that records every dispatched request so tests can
/// inspect resolved headers, urls, and bodies.
#[derive(Default)]
struct RecordingTransport {
    responses: BTreeMap<String, (u16, serde_json::Value)>,
    requests: Mutex<Vec<RequestParts>>,
}

impl RecordingTransport {
    fn respond(mut self, method: &str, path: &str, status: u16, body: serde_json::Value) -> Self {
        self.responses
            .insert(format!("{method} {path}"), (status, body));
        self
    }

    fn sent(&self) -> Vec<RequestParts> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpTransport for RecordingTransport {
    async fn send(&self, req: RequestParts) -> Result<ResponseRecord, HttpError> {
        let key = format!("{} {}", req.method, req.url.path());
        self.requests.lock().unwrap().push(req);
        let (status, body) = self
            .responses
            .get(&key)
            .ok_or_else(|| HttpError::Network(format!("no canned response for {key}")))?;
        Ok(ResponseRecord {
            status: *status,
            headers: BTreeMap::new(),
            body: body.to_string(),
        })
    }
}

fn env() -> EnvConfig {
    EnvConfig {
        base_url: "https://api.example.com".into(),
        vars: [("password".to_string(), json!("secret"))].into_iter().collect(),
        ..EnvConfig::default()
    }
}

fn suite(yaml: &str) -> ScenarioSuite {
    serde_yaml::from_str(yaml).unwrap()
}

fn login_then_profile() -> ScenarioSuite {
    suite(
        r#"
- name: login
  method: POST
  url: /api/login
  json:
    username: admin
    password: ${password}
  extract:
    token: content.data.token
  validate:
    - equals:
        code: 0
- name: profile
  method: GET
  url: /api/profile
  headers:
    Authorization: Bearer ${token}
  validate:
    - equals:
        data.name: admin
"#,
    )
}

#[tokio::test]
async fn extracted_variable_flows_into_the_next_scenario() {
    let transport = Arc::new(
        RecordingTransport::default()
            .respond(
                "POST",
                "/api/login",
                200,
                json!({"code": 0, "data": {"token": "xyz"}}),
            )
            .respond("GET", "/api/profile", 200, json!({"data": {"name": "admin"}})),
    );
    let store = Arc::new(MemoryStore::new());
    let runner = Runner::new(
        store.clone(),
        transport.clone(),
        Arc::new(NoOpEventSink),
        env(),
    );

    let report = runner.run(&login_then_profile()).await;
    assert!(report.ok(), "{:?}", report.outcomes);

    // Scenario B's header resolved through the store scenario A populated.
    let sent = transport.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[1].headers.get("Authorization").unwrap(), "Bearer xyz");

    assert_eq!(store.get("token").await.unwrap(), Some(json!("xyz")));
}

#[tokio::test]
async fn missing_dependency_fails_resolve_in_a_fresh_run() {
    // `profile` alone, with an empty store: `${token}` has no producer.
    let transport = Arc::new(RecordingTransport::default());
    let runner = Runner::new(
        Arc::new(MemoryStore::new()),
        transport.clone(),
        Arc::new(NoOpEventSink),
        env(),
    );

    let suite = suite(
        r#"
- name: profile
  method: GET
  url: /api/profile
  headers:
    Authorization: Bearer ${token}
"#,
    );
    let report = runner.run(&suite).await;
    assert!(!report.ok());
    let outcome = &report.outcomes[0];
    assert_eq!(outcome.status, ScenarioStatus::Error);
    assert_eq!(outcome.stage, Some(Stage::Resolve));
    assert!(outcome.detail.as_ref().unwrap().contains("token"));

    // RESOLVE failed, so nothing was dispatched.
    assert!(transport.sent().is_empty());
}

#[tokio::test]
async fn one_failing_scenario_does_not_halt_the_run() {
    let transport = Arc::new(
        RecordingTransport::default()
            .respond("GET", "/ok", 200, json!({"fine": true}))
            .respond("GET", "/after", 200, json!({"fine": true})),
    );
    let runner = Runner::new(
        Arc::new(MemoryStore::new()),
        transport.clone(),
        Arc::new(NoOpEventSink),
        env(),
    );

    let suite = suite(
        r#"
- name: first
  method: GET
  url: /ok
- name: unreachable
  method: GET
  url: /no-canned-response
- name: third
  method: GET
  url: /after
"#,
    );
    let report = runner.run(&suite).await;
    assert_eq!(report.outcomes.len(), 3);
    assert_eq!(report.outcomes[0].status, ScenarioStatus::Passed);
    assert_eq!(report.outcomes[1].status, ScenarioStatus::Error);
    assert_eq!(report.outcomes[1].stage, Some(Stage::Dispatch));
    assert_eq!(report.outcomes[2].status, ScenarioStatus::Passed);
}

#[tokio::test]
async fn assertion_mismatch_is_a_failure_not_an_error() {
    let transport = Arc::new(RecordingTransport::default().respond(
        "GET",
        "/api/status",
        200,
        json!({"code": 1, "message": "degraded"}),
    ));
    let runner = Runner::new(
        Arc::new(MemoryStore::new()),
        transport,
        Arc::new(NoOpEventSink),
        env(),
    );

    let suite = suite(
        r#"
- name: status
  method: GET
  url: /api/status
  validate:
    - equals:
        code: 0
"#,
    );
    let report = runner.run(&suite).await;
    let outcome = &report.outcomes[0];
    assert_eq!(outcome.status, ScenarioStatus::Failed);
    assert_eq!(outcome.stage, Some(Stage::Assert));
    let detail = outcome.detail.as_ref().unwrap();
    assert!(detail.contains("code") && detail.contains('0') && detail.contains('1'));
}

#[tokio::test]
async fn assertion_coercion_accepts_textual_numbers() {
    let transport = Arc::new(RecordingTransport::default().respond(
        "GET",
        "/api/status",
        200,
        json!({"code": 200, "http": "404"}),
    ));
    let runner = Runner::new(
        Arc::new(MemoryStore::new()),
        transport,
        Arc::new(NoOpEventSink),
        env(),
    );

    let suite = suite(
        r#"
- name: status
  method: GET
  url: /api/status
  validate:
    - equals:
        code: "200"
    - equals:
        http: 404
"#,
    );
    let report = runner.run(&suite).await;
    assert!(report.ok(), "{:?}", report.outcomes);
}

#[tokio::test]
async fn failed_extraction_never_writes_the_key_and_skips_assert_when_strict() {
    let transport = Arc::new(RecordingTransport::default().respond(
        "POST",
        "/api/login",
        200,
        json!({"code": 0, "data": {}}),
    ));
    let store = Arc::new(MemoryStore::new());
    let runner = Runner::new(store.clone(), transport, Arc::new(NoOpEventSink), env());

    let suite = suite(
        r#"
- name: login
  method: POST
  url: /api/login
  json: {username: admin, password: "${password}"}
  extract:
    token: content.data.token
  validate:
    - equals:
        nonexistent: 1
"#,
    );
    let report = runner.run(&suite).await;
    let outcome = &report.outcomes[0];
    assert_eq!(outcome.status, ScenarioStatus::Error);
    assert_eq!(outcome.stage, Some(Stage::Extract));
    assert!(outcome.detail.as_ref().unwrap().contains("token"));
    assert_eq!(store.get("token").await.unwrap(), None);
}

#[tokio::test]
async fn lenient_mode_records_extraction_failure_and_continues() {
    let transport = Arc::new(RecordingTransport::default().respond(
        "POST",
        "/api/login",
        200,
        json!({"code": 0, "data": {}}),
    ));
    let store = Arc::new(MemoryStore::new());
    let runner = Runner::new(store.clone(), transport, Arc::new(NoOpEventSink), env())
        .with_config(RunnerConfig {
            leniency: Leniency::Lenient,
        });

    let suite = suite(
        r#"
- name: login
  method: POST
  url: /api/login
  json: {username: admin, password: "${password}"}
  extract:
    token: content.data.token
  validate:
    - equals:
        code: 0
"#,
    );
    let report = runner.run(&suite).await;
    // The assertion still ran and held; the extraction failure only cost the
    // missing key.
    assert!(report.ok(), "{:?}", report.outcomes);
    assert_eq!(store.get("token").await.unwrap(), None);
}

#[tokio::test]
async fn undecodable_body_is_an_explicit_extract_error() {
    struct HtmlTransport;

    #[async_trait]
    impl HttpTransport for HtmlTransport {
        async fn send(&self, _req: RequestParts) -> Result<ResponseRecord, HttpError> {
            Ok(ResponseRecord {
                status: 200,
                headers: BTreeMap::new(),
                body: "<html>oops</html>".to_string(),
            })
        }
    }

    let runner = Runner::new(
        Arc::new(MemoryStore::new()),
        Arc::new(HtmlTransport),
        Arc::new(NoOpEventSink),
        env(),
    );

    let suite = suite(
        r#"
- name: login
  method: POST
  url: /api/login
  extract:
    token: content.data.token
"#,
    );
    let report = runner.run(&suite).await;
    let outcome = &report.outcomes[0];
    assert_eq!(outcome.status, ScenarioStatus::Error);
    assert_eq!(outcome.stage, Some(Stage::Extract));
    assert!(outcome.detail.as_ref().unwrap().contains("not valid JSON"));
}

#[tokio::test]
async fn store_state_survives_into_a_second_run() {
    let dir = tempfile::tempdir().unwrap();
    let store_path = dir.path().join("vars.json");

    // First run: login extracts the token into the file store.
    let transport = Arc::new(RecordingTransport::default().respond(
        "POST",
        "/api/login",
        200,
        json!({"code": 0, "data": {"token": "xyz"}}),
    ));
    let runner = Runner::new(
        Arc::new(FileStore::new(&store_path)),
        transport,
        Arc::new(NoOpEventSink),
        env(),
    );
    let first = suite(
        r#"
- name: login
  method: POST
  url: /api/login
  json: {username: admin, password: "${password}"}
  extract:
    token: content.data.token
"#,
    );
    assert!(runner.run(&first).await.ok());

    // Second run, fresh runner and store handle: `${token}` resolves from
    // the persisted document.
    let transport = Arc::new(RecordingTransport::default().respond(
        "GET",
        "/api/profile",
        200,
        json!({"data": {"name": "admin"}}),
    ));
    let runner = Runner::new(
        Arc::new(FileStore::new(&store_path)),
        transport.clone(),
        Arc::new(NoOpEventSink),
        env(),
    );
    let second = suite(
        r#"
- name: profile
  method: GET
  url: /api/profile
  headers:
    Authorization: Bearer ${token}
"#,
    );
    assert!(runner.run(&second).await.ok());
    assert_eq!(
        transport.sent()[0].headers.get("Authorization").unwrap(),
        "Bearer xyz"
    );
}
