use std::time::Duration;

use sequor_core::types::Scenario;
use sequor_exec::executor::compile_request;
use sequor_exec::EnvConfig;

fn env() -> EnvConfig {
    EnvConfig {
        base_url: "https://api.example.com/".into(),
        timeout: 30,
        verify: true,
        ..EnvConfig::default()
    }
}

fn scenario_yaml(yaml: &str) -> Scenario {
    serde_yaml::from_str(yaml).unwrap()
}

#[test]
fn relative_url_joins_the_base_endpoint() {
    let s = scenario_yaml("{name: a, method: get, url: /api/login}");
    let parts = compile_request(&s, &env()).unwrap();
    assert_eq!(parts.method, "GET");
    assert_eq!(parts.url.as_str(), "https://api.example.com/api/login");
}

#[test]
fn absolute_url_is_used_verbatim() {
    let s = scenario_yaml("{name: a, method: GET, url: 'https://other.example.com/health'}");
    let parts = compile_request(&s, &env()).unwrap();
    assert_eq!(parts.url.as_str(), "https://other.example.com/health");
}

#[test]
fn path_params_substitute_and_encode() {
    let s = scenario_yaml(
        r#"
name: a
method: GET
url: /users/{user id}/pets/{pet}
path_params:
  "user id": "7 b"
  pet: 3
"#,
    );
    let parts = compile_request(&s, &env()).unwrap();
    assert_eq!(
        parts.url.as_str(),
        "https://api.example.com/users/7%20b/pets/3"
    );
}

#[test]
fn query_params_are_encoded_and_sequences_repeat_the_key() {
    let s = scenario_yaml(
        r#"
name: a
method: GET
url: /search
params:
  q: "a b"
  tag: [x, y]
"#,
    );
    let parts = compile_request(&s, &env()).unwrap();
    let query = parts.url.query().unwrap();
    assert!(query.contains("q=a+b") || query.contains("q=a%20b"));
    assert!(query.contains("tag=x"));
    assert!(query.contains("tag=y"));
}

#[test]
fn json_body_wins_over_form_body() {
    let s = scenario_yaml(
        r#"
name: a
method: POST
url: /login
json: {user: admin}
data: {ignored: "yes"}
"#,
    );
    let parts = compile_request(&s, &env()).unwrap();
    assert_eq!(parts.headers.get("Content-Type").unwrap(), "application/json");
    assert_eq!(parts.body.unwrap(), br#"{"user":"admin"}"#.to_vec());
}

#[test]
fn mapping_data_is_a_urlencoded_form() {
    let s = scenario_yaml(
        r#"
name: a
method: POST
url: /login
data: {user: admin, pin: 1234}
"#,
    );
    let parts = compile_request(&s, &env()).unwrap();
    assert_eq!(
        parts.headers.get("Content-Type").unwrap(),
        "application/x-www-form-urlencoded"
    );
    let body = String::from_utf8(parts.body.unwrap()).unwrap();
    assert_eq!(body, "pin=1234&user=admin");
}

#[test]
fn string_data_is_a_raw_body_with_no_default_content_type() {
    let s = scenario_yaml(
        r#"
name: a
method: POST
url: /raw
data: "plain payload"
"#,
    );
    let parts = compile_request(&s, &env()).unwrap();
    assert!(parts.headers.is_empty());
    assert_eq!(parts.body.unwrap(), b"plain payload".to_vec());
}

#[test]
fn caller_content_type_is_not_overridden() {
    let s = scenario_yaml(
        r#"
name: a
method: POST
url: /login
headers:
  content-type: application/vnd.custom+json
json: {user: admin}
"#,
    );
    let parts = compile_request(&s, &env()).unwrap();
    assert_eq!(parts.headers.len(), 1);
    assert_eq!(
        parts.headers.get("content-type").unwrap(),
        "application/vnd.custom+json"
    );
}

#[test]
fn timeout_and_verify_default_from_the_environment() {
    let s = scenario_yaml("{name: a, method: GET, url: /x}");
    let parts = compile_request(&s, &env()).unwrap();
    assert_eq!(parts.timeout, Duration::from_secs(30));
    assert!(parts.verify);

    let s = scenario_yaml("{name: a, method: GET, url: /x, timeout: 5, verify: false}");
    let parts = compile_request(&s, &env()).unwrap();
    assert_eq!(parts.timeout, Duration::from_secs(5));
    assert!(!parts.verify);
}

#[test]
fn unresolved_template_placeholder_is_not_a_path_marker() {
    // `${id}` survives compilation untouched even when a path param `id`
    // exists; only the bare `{id}` marker is substituted.
    let s = scenario_yaml(
        r#"
name: a
method: GET
url: "/echo/${id}/{id}"
path_params:
  id: 9
"#,
    );
    let parts = compile_request(&s, &env()).unwrap();
    assert!(parts.url.path().contains("$%7Bid%7D/9") || parts.url.path().contains("${id}/9"));
}
