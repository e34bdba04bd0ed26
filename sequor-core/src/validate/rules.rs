use std::collections::HashSet;

use crate::expressions::{malformed_placeholder, ExtractPath};
use crate::types::{AnyValue, Scenario, ScenarioSuite};
use crate::validate::validator::{Validator, KNOWN_METHODS, VAR_NAME_RE};

pub(crate) fn validate_suite(v: &mut Validator, suite: &ScenarioSuite) {
    if suite.is_empty() {
        v.push("$", "suite must have at least one scenario");
    }

    let mut names = HashSet::<&str>::new();
    for (idx, scenario) in suite.iter().enumerate() {
        let path = format!("$[{idx}]");
        validate_scenario(v, scenario, &path);

        if !names.insert(scenario.name.as_str()) {
            v.push(
                format!("{path}.name"),
                "must be unique within the suite",
            );
        }
    }
}

fn validate_scenario(v: &mut Validator, s: &Scenario, path: &str) {
    v.validate_extensions(path, &s.extensions);

    if s.name.trim().is_empty() {
        v.push(format!("{path}.name"), "must not be empty");
    }

    let method = s.method.to_ascii_uppercase();
    if !KNOWN_METHODS.contains(&method.as_str()) {
        v.push(
            format!("{path}.method"),
            format!("unknown HTTP method `{}`", s.method),
        );
    }

    if s.url.trim().is_empty() {
        v.push(format!("{path}.url"), "must not be empty");
    }
    validate_placeholders(v, &format!("{path}.url"), &AnyValue::String(s.url.clone()));

    if let Some(timeout) = s.timeout {
        if timeout == 0 {
            v.push(format!("{path}.timeout"), "must be greater than zero");
        }
    }

    if let Some(map) = &s.path_params {
        for (k, val) in map {
            validate_placeholders(v, &format!("{path}.path_params.{k}"), val);
        }
    }
    if let Some(map) = &s.headers {
        for (k, val) in map {
            validate_placeholders(v, &format!("{path}.headers.{k}"), val);
        }
    }
    if let Some(map) = &s.params {
        for (k, val) in map {
            validate_placeholders(v, &format!("{path}.params.{k}"), val);
        }
    }
    if let Some(data) = &s.data {
        if !data.is_object() && !data.is_string() {
            v.push(
                format!("{path}.data"),
                "must be a mapping (form body) or a string (raw body)",
            );
        }
        validate_placeholders(v, &format!("{path}.data"), data);
    }
    if let Some(json) = &s.json {
        validate_placeholders(v, &format!("{path}.json"), json);
    }

    if let Some(extract) = &s.extract {
        for (name, expr) in extract {
            let epath = format!("{path}.extract.{name}");
            if !VAR_NAME_RE.is_match(name) {
                v.push(&epath, "variable name must match \\w+");
            }
            if let Err(e) = ExtractPath::parse(expr) {
                v.push(&epath, e.to_string());
            }
        }
    }

    if let Some(rules) = &s.validate {
        for (ridx, rule) in rules.iter().enumerate() {
            let rpath = format!("{path}.validate[{ridx}]");
            v.validate_extensions(&rpath, &rule.extensions);
            match &rule.equals {
                None => {
                    v.push(&rpath, "rule must declare a known kind (`equals`)");
                }
                Some(fields) => {
                    if fields.is_empty() {
                        v.push(format!("{rpath}.equals"), "must not be empty");
                    }
                    for field in fields.keys() {
                        if let Err(e) = ExtractPath::parse_field(field) {
                            v.push(format!("{rpath}.equals.{field}"), e.to_string());
                        }
                    }
                }
            }
        }
    }
}

fn validate_placeholders(v: &mut Validator, path: &str, value: &AnyValue) {
    match value {
        AnyValue::String(s) => {
            if let Some(offset) = malformed_placeholder(s) {
                v.push(
                    path,
                    format!("malformed `${{...}}` placeholder at byte {offset}"),
                );
            }
        }
        AnyValue::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                validate_placeholders(v, &format!("{path}[{i}]"), item);
            }
        }
        AnyValue::Object(map) => {
            for (k, val) in map {
                validate_placeholders(v, &format!("{path}.{k}"), val);
            }
        }
        _ => {}
    }
}
