use std::collections::BTreeSet;

use crate::expressions::parse_template;
use crate::planner::ScenarioIo;
use crate::types::{AnyValue, Scenario};

pub(crate) fn scan_scenario(scenario: &Scenario) -> ScenarioIo {
    let mut requires = BTreeSet::new();

    scan_string(&scenario.url, &mut requires);
    if let Some(map) = &scenario.path_params {
        for v in map.values() {
            scan_value(v, &mut requires);
        }
    }
    if let Some(map) = &scenario.headers {
        for v in map.values() {
            scan_value(v, &mut requires);
        }
    }
    if let Some(map) = &scenario.params {
        for v in map.values() {
            scan_value(v, &mut requires);
        }
    }
    if let Some(data) = &scenario.data {
        scan_value(data, &mut requires);
    }
    if let Some(json) = &scenario.json {
        scan_value(json, &mut requires);
    }

    let provides = scenario
        .extract
        .as_ref()
        .map(|m| m.keys().cloned().collect())
        .unwrap_or_default();

    ScenarioIo {
        name: scenario.name.clone(),
        requires,
        provides,
    }
}

fn scan_value(value: &AnyValue, requires: &mut BTreeSet<String>) {
    match value {
        AnyValue::Null | AnyValue::Bool(_) | AnyValue::Number(_) => {}
        AnyValue::String(s) => scan_string(s, requires),
        AnyValue::Array(arr) => {
            for v in arr {
                scan_value(v, requires);
            }
        }
        AnyValue::Object(map) => {
            for (_k, v) in map {
                scan_value(v, requires);
            }
        }
    }
}

fn scan_string(s: &str, requires: &mut BTreeSet<String>) {
    for name in parse_template(s).var_names() {
        requires.insert(name.to_string());
    }
}
