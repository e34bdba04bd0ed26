mod scan;

use std::collections::BTreeSet;

use crate::types::ScenarioSuite;

/// The variables one scenario consumes and produces.
///
/// `requires` is every `${name}` occurring anywhere in the descriptor;
/// `provides` is the set of extract keys. Together they make the ordering
/// contract checkable without executing anything.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ScenarioIo {
    pub name: String,
    pub requires: BTreeSet<String>,
    pub provides: BTreeSet<String>,
}

/// A requirement no earlier scenario satisfies; it can only be met by a
/// pre-seeded store or an environment-config variable.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct UnseededRequirement {
    pub variable: String,
    pub required_by: String,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Plan {
    pub scenarios: Vec<ScenarioIo>,
    pub unseeded: Vec<UnseededRequirement>,
}

pub fn plan_suite(suite: &ScenarioSuite) -> Plan {
    let scenarios: Vec<ScenarioIo> = suite.iter().map(scan::scan_scenario).collect();

    let mut provided = BTreeSet::<&str>::new();
    let mut unseeded = Vec::new();
    for io in &scenarios {
        for var in &io.requires {
            if !provided.contains(var.as_str()) {
                unseeded.push(UnseededRequirement {
                    variable: var.clone(),
                    required_by: io.name.clone(),
                });
            }
        }
        provided.extend(io.provides.iter().map(|s| s.as_str()));
    }

    Plan {
        scenarios,
        unseeded,
    }
}
