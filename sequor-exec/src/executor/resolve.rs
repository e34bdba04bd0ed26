use sequor_core::expressions::{parse_template, Segment};
use sequor_core::types::{AnyValue, Scenario};
use sequor_store::{StoreError, VariableStore};

use crate::config::EnvConfig;

/// What to do when a placeholder has no value anywhere.
///
/// Strict fails the scenario's RESOLVE stage; Lenient leaves the placeholder
/// text in place and reports the name so the runner can surface it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Leniency {
    #[default]
    Strict,
    Lenient,
}

#[derive(Clone, Copy)]
pub struct ResolveContext<'a> {
    pub store: &'a dyn VariableStore,
    pub env: &'a EnvConfig,
    pub leniency: Leniency,
}

#[derive(Debug)]
pub struct ResolveOutput {
    pub scenario: Scenario,
    /// Placeholder names left in place (lenient mode only).
    pub unresolved: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("unresolved template placeholder `${{{name}}}`")]
    Unresolved { name: String },
    #[error("placeholder `${{{name}}}` resolved to a non-scalar {found} value")]
    NonScalar { name: String, found: &'static str },
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Substitute every `${name}` in the descriptor, consulting the store first
/// and the environment config second. Container shape and order are
/// preserved; each string is rewritten in a single left-to-right pass, so
/// substituted text is never re-expanded.
pub async fn resolve_scenario(
    scenario: &Scenario,
    ctx: &ResolveContext<'_>,
) -> Result<ResolveOutput, ResolveError> {
    let mut out = scenario.clone();
    let mut unresolved = Vec::new();

    out.url = resolve_string(&scenario.url, ctx, &mut unresolved).await?;
    if let Some(map) = &mut out.path_params {
        for v in map.values_mut() {
            *v = resolve_value(v, ctx, &mut unresolved).await?;
        }
    }
    if let Some(map) = &mut out.headers {
        for v in map.values_mut() {
            *v = resolve_value(v, ctx, &mut unresolved).await?;
        }
    }
    if let Some(map) = &mut out.params {
        for v in map.values_mut() {
            *v = resolve_value(v, ctx, &mut unresolved).await?;
        }
    }
    if let Some(data) = &mut out.data {
        *data = resolve_value(data, ctx, &mut unresolved).await?;
    }
    if let Some(json) = &mut out.json {
        *json = resolve_value(json, ctx, &mut unresolved).await?;
    }

    Ok(ResolveOutput {
        scenario: out,
        unresolved,
    })
}

/// Recursive substitution over an arbitrary structured value.
pub async fn resolve_value(
    value: &AnyValue,
    ctx: &ResolveContext<'_>,
    unresolved: &mut Vec<String>,
) -> Result<AnyValue, ResolveError> {
    match value {
        AnyValue::Null | AnyValue::Bool(_) | AnyValue::Number(_) => Ok(value.clone()),
        AnyValue::String(s) => Ok(AnyValue::String(
            resolve_string(s, ctx, unresolved).await?,
        )),
        AnyValue::Array(arr) => {
            let mut out = Vec::with_capacity(arr.len());
            for v in arr {
                out.push(Box::pin(resolve_value(v, ctx, unresolved)).await?);
            }
            Ok(AnyValue::Array(out))
        }
        AnyValue::Object(map) => {
            let mut out = serde_json::Map::new();
            for (k, v) in map {
                out.insert(k.clone(), Box::pin(resolve_value(v, ctx, unresolved)).await?);
            }
            Ok(AnyValue::Object(out))
        }
    }
}

async fn resolve_string(
    s: &str,
    ctx: &ResolveContext<'_>,
    unresolved: &mut Vec<String>,
) -> Result<String, ResolveError> {
    let tpl = parse_template(s);
    if !tpl.has_vars() {
        return Ok(s.to_string());
    }

    let mut out = String::new();
    for seg in tpl.segments {
        match seg {
            Segment::Literal(lit) => out.push_str(&lit),
            Segment::Var(name) => match lookup(&name, ctx).await? {
                Some(v) => out.push_str(&scalar_string(&name, &v)?),
                None => match ctx.leniency {
                    Leniency::Strict => return Err(ResolveError::Unresolved { name }),
                    Leniency::Lenient => {
                        out.push_str(&format!("${{{name}}}"));
                        unresolved.push(name);
                    }
                },
            },
        }
    }
    Ok(out)
}

async fn lookup(name: &str, ctx: &ResolveContext<'_>) -> Result<Option<AnyValue>, ResolveError> {
    if let Some(v) = ctx.store.get(name).await? {
        return Ok(Some(v));
    }
    Ok(ctx.env.vars.get(name).cloned())
}

/// The string form a placeholder substitutes as. Only scalars qualify; a
/// null, array, or object value fails resolution outright.
fn scalar_string(name: &str, v: &AnyValue) -> Result<String, ResolveError> {
    match v {
        AnyValue::String(s) => Ok(s.clone()),
        AnyValue::Number(n) => Ok(n.to_string()),
        AnyValue::Bool(b) => Ok(b.to_string()),
        AnyValue::Null => Err(ResolveError::NonScalar {
            name: name.to_string(),
            found: "null",
        }),
        AnyValue::Array(_) => Err(ResolveError::NonScalar {
            name: name.to_string(),
            found: "array",
        }),
        AnyValue::Object(_) => Err(ResolveError::NonScalar {
            name: name.to_string(),
            found: "object",
        }),
    }
}
