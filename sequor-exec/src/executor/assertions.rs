use sequor_core::expressions::{ExtractPath, PathParseError};
use sequor_core::extract::{extract_value, PathError};
use sequor_core::types::{AnyValue, ValidationRule};

#[derive(Debug, thiserror::Error)]
pub enum AssertError {
    #[error("assertion failed on `{field}`: expected {expected}, got {actual}")]
    Mismatch {
        field: String,
        expected: AnyValue,
        actual: AnyValue,
    },
    #[error("invalid assertion field `{field}`: {source}")]
    BadField {
        field: String,
        source: PathParseError,
    },
    #[error(transparent)]
    Path(#[from] PathError),
}

/// Evaluate the scenario's `validate` list against a decoded body.
///
/// Rules run in declared order and fail fast: the first failing rule aborts
/// the remaining checks for the scenario.
pub fn evaluate_rules(rules: &[ValidationRule], body: &AnyValue) -> Result<(), AssertError> {
    for rule in rules {
        let Some(fields) = &rule.equals else {
            // Unknown rule kinds are caught by suite validation.
            continue;
        };
        for (field, expected) in fields {
            let path =
                ExtractPath::parse_field(field).map_err(|source| AssertError::BadField {
                    field: field.clone(),
                    source,
                })?;
            let actual = extract_value(body, &path)?;
            if !equal_after_coercion(expected, &actual) {
                return Err(AssertError::Mismatch {
                    field: field.clone(),
                    expected: expected.clone(),
                    actual,
                });
            }
        }
    }
    Ok(())
}

/// Equality with textual<->numeric coercion and nothing else.
///
/// When exactly one side is a string and the other a number, the textual
/// side is parsed as f64 and the comparison is numeric. Two numbers compare
/// exactly when both are integral; f64 only bridges integer/float pairs, so
/// large integers are never conflated by the float mantissa. Booleans and
/// nulls never coerce.
pub fn equal_after_coercion(expected: &AnyValue, actual: &AnyValue) -> bool {
    match (expected, actual) {
        (AnyValue::Number(a), AnyValue::Number(b)) => match (a.as_i64(), b.as_i64()) {
            (Some(x), Some(y)) => x == y,
            _ => match (a.as_u64(), b.as_u64()) {
                (Some(x), Some(y)) => x == y,
                _ => a.as_f64() == b.as_f64(),
            },
        },
        (AnyValue::String(s), AnyValue::Number(n)) | (AnyValue::Number(n), AnyValue::String(s)) => {
            match s.trim().parse::<f64>() {
                Ok(parsed) => Some(parsed) == n.as_f64(),
                Err(_) => false,
            }
        }
        (a, b) => a == b,
    }
}
