//! Leaf coercion rules

use crate::currency::{format_currency, parse_amount};
use crate::NormalizationMode;
use serde_json::Value;
use taxzen_domain::{InsightValue, NOT_AVAILABLE};

/// Coerce one scalar JSON value
///
/// Returns `None` for objects and arrays, which are not leaves.
///
/// | leaf                  | numeric        | currency            |
/// |-----------------------|----------------|---------------------|
/// | number / `"1,234.5"`  | `1234.5`       | `"$1,234.50"`       |
/// | `"N/A"`               | `"N/A"`        | `"N/A"`             |
/// | `""`, `null`, `false` | `0.0`          | unchanged / `"N/A"` |
/// | other string          | unchanged      | unchanged           |
pub fn coerce_leaf(value: &Value, mode: NormalizationMode) -> Option<InsightValue> {
    let coerced = match value {
        Value::Object(_) | Value::Array(_) => return None,
        Value::String(s) if s == NOT_AVAILABLE => InsightValue::NotAvailable,
        Value::Number(n) => amount(n.as_f64().unwrap_or(0.0), mode),
        Value::String(s) => match parse_amount(s) {
            Some(n) => amount(n, mode),
            None if mode == NormalizationMode::Numeric && s.trim().is_empty() => {
                InsightValue::Number(0.0)
            }
            None => InsightValue::Text(s.clone()),
        },
        Value::Null => match mode {
            NormalizationMode::Numeric => InsightValue::Number(0.0),
            NormalizationMode::Currency => InsightValue::NotAvailable,
        },
        Value::Bool(false) if mode == NormalizationMode::Numeric => InsightValue::Number(0.0),
        Value::Bool(b) => InsightValue::Text(b.to_string()),
    };
    Some(coerced)
}

fn amount(n: f64, mode: NormalizationMode) -> InsightValue {
    match mode {
        NormalizationMode::Numeric => InsightValue::Number(n),
        NormalizationMode::Currency => InsightValue::Text(format_currency(n)),
    }
}
