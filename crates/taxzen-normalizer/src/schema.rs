//! Conversion of parsed JSON into a [`TaxInsight`]
//!
//! Walks the fields the insight schema knows about, coercing every leaf.
//! Unknown top-level keys are ignored; missing scalars become `"N/A"`.
//! Nested breakdown containers are flattened into dotted field names.

use crate::coerce::coerce_leaf;
use crate::NormalizationMode;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use taxzen_domain::{InsightValue, Recommendation, TaxInsight};

pub(crate) const TOTAL_TAXABLE_INCOME: &str = "total_taxable_income";
pub(crate) const ESTIMATED_TAX_OWED: &str = "estimated_tax_owed";
pub(crate) const TOP_RECOMMENDATIONS: &str = "top_recommendations";
pub(crate) const DETAILED_BREAKDOWN: &str = "detailed_breakdown";

/// A shape violation, before the raw text is attached
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Mismatch {
    pub path: String,
    pub message: String,
}

impl Mismatch {
    fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Build an insight from a parsed response
pub(crate) fn to_insight(root: &Value, mode: NormalizationMode) -> Result<TaxInsight, Mismatch> {
    let object = root
        .as_object()
        .ok_or_else(|| Mismatch::new("$", format!("expected an object, found {}", type_name(root))))?;

    Ok(TaxInsight {
        total_taxable_income: scalar_field(object, TOTAL_TAXABLE_INCOME, "$", mode)?,
        estimated_tax_owed: scalar_field(object, ESTIMATED_TAX_OWED, "$", mode)?,
        top_recommendations: recommendations(object.get(TOP_RECOMMENDATIONS), mode)?,
        detailed_breakdown: breakdown(object.get(DETAILED_BREAKDOWN), mode)?,
    })
}

fn scalar_field(
    object: &Map<String, Value>,
    key: &str,
    parent: &str,
    mode: NormalizationMode,
) -> Result<InsightValue, Mismatch> {
    match object.get(key) {
        None => Ok(InsightValue::NotAvailable),
        Some(value) => scalar(value, &format!("{}.{}", parent, key), mode),
    }
}

fn scalar(value: &Value, path: &str, mode: NormalizationMode) -> Result<InsightValue, Mismatch> {
    coerce_leaf(value, mode).ok_or_else(|| {
        Mismatch::new(path, format!("expected a scalar value, found {}", type_name(value)))
    })
}

fn recommendations(
    value: Option<&Value>,
    mode: NormalizationMode,
) -> Result<Vec<Recommendation>, Mismatch> {
    let path = format!("$.{}", TOP_RECOMMENDATIONS);
    let items = match value {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(Mismatch::new(
                path,
                format!("expected an array, found {}", type_name(other)),
            ))
        }
    };

    items
        .iter()
        .enumerate()
        .map(|(i, item)| recommendation(item, &format!("{}[{}]", path, i), mode))
        .collect()
}

fn recommendation(
    item: &Value,
    path: &str,
    mode: NormalizationMode,
) -> Result<Recommendation, Mismatch> {
    let object = item.as_object().ok_or_else(|| {
        Mismatch::new(path, format!("expected an object, found {}", type_name(item)))
    })?;

    // Strategy names are prose and never coerced
    let strategy = match object.get("strategy") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => {
            return Err(Mismatch::new(
                format!("{}.strategy", path),
                format!("expected a string, found {}", type_name(other)),
            ))
        }
        None => return Err(Mismatch::new(path, "missing required field 'strategy'")),
    };

    Ok(Recommendation {
        strategy,
        impact: scalar_field(object, "impact", path, mode)?,
    })
}

type Breakdown = BTreeMap<String, BTreeMap<String, InsightValue>>;

fn breakdown(value: Option<&Value>, mode: NormalizationMode) -> Result<Breakdown, Mismatch> {
    let path = format!("$.{}", DETAILED_BREAKDOWN);
    let categories = match value {
        None | Some(Value::Null) => return Ok(Breakdown::new()),
        Some(Value::Object(categories)) => categories,
        Some(other) => {
            return Err(Mismatch::new(
                path,
                format!("expected an object, found {}", type_name(other)),
            ))
        }
    };

    let mut result = Breakdown::new();
    for (category, fields) in categories {
        let category_path = format!("{}.{}", path, category);
        let mut converted = BTreeMap::new();
        match fields {
            Value::Null => {}
            Value::Object(_) | Value::Array(_) => {
                flatten_into(&mut converted, "", fields, &category_path, mode)?
            }
            other => {
                return Err(Mismatch::new(
                    category_path,
                    format!("expected an object, found {}", type_name(other)),
                ))
            }
        }
        result.insert(category.clone(), converted);
    }
    Ok(result)
}

/// Coerce every leaf under `value` into `fields`
///
/// Nested object keys are joined with `.` and array elements are keyed by
/// their index, so `{"itemized": {"mortgage": 1}}` yields `itemized.mortgage`.
fn flatten_into(
    fields: &mut BTreeMap<String, InsightValue>,
    prefix: &str,
    value: &Value,
    path: &str,
    mode: NormalizationMode,
) -> Result<(), Mismatch> {
    let join = |key: &str| {
        if prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", prefix, key)
        }
    };

    match value {
        Value::Object(entries) => {
            for (key, child) in entries {
                flatten_into(fields, &join(key), child, &format!("{}.{}", path, key), mode)?;
            }
        }
        Value::Array(items) => {
            for (i, child) in items.iter().enumerate() {
                let index = i.to_string();
                flatten_into(fields, &join(&index), child, &format!("{}[{}]", path, i), mode)?;
            }
        }
        leaf => {
            fields.insert(prefix.to_string(), scalar(leaf, path, mode)?);
        }
    }
    Ok(())
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
