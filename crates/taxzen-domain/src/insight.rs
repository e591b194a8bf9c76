//! Normalized model output

use serde::ser::Serializer;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Sentinel the model uses for "value intentionally unknown"
pub const NOT_AVAILABLE: &str = "N/A";

/// A leaf value of a [`TaxInsight`]
///
/// Collapses to its wire form only on serialization: a JSON number, the
/// string `"N/A"`, or the raw string.
#[derive(Debug, Clone, PartialEq)]
pub enum InsightValue {
    /// A finite number
    Number(f64),

    /// The `"N/A"` sentinel
    NotAvailable,

    /// Any other string (including formatted currency)
    Text(String),
}

impl InsightValue {
    /// Get the numeric value, if any
    pub fn as_number(&self) -> Option<f64> {
        match self {
            InsightValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get the string value, if any
    pub fn as_text(&self) -> Option<&str> {
        match self {
            InsightValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Whether this is the `"N/A"` sentinel
    pub fn is_not_available(&self) -> bool {
        matches!(self, InsightValue::NotAvailable)
    }
}

impl From<f64> for InsightValue {
    fn from(n: f64) -> Self {
        InsightValue::Number(n)
    }
}

impl From<&str> for InsightValue {
    fn from(s: &str) -> Self {
        if s == NOT_AVAILABLE {
            InsightValue::NotAvailable
        } else {
            InsightValue::Text(s.to_string())
        }
    }
}

impl fmt::Display for InsightValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InsightValue::Number(n) => write!(f, "{}", n),
            InsightValue::NotAvailable => f.write_str(NOT_AVAILABLE),
            InsightValue::Text(s) => f.write_str(s),
        }
    }
}

impl Serialize for InsightValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            InsightValue::Number(n) => serializer.serialize_f64(*n),
            InsightValue::NotAvailable => serializer.serialize_str(NOT_AVAILABLE),
            InsightValue::Text(s) => serializer.serialize_str(s),
        }
    }
}

/// One tax-saving strategy suggested by the model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    /// What to do
    pub strategy: String,

    /// Estimated effect (amount or free text)
    pub impact: InsightValue,
}

/// Structured insight produced for one request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaxInsight {
    /// Total taxable income
    pub total_taxable_income: InsightValue,

    /// Estimated tax owed
    pub estimated_tax_owed: InsightValue,

    /// Suggested strategies, in the model's order (empty if none given)
    pub top_recommendations: Vec<Recommendation>,

    /// Category (e.g. `income_sources`) to field to value
    pub detailed_breakdown: BTreeMap<String, BTreeMap<String, InsightValue>>,
}

impl TaxInsight {
    /// An insight with every value unknown
    pub fn empty() -> Self {
        Self {
            total_taxable_income: InsightValue::NotAvailable,
            estimated_tax_owed: InsightValue::NotAvailable,
            top_recommendations: Vec::new(),
            detailed_breakdown: BTreeMap::new(),
        }
    }
}
