//! TaxZen Response Normalizer
//!
//! Turns the completion service's raw text into a [`TaxInsight`].
//!
//! The model's output is semi-trusted: numbers arrive as JSON numbers, as
//! strings with or without `$` and thousands separators, or as the sentinel
//! `"N/A"`. The normalizer provides:
//! - Empty-response and JSON-syntax checks (with the raw text kept for diagnostics)
//! - Shape validation against the insight schema
//! - Per-leaf coercion to either numbers or currency strings
//!
//! # Examples
//!
//! ```
//! use taxzen_normalizer::{NormalizationMode, ResponseNormalizer};
//! use taxzen_domain::InsightValue;
//!
//! let normalizer = ResponseNormalizer::new(NormalizationMode::Currency);
//! let insight = normalizer.normalize(r#"{"total_taxable_income": 7500}"#).unwrap();
//! assert_eq!(insight.total_taxable_income, InsightValue::Text("$7,500.00".to_string()));
//! assert!(insight.top_recommendations.is_empty());
//! ```
//!
//! [`TaxInsight`]: taxzen_domain::TaxInsight

#![warn(missing_docs)]

mod coerce;
mod config;
pub mod currency;
mod error;
mod normalizer;
mod schema;

pub use coerce::coerce_leaf;
pub use config::NormalizationMode;
pub use currency::{format_currency, parse_amount};
pub use error::{NormalizationError, NormalizationErrorKind};
pub use normalizer::{normalize, ResponseNormalizer};
