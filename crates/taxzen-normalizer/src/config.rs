//! Normalizer configuration

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How numeric-looking leaves are rendered
///
/// A fixed deployment choice, never inferred per field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalizationMode {
    /// Machine-numeric values; empty leaves become `0.0`
    Numeric,

    /// Display strings such as `"$7,500.00"`
    #[default]
    Currency,
}

impl NormalizationMode {
    /// Get the mode name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            NormalizationMode::Numeric => "numeric",
            NormalizationMode::Currency => "currency",
        }
    }
}

impl fmt::Display for NormalizationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NormalizationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "numeric" => Ok(NormalizationMode::Numeric),
            "currency" => Ok(NormalizationMode::Currency),
            other => Err(format!(
                "Unknown normalization mode '{}' (expected numeric or currency)",
                other
            )),
        }
    }
}
