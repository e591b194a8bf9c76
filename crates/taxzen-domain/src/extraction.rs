//! Extraction outcomes - what each uploaded file turned into

use crate::error::ExtractionError;
use crate::strategy::ExtractionStrategy;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// One row of tabular data, keyed by column name
///
/// Columns keep the order in which they appear in the source header, and
/// serialize as a JSON object in that order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabularRow {
    cells: Vec<(String, String)>,
}

impl TabularRow {
    /// Create an empty row
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a cell; a repeated column name replaces the earlier value in place
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        let column = column.into();
        let value = value.into();
        match self.cells.iter_mut().find(|(name, _)| *name == column) {
            Some(cell) => cell.1 = value,
            None => self.cells.push((column, value)),
        }
    }

    /// Get a cell value by column name
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    /// Iterate over (column, value) pairs in column order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of cells in the row
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the row has no cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<K, V> From<Vec<(K, V)>> for TabularRow
where
    K: Into<String>,
    V: Into<String>,
{
    fn from(cells: Vec<(K, V)>) -> Self {
        let mut row = TabularRow::new();
        for (k, v) in cells {
            row.insert(k, v);
        }
        row
    }
}

impl Serialize for TabularRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (column, value) in &self.cells {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

/// Kind of an extraction outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionKind {
    /// Plain text
    Text,
    /// Rows keyed by column name
    Tabular,
    /// Extraction failed
    Error,
}

impl ExtractionKind {
    /// Get the kind name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionKind::Text => "text",
            ExtractionKind::Tabular => "tabular",
            ExtractionKind::Error => "error",
        }
    }
}

/// Content extracted from one file
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionPayload {
    /// Plain text
    Text(String),

    /// Rows in document order
    Tabular(Vec<TabularRow>),

    /// Why extraction failed
    Error(ExtractionError),
}

impl ExtractionPayload {
    /// Get the payload kind
    pub fn kind(&self) -> ExtractionKind {
        match self {
            ExtractionPayload::Text(_) => ExtractionKind::Text,
            ExtractionPayload::Tabular(_) => ExtractionKind::Tabular,
            ExtractionPayload::Error(_) => ExtractionKind::Error,
        }
    }
}

/// Outcome of extracting one uploaded file
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionResult {
    /// Name of the file this came from
    pub source_name: String,

    /// Extractor that produced it
    pub strategy: ExtractionStrategy,

    /// Extracted content or failure
    pub payload: ExtractionPayload,
}

impl ExtractionResult {
    /// Successful text extraction
    pub fn text(
        source_name: impl Into<String>,
        strategy: ExtractionStrategy,
        text: impl Into<String>,
    ) -> Self {
        Self {
            source_name: source_name.into(),
            strategy,
            payload: ExtractionPayload::Text(text.into()),
        }
    }

    /// Successful tabular extraction
    pub fn tabular(
        source_name: impl Into<String>,
        strategy: ExtractionStrategy,
        rows: Vec<TabularRow>,
    ) -> Self {
        Self {
            source_name: source_name.into(),
            strategy,
            payload: ExtractionPayload::Tabular(rows),
        }
    }

    /// Failed extraction
    pub fn error(
        source_name: impl Into<String>,
        strategy: ExtractionStrategy,
        error: ExtractionError,
    ) -> Self {
        Self {
            source_name: source_name.into(),
            strategy,
            payload: ExtractionPayload::Error(error),
        }
    }

    /// Get the outcome kind
    pub fn kind(&self) -> ExtractionKind {
        self.payload.kind()
    }

    /// Whether extraction failed
    pub fn is_error(&self) -> bool {
        matches!(self.payload, ExtractionPayload::Error(_))
    }
}

impl Serialize for ExtractionResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(4))?;
        map.serialize_entry("source", &self.source_name)?;
        map.serialize_entry("format", &self.strategy)?;
        map.serialize_entry("kind", &self.kind())?;
        match &self.payload {
            ExtractionPayload::Text(text) => map.serialize_entry("content", text)?,
            ExtractionPayload::Tabular(rows) => map.serialize_entry("content", rows)?,
            ExtractionPayload::Error(err) => map.serialize_entry("content", &err.to_string())?,
        }
        map.end()
    }
}

/// Ordered extraction outcomes for one request, one entry per input file
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ExtractionBatch(Vec<ExtractionResult>);

impl ExtractionBatch {
    /// Create a batch from results already in input order
    pub fn new(results: Vec<ExtractionResult>) -> Self {
        Self(results)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the batch has no entries
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entry at an input index
    pub fn get(&self, index: usize) -> Option<&ExtractionResult> {
        self.0.get(index)
    }

    /// Iterate in input order
    pub fn iter(&self) -> std::slice::Iter<'_, ExtractionResult> {
        self.0.iter()
    }

    /// Number of failed entries
    pub fn error_count(&self) -> usize {
        self.0.iter().filter(|r| r.is_error()).count()
    }

    /// Unwrap into the underlying results
    pub fn into_inner(self) -> Vec<ExtractionResult> {
        self.0
    }
}

impl FromIterator<ExtractionResult> for ExtractionBatch {
    fn from_iter<I: IntoIterator<Item = ExtractionResult>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for ExtractionBatch {
    type Item = ExtractionResult;
    type IntoIter = std::vec::IntoIter<ExtractionResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ExtractionBatch {
    type Item = &'a ExtractionResult;
    type IntoIter = std::slice::Iter<'a, ExtractionResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
