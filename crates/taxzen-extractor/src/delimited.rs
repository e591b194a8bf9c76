//! Delimited text (CSV) extraction

use taxzen_domain::{ExtractionError, TabularRow};

/// Key for a column without a usable header (`column_1`, `column_2`, ...)
pub(crate) fn positional_key(index: usize) -> String {
    format!("column_{}", index + 1)
}

/// Header names, with blanks replaced by positional keys
pub(crate) fn header_names<'a>(headers: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    headers
        .into_iter()
        .enumerate()
        .map(|(i, name)| {
            let name = name.trim();
            if name.is_empty() {
                positional_key(i)
            } else {
                name.to_string()
            }
        })
        .collect()
}

/// Pair cells with header names
///
/// Cells beyond the header get positional keys; missing trailing cells are
/// simply absent from the row.
pub(crate) fn build_row<'a>(headers: &[String], cells: impl IntoIterator<Item = &'a str>) -> TabularRow {
    let mut row = TabularRow::new();
    for (i, cell) in cells.into_iter().enumerate() {
        match headers.get(i) {
            Some(name) => row.insert(name.as_str(), cell),
            None => row.insert(positional_key(i), cell),
        }
    }
    row
}

/// Parse CSV with a header row into rows keyed by header name
pub fn parse_rows(bytes: &[u8]) -> Result<Vec<TabularRow>, ExtractionError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers = header_names(
        reader
            .headers()
            .map_err(|e| ExtractionError::MalformedDocument(format!("Invalid CSV header: {}", e)))?
            .iter(),
    );

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record
            .map_err(|e| ExtractionError::MalformedDocument(format!("Invalid CSV record: {}", e)))?;
        rows.push(build_row(&headers, record.iter()));
    }
    Ok(rows)
}
