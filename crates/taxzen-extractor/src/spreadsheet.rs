//! Workbook extraction (first sheet only)
//!
//! The first sheet in workbook order is read with `calamine`, which detects
//! xlsx, xlsm, xls, and ods packages. The first non-empty row is the header;
//! empty cells are left out of each row.

use crate::delimited::positional_key;
use calamine::{open_workbook_auto_from_rs, Data, DataType, Range, Reader};
use chrono::{NaiveDateTime, Timelike};
use std::io::Cursor;
use std::panic;
use taxzen_domain::{ExtractionError, TabularRow};

fn malformed(message: impl Into<String>) -> ExtractionError {
    ExtractionError::MalformedDocument(message.into())
}

/// Read the first sheet of a workbook as rows keyed by header name
///
/// A panic inside the workbook reader is reported as a malformed document.
pub fn first_sheet_rows(bytes: &[u8]) -> Result<Vec<TabularRow>, ExtractionError> {
    match panic::catch_unwind(|| read_first_sheet(bytes)) {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!("Workbook reader panicked");
            Err(malformed("Workbook reader failed on this document"))
        }
    }
}

fn read_first_sheet(bytes: &[u8]) -> Result<Vec<TabularRow>, ExtractionError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| malformed(format!("Cannot open workbook: {}", e)))?;

    let name = workbook
        .sheet_names()
        .into_iter()
        .next()
        .ok_or_else(|| malformed("Workbook contains no sheets"))?;
    let range = workbook
        .worksheet_range(&name)
        .map_err(|e| malformed(format!("Cannot read sheet '{}': {}", name, e)))?;

    tracing::debug!(sheet = %name, rows = range.height(), "Read first worksheet");
    Ok(range_to_rows(&range))
}

/// Text of one cell; dates render as ISO 8601
fn render_cell(cell: &Data) -> String {
    match cell {
        Data::DateTime(dt) if !dt.is_duration() => cell
            .as_datetime()
            .map(render_datetime)
            .unwrap_or_else(|| cell.to_string()),
        Data::DateTimeIso(iso) => iso.clone(),
        Data::String(s) => s.trim().to_string(),
        _ => cell.to_string(),
    }
}

fn render_datetime(dt: NaiveDateTime) -> String {
    if dt.num_seconds_from_midnight() == 0 {
        dt.format("%Y-%m-%d").to_string()
    } else {
        dt.format("%Y-%m-%dT%H:%M:%S").to_string()
    }
}

/// Non-empty cells of each row as (absolute column, text)
fn row_cells(row: &[Data], first_column: usize) -> Vec<(usize, String)> {
    row.iter()
        .enumerate()
        .map(|(i, cell)| (first_column + i, render_cell(cell)))
        .filter(|(_, text)| !text.is_empty())
        .collect()
}

fn range_to_rows(range: &Range<Data>) -> Vec<TabularRow> {
    let first_column = range.start().map(|(_, col)| col as usize).unwrap_or(0);
    let mut rows = range
        .rows()
        .map(|row| row_cells(row, first_column))
        .filter(|cells| !cells.is_empty());

    let Some(names) = rows.next() else {
        return Vec::new();
    };

    rows.map(|cells| {
        let mut row = TabularRow::new();
        for (column, value) in cells {
            let key = names
                .iter()
                .find(|(c, _)| *c == column)
                .map(|(_, name)| name.clone())
                .unwrap_or_else(|| positional_key(column));
            row.insert(key, value);
        }
        row
    })
    .collect()
}
