//! Spreadsheet loading for the past-inventory export.
//!
//! The past export arrives as a single xlsx workbook, so there is no
//! encoding fallback here: the first worksheet is read as-is, the first
//! row supplies the column headers, and every cell keeps its native type.
//! Empty cells become JSON `null` so a missing status value can be told
//! apart from an explicit one downstream.

use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use serde_json::{json, Map, Value};
use std::path::Path;

use crate::error::{SheetError, SheetResult};

/// Result of loading a worksheet
#[derive(Debug, Clone)]
pub struct SheetData {
    /// Parsed records as JSON objects
    pub records: Vec<Value>,
    /// Column headers from the first row
    pub headers: Vec<String>,
    /// Name of the worksheet that was read
    pub sheet_name: String,
}

/// Load the first worksheet of an xlsx workbook.
pub fn load_sheet<P: AsRef<Path>>(path: P) -> SheetResult<SheetData> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(SheetError::NoWorksheet)?;

    let range = workbook.worksheet_range(&sheet_name)?;
    rows_from_range(&range, &sheet_name)
}

/// Convert a cell range into header/record form.
///
/// Split out from [`load_sheet`] so tables can be built without a
/// workbook on disk.
pub fn rows_from_range(range: &Range<Data>, sheet_name: &str) -> SheetResult<SheetData> {
    let mut rows = range.rows();

    let header_row = rows
        .next()
        .ok_or_else(|| SheetError::NoHeaders(sheet_name.to_string()))?;

    let headers: Vec<String> = header_row
        .iter()
        .map(|cell| cell.to_string().trim().to_string())
        .collect();

    if headers.iter().all(|h| h.is_empty()) {
        return Err(SheetError::NoHeaders(sheet_name.to_string()));
    }

    let mut records = Vec::new();

    for row in rows {
        if row.iter().all(|cell| matches!(cell, Data::Empty)) {
            continue;
        }

        let mut obj = Map::new();
        for (i, header) in headers.iter().enumerate() {
            let value = row.get(i).map(cell_to_value).unwrap_or(Value::Null);
            obj.insert(header.clone(), value);
        }
        records.push(Value::Object(obj));
    }

    Ok(SheetData {
        records,
        headers,
        sheet_name: sheet_name.to_string(),
    })
}

/// Map a cell to JSON, keeping the cell's native type.
fn cell_to_value(cell: &Data) -> Value {
    match cell {
        Data::Empty => Value::Null,
        Data::String(s) => json!(s),
        Data::Float(f) => json!(f),
        Data::Int(i) => json!(i),
        Data::Bool(b) => json!(b),
        Data::DateTime(dt) => json!(dt.as_f64()),
        Data::DateTimeIso(s) => json!(s),
        Data::DurationIso(s) => json!(s),
        Data::Error(e) => json!(format!("{:?}", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_range() -> Range<Data> {
        let mut range = Range::new((0, 0), (3, 1));
        range.set_value((0, 0), Data::String("Item ID".into()));
        range.set_value((0, 1), Data::String("Active?".into()));
        range.set_value((1, 0), Data::String(" A1 ".into()));
        range.set_value((1, 1), Data::String("Active".into()));
        range.set_value((2, 0), Data::String("B2".into()));
        range.set_value((2, 1), Data::String("Inactive".into()));
        range.set_value((3, 0), Data::Float(1234.0));
        // (3, 1) left empty: status missing
        range
    }

    #[test]
    fn test_rows_from_range() {
        let data = rows_from_range(&sample_range(), "Sheet1").unwrap();

        assert_eq!(data.headers, vec!["Item ID", "Active?"]);
        assert_eq!(data.records.len(), 3);
        assert_eq!(data.records[0]["Item ID"], " A1 ");
        assert_eq!(data.records[1]["Active?"], "Inactive");
    }

    #[test]
    fn test_empty_cell_is_null() {
        let data = rows_from_range(&sample_range(), "Sheet1").unwrap();
        assert!(data.records[2]["Active?"].is_null());
    }

    #[test]
    fn test_numeric_cell_keeps_type() {
        let data = rows_from_range(&sample_range(), "Sheet1").unwrap();
        assert_eq!(data.records[2]["Item ID"], json!(1234.0));
    }

    #[test]
    fn test_headerless_sheet_is_error() {
        let range = Range::<Data>::new((0, 0), (0, 0));
        let result = rows_from_range(&range, "Sheet1");
        assert!(matches!(result, Err(SheetError::NoHeaders(_))));
    }
}
