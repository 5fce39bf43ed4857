//! Domain model for inventory exports.
//!
//! Rows travel through the pipeline as JSON objects keyed by the column
//! headers the accounting package writes. This module names those columns,
//! wraps rows in [`Table`], provides the loose-to-typed coercion helpers,
//! and defines [`ExportRow`], the typed projection the transformer and
//! writer operate on.

use serde::Serialize;
use serde_json::Value;

use crate::parser::ParseResult;
use crate::sheet::SheetData;

// =============================================================================
// Column Names
// =============================================================================

/// Item key column, shared by both exports.
pub const ITEM_ID: &str = "Item ID";
/// Current-export status column (boolean-like).
pub const INACTIVE: &str = "Inactive";
/// Past-export status column (the literal string "Inactive" marks a dead item).
pub const ACTIVE_STATUS: &str = "Active?";
/// Item category code; 0 is a depreciable physical item.
pub const ITEM_CLASS: &str = "Item Class";
/// Sales description, limited to 160 characters on export.
pub const DESCRIPTION: &str = "Description for Sales";
/// Part number, rewritten with the depreciation stamp.
pub const PART_NUMBER: &str = "Part Number";
/// Unit sale price (valuation column, optional).
pub const SALES_PRICE: &str = "Sales Price 1";
/// Last unit cost (valuation column, optional).
pub const LAST_UNIT_COST: &str = "Last Unit Cost";

// =============================================================================
// Table
// =============================================================================

/// An in-memory inventory table: ordered rows keyed by column header.
#[derive(Debug, Clone)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Value>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Value>) -> Self {
        Self { headers, rows }
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl From<ParseResult> for Table {
    fn from(parsed: ParseResult) -> Self {
        Self::new(parsed.headers, parsed.records)
    }
}

impl From<SheetData> for Table {
    fn from(sheet: SheetData) -> Self {
        Self::new(sheet.headers, sheet.records)
    }
}

// =============================================================================
// Value Coercion
// =============================================================================

/// Coerce a JSON value to its text form. Null and containers have none.
pub fn value_str(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Read a column as text.
pub fn field_str(row: &Value, column: &str) -> Option<String> {
    row.get(column).and_then(value_str)
}

/// Read a column as a float, accepting numeric text.
pub fn field_f64(row: &Value, column: &str) -> Option<f64> {
    match row.get(column)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Read a column as an integer, accepting numeric text and whole floats.
pub fn field_i64(row: &Value, column: &str) -> Option<i64> {
    match row.get(column)? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => {
            let trimmed = s.trim();
            trimmed.parse::<i64>().ok().or_else(|| {
                trimmed
                    .parse::<f64>()
                    .ok()
                    .filter(|f| f.fract() == 0.0)
                    .map(|f| f as i64)
            })
        }
        _ => None,
    }
}

// =============================================================================
// Export Row
// =============================================================================

/// Typed projection of an eligible row, ready for the depreciation rewrite.
///
/// Valuation fields are carried only when the current export includes the
/// valuation columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRow {
    pub item_id: String,
    pub inactive: String,
    pub description_for_sales: String,
    pub part_number: String,
    pub sales_price: Option<f64>,
    pub last_unit_cost: Option<f64>,
}

impl ExportRow {
    /// Project a matched row, coercing every field to its export type.
    pub fn from_row(row: &Value, include_valuation: bool) -> Self {
        Self {
            item_id: field_str(row, ITEM_ID).unwrap_or_default(),
            inactive: field_str(row, INACTIVE).unwrap_or_default(),
            description_for_sales: field_str(row, DESCRIPTION).unwrap_or_default(),
            part_number: field_str(row, PART_NUMBER).unwrap_or_default(),
            sales_price: include_valuation
                .then(|| field_f64(row, SALES_PRICE))
                .flatten(),
            last_unit_cost: include_valuation
                .then(|| field_f64(row, LAST_UNIT_COST))
                .flatten(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_str_coercion() {
        let row = json!({"a": "text", "b": 1234.0, "c": true, "d": null});
        assert_eq!(field_str(&row, "a").as_deref(), Some("text"));
        assert_eq!(field_str(&row, "b").as_deref(), Some("1234.0"));
        assert_eq!(field_str(&row, "c").as_deref(), Some("true"));
        assert_eq!(field_str(&row, "d"), None);
        assert_eq!(field_str(&row, "missing"), None);
    }

    #[test]
    fn test_field_i64_accepts_text_and_whole_floats() {
        let row = json!({"a": "0", "b": 0.0, "c": 2, "d": "2.0", "e": "1.5", "f": "n/a"});
        assert_eq!(field_i64(&row, "a"), Some(0));
        assert_eq!(field_i64(&row, "b"), Some(0));
        assert_eq!(field_i64(&row, "c"), Some(2));
        assert_eq!(field_i64(&row, "d"), Some(2));
        assert_eq!(field_i64(&row, "e"), None);
        assert_eq!(field_i64(&row, "f"), None);
    }

    #[test]
    fn test_export_row_projection() {
        let row = json!({
            "Item ID": "A1",
            "Inactive": "FALSE",
            "Description for Sales": "Widget",
            "Part Number": "P1",
            "Sales Price 1": "19.99",
            "Last Unit Cost": 12.5,
        });

        let export = ExportRow::from_row(&row, true);
        assert_eq!(export.item_id, "A1");
        assert_eq!(export.description_for_sales, "Widget");
        assert_eq!(export.sales_price, Some(19.99));
        assert_eq!(export.last_unit_cost, Some(12.5));

        let without = ExportRow::from_row(&row, false);
        assert_eq!(without.sales_price, None);
        assert_eq!(without.last_unit_cost, None);
    }

    #[test]
    fn test_table_has_column() {
        let table = Table::new(vec!["Item ID".into(), "Inactive".into()], vec![]);
        assert!(table.has_column("Item ID"));
        assert!(!table.has_column("Active?"));
        assert!(table.is_empty());
    }
}
