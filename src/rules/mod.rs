//! Business-rule filtering for matched rows.
//!
//! Two rules decide whether a matched item may be marked for depreciation:
//! it must be a class-0 physical item (assemblies, services, and new
//! equipment use other class codes), and its key must not be one of the
//! known problem identifiers that live in the exclusion list.

use once_cell::sync::Lazy;
use serde_json::Value;
use std::collections::HashSet;

use crate::models::{field_i64, field_str, ITEM_CLASS, ITEM_ID};

/// Category code for depreciable physical inventory.
pub const DEPRECIABLE_ITEM_CLASS: i64 = 0;

/// Item identifiers that must never be marked for depreciation.
/// Matched exactly, case-sensitive.
pub static EXCLUDED_ITEM_IDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "DEPOSIT",
        "NEW",
        "NOTICE",
        "STORAGE",
        "USED",
        "WARRANTY",
        "CAP_DU30HFA",
    ]
    .into_iter()
    .collect()
});

/// True when the row's `Item Class` is the depreciable code.
///
/// Non-numeric or missing class is never depreciable.
pub fn is_depreciable_class(row: &Value) -> bool {
    field_i64(row, ITEM_CLASS) == Some(DEPRECIABLE_ITEM_CLASS)
}

/// True when the row's key is on the exclusion list.
pub fn is_excluded(row: &Value) -> bool {
    field_str(row, ITEM_ID)
        .map(|key| EXCLUDED_ITEM_IDS.contains(key.as_str()))
        .unwrap_or(false)
}

/// Apply both rules, keeping input order.
pub fn apply(rows: Vec<Value>) -> Vec<Value> {
    rows.into_iter()
        .filter(|row| is_depreciable_class(row) && !is_excluded(row))
        .collect()
}
