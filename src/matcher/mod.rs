//! Key normalization and current/past intersection.
//!
//! Both exports key items by `Item ID`, but the cells arrive with stray
//! whitespace and sometimes as numbers. Normalization rewrites the key in
//! place as a trimmed string so every later stage compares like with like.

use serde_json::Value;
use std::collections::HashSet;

use crate::models::{value_str, ITEM_ID};

/// Text form of a key cell.
///
/// Spreadsheet cells deliver all-digit ids as floats, so a whole-valued
/// number renders without the fractional part: `1234.0` and `"1234"` must
/// produce the same key on both sides of the match.
fn key_string(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => {
            if let Some(f) = n.as_f64() {
                if f.fract() == 0.0 && f.abs() < 1e15 {
                    return Some(format!("{}", f as i64));
                }
            }
            Some(n.to_string())
        }
        other => value_str(other),
    }
}

/// Rewrite every row's `Item ID` as a trimmed string, in place.
///
/// Idempotent: normalizing an already-normalized table changes nothing.
pub fn normalize_keys(rows: &mut [Value]) {
    for row in rows.iter_mut() {
        if let Some(obj) = row.as_object_mut() {
            let key = obj
                .get(ITEM_ID)
                .and_then(key_string)
                .map(|s| s.trim().to_string())
                .unwrap_or_default();
            obj.insert(ITEM_ID.to_string(), Value::String(key));
        }
    }
}

/// Collect the normalized key set of a table.
pub fn key_set(rows: &[Value]) -> HashSet<String> {
    rows.iter()
        .filter_map(|row| crate::models::field_str(row, ITEM_ID))
        .collect()
}

/// Current rows whose key appears in the past key set, in current order.
pub fn match_common(current: &[Value], past_keys: &HashSet<String>) -> Vec<Value> {
    current
        .iter()
        .filter(|row| {
            crate::models::field_str(row, ITEM_ID)
                .map(|key| past_keys.contains(&key))
                .unwrap_or(false)
        })
        .cloned()
        .collect()
}

/// Sanity pass: re-check that every matched key is in the past key set.
///
/// Returns the offending keys. The caller reports them and continues; a
/// non-empty result never changes the output.
pub fn verify_subset(matched: &[Value], past_keys: &HashSet<String>) -> Vec<String> {
    matched
        .iter()
        .filter_map(|row| crate::models::field_str(row, ITEM_ID))
        .filter(|key| !past_keys.contains(key))
        .collect()
}
