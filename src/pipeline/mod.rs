//! End-to-end reconciliation pipeline.
//!
//! Load both exports, drop inactive rows, normalize and intersect the
//! keys, verify the intersection, apply the business rules, rewrite the
//! survivors for depreciation, report valuation totals, and write the
//! output file. One run, no state left behind.

use std::path::PathBuf;

use crate::error::{PipelineError, PipelineResult};
use crate::logs::{log_error, log_info, log_success, log_warning};
use crate::matcher;
use crate::models::{
    field_str, ExportRow, Table, ACTIVE_STATUS, DESCRIPTION, INACTIVE, ITEM_CLASS, ITEM_ID,
    LAST_UNIT_COST, PART_NUMBER, SALES_PRICE,
};
use crate::parser::parse_csv_file_auto;
use crate::report::{summarize, ValuationSummary};
use crate::rules;
use crate::sheet::load_sheet;
use crate::transform::{current_month_stamp, mark_rows, DescriptionEditor};
use crate::writer::write_export;

/// Options for a reconciliation run
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Current inventory export (delimited text).
    pub current: PathBuf,
    /// Past inventory export (xlsx).
    pub past: PathBuf,
    /// Output file.
    pub output: PathBuf,
}

/// Result of a complete reconciliation run
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Current rows remaining after the inactive filter.
    pub current_rows: usize,
    /// Past rows remaining after the inactive filter.
    pub past_rows: usize,
    /// Rows present in both exports.
    pub matched: usize,
    /// Matched rows that survived the business rules.
    pub eligible: usize,
    /// Keys that failed the subset verification (diagnostic only).
    pub verification_failures: Vec<String>,
    /// Valuation totals, when the current export carries the columns.
    pub valuation: Option<ValuationSummary>,
}

/// Run the full pipeline against files on disk.
///
/// The editor resolves over-long descriptions; see
/// [`crate::transform::DescriptionEditor`].
pub fn run(options: &RunOptions, editor: &mut dyn DescriptionEditor) -> PipelineResult<RunSummary> {
    log_info(format!("📖 Reading current inventory: {}", options.current.display()));
    let parsed = parse_csv_file_auto(&options.current)?;
    log_success(format!("Encoding: {}", parsed.encoding));
    log_success(format!("Delimiter: '{}'", format_delimiter(parsed.delimiter)));
    log_success(format!("Read {} rows", parsed.records.len()));
    let current = Table::from(parsed);

    log_info(format!("📖 Reading past inventory: {}", options.past.display()));
    let sheet = load_sheet(&options.past)?;
    log_success(format!("Worksheet: {}", sheet.sheet_name));
    log_success(format!("Read {} rows", sheet.records.len()));
    let past = Table::from(sheet);

    let (export, summary) = reconcile_tables(current, past, &current_month_stamp(), editor)?;

    if let Some(valuation) = summary.valuation {
        log_info("📊 Valuation totals:");
        log_info(format!("Sum of sale price: {:.2}", valuation.total_sales_price));
        log_info(format!("Sum of last cost:  {:.2}", valuation.total_last_cost));
        log_info(format!("Difference:        {:.2}", valuation.difference()));
    }

    let include_valuation = summary.valuation.is_some();
    write_export(&export, &options.output, include_valuation)?;
    log_success(format!(
        "Exported {} rows to {}",
        export.len(),
        options.output.display()
    ));

    Ok(summary)
}

/// Reconcile two in-memory tables. Split out from [`run`] so the pipeline
/// can be exercised without files on disk.
pub fn reconcile_tables(
    mut current: Table,
    mut past: Table,
    stamp: &str,
    editor: &mut dyn DescriptionEditor,
) -> PipelineResult<(Vec<ExportRow>, RunSummary)> {
    require_columns(
        &current,
        "current",
        &[ITEM_ID, INACTIVE, ITEM_CLASS, DESCRIPTION, PART_NUMBER],
    )?;
    require_columns(&past, "past", &[ITEM_ID, ACTIVE_STATUS])?;

    let include_valuation = current.has_column(SALES_PRICE) && current.has_column(LAST_UNIT_COST);

    // Each export encodes "inactive" its own way; filter with each source's
    // own convention rather than normalizing first.
    log_info("🧹 Removing inactive items...");
    current.rows.retain(|row| !is_inactive_current(row));
    past.rows.retain(|row| !is_inactive_past(row));
    log_success(format!("Current export: {} active rows", current.len()));
    log_success(format!("Past export: {} active rows", past.len()));

    log_info("🔑 Normalizing item keys...");
    matcher::normalize_keys(&mut current.rows);
    matcher::normalize_keys(&mut past.rows);

    let past_keys = matcher::key_set(&past.rows);
    let matched = matcher::match_common(&current.rows, &past_keys);
    log_success(format!("Common items found: {}", matched.len()));

    let verification_failures = matcher::verify_subset(&matched, &past_keys);
    if verification_failures.is_empty() {
        log_success("VERIFIED: all matched items exist in the past export");
    } else {
        log_error(format!(
            "Found matched items missing from the past export: {}",
            verification_failures.join(", ")
        ));
    }

    log_info("📋 Applying business rules...");
    let matched_count = matched.len();
    let eligible = rules::apply(matched);
    if eligible.len() < matched_count {
        log_warning(format!(
            "Dropped {} rows (wrong item class or excluded id)",
            matched_count - eligible.len()
        ));
    }
    log_success(format!("Eligible for depreciation: {}", eligible.len()));

    let projected: Vec<ExportRow> = eligible
        .iter()
        .map(|row| ExportRow::from_row(row, include_valuation))
        .collect();

    log_info("⚙️  Marking items for depreciation...");
    let export = mark_rows(projected, stamp, editor)?;

    let valuation = include_valuation.then(|| summarize(&export));

    let summary = RunSummary {
        current_rows: current.len(),
        past_rows: past.len(),
        matched: matched_count,
        eligible: export.len(),
        verification_failures,
        valuation,
    };

    Ok((export, summary))
}

/// Current-export convention: a row is inactive when the status cell is
/// boolean `true` or the text form a delimited export writes for it.
/// Null or missing status survives.
pub fn is_inactive_current(row: &serde_json::Value) -> bool {
    match row.get(INACTIVE) {
        Some(serde_json::Value::Bool(b)) => *b,
        Some(serde_json::Value::String(s)) => s.trim().eq_ignore_ascii_case("true"),
        _ => false,
    }
}

/// Past-export convention: a row is inactive when the status cell is
/// exactly the string `"Inactive"`. Null or missing status survives.
pub fn is_inactive_past(row: &serde_json::Value) -> bool {
    field_str(row, ACTIVE_STATUS).as_deref() == Some("Inactive")
}

fn require_columns(table: &Table, label: &str, columns: &[&str]) -> PipelineResult<()> {
    for column in columns {
        if !table.has_column(column) {
            return Err(PipelineError::MissingColumn {
                table: label.to_string(),
                column: column.to_string(),
            });
        }
    }
    Ok(())
}

fn format_delimiter(d: char) -> String {
    match d {
        '\t' => "\\t".to_string(),
        c => c.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_null_status_survives_current_filter() {
        assert!(!is_inactive_current(&json!({"Inactive": null})));
        assert!(!is_inactive_current(&json!({})));
        assert!(!is_inactive_current(&json!({"Inactive": "FALSE"})));
        assert!(is_inactive_current(&json!({"Inactive": "TRUE"})));
        assert!(is_inactive_current(&json!({"Inactive": true})));
    }

    #[test]
    fn test_null_status_survives_past_filter() {
        assert!(!is_inactive_past(&json!({"Active?": null})));
        assert!(!is_inactive_past(&json!({})));
        assert!(!is_inactive_past(&json!({"Active?": "Active"})));
        assert!(is_inactive_past(&json!({"Active?": "Inactive"})));
    }

    #[test]
    fn test_past_filter_does_not_use_current_convention() {
        // The asymmetry is intentional: "TRUE" means nothing to the past
        // export and must not drop the row.
        assert!(!is_inactive_past(&json!({"Active?": "TRUE"})));
        assert!(!is_inactive_current(&json!({"Inactive": "Inactive"})));
    }

    #[test]
    fn test_missing_column_is_fatal() {
        struct NoEditor;
        impl DescriptionEditor for NoEditor {
            fn replace(&mut self, _: &str, _: &str, _: usize) -> std::io::Result<String> {
                unreachable!("no over-long descriptions in this fixture")
            }
        }

        let current = Table::new(vec![ITEM_ID.into()], vec![]);
        let past = Table::new(vec![ITEM_ID.into(), ACTIVE_STATUS.into()], vec![]);

        let err = reconcile_tables(current, past, "032025", &mut NoEditor).unwrap_err();
        assert!(matches!(err, PipelineError::MissingColumn { .. }));
    }
}
