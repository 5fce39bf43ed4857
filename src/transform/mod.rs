//! Depreciation rewrite for eligible rows.
//!
//! Each surviving row gets three fields rewritten: the description is
//! suffixed with `" - DEP INV"` and uppercased, the part number is rebuilt
//! around a month stamp and a shortened item id, and the status flag is
//! forced to the textual sentinel `"TRUE"`.
//!
//! Descriptions are capped at 160 characters. When the suffixed text runs
//! over, the pipeline yields to a caller-supplied [`DescriptionEditor`]
//! and loops until the replacement fits. The CLI wires in a stdin prompt;
//! tests use a scripted editor.

use chrono::Local;
use std::io::{self, BufRead, Write};

use crate::error::TransformError;
use crate::models::ExportRow;

/// Suffix appended to every exported description (pre-uppercasing).
pub const DESCRIPTION_SUFFIX: &str = " - DEP INV";

/// Maximum description length, in characters.
pub const DESCRIPTION_LIMIT: usize = 160;

/// Prefix of every rewritten part number.
pub const PART_NUMBER_PREFIX: &str = "DEPINV";

/// Shortened item id length inside the rewritten part number.
const SHORT_ID_LEN: usize = 7;

/// Textual sentinel the export writes for a depreciated item.
pub const INACTIVE_SENTINEL: &str = "TRUE";

// =============================================================================
// Description Editor
// =============================================================================

/// Supplies a replacement when a description exceeds the limit.
///
/// The pipeline calls this repeatedly for the same row until the returned
/// text fits; it does not move past the row until then.
pub trait DescriptionEditor {
    fn replace(&mut self, item_id: &str, description: &str, limit: usize) -> io::Result<String>;
}

/// Interactive editor: prompts the operator on stderr, reads a line from
/// stdin. A closed stdin is an error, not an empty description.
pub struct ConsoleEditor;

impl DescriptionEditor for ConsoleEditor {
    fn replace(&mut self, item_id: &str, description: &str, limit: usize) -> io::Result<String> {
        eprintln!("\nDescription of {} exceeds {} characters:", item_id, limit);
        eprintln!("{}", description);
        eprint!("Enter a shorter description: ");
        io::stderr().flush()?;

        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line)?;
        if read == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "stdin closed while waiting for a replacement description",
            ));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

// =============================================================================
// Field Rewrites
// =============================================================================

/// Month stamp `MMYYYY` for the current local date, e.g. "032025".
pub fn current_month_stamp() -> String {
    Local::now().format("%m%Y").to_string()
}

/// Build the depreciation part number from an item id and a month stamp.
///
/// The id is trimmed, stripped of hyphens, and cut to its first 7
/// characters; shorter ids are used whole.
pub fn derive_part_number(item_id: &str, stamp: &str) -> String {
    let short_id: String = item_id
        .trim()
        .chars()
        .filter(|c| *c != '-')
        .take(SHORT_ID_LEN)
        .collect();
    format!("{}{}-{}", PART_NUMBER_PREFIX, stamp, short_id)
}

/// Rewrite one projected row in place.
fn mark_row(
    row: &mut ExportRow,
    stamp: &str,
    editor: &mut dyn DescriptionEditor,
) -> Result<(), TransformError> {
    let mut description = format!("{}{}", row.description_for_sales, DESCRIPTION_SUFFIX);

    while description.chars().count() > DESCRIPTION_LIMIT {
        description = editor
            .replace(&row.item_id, &description, DESCRIPTION_LIMIT)
            .map_err(|source| TransformError::Editor {
                item_id: row.item_id.clone(),
                source,
            })?;
    }

    row.description_for_sales = description.to_uppercase();
    row.part_number = derive_part_number(&row.item_id, stamp);
    row.inactive = INACTIVE_SENTINEL.to_string();
    Ok(())
}

/// Rewrite every eligible row, in order.
pub fn mark_rows(
    mut rows: Vec<ExportRow>,
    stamp: &str,
    editor: &mut dyn DescriptionEditor,
) -> Result<Vec<ExportRow>, TransformError> {
    for row in rows.iter_mut() {
        mark_row(row, stamp, editor)?;
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Test editor that replays a fixed script of replacements.
    pub struct ScriptedEditor {
        replies: VecDeque<String>,
        pub calls: usize,
    }

    impl ScriptedEditor {
        pub fn new(replies: &[&str]) -> Self {
            Self {
                replies: replies.iter().map(|s| s.to_string()).collect(),
                calls: 0,
            }
        }
    }

    impl DescriptionEditor for ScriptedEditor {
        fn replace(&mut self, _: &str, _: &str, _: usize) -> io::Result<String> {
            self.calls += 1;
            self.replies
                .pop_front()
                .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted"))
        }
    }

    fn widget(description: &str) -> ExportRow {
        ExportRow {
            item_id: "A1".into(),
            inactive: "FALSE".into(),
            description_for_sales: description.into(),
            part_number: "P1".into(),
            sales_price: None,
            last_unit_cost: None,
        }
    }

    #[test]
    fn test_derive_part_number() {
        assert_eq!(
            derive_part_number("AB-1234567-XYZ", "032025"),
            "DEPINV032025-AB12345"
        );
    }

    #[test]
    fn test_derive_part_number_short_id_used_whole() {
        assert_eq!(derive_part_number("A1", "032025"), "DEPINV032025-A1");
        assert_eq!(derive_part_number(" A-1 ", "122024"), "DEPINV122024-A1");
    }

    #[test]
    fn test_mark_rewrites_all_three_fields() {
        let mut editor = ScriptedEditor::new(&[]);
        let rows = mark_rows(vec![widget("Widget")], "032025", &mut editor).unwrap();

        assert_eq!(rows[0].description_for_sales, "WIDGET - DEP INV");
        assert_eq!(rows[0].part_number, "DEPINV032025-A1");
        assert_eq!(rows[0].inactive, "TRUE");
        assert_eq!(editor.calls, 0);
    }

    #[test]
    fn test_long_description_loops_until_fit() {
        let long = "x".repeat(200);
        let still_long = "y".repeat(180);
        let mut editor = ScriptedEditor::new(&[&still_long, "short widget"]);

        let rows = mark_rows(vec![widget(&long)], "032025", &mut editor).unwrap();

        assert_eq!(editor.calls, 2);
        assert_eq!(rows[0].description_for_sales, "SHORT WIDGET");
        assert!(rows[0].description_for_sales.chars().count() <= DESCRIPTION_LIMIT);
    }

    #[test]
    fn test_description_at_limit_is_untouched() {
        let fits = "x".repeat(DESCRIPTION_LIMIT - DESCRIPTION_SUFFIX.len());
        let mut editor = ScriptedEditor::new(&[]);

        let rows = mark_rows(vec![widget(&fits)], "032025", &mut editor).unwrap();
        assert_eq!(editor.calls, 0);
        assert_eq!(
            rows[0].description_for_sales.chars().count(),
            DESCRIPTION_LIMIT
        );
        assert!(rows[0].description_for_sales.ends_with(" - DEP INV"));
    }

    #[test]
    fn test_editor_failure_is_fatal() {
        let long = "x".repeat(200);
        let mut editor = ScriptedEditor::new(&[]);

        let err = mark_rows(vec![widget(&long)], "032025", &mut editor).unwrap_err();
        assert!(err.to_string().contains("A1"));
    }
}
