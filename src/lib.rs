//! # Depinv - inventory depreciation marking
//!
//! Depinv reconciles a current inventory export against a past export,
//! finds the items present in both, and rewrites them for depreciation:
//! description suffixed and uppercased, part number rebuilt around a month
//! stamp, status flag forced inactive.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//! │ current .csv │──▶│    Loaders   │──▶│ Match + Rules│──▶│  Export .csv │
//! │ past    .xlsx│   │ (enc. chain) │   │ + Transform  │   │  (UTF-8 BOM) │
//! └──────────────┘   └──────────────┘   └──────────────┘   └──────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use depinv::{run, ConsoleEditor, RunOptions};
//!
//! fn main() {
//!     let options = RunOptions {
//!         current: "Invcurrent.csv".into(),
//!         past: "Invpast.xlsx".into(),
//!         output: "Common_Items.csv".into(),
//!     };
//!     let summary = run(&options, &mut ConsoleEditor).unwrap();
//!     println!("Exported {} items", summary.eligible);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`logs`] - Leveled console progress
//! - [`parser`] - Delimited-text loading with encoding fallback
//! - [`sheet`] - Xlsx loading
//! - [`models`] - Column names, tables, and the export projection
//! - [`matcher`] - Key normalization and intersection
//! - [`rules`] - Item-class and exclusion-list filtering
//! - [`transform`] - Depreciation rewrite
//! - [`report`] - Valuation totals
//! - [`writer`] - BOM-prefixed CSV export
//! - [`pipeline`] - Orchestration

// Core modules
pub mod error;
pub mod logs;
pub mod models;

// Loading
pub mod parser;
pub mod sheet;

// Reconciliation
pub mod matcher;
pub mod rules;

// Rewrite and output
pub mod report;
pub mod transform;
pub mod writer;

// Orchestration
pub mod pipeline;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{CsvError, ExportError, PipelineError, SheetError, TransformError};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{ExportRow, Table};

// =============================================================================
// Re-exports - Loading
// =============================================================================

pub use parser::{
    decode_with_fallback, detect_delimiter, parse_bytes_auto, parse_csv_file,
    parse_csv_file_auto, ParseResult,
};
pub use sheet::{load_sheet, rows_from_range, SheetData};

// =============================================================================
// Re-exports - Transform
// =============================================================================

pub use transform::{
    current_month_stamp, derive_part_number, ConsoleEditor, DescriptionEditor,
    DESCRIPTION_LIMIT, DESCRIPTION_SUFFIX,
};

// =============================================================================
// Re-exports - Reporting and output
// =============================================================================

pub use report::{summarize, ValuationSummary};
pub use writer::{to_csv_bytes, write_export};

// =============================================================================
// Re-exports - Pipeline
// =============================================================================

pub use pipeline::{reconcile_tables, run, RunOptions, RunSummary};
