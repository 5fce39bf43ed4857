//! Error types for the depinv reconciliation pipeline.
//!
//! This module defines a hierarchy of error types:
//!
//! - [`CsvError`] - delimited-text loading errors
//! - [`SheetError`] - xlsx loading errors
//! - [`TransformError`] - depreciation rewrite errors
//! - [`ExportError`] - output serialization errors
//! - [`PipelineError`] - top-level orchestration errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use thiserror::Error;

// =============================================================================
// Delimited-Text Loading Errors
// =============================================================================

/// Errors while loading the current-inventory export.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Failed to read file.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// Empty file.
    #[error("Export file is empty")]
    EmptyFile,

    /// No headers found.
    #[error("No header row found in export")]
    NoHeaders,
}

// =============================================================================
// Spreadsheet Loading Errors
// =============================================================================

/// Errors while loading the past-inventory export.
#[derive(Debug, Error)]
pub enum SheetError {
    /// Failed to open or read the workbook.
    #[error("Failed to read workbook: {0}")]
    Workbook(#[from] calamine::XlsxError),

    /// Workbook has no worksheets.
    #[error("Workbook contains no worksheets")]
    NoWorksheet,

    /// Worksheet has no header row.
    #[error("Worksheet '{0}' has no header row")]
    NoHeaders(String),
}

// =============================================================================
// Transformation Errors
// =============================================================================

/// Errors during the depreciation rewrite.
#[derive(Debug, Error)]
pub enum TransformError {
    /// The description editor failed to supply a replacement.
    #[error("Description correction failed for item '{item_id}': {source}")]
    Editor {
        item_id: String,
        #[source]
        source: std::io::Error,
    },
}

// =============================================================================
// Export Errors
// =============================================================================

/// Errors while writing the output file.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Failed to write the output file.
    #[error("Failed to write output: {0}")]
    IoError(#[from] std::io::Error),

    /// CSV serialization failed.
    #[error("CSV serialization failed: {0}")]
    Csv(#[from] csv::Error),

    /// The in-memory buffer could not be recovered from the writer.
    #[error("CSV serialization failed: {0}")]
    Serialize(String),
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level pipeline orchestration errors.
///
/// This is the main error type returned by [`crate::pipeline::run`].
/// It wraps all lower-level errors and adds pipeline-specific variants.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Current-inventory loading error.
    #[error("Current inventory: {0}")]
    Csv(#[from] CsvError),

    /// Past-inventory loading error.
    #[error("Past inventory: {0}")]
    Sheet(#[from] SheetError),

    /// Depreciation rewrite error.
    #[error("Transform error: {0}")]
    Transform(#[from] TransformError),

    /// Output serialization error.
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// A referenced column is missing from an input.
    #[error("The {table} export is missing required column '{column}'")]
    MissingColumn { table: String, column: String },

    /// IO error outside the loaders.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for delimited-text loading.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for spreadsheet loading.
pub type SheetResult<T> = Result<T, SheetError>;

/// Result type for output serialization.
pub type ExportResult<T> = Result<T, ExportError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        // CsvError -> PipelineError
        let csv_err = CsvError::EmptyFile;
        let pipeline_err: PipelineError = csv_err.into();
        assert!(pipeline_err.to_string().contains("empty"));

        // ExportError -> PipelineError
        let export_err = ExportError::Serialize("buffer lost".into());
        let pipeline_err: PipelineError = export_err.into();
        assert!(pipeline_err.to_string().contains("buffer lost"));
    }

    #[test]
    fn test_missing_column_format() {
        let err = PipelineError::MissingColumn {
            table: "current".into(),
            column: "Item ID".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("current"));
        assert!(msg.contains("Item ID"));
    }
}
