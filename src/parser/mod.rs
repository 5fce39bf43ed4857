//! Delimited-text loading with encoding fallback and delimiter auto-detection.
//!
//! Converts export rows into JSON objects keyed by column header. No
//! inventory logic here.
//!
//! Accounting packages export with whatever encoding the host machine was
//! configured for, so decoding walks an ordered fallback chain: strict
//! UTF-8, then strict windows-1252, then lossy UTF-8 as the permissive
//! last resort. The first decode that succeeds wins.
//!
//! Cells are split on the bare delimiter; a delimiter inside a quoted
//! cell is not protected and shifts the cells after it. The source
//! exports this loader targets never quote delimiters in their fields.

use serde_json::{json, Map, Value};
use std::path::Path;

use crate::error::{CsvError, CsvResult};

/// Result of parsing with metadata
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Parsed records as JSON objects
    pub records: Vec<Value>,
    /// Encoding that won the fallback chain
    pub encoding: String,
    /// Detected or explicit delimiter
    pub delimiter: char,
    /// Column headers
    pub headers: Vec<String>,
}

/// Decode raw export bytes through the fallback chain.
///
/// Returns the decoded text and the name of the encoding that accepted it.
/// The final lossy step cannot fail, so neither can this function.
pub fn decode_with_fallback(bytes: &[u8]) -> (String, String) {
    if let Ok(text) = std::str::from_utf8(bytes) {
        return (text.to_string(), "utf-8".to_string());
    }

    if let Some(text) =
        encoding_rs::WINDOWS_1252.decode_without_bom_handling_and_without_replacement(bytes)
    {
        return (text.into_owned(), "windows-1252".to_string());
    }

    (
        String::from_utf8_lossy(bytes).into_owned(),
        "utf-8 (lossy)".to_string(),
    )
}

/// Detect the delimiter by counting occurrences in the first line
pub fn detect_delimiter(content: &str) -> char {
    let first_line = content.lines().next().unwrap_or("");

    let separators = [',', ';', '\t', '|'];
    let mut best_sep = ',';
    let mut best_count = 0;

    for &sep in &separators {
        let count = first_line.matches(sep).count();
        if count > best_count {
            best_count = count;
            best_sep = sep;
        }
    }

    best_sep
}

/// Parse delimited text with explicit delimiter and return metadata.
pub fn parse_string_with_metadata(
    content: &str,
    delimiter: char,
    encoding: String,
) -> CsvResult<ParseResult> {
    // Spreadsheet tools prepend a BOM; it must not leak into the first header.
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut lines = content.lines();

    // Get headers from first line
    let header_line = lines.next().ok_or(CsvError::EmptyFile)?;

    let headers: Vec<String> = header_line
        .split(delimiter)
        .map(|s| s.trim().trim_matches('"').to_string())
        .collect();

    if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
        return Err(CsvError::NoHeaders);
    }

    // Parse data rows
    let mut records = Vec::new();

    for line in lines {
        if line.trim().is_empty() {
            continue;
        }

        let values: Vec<&str> = line.split(delimiter).collect();
        let mut obj = Map::new();

        for (i, header) in headers.iter().enumerate() {
            let raw_value = values
                .get(i)
                .map(|s| s.trim().trim_matches('"'))
                .unwrap_or("");

            obj.insert(header.clone(), json!(raw_value));
        }

        records.push(Value::Object(obj));
    }

    Ok(ParseResult {
        records,
        encoding,
        delimiter,
        headers,
    })
}

/// Parse export bytes with encoding fallback and delimiter auto-detection.
pub fn parse_bytes_auto(bytes: &[u8]) -> CsvResult<ParseResult> {
    let (content, encoding) = decode_with_fallback(bytes);
    let delimiter = detect_delimiter(&content);
    parse_string_with_metadata(&content, delimiter, encoding)
}

/// Parse an export file with encoding fallback and delimiter auto-detection.
///
/// # Example
/// ```ignore
/// let result = parse_csv_file_auto("/path/to/Invcurrent.csv")?;
/// println!("Encoding: {}, Delimiter: '{}'", result.encoding, result.delimiter);
/// println!("Records: {}", result.records.len());
/// ```
pub fn parse_csv_file_auto<P: AsRef<Path>>(path: P) -> CsvResult<ParseResult> {
    let bytes = std::fs::read(path.as_ref())?;
    parse_bytes_auto(&bytes)
}

/// Parse an export file with an explicit delimiter (encoding still falls back).
pub fn parse_csv_file<P: AsRef<Path>>(path: P, delimiter: char) -> CsvResult<ParseResult> {
    let bytes = std::fs::read(path.as_ref())?;
    let (content, encoding) = decode_with_fallback(&bytes);
    parse_string_with_metadata(&content, delimiter, encoding)
}
