//! Export serialization with a UTF-8 byte-order marker.
//!
//! The whole table is serialized into one in-memory buffer (BOM first,
//! then header, then rows) and written with a single `fs::write`: either
//! the complete file lands on disk or nothing does. The BOM keeps common
//! spreadsheet tools from mangling the file on open.

use std::path::Path;

use crate::error::{ExportError, ExportResult};
use crate::models::{
    ExportRow, DESCRIPTION, INACTIVE, ITEM_ID, LAST_UNIT_COST, PART_NUMBER, SALES_PRICE,
};

const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

/// Serialize the export table to CSV bytes, BOM-prefixed.
pub fn to_csv_bytes(rows: &[ExportRow], include_valuation: bool) -> ExportResult<Vec<u8>> {
    let mut buf = Vec::new();
    buf.extend_from_slice(UTF8_BOM);

    let mut writer = csv::Writer::from_writer(buf);

    let mut header = vec![ITEM_ID, INACTIVE, DESCRIPTION, PART_NUMBER];
    if include_valuation {
        header.push(SALES_PRICE);
        header.push(LAST_UNIT_COST);
    }
    writer.write_record(&header)?;

    for row in rows {
        let mut record = vec![
            row.item_id.clone(),
            row.inactive.clone(),
            row.description_for_sales.clone(),
            row.part_number.clone(),
        ];
        if include_valuation {
            record.push(money(row.sales_price));
            record.push(money(row.last_unit_cost));
        }
        writer.write_record(&record)?;
    }

    writer.flush().map_err(ExportError::IoError)?;
    writer
        .into_inner()
        .map_err(|e| ExportError::Serialize(e.to_string()))
}

/// Write the export file in one shot.
pub fn write_export<P: AsRef<Path>>(
    rows: &[ExportRow],
    path: P,
    include_valuation: bool,
) -> ExportResult<()> {
    let bytes = to_csv_bytes(rows, include_valuation)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

fn money(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
