//! Valuation totals over the export set.
//!
//! Informational only: the totals are printed before writing and never
//! persisted.

use crate::models::ExportRow;

/// Aggregate monetary totals across the export rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValuationSummary {
    /// Sum of `Sales Price 1`.
    pub total_sales_price: f64,
    /// Sum of `Last Unit Cost`.
    pub total_last_cost: f64,
}

impl ValuationSummary {
    /// Price minus cost across the whole export.
    pub fn difference(&self) -> f64 {
        self.total_sales_price - self.total_last_cost
    }
}

/// Sum the valuation columns; rows without a value contribute nothing.
pub fn summarize(rows: &[ExportRow]) -> ValuationSummary {
    ValuationSummary {
        total_sales_price: rows.iter().filter_map(|r| r.sales_price).sum(),
        total_last_cost: rows.iter().filter_map(|r| r.last_unit_cost).sum(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(price: Option<f64>, cost: Option<f64>) -> ExportRow {
        ExportRow {
            item_id: "A1".into(),
            inactive: "TRUE".into(),
            description_for_sales: "WIDGET - DEP INV".into(),
            part_number: "DEPINV032025-A1".into(),
            sales_price: price,
            last_unit_cost: cost,
        }
    }

    #[test]
    fn test_summarize_sums_and_difference() {
        let rows = vec![
            row(Some(10.0), Some(4.0)),
            row(Some(2.5), Some(1.0)),
            row(None, None),
        ];

        let summary = summarize(&rows);
        assert_eq!(summary.total_sales_price, 12.5);
        assert_eq!(summary.total_last_cost, 5.0);
        assert_eq!(summary.difference(), 7.5);
    }

    #[test]
    fn test_empty_export_sums_to_zero() {
        let summary = summarize(&[]);
        assert_eq!(summary.total_sales_price, 0.0);
        assert_eq!(summary.difference(), 0.0);
    }
}
