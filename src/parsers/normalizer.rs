//! Currency normalization for vendor price columns.

use crate::error::{EngineError, Result};
use crate::model::{Cell, PartsTable};

/// Convert a currency-formatted string such as `"$1,234.50"` to a number.
///
/// Only the currency symbol and thousands separators are stripped;
/// anything else that does not parse as a finite float is rejected.
#[must_use]
pub fn parse_currency(raw: &str) -> Option<f64> {
    let stripped: String = raw.chars().filter(|c| !matches!(c, '$' | ',')).collect();
    let trimmed = stripped.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Normalize the price columns of every vendor in `vendors`.
///
/// Columns of other names pass through untouched. A vendor without a
/// column is skipped here and reported by scoring validation instead.
pub fn normalize<S: AsRef<str>>(mut table: PartsTable, vendors: &[S]) -> Result<PartsTable> {
    let present: Vec<&str> = vendors
        .iter()
        .map(AsRef::as_ref)
        .filter(|vendor| {
            let has = table.has_column(vendor);
            if !has {
                tracing::warn!("No price column for vendor '{}'", vendor);
            }
            has
        })
        .collect();

    for (index, row) in table.rows_mut().iter_mut().enumerate() {
        for vendor in &present {
            let Some(cell) = row.get_mut(vendor) else {
                continue;
            };
            if let Cell::Text(raw) = cell {
                let value = parse_currency(raw)
                    .ok_or_else(|| EngineError::invalid_currency(*vendor, index + 1, raw.clone()))?;
                *cell = Cell::Number(value);
            }
        }
    }

    tracing::debug!(
        "Normalized {} vendor price columns across {} rows",
        present.len(),
        table.row_count()
    );

    Ok(table)
}
