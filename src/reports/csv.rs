//! CSV report generator.
//!
//! Generates comma-separated reports for scoring runs and previews,
//! suitable for spreadsheet import and data analysis pipelines.

use super::{ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::model::PartsTable;
use crate::scoring::{ScoringOutcome, Winners};

/// Sub-score columns written for every vendor in the scored orders section.
const VENDOR_COLUMNS: [&str; 6] = ["Price", "Cost", "Shipping", "Trust", "Returnability", "Total"];

/// CSV report generator.
pub struct CsvReporter;

impl CsvReporter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CsvReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for CsvReporter {
    fn generate_score_report(
        &self,
        outcome: &ScoringOutcome,
        winners: &Winners,
        _config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let vendors = &outcome.scored.vendors;

        // Wide table: one line per order, six columns per vendor
        let mut header: Vec<String> = ["Order", "Part", "Title", "Best Price"]
            .map(String::from)
            .to_vec();
        for vendor in vendors {
            header.extend(VENDOR_COLUMNS.iter().map(|column| format!("{vendor} {column}")));
        }
        header.push("Winners".to_string());

        let orders = outcome.scored.orders.iter().enumerate().map(|(index, order)| {
            let mut record = vec![
                outcome.batch.order_label(order.order),
                order.part_id.clone(),
                order.title.clone(),
                order.best_price.to_string(),
            ];
            for score in &order.scores {
                record.extend(
                    [
                        score.price,
                        score.cost,
                        score.shipping,
                        score.trust,
                        score.returnability,
                        score.total,
                    ]
                    .map(|value| value.to_string()),
                );
            }
            record.push(
                winners
                    .orders
                    .get(index)
                    .map(|w| w.vendors.join("; "))
                    .unwrap_or_default(),
            );
            record
        });
        let scored = write_records(std::iter::once(header).chain(orders))?;

        // Long-form table
        let report_header = ["Order", "Part", "Title", "Vendor", "Total Score"]
            .map(String::from)
            .to_vec();
        let rows = outcome.report.iter().map(|row| {
            vec![
                outcome.batch.order_label(row.order),
                row.part_id.clone(),
                row.title.clone(),
                row.vendor.clone(),
                row.total.to_string(),
            ]
        });
        let report = write_records(std::iter::once(report_header).chain(rows))?;

        Ok(format!("# Scored Orders\n{scored}\n# Report\n{report}"))
    }

    fn generate_preview_report(
        &self,
        table: &PartsTable,
        _config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let rows = table
            .rows()
            .iter()
            .map(|row| table.headers().iter().map(|h| row.text(h)).collect());
        write_records(std::iter::once(table.headers().to_vec()).chain(rows))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Csv
    }
}

/// Write one CSV section; every record must have the header's length.
fn write_records(records: impl Iterator<Item = Vec<String>>) -> Result<String, ReportError> {
    let mut writer = ::csv::WriterBuilder::new().from_writer(Vec::new());
    for record in records {
        writer.write_record(&record)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| ReportError::SerializationError(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ReportError::SerializationError(e.to_string()))
}
