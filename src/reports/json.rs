//! JSON report generator.

use super::{ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::model::{PartRow, PartsTable};
use crate::scoring::{
    OrderBatch, OrderParameters, ReportRow, ScoringOutcome, VendorScore, Winners,
};
use chrono::Utc;
use indexmap::IndexMap;
use serde::Serialize;

/// JSON report generator
pub struct JsonReporter {
    /// Whether to only include summary
    summary_only: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { summary_only: false }
    }

    /// Create a summary-only reporter
    #[must_use]
    pub const fn summary_only() -> Self {
        Self { summary_only: true }
    }

    fn serialize<T: Serialize>(value: &T) -> Result<String, ReportError> {
        serde_json::to_string_pretty(value)
            .map_err(|e| ReportError::SerializationError(e.to_string()))
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for JsonReporter {
    fn generate_score_report(
        &self,
        outcome: &ScoringOutcome,
        winners: &Winners,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let vendors = &outcome.scored.vendors;

        let report = JsonScoreReport {
            metadata: JsonReportMetadata::new(config),
            batch: outcome.batch,
            parameters: &outcome.parameters,
            vendors,
            summary: JsonSummary {
                orders: outcome.scored.len(),
                wins: winners.wins_by_vendor(vendors),
                ties: winners.tie_count(),
            },
            orders: if self.summary_only {
                None
            } else {
                Some(
                    outcome
                        .scored
                        .orders
                        .iter()
                        .enumerate()
                        .map(|(index, order)| JsonOrder {
                            order: order.order,
                            label: outcome.batch.order_label(order.order),
                            source_row: order.source_row,
                            part_id: &order.part_id,
                            title: &order.title,
                            best_price: order.best_price,
                            part: &order.part,
                            scores: &order.scores,
                            winners: winners
                                .orders
                                .get(index)
                                .map(|w| w.vendors.as_slice())
                                .unwrap_or_default(),
                        })
                        .collect(),
                )
            },
            report: (!self.summary_only).then_some(outcome.report.as_slice()),
        };

        Self::serialize(&report)
    }

    fn generate_preview_report(
        &self,
        table: &PartsTable,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let report = JsonPreviewReport {
            metadata: JsonReportMetadata::new(config),
            headers: table.headers(),
            rows: table.rows(),
        };
        Self::serialize(&report)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}

// ============================================================================
// JSON report structures
// ============================================================================

#[derive(Serialize)]
struct JsonScoreReport<'a> {
    metadata: JsonReportMetadata,
    batch: OrderBatch,
    parameters: &'a OrderParameters,
    vendors: &'a [String],
    summary: JsonSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    orders: Option<Vec<JsonOrder<'a>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<&'a [ReportRow]>,
}

#[derive(Serialize)]
struct JsonReportMetadata {
    tool: ToolInfo,
    generated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    input_file: Option<String>,
}

impl JsonReportMetadata {
    fn new(config: &ReportConfig) -> Self {
        Self {
            tool: ToolInfo {
                name: "multisource".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            generated_at: Utc::now().to_rfc3339(),
            title: config.title.clone(),
            input_file: config.metadata.input_path.clone(),
        }
    }
}

#[derive(Serialize)]
struct ToolInfo {
    name: String,
    version: String,
}

#[derive(Serialize)]
struct JsonSummary {
    orders: usize,
    wins: IndexMap<String, usize>,
    ties: usize,
}

#[derive(Serialize)]
struct JsonOrder<'a> {
    order: usize,
    label: String,
    source_row: usize,
    part_id: &'a str,
    title: &'a str,
    best_price: f64,
    part: &'a PartRow,
    scores: &'a [VendorScore],
    winners: &'a [String],
}

#[derive(Serialize)]
struct JsonPreviewReport<'a> {
    metadata: JsonReportMetadata,
    headers: &'a [String],
    rows: &'a [PartRow],
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::test_support;
    use serde_json::Value;

    #[test]
    fn test_score_report_structure() {
        let (outcome, winners) = test_support::outcome();
        let json = JsonReporter::new()
            .generate_score_report(&outcome, &winners, &ReportConfig::for_input("parts.csv"))
            .unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["metadata"]["tool"]["name"], "multisource");
        assert_eq!(value["metadata"]["input_file"], "parts.csv");
        assert_eq!(value["batch"]["seed"], 1);
        assert_eq!(value["summary"]["orders"], 6);
        assert_eq!(value["orders"].as_array().map(Vec::len), Some(6));
        assert_eq!(value["report"].as_array().map(Vec::len), Some(18));
        assert_eq!(value["vendors"][0], "Encompass");
        assert_eq!(value["parameters"]["weights"]["cost"], 45);

        let first = &value["orders"][0];
        assert_eq!(first["scores"].as_array().map(Vec::len), Some(3));
        assert!(!first["winners"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_summary_only_omits_rows() {
        let (outcome, winners) = test_support::outcome();
        let json = JsonReporter::summary_only()
            .generate_score_report(&outcome, &winners, &ReportConfig::default())
            .unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert!(value.get("orders").is_none());
        assert!(value.get("report").is_none());

        let total: u64 = value["summary"]["wins"]
            .as_object()
            .unwrap()
            .values()
            .filter_map(Value::as_u64)
            .sum();
        assert!(total >= 6);
    }

    #[test]
    fn test_preview_report() {
        let json = JsonReporter::new()
            .generate_preview_report(&test_support::parts(), &ReportConfig::default())
            .unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["headers"][0], "Part Number");
        assert_eq!(value["rows"][0]["Marcone"], 11.0);
        assert_eq!(value["rows"][0]["Installs"], "40");
    }
}
