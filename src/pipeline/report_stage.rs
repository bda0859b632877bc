//! Report output stage.
//!
//! Handles generating and writing score and preview reports. The TUI is
//! routed by the command handlers before this stage is reached.

use super::{PipelineError, ReportDestination, ScoredRun};
use crate::config::{PreviewConfig, ScoreConfig};
use crate::model::PartsTable;
use anyhow::Result;

/// Output a score report to the configured destination.
pub fn output_score_report(config: &ScoreConfig, run: &ScoredRun) -> Result<()> {
    let destination = ReportDestination::resolve(&config.app.output);
    let report_config = destination.report_config(&config.input);
    let report = destination
        .reporter()
        .generate_score_report(&run.outcome, &run.winners, &report_config)
        .map_err(|e| PipelineError::ReportFailed { source: e.into() })?;

    destination.write(&report, config.quiet)
}

/// Output the upload preview to the configured destination.
pub fn output_preview_report(config: &PreviewConfig, table: &PartsTable) -> Result<()> {
    let destination = ReportDestination::resolve(&config.app.output);
    let head = table.head(config.rows);
    let report = destination
        .reporter()
        .generate_preview_report(&head, &destination.report_config(&config.input))
        .map_err(|e| PipelineError::ReportFailed { source: e.into() })?;

    destination.write(&report, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::pipeline::{load_parts_table, score_parts};
    use crate::reports::ReportFormat;
    use crate::scoring::RawParameters;
    use tempfile::TempDir;

    const PARTS: &str = "Part Number;Title;Installs;Encompass;Marcone;Reliable\n\
        P1;Thermistor;40;$12.50;$11.00;$30.00\n\
        P2;Filter;10;$39.99;$44.50;$39.99\n\
        P3;Element;5;$25.00;$24.00;$18.75\n";

    #[test]
    fn test_score_report_written_to_file() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("parts.csv");
        std::fs::write(&input, PARTS).unwrap();
        let report = tmp.path().join("scores.json");

        let mut app = AppConfig::builder().output_format(ReportFormat::Json).build();
        app.output.file = Some(report.clone());
        let config = ScoreConfig {
            input: input.clone(),
            parameters: RawParameters::suggested().orders(4),
            app,
            quiet: true,
        };

        let table = load_parts_table(&input, &config.app, true).unwrap();
        let run = score_parts(&table, &config.app, &config.parameters, true).unwrap();
        output_score_report(&config, &run).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(report).unwrap()).unwrap();
        assert_eq!(json["summary"]["orders"], 4);
    }

    #[test]
    fn test_preview_written_to_file() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("parts.csv");
        std::fs::write(&input, PARTS).unwrap();
        let out = tmp.path().join("preview.csv");

        let mut app = AppConfig::builder().output_format(ReportFormat::Csv).build();
        app.output.file = Some(out.clone());
        let config = PreviewConfig {
            input: input.clone(),
            rows: 2,
            app,
        };

        let table = load_parts_table(&input, &config.app, true).unwrap();
        output_preview_report(&config, &table).unwrap();
        assert_eq!(std::fs::read_to_string(out).unwrap().lines().count(), 3);
    }
}
