//! Report generation for scoring results.
//!
//! This module provides multiple output formats:
//! - Table: per-order vendor totals with winners highlighted
//! - Summary: compact shell-friendly overview of wins per vendor
//! - JSON: structured data for programmatic integration
//! - CSV: scored orders and the long-form report for spreadsheets
//!
//! Every generator also renders the upload preview.

mod csv;
mod json;
mod summary;
mod types;

pub use self::csv::CsvReporter;
pub use json::JsonReporter;
pub use summary::{SummaryReporter, TableReporter};
pub use types::{ReportConfig, ReportFormat, ReportMetadata};

use crate::model::PartsTable;
use crate::scoring::{ScoringOutcome, Winners};
use std::io::Write;
use thiserror::Error;

/// Errors that can occur during report generation
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Format error: {0}")]
    FormatError(#[from] std::fmt::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] ::csv::Error),
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Generate a report from a scoring run
    fn generate_score_report(
        &self,
        outcome: &ScoringOutcome,
        winners: &Winners,
        config: &ReportConfig,
    ) -> Result<String, ReportError>;

    /// Generate a preview of the normalized upload
    fn generate_preview_report(
        &self,
        table: &PartsTable,
        config: &ReportConfig,
    ) -> Result<String, ReportError>;

    /// Write a score report to a writer
    fn write_score_report(
        &self,
        outcome: &ScoringOutcome,
        winners: &Winners,
        config: &ReportConfig,
        writer: &mut dyn Write,
    ) -> Result<(), ReportError> {
        let report = self.generate_score_report(outcome, winners, config)?;
        writer.write_all(report.as_bytes())?;
        Ok(())
    }

    /// Get the format this generator produces
    fn format(&self) -> ReportFormat;
}

/// Create a report generator for the given format
#[must_use]
pub fn create_reporter(format: ReportFormat) -> Box<dyn ReportGenerator> {
    create_reporter_with_options(format, true)
}

/// Create a report generator with color control
///
/// `Auto` and `Tui` fall back to the table reporter; callers that can
/// show the TUI resolve those formats before asking for a generator.
#[must_use]
pub fn create_reporter_with_options(
    format: ReportFormat,
    use_color: bool,
) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Auto | ReportFormat::Tui | ReportFormat::Table => {
            if use_color {
                Box::new(TableReporter::new())
            } else {
                Box::new(TableReporter::new().no_color())
            }
        }
        ReportFormat::Summary => {
            if use_color {
                Box::new(SummaryReporter::new())
            } else {
                Box::new(SummaryReporter::new().no_color())
            }
        }
        ReportFormat::Json => Box::new(JsonReporter::new()),
        ReportFormat::Csv => Box::new(CsvReporter::new()),
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use clap::ValueEnum;

    #[test]
    fn test_factory_formats() {
        assert_eq!(create_reporter(ReportFormat::Auto).format(), ReportFormat::Table);
        assert_eq!(create_reporter(ReportFormat::Tui).format(), ReportFormat::Table);
        assert_eq!(create_reporter(ReportFormat::Summary).format(), ReportFormat::Summary);
        assert_eq!(create_reporter(ReportFormat::Json).format(), ReportFormat::Json);
        assert_eq!(create_reporter(ReportFormat::Csv).format(), ReportFormat::Csv);
    }

    #[test]
    fn test_write_score_report() {
        let (outcome, winners) = test_support::outcome();
        let reporter = create_reporter_with_options(ReportFormat::Csv, false);
        let mut buffer = Vec::new();
        reporter
            .write_score_report(&outcome, &winners, &ReportConfig::default(), &mut buffer)
            .unwrap();
        assert!(String::from_utf8(buffer).unwrap().starts_with("# Scored Orders"));
    }

    #[test]
    fn test_format_display_matches_value_names() {
        for format in ReportFormat::value_variants() {
            let name = format.to_possible_value().unwrap().get_name().to_string();
            assert_eq!(format.to_string(), name);
        }
    }

    #[test]
    fn test_format_deserializes_lowercase() {
        let format: ReportFormat = serde_yaml::from_str("summary").unwrap();
        assert_eq!(format, ReportFormat::Summary);
    }
}
