//! Parts table loading stage.
//!
//! Reads the uploaded file and normalizes the price columns of the
//! active vendors.

use super::PipelineError;
use crate::config::AppConfig;
use crate::error::ErrorContext;
use crate::model::PartsTable;
use crate::parsers::{normalize, read_parts_file};
use anyhow::Result;
use std::path::Path;

/// Load and normalize a parts table with context for error messages
pub fn load_parts_table(path: &Path, config: &AppConfig, quiet: bool) -> Result<PartsTable> {
    if !quiet {
        tracing::info!("Loading parts table: {}", path.display());
    }

    let load_failed = |source: anyhow::Error| PipelineError::LoadFailed {
        path: path.display().to_string(),
        source,
    };

    let delimiter = config.input.delimiter_byte().ok_or_else(|| {
        load_failed(anyhow::anyhow!(
            "delimiter '{}' is not a single ASCII character",
            config.input.delimiter
        ))
    })?;

    let table = read_parts_file(path, delimiter)
        .and_then(|table| normalize(table, &config.vendors.active))
        .with_context(|| format!("loading {}", path.display()))
        .map_err(|e| load_failed(e.into()))?;

    if !quiet {
        tracing::info!(
            "Loaded {} parts with {} columns",
            table.row_count(),
            table.headers().len()
        );
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{EngineError, ParseErrorKind};
    use crate::model::Cell;
    use tempfile::TempDir;

    fn write(tmp: &TempDir, content: &str) -> std::path::PathBuf {
        let path = tmp.path().join("parts.csv");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_normalizes_active_vendors() {
        let tmp = TempDir::new().unwrap();
        let path = write(
            &tmp,
            "Part Number;Title;Installs;Encompass;Marcone;Reliable;Notes\n\
             WR55X10025;Thermistor;40;$1,012.50;$11.00;30;$5 off\n",
        );
        let table = load_parts_table(&path, &AppConfig::default(), true).unwrap();
        let row = &table.rows()[0];
        assert_eq!(row.get("Encompass"), Some(&Cell::Number(1012.5)));
        assert_eq!(row.get("Reliable"), Some(&Cell::Number(30.0)));
        assert_eq!(row.get("Notes"), Some(&Cell::Text("$5 off".to_string())));
    }

    #[test]
    fn test_bad_price_fails_load() {
        let tmp = TempDir::new().unwrap();
        let path = write(
            &tmp,
            "Part Number;Title;Installs;Encompass;Marcone;Reliable\nP1;T;1;$1;;$2\n",
        );
        let err = load_parts_table(&path, &AppConfig::default(), true).unwrap_err();
        let pipeline = err.downcast_ref::<PipelineError>().unwrap();
        assert!(matches!(pipeline, PipelineError::LoadFailed { .. }));

        let engine = err
            .chain()
            .find_map(|c| c.downcast_ref::<EngineError>())
            .unwrap();
        assert!(matches!(
            engine,
            EngineError::Parse {
                source: ParseErrorKind::InvalidCurrency { row: 1, .. },
                ..
            }
        ));
    }

    #[test]
    fn test_missing_file_fails_load() {
        let err = load_parts_table(
            Path::new("/nonexistent/parts.csv"),
            &AppConfig::default(),
            true,
        )
        .unwrap_err();
        assert!(err.to_string().contains("/nonexistent/parts.csv"));
    }

    #[test]
    fn test_custom_delimiter() {
        let tmp = TempDir::new().unwrap();
        let path = write(&tmp, "Part Number,Title,Installs,Marcone\nP1,T,1,$2.50\n");
        let config = AppConfig::builder().vendors(["Marcone"]).delimiter(',').build();
        let table = load_parts_table(&path, &config, true).unwrap();
        assert_eq!(table.rows()[0].get("Marcone"), Some(&Cell::Number(2.5)));
    }
}
