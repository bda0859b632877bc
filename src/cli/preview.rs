//! Preview command handler.
//!
//! Implements the `preview` subcommand: show the first rows of an uploaded
//! parts table after currency normalization.

use crate::config::PreviewConfig;
use crate::pipeline::{exit_codes, load_parts_table, output_preview_report};
use anyhow::Result;

/// Run the preview command
#[allow(clippy::needless_pass_by_value)]
pub fn run_preview(config: PreviewConfig) -> Result<i32> {
    let table = load_parts_table(&config.input, &config.app, false)?;
    tracing::debug!(
        "Previewing {} of {} rows",
        config.rows.min(table.row_count()),
        table.row_count()
    );
    output_preview_report(&config, &table)?;
    Ok(exit_codes::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::reports::ReportFormat;
    use tempfile::TempDir;

    #[test]
    fn test_run_preview_json() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("parts.csv");
        std::fs::write(
            &input,
            "Part Number;Title;Installs;Encompass;Marcone;Reliable\n\
             P1;Thermistor;40;$1,012.50;$11.00;$30.00\n",
        )
        .unwrap();
        let out = tmp.path().join("preview.json");

        let mut app = AppConfig::builder().output_format(ReportFormat::Json).build();
        app.output.file = Some(out.clone());
        let code = run_preview(PreviewConfig {
            input,
            rows: 5,
            app,
        })
        .unwrap();
        assert_eq!(code, exit_codes::SUCCESS);

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(out).unwrap()).unwrap();
        assert_eq!(json["rows"].as_array().unwrap().len(), 1);
    }
}
