//! Report destinations.
//!
//! Resolves the merged output settings against where the report is really
//! going. `auto` and `tui` open the interactive view only when stdout is a
//! terminal, otherwise the table reporter renders the same orders. Color is
//! dropped for files and whenever `NO_COLOR` is set.

use crate::config::OutputConfig;
use crate::reports::{create_reporter_with_options, ReportConfig, ReportFormat, ReportGenerator};
use anyhow::{Context, Result};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

/// Where a report is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

/// Output settings resolved for one command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportDestination {
    pub target: OutputTarget,
    /// Never `Auto`; `Tui` only for an interactive stdout
    pub format: ReportFormat,
    pub use_color: bool,
    /// Append per-vendor sub-scores to table output
    pub breakdown: bool,
}

impl ReportDestination {
    /// Resolve against this process's stdout and environment.
    #[must_use]
    pub fn resolve(output: &OutputConfig) -> Self {
        Self::resolve_with(
            output,
            std::io::stdout().is_terminal(),
            std::env::var_os("NO_COLOR").is_some(),
        )
    }

    fn resolve_with(output: &OutputConfig, stdout_is_terminal: bool, no_color_env: bool) -> Self {
        let target = output
            .file
            .clone()
            .map_or(OutputTarget::Stdout, OutputTarget::File);
        let to_stdout = target == OutputTarget::Stdout;

        let format = match output.format {
            ReportFormat::Auto | ReportFormat::Tui if to_stdout && stdout_is_terminal => {
                ReportFormat::Tui
            }
            ReportFormat::Auto | ReportFormat::Tui => ReportFormat::Table,
            other => other,
        };

        Self {
            use_color: to_stdout && !output.no_color && !no_color_env,
            target,
            format,
            breakdown: output.breakdown,
        }
    }

    /// Whether a scoring run should open the interactive view.
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        self.format == ReportFormat::Tui
    }

    /// Generator for the resolved format.
    #[must_use]
    pub fn reporter(&self) -> Box<dyn ReportGenerator> {
        create_reporter_with_options(self.format, self.use_color)
    }

    /// Report settings for a run over `input`.
    #[must_use]
    pub fn report_config(&self, input: &Path) -> ReportConfig {
        let config = ReportConfig::for_input(input.display().to_string());
        if self.breakdown {
            config.with_breakdown()
        } else {
            config
        }
    }

    /// Write a rendered report. Files are announced unless `quiet`.
    pub fn write(&self, content: &str, quiet: bool) -> Result<()> {
        match &self.target {
            OutputTarget::Stdout => {
                println!("{content}");
                Ok(())
            }
            OutputTarget::File(path) => {
                std::fs::write(path, content)
                    .with_context(|| format!("Failed to write output to {}", path.display()))?;
                if !quiet {
                    tracing::info!("Report written to {}", path.display());
                }
                Ok(())
            }
        }
    }
}
