//! Pipeline orchestration for scoring runs.
//!
//! This module provides shared orchestration logic for the
//! load → normalize → validate → score → report workflow, keeping the CLI
//! command handlers thin.

mod output;
mod parse;
mod report_stage;
mod score_stage;

pub use output::{OutputTarget, ReportDestination};
pub use parse::load_parts_table;
pub use report_stage::{output_preview_report, output_score_report};
pub use score_stage::{score_parts, ScoredRun};

use crate::error::{EngineError, ValidationFailure};

/// Structured pipeline error types for better diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Failed to read or normalize the parts table
    #[error("Failed to load parts table from {path}")]
    LoadFailed {
        path: String,
        #[source]
        source: anyhow::Error,
    },

    /// Run parameters, table columns or configuration are invalid
    #[error("{0}")]
    InvalidInput(ValidationFailure),

    /// Scoring could not complete
    #[error("Scoring failed")]
    ScoringFailed {
        #[source]
        source: anyhow::Error,
    },

    /// Report generation or output failed
    #[error("Report failed")]
    ReportFailed {
        #[source]
        source: anyhow::Error,
    },
}

impl PipelineError {
    /// Exit code for this failure.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidInput(_) => exit_codes::VALIDATION_FAILED,
            _ => exit_codes::ERROR,
        }
    }
}

impl From<EngineError> for PipelineError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Validation(failure) => Self::InvalidInput(failure),
            other => Self::ScoringFailed {
                source: other.into(),
            },
        }
    }
}

/// Exit codes for scripted use
pub mod exit_codes {
    /// Success
    pub const SUCCESS: i32 = 0;
    /// Invalid run parameters, columns or configuration
    pub const VALIDATION_FAILED: i32 = 1;
    /// An error occurred
    pub const ERROR: i32 = 3;
}

/// Pick the exit code for an error returned by a command handler.
#[must_use]
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    err.chain()
        .find_map(|cause| {
            if let Some(pipeline) = cause.downcast_ref::<PipelineError>() {
                return Some(pipeline.exit_code());
            }
            cause
                .downcast_ref::<EngineError>()
                .and_then(EngineError::as_validation)
                .map(|_| exit_codes::VALIDATION_FAILED)
        })
        .unwrap_or(exit_codes::ERROR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;

    #[test]
    fn test_exit_codes_values() {
        assert_eq!(exit_codes::SUCCESS, 0);
        assert_eq!(exit_codes::VALIDATION_FAILED, 1);
        assert_eq!(exit_codes::ERROR, 3);
    }

    #[test]
    fn test_validation_maps_to_exit_one() {
        let err = anyhow::Error::new(PipelineError::from(EngineError::validation(vec![
            ConfigError::new("orders", "A value is required"),
        ])));
        assert_eq!(exit_code_for(&err), exit_codes::VALIDATION_FAILED);
        assert!(err.to_string().starts_with("Please provide valid inputs"));
    }

    #[test]
    fn test_bare_engine_validation_maps_to_exit_one() {
        let err = anyhow::Error::new(EngineError::validation(Vec::new())).context("scoring");
        assert_eq!(exit_code_for(&err), exit_codes::VALIDATION_FAILED);
    }

    #[test]
    fn test_other_errors_map_to_exit_three() {
        let err = anyhow::Error::new(PipelineError::LoadFailed {
            path: "parts.csv".to_string(),
            source: anyhow::anyhow!("missing"),
        });
        assert_eq!(exit_code_for(&err), exit_codes::ERROR);
        assert_eq!(exit_code_for(&anyhow::anyhow!("plain")), exit_codes::ERROR);
    }
}
