//! Scoring stage.

use super::PipelineError;
use crate::config::{AppConfig, Validatable};
use crate::error::ValidationFailure;
use crate::model::PartsTable;
use crate::scoring::{annotate_winners, RawParameters, ScoringEngine, ScoringOutcome, Winners};

/// A scoring run with its winners annotated.
#[derive(Debug, Clone)]
pub struct ScoredRun {
    pub outcome: ScoringOutcome,
    pub winners: Winners,
}

/// Validate everything, then score the table.
///
/// Deployment config, run parameters and table columns are checked
/// together; any problem stops the run before sampling.
pub fn score_parts(
    table: &PartsTable,
    config: &AppConfig,
    raw: &RawParameters,
    quiet: bool,
) -> Result<ScoredRun, PipelineError> {
    let engine = ScoringEngine::from_config(config);

    let config_issues = config.validate();
    let params = match engine.prepare(table, raw) {
        Ok(params) if config_issues.is_empty() => params,
        Ok(_) => return Err(PipelineError::InvalidInput(ValidationFailure::new(config_issues))),
        Err(err) => {
            return Err(match err.as_validation() {
                Some(failure) => {
                    let mut issues = config_issues;
                    issues.extend(failure.issues.iter().cloned());
                    PipelineError::InvalidInput(ValidationFailure::new(issues))
                }
                None => err.into(),
            })
        }
    };

    if !quiet {
        tracing::info!(
            "Sampling {} orders (seed {}) for {} vendors",
            params.sample_size,
            params.seed,
            engine.vendors().len()
        );
    }

    let outcome = engine.score(table, &params)?;
    let winners = annotate_winners(&outcome.scored);
    tracing::debug!("{} orders won by more than one vendor", winners.tie_count());

    Ok(ScoredRun { outcome, winners })
}
