//! Score command handler.
//!
//! Implements the `score` subcommand: sample orders from a parts table and
//! rank the active vendors on each one.

use crate::config::ScoreConfig;
use crate::pipeline::{
    exit_codes, load_parts_table, output_score_report, score_parts, ReportDestination,
};
use crate::tui::{run_tui, ScoreApp};
use anyhow::Result;

/// Run the score command
#[allow(clippy::needless_pass_by_value)]
pub fn run_score(config: ScoreConfig) -> Result<i32> {
    let table = load_parts_table(&config.input, &config.app, config.quiet)?;
    let run = score_parts(&table, &config.app, &config.parameters, config.quiet)?;

    if !config.quiet {
        let wins = run.winners.wins_by_vendor(&run.outcome.scored.vendors);
        let leader = wins.iter().max_by_key(|(_, count)| **count);
        if let Some((vendor, count)) = leader {
            tracing::info!(
                "Batch {}: {} leads with {} of {} orders",
                run.outcome.batch.batch_id,
                vendor,
                count,
                run.outcome.scored.len()
            );
        }
    }

    if ReportDestination::resolve(&config.app.output).is_interactive() {
        let mut app = ScoreApp::new(run, config.input.display().to_string());
        run_tui(&mut app)?;
    } else {
        output_score_report(&config, &run)?;
    }

    Ok(exit_codes::SUCCESS)
}
