//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.
//! Each handler implements the business logic for a specific CLI subcommand.

mod preview;
mod score;
mod vendors;

pub use preview::run_preview;
pub use score::run_score;
pub use vendors::run_vendors;

// Re-export config types used by handlers
pub use crate::config::{PreviewConfig, ScoreConfig};
