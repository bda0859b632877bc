//! **A multisourcing decision engine for replacement parts.**
//!
//! `multisource` takes a table of parts with one price column per vendor,
//! samples a batch of orders from it (weighted by each part's popularity) and
//! ranks every active vendor on every order. A vendor's total blends four
//! sub-scores under user-chosen weights:
//!
//! - **cost**: the order's lowest price divided by the vendor's price
//! - **shipping**: the vendor's delivery tier mapped through a shipping scale
//! - **trust** and **returnability**: static catalog values
//!
//! ## Core Concepts & Modules
//!
//! - **[`parsers`]**: reads the delimited upload and normalizes currency text
//!   into numbers with [`normalize`].
//! - **[`model`]**: the [`PartsTable`] and the [`VendorCatalog`].
//! - **[`scoring`]**: the [`ScoringEngine`], run parameter validation and
//!   [`annotate_winners`].
//! - **[`pipeline`]**: load, score and report stages used by the CLI.
//! - **[`reports`]**: table, summary, JSON and CSV output behind the
//!   [`ReportGenerator`] trait.
//! - **[`tui`]**: the interactive score view.
//!
//! ## Getting Started
//!
//! ```rust,ignore
//! use multisource::{normalize, parsers::read_parts_file, RawParameters, ScoringEngine};
//!
//! let table = read_parts_file("parts.csv".as_ref(), b';')?;
//! let table = normalize(table, &["Encompass", "Marcone", "Reliable"])?;
//!
//! let engine = ScoringEngine::new(VendorCatalog::builtin(), ["Encompass", "Marcone", "Reliable"]);
//! let params = engine.prepare(&table, &RawParameters::suggested().orders(20))?;
//! let outcome = engine.score(&table, &params)?;
//! let winners = multisource::annotate_winners(&outcome.scored);
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
// Pedantic lints: allow categories that are design choices for this codebase
#![allow(
    // usize/f64/u16 casts in table layout math and sampling weights are bounded
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    // TUI render functions are inherently long
    clippy::too_many_lines,
    clippy::struct_excessive_bools,
    clippy::similar_names,
    // Scores are compared exactly on purpose
    clippy::float_cmp
)]

pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod parsers;
pub mod pipeline;
pub mod reports;
pub mod scoring;
pub mod tui;

// Re-export main types for convenience
pub use config::{AppConfig, AppConfigBuilder, ConfigError, Validatable};
pub use error::{EngineError, ErrorContext, Result, ValidationFailure};
pub use model::{Cell, PartRow, PartsTable, VendorCatalog, VendorProfile};
pub use parsers::{normalize, read_parts_file, read_parts_str};
pub use reports::{ReportFormat, ReportGenerator};
pub use scoring::{
    annotate_winners, OrderParameters, RawParameters, ScoredTable, ScoringEngine, ScoringOutcome,
    Winners,
};
