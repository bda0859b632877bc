//! Vendor scoring.
//!
//! - [`params`]: raw and validated run parameters
//! - [`ScoringEngine`]: sampling and per-vendor scoring
//! - [`annotate_winners`]: per-order maximum, computed after scoring
//!
//! ```rust,ignore
//! use multisource::scoring::{annotate_winners, RawParameters, ScoringEngine};
//!
//! let engine = ScoringEngine::from_config(&config);
//! let params = engine.prepare(&table, &RawParameters::suggested().orders(20))?;
//! let outcome = engine.score(&table, &params)?;
//! let winners = annotate_winners(&outcome.scored);
//! ```

mod engine;
pub mod params;
mod result;
mod sampler;
mod winners;

pub use engine::{weighted_total, ScoringEngine, BATCH_ID_RANGE};
pub use params::{OrderParameters, RawParameters, ShippingScale, Weights, MAX_SHIPPING_SCORE};
pub use result::{OrderBatch, ReportRow, ScoredOrder, ScoredTable, ScoringOutcome, VendorScore};
pub use sampler::{SampledOrder, WeightedSampler};
pub use winners::{annotate_winners, OrderWinners, Winners};
