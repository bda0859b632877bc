//! Scoring output types.

use super::params::OrderParameters;
use crate::model::PartRow;
use serde::{Deserialize, Serialize};

/// Sub-scores and total for one vendor on one order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorScore {
    pub vendor: String,
    /// Normalized price used for the cost sub-score
    pub price: f64,
    /// Best price / this vendor's price, in (0, 1]
    pub cost: f64,
    pub shipping: f64,
    pub trust: f64,
    pub returnability: f64,
    /// Weighted total
    pub total: f64,
}

/// One simulated order with every active vendor scored against it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredOrder {
    /// 1-based order number within the batch
    pub order: usize,
    /// 1-based data row of the part in the uploaded table
    pub source_row: usize,
    pub part_id: String,
    pub title: String,
    /// The full sampled row, pass-through columns included
    pub part: PartRow,
    /// Lowest price across active vendors
    pub best_price: f64,
    /// One entry per active vendor, in active-vendor order
    pub scores: Vec<VendorScore>,
}

impl ScoredOrder {
    /// Score of a given vendor on this order.
    #[must_use]
    pub fn score_for(&self, vendor: &str) -> Option<&VendorScore> {
        self.scores.iter().find(|s| s.vendor == vendor)
    }

    /// Highest total on this order.
    #[must_use]
    pub fn max_total(&self) -> Option<f64> {
        self.scores.iter().map(|s| s.total).reduce(f64::max)
    }
}

/// All scored orders of a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoredTable {
    /// Active vendors, in column order
    pub vendors: Vec<String>,
    pub orders: Vec<ScoredOrder>,
}

impl ScoredTable {
    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

/// Long-form report row: one per (order, vendor) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    pub order: usize,
    pub part_id: String,
    pub title: String,
    pub vendor: String,
    pub total: f64,
}

/// Identifies one run's batch of orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBatch {
    /// Five-digit id shared by every order of the run
    pub batch_id: u32,
    pub seed: u64,
}

impl OrderBatch {
    /// Label of an order within this batch, e.g. `"48213-7"`.
    #[must_use]
    pub fn order_label(&self, order: usize) -> String {
        format!("{}-{}", self.batch_id, order)
    }
}

/// Everything produced by one scoring run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringOutcome {
    pub batch: OrderBatch,
    pub parameters: OrderParameters,
    pub scored: ScoredTable,
    pub report: Vec<ReportRow>,
}

impl ScoringOutcome {
    /// Reshape a scored table into long form, order-major.
    #[must_use]
    pub fn reshape(scored: &ScoredTable) -> Vec<ReportRow> {
        scored
            .orders
            .iter()
            .flat_map(|order| {
                order.scores.iter().map(move |score| ReportRow {
                    order: order.order,
                    part_id: order.part_id.clone(),
                    title: order.title.clone(),
                    vendor: score.vendor.clone(),
                    total: score.total,
                })
            })
            .collect()
    }
}
