//! Per-order winner annotation.
//!
//! Runs after scoring and never alters scores. Every vendor whose total
//! equals the order's maximum is a winner, so ties are all flagged.

use super::result::ScoredTable;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Winners of one order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderWinners {
    pub order: usize,
    pub score: f64,
    pub vendors: Vec<String>,
}

/// Winners of every order in a scored table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Winners {
    pub orders: Vec<OrderWinners>,
}

impl Winners {
    /// Whether `vendor` won the order at position `index` (0-based).
    #[must_use]
    pub fn is_winner(&self, index: usize, vendor: &str) -> bool {
        self.orders
            .get(index)
            .is_some_and(|w| w.vendors.iter().any(|v| v == vendor))
    }

    /// Number of orders won by each vendor, in the given vendor order.
    /// A tied order counts for every tied vendor.
    #[must_use]
    pub fn wins_by_vendor(&self, vendors: &[String]) -> IndexMap<String, usize> {
        let mut counts: IndexMap<String, usize> =
            vendors.iter().map(|v| (v.clone(), 0)).collect();
        for winner in self.orders.iter().flat_map(|w| &w.vendors) {
            *counts.entry(winner.clone()).or_default() += 1;
        }
        counts
    }

    /// Orders won by more than one vendor.
    #[must_use]
    pub fn tie_count(&self) -> usize {
        self.orders.iter().filter(|w| w.vendors.len() > 1).count()
    }
}

/// Find the maximum-total vendors of every order.
#[must_use]
pub fn annotate_winners(table: &ScoredTable) -> Winners {
    let orders = table
        .orders
        .iter()
        .map(|order| {
            let score = order.max_total().unwrap_or(0.0);
            OrderWinners {
                order: order.order,
                score,
                vendors: order
                    .scores
                    .iter()
                    .filter(|s| s.total == score)
                    .map(|s| s.vendor.clone())
                    .collect(),
            }
        })
        .collect();
    Winners { orders }
}
