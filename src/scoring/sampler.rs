//! Popularity-weighted sampling of parts with replacement.

use crate::error::{EngineError, Result, ScoringErrorKind};
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// One draw: the order it becomes and the table row it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampledOrder {
    /// 1-based order number
    pub order: usize,
    /// 0-based index into the table rows
    pub row_index: usize,
}

/// Draws row indices with probability proportional to their weight.
#[derive(Debug, Clone)]
pub struct WeightedSampler {
    index: WeightedIndex<f64>,
}

impl WeightedSampler {
    /// Build from per-row weights. Zero-weight rows are never drawn.
    pub fn new(weights: &[f64]) -> Result<Self> {
        if !weights.iter().sum::<f64>().is_finite() {
            return Err(EngineError::scoring(
                "building sampler",
                ScoringErrorKind::Sampling("total weight is not finite".to_string()),
            ));
        }
        WeightedIndex::new(weights)
            .map(|index| Self { index })
            .map_err(|e| {
                EngineError::scoring("building sampler", ScoringErrorKind::Sampling(e.to_string()))
            })
    }

    /// Draw `count` orders with replacement.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R, count: usize) -> Vec<SampledOrder> {
        (1..=count)
            .map(|order| SampledOrder {
                order,
                row_index: self.index.sample(rng),
            })
            .collect()
    }
}
