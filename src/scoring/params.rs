//! Run parameters: raw text as typed by the user, and the validated form.
//!
//! All parameters are checked together so a single message can list every
//! problem. Nothing is coerced: an empty or malformed value is an error,
//! never a silent default.

use crate::config::ConfigError;
use crate::model::ShippingTier;
use serde::{Deserialize, Serialize};

/// Highest accepted shipping-scale value.
pub const MAX_SHIPPING_SCORE: u32 = 100;

/// Run parameters exactly as supplied, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawParameters {
    pub orders: Option<String>,
    pub seed: Option<String>,
    pub cost_weight: Option<String>,
    pub shipping_weight: Option<String>,
    pub returnability_weight: Option<String>,
    pub trust_weight: Option<String>,
    pub same_day: Option<String>,
    pub day_1: Option<String>,
    pub day_2: Option<String>,
    pub day_3: Option<String>,
    pub day_4: Option<String>,
}

impl RawParameters {
    /// The suggested starting values shown to users; `orders` is left unset.
    #[must_use]
    pub fn suggested() -> Self {
        let text = |s: &str| Some(s.to_string());
        Self {
            orders: None,
            seed: text("1"),
            cost_weight: text("45"),
            shipping_weight: text("40"),
            returnability_weight: text("5"),
            trust_weight: text("10"),
            same_day: text("100"),
            day_1: text("75"),
            day_2: text("50"),
            day_3: text("25"),
            day_4: text("0"),
        }
    }

    #[must_use]
    pub fn orders(mut self, orders: impl ToString) -> Self {
        self.orders = Some(orders.to_string());
        self
    }

    #[must_use]
    pub fn seed(mut self, seed: impl ToString) -> Self {
        self.seed = Some(seed.to_string());
        self
    }

    /// Set all four weights: cost, shipping, returnability, trust.
    #[must_use]
    pub fn weights(
        mut self,
        cost: impl ToString,
        shipping: impl ToString,
        returnability: impl ToString,
        trust: impl ToString,
    ) -> Self {
        self.cost_weight = Some(cost.to_string());
        self.shipping_weight = Some(shipping.to_string());
        self.returnability_weight = Some(returnability.to_string());
        self.trust_weight = Some(trust.to_string());
        self
    }

    /// Set the shipping scale from same day through 4 days+.
    #[must_use]
    pub fn shipping_scale(mut self, scale: [impl ToString; 5]) -> Self {
        let [same_day, day_1, day_2, day_3, day_4] = scale;
        self.same_day = Some(same_day.to_string());
        self.day_1 = Some(day_1.to_string());
        self.day_2 = Some(day_2.to_string());
        self.day_3 = Some(day_3.to_string());
        self.day_4 = Some(day_4.to_string());
        self
    }
}

/// Scoring weights as integer percentages.
///
/// Nominally they sum to 100. The engine does not enforce or rescale
/// this, so a larger sum yields totals above 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weights {
    pub cost: u32,
    pub shipping: u32,
    pub returnability: u32,
    pub trust: u32,
}

impl Weights {
    #[must_use]
    pub const fn new(cost: u32, shipping: u32, returnability: u32, trust: u32) -> Self {
        Self {
            cost,
            shipping,
            returnability,
            trust,
        }
    }

    #[must_use]
    pub const fn sum(&self) -> u64 {
        self.cost as u64 + self.shipping as u64 + self.returnability as u64 + self.trust as u64
    }
}

/// Shipping score, 0-100, granted to each speed tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingScale {
    pub same_day: u32,
    pub day_1: u32,
    pub day_2: u32,
    pub day_3: u32,
    pub day_4_plus: u32,
}

impl ShippingScale {
    #[must_use]
    pub const fn new(same_day: u32, day_1: u32, day_2: u32, day_3: u32, day_4_plus: u32) -> Self {
        Self {
            same_day,
            day_1,
            day_2,
            day_3,
            day_4_plus,
        }
    }

    /// Raw scale value for a tier.
    #[must_use]
    pub const fn value_for(&self, tier: ShippingTier) -> u32 {
        match tier {
            ShippingTier::SameDay => self.same_day,
            ShippingTier::OneDay => self.day_1,
            ShippingTier::TwoDays => self.day_2,
            ShippingTier::ThreeDays => self.day_3,
            ShippingTier::FourPlusDays => self.day_4_plus,
        }
    }

    /// Shipping sub-score in [0, 1] for a tier.
    #[must_use]
    pub fn score_for(&self, tier: ShippingTier) -> f64 {
        f64::from(self.value_for(tier)) / 100.0
    }
}

/// Validated run parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderParameters {
    /// Number of simulated orders to draw
    pub sample_size: usize,
    /// Seed for the sampling generator
    pub seed: u64,
    pub weights: Weights,
    pub shipping: ShippingScale,
}

impl OrderParameters {
    /// Validate raw parameters, collecting every problem found.
    pub fn from_raw(raw: &RawParameters, max_orders: usize) -> Result<Self, Vec<ConfigError>> {
        let mut errors = Vec::new();

        let sample_size = parse_sample_size(raw.orders.as_deref(), max_orders, &mut errors);
        let seed = parse_seed(raw.seed.as_deref(), &mut errors);

        let mut weight = |field: &str, value: &Option<String>| {
            parse_bounded(field, value.as_deref(), u32::MAX, &mut errors)
        };
        let cost = weight("weights.cost", &raw.cost_weight);
        let shipping = weight("weights.shipping", &raw.shipping_weight);
        let returnability = weight("weights.returnability", &raw.returnability_weight);
        let trust = weight("weights.trust", &raw.trust_weight);

        let mut tier = |field: &str, value: &Option<String>| {
            parse_bounded(field, value.as_deref(), MAX_SHIPPING_SCORE, &mut errors)
        };
        let same_day = tier("shipping.same_day", &raw.same_day);
        let day_1 = tier("shipping.day_1", &raw.day_1);
        let day_2 = tier("shipping.day_2", &raw.day_2);
        let day_3 = tier("shipping.day_3", &raw.day_3);
        let day_4 = tier("shipping.day_4_plus", &raw.day_4);

        match (
            sample_size,
            seed,
            cost,
            shipping,
            returnability,
            trust,
            same_day,
            day_1,
            day_2,
            day_3,
            day_4,
        ) {
            (
                Some(sample_size),
                Some(seed),
                Some(cost),
                Some(shipping),
                Some(returnability),
                Some(trust),
                Some(same_day),
                Some(day_1),
                Some(day_2),
                Some(day_3),
                Some(day_4),
            ) if errors.is_empty() => Ok(Self {
                sample_size,
                seed,
                weights: Weights::new(cost, shipping, returnability, trust),
                shipping: ShippingScale::new(same_day, day_1, day_2, day_3, day_4),
            }),
            _ => Err(errors),
        }
    }

    /// Check the sample size against a maximum, for parameters built in code.
    #[must_use]
    pub fn limit_issues(&self, max_orders: usize) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.sample_size == 0 {
            errors.push(ConfigError::new("orders", "Number of orders must be greater than zero"));
        } else if self.sample_size > max_orders {
            errors.push(exceeds_maximum(self.sample_size, max_orders));
        }
        errors
    }
}

fn required<'a>(
    field: &str,
    value: Option<&'a str>,
    errors: &mut Vec<ConfigError>,
) -> Option<&'a str> {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => Some(text),
        _ => {
            errors.push(ConfigError::new(field, "A value is required"));
            None
        }
    }
}

fn exceeds_maximum(requested: impl std::fmt::Display, max_orders: usize) -> ConfigError {
    ConfigError::new(
        "orders",
        format!(
            "Requested {requested} orders, which exceeds the configured maximum of {max_orders}"
        ),
    )
}

fn parse_sample_size(
    value: Option<&str>,
    max_orders: usize,
    errors: &mut Vec<ConfigError>,
) -> Option<usize> {
    let text = required("orders", value, errors)?;
    match text.parse::<i128>() {
        Ok(n) if n <= 0 => {
            errors.push(ConfigError::new(
                "orders",
                format!("Number of orders must be greater than zero, got {n}"),
            ));
            None
        }
        Ok(n) => match usize::try_from(n) {
            Ok(n) if n <= max_orders => Some(n),
            Ok(n) => {
                errors.push(exceeds_maximum(n, max_orders));
                None
            }
            Err(_) => {
                errors.push(exceeds_maximum(n, max_orders));
                None
            }
        },
        Err(_) => {
            errors.push(ConfigError::new(
                "orders",
                format!("Number of orders must be a positive integer, got '{text}'"),
            ));
            None
        }
    }
}

fn parse_seed(value: Option<&str>, errors: &mut Vec<ConfigError>) -> Option<u64> {
    let text = required("seed", value, errors)?;
    text.parse::<u64>()
        .map_err(|_| {
            errors.push(ConfigError::new(
                "seed",
                format!("Seed must be a non-negative integer, got '{text}'"),
            ));
        })
        .ok()
}

fn parse_bounded(
    field: &str,
    value: Option<&str>,
    max: u32,
    errors: &mut Vec<ConfigError>,
) -> Option<u32> {
    let text = required(field, value, errors)?;
    match text.parse::<i128>() {
        Ok(n) if n < 0 => {
            errors.push(ConfigError::new(
                field,
                format!("Must be a non-negative integer, got {n}"),
            ));
            None
        }
        Ok(n) => match u32::try_from(n) {
            Ok(n) if n <= max => Some(n),
            _ => {
                errors.push(ConfigError::new(
                    field,
                    format!("Must be at most {max}, got {n}"),
                ));
                None
            }
        },
        Err(_) => {
            errors.push(ConfigError::new(
                field,
                format!("Must be a non-negative integer, got '{text}'"),
            ));
            None
        }
    }
}
