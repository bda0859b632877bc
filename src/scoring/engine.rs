//! The scoring engine.
//!
//! Given a normalized parts table and validated parameters, the engine
//! draws the simulated orders and scores every active vendor on each.
//! It is pure: the only randomness comes from a generator seeded with
//! the run's seed.

use super::params::{OrderParameters, RawParameters, Weights};
use super::result::{OrderBatch, ScoredOrder, ScoredTable, ScoringOutcome, VendorScore};
use super::sampler::WeightedSampler;
use crate::config::{AppConfig, ColumnConfig, ConfigError, DEFAULT_MAX_ORDERS};
use crate::error::{EngineError, Result, ScoringErrorKind};
use crate::model::{Cell, PartRow, PartsTable, VendorCatalog};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Range of generated batch ids.
pub const BATCH_ID_RANGE: std::ops::RangeInclusive<u32> = 10_000..=99_999;

/// Scores vendors against simulated orders.
#[derive(Debug, Clone)]
pub struct ScoringEngine<'a> {
    catalog: &'a VendorCatalog,
    vendors: Vec<String>,
    columns: ColumnConfig,
    max_orders: usize,
}

impl<'a> ScoringEngine<'a> {
    /// Create an engine with default column names and limits.
    pub fn new<I, S>(catalog: &'a VendorCatalog, vendors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            catalog,
            vendors: vendors.into_iter().map(Into::into).collect(),
            columns: ColumnConfig::default(),
            max_orders: DEFAULT_MAX_ORDERS,
        }
    }

    /// Create an engine from deployment settings.
    #[must_use]
    pub fn from_config(config: &'a AppConfig) -> Self {
        Self {
            catalog: config.catalog(),
            vendors: config.vendors.active.clone(),
            columns: config.columns.clone(),
            max_orders: config.limits.max_orders,
        }
    }

    #[must_use]
    pub const fn with_max_orders(mut self, max_orders: usize) -> Self {
        self.max_orders = max_orders;
        self
    }

    #[must_use]
    pub fn vendors(&self) -> &[String] {
        &self.vendors
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Check that a normalized table can be scored with this engine's vendors.
    #[must_use]
    pub fn check_table(&self, table: &PartsTable) -> Vec<ConfigError> {
        let mut issues = Vec::new();

        if self.vendors.is_empty() {
            issues.push(ConfigError::new("vendors", "At least one vendor must be active"));
        }

        for (field, column) in [
            ("columns.id", &self.columns.id),
            ("columns.title", &self.columns.title),
            ("columns.weight", &self.columns.weight),
        ] {
            if !table.has_column(column) {
                issues.push(ConfigError::new(field, format!("Column '{column}' not found")));
            }
        }

        if table.has_column(&self.columns.weight) {
            if let Err(issue) = self.row_weights(table) {
                issues.push(issue);
            }
        }

        for vendor in &self.vendors {
            let field = format!("prices.{vendor}");
            if !table.has_column(vendor) {
                issues.push(ConfigError::new(
                    field,
                    format!("No price column for vendor '{vendor}'"),
                ));
                continue;
            }
            let unnormalized = table.rows().iter().enumerate().find_map(|(index, row)| {
                match row.get(vendor) {
                    Some(Cell::Number(_)) => None,
                    other => Some((index + 1, other.map(ToString::to_string).unwrap_or_default())),
                }
            });
            if let Some((row, value)) = unnormalized {
                issues.push(ConfigError::new(
                    field,
                    format!("Price '{value}' at row {row} is not a number"),
                ));
            }
        }

        issues
    }

    /// Validate raw parameters and the table together.
    ///
    /// Every problem found in either is returned in one
    /// [`EngineError::Validation`].
    pub fn prepare(&self, table: &PartsTable, raw: &RawParameters) -> Result<OrderParameters> {
        let params = OrderParameters::from_raw(raw, self.max_orders);
        let table_issues = self.check_table(table);

        match params {
            Ok(params) if table_issues.is_empty() => Ok(params),
            Ok(_) => Err(EngineError::validation(table_issues)),
            Err(mut issues) => {
                issues.extend(table_issues);
                Err(EngineError::validation(issues))
            }
        }
    }

    // ========================================================================
    // Scoring
    // ========================================================================

    /// Draw `params.sample_size` orders and score every active vendor on each.
    pub fn score(&self, table: &PartsTable, params: &OrderParameters) -> Result<ScoringOutcome> {
        let mut issues = params.limit_issues(self.max_orders);
        issues.extend(self.check_table(table));
        if !issues.is_empty() {
            return Err(EngineError::validation(issues));
        }

        let weights = self
            .row_weights(table)
            .map_err(|issue| EngineError::validation(vec![issue]))?;
        let prices = self.price_matrix(table)?;

        let mut rng = StdRng::seed_from_u64(params.seed);
        let batch = OrderBatch {
            batch_id: rng.gen_range(BATCH_ID_RANGE),
            seed: params.seed,
        };

        let sampler = WeightedSampler::new(&weights)?;
        let draws = sampler.draw(&mut rng, params.sample_size);
        tracing::debug!(
            "Drew {} orders from {} parts (batch {})",
            draws.len(),
            table.row_count(),
            batch.batch_id
        );

        let orders: Vec<ScoredOrder> = draws
            .iter()
            .map(|draw| {
                let row = &table.rows()[draw.row_index];
                self.score_order(draw.order, draw.row_index, row, &prices[draw.row_index], params)
            })
            .collect();

        let scored = ScoredTable {
            vendors: self.vendors.clone(),
            orders,
        };
        let report = ScoringOutcome::reshape(&scored);

        tracing::info!(
            "Scored {} orders across {} vendors",
            scored.len(),
            self.vendors.len()
        );

        Ok(ScoringOutcome {
            batch,
            parameters: *params,
            scored,
            report,
        })
    }

    fn score_order(
        &self,
        order: usize,
        row_index: usize,
        row: &PartRow,
        prices: &[f64],
        params: &OrderParameters,
    ) -> ScoredOrder {
        let best_price = prices.iter().copied().fold(f64::INFINITY, f64::min);

        let scores = self
            .vendors
            .iter()
            .zip(prices)
            .map(|(vendor, &price)| {
                let profile = self.catalog.get(vendor);
                let cost = best_price / price;
                let shipping = profile.map_or(0.0, |p| params.shipping.score_for(p.tier()));
                let trust = profile.map_or(0.0, |p| f64::from(p.trust) / 100.0);
                let returnability = profile.map_or(0.0, |p| f64::from(p.returnability) / 100.0);
                VendorScore {
                    vendor: vendor.clone(),
                    price,
                    cost,
                    shipping,
                    trust,
                    returnability,
                    total: weighted_total(cost, shipping, trust, returnability, &params.weights),
                }
            })
            .collect();

        ScoredOrder {
            order,
            source_row: row_index + 1,
            part_id: row.text(&self.columns.id),
            title: row.text(&self.columns.title),
            part: row.clone(),
            best_price,
            scores,
        }
    }

    /// Popularity weight of every row.
    fn row_weights(&self, table: &PartsTable) -> std::result::Result<Vec<f64>, ConfigError> {
        let column = &self.columns.weight;
        let field = "columns.weight";

        let weights = table
            .rows()
            .iter()
            .enumerate()
            .map(|(index, row)| {
                let cell = row.get(column);
                let value = match cell {
                    Some(Cell::Number(value)) => Some(*value),
                    Some(Cell::Text(text)) => text.trim().parse::<f64>().ok(),
                    None => None,
                }
                .filter(|v| v.is_finite());

                match value {
                    Some(v) if v >= 0.0 => Ok(v),
                    Some(v) => Err(ConfigError::new(
                        field,
                        format!("Weight at row {} must not be negative, got {v}", index + 1),
                    )),
                    None => Err(ConfigError::new(
                        field,
                        format!(
                            "Weight '{}' at row {} is not a number",
                            cell.map(ToString::to_string).unwrap_or_default(),
                            index + 1
                        ),
                    )),
                }
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        if weights.iter().all(|w| *w <= 0.0) {
            return Err(ConfigError::new(
                field,
                format!("Column '{column}' needs at least one positive weight"),
            ));
        }
        if !weights.iter().sum::<f64>().is_finite() {
            return Err(ConfigError::new(
                field,
                format!("Weights in column '{column}' are too large to sum"),
            ));
        }
        Ok(weights)
    }

    /// Prices per row, in active-vendor order, all strictly positive.
    fn price_matrix(&self, table: &PartsTable) -> Result<Vec<Vec<f64>>> {
        table
            .rows()
            .iter()
            .map(|row| {
                self.vendors
                    .iter()
                    .map(|vendor| {
                        let price = row.get(vendor).and_then(Cell::as_number).unwrap_or(0.0);
                        if price > 0.0 {
                            Ok(price)
                        } else {
                            Err(EngineError::scoring(
                                "checking vendor prices",
                                ScoringErrorKind::NonPositivePrice {
                                    part: row.text(&self.columns.id),
                                    vendor: vendor.clone(),
                                    price,
                                },
                            ))
                        }
                    })
                    .collect()
            })
            .collect()
    }
}

/// Weighted total of the four sub-scores.
///
/// Equal to `100 * sum(sub_score * weight / 100)`, written without the
/// scaling so that a single weight of 100 yields exactly `100 * sub_score`.
#[must_use]
pub fn weighted_total(
    cost: f64,
    shipping: f64,
    trust: f64,
    returnability: f64,
    weights: &Weights,
) -> f64 {
    cost * f64::from(weights.cost)
        + shipping * f64::from(weights.shipping)
        + trust * f64::from(weights.trust)
        + returnability * f64::from(weights.returnability)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::VendorProfile;
    use crate::scoring::params::ShippingScale;

    fn part(id: &str, installs: &str, prices: &[(&str, f64)]) -> PartRow {
        let mut row = PartRow::new()
            .with("Part Number", id)
            .with("Title", format!("Part {id}").as_str())
            .with("Installs", installs);
        for (vendor, price) in prices {
            row.insert(*vendor, Cell::Number(*price));
        }
        row
    }

    fn table(rows: Vec<PartRow>) -> PartsTable {
        let headers = rows
            .first()
            .map(|r| r.iter().map(|(c, _)| c.clone()).collect())
            .unwrap_or_default();
        PartsTable::new(headers, rows)
    }

    fn params(sample_size: usize, weights: Weights) -> OrderParameters {
        OrderParameters {
            sample_size,
            seed: 1,
            weights,
            shipping: ShippingScale::new(100, 75, 50, 25, 0),
        }
    }

    #[test]
    fn test_two_vendor_example() {
        let catalog = VendorCatalog::default();
        let engine = ScoringEngine::new(&catalog, ["A", "B"]);
        let table = table(vec![part("P1", "1", &[("A", 10.0), ("B", 20.0)])]);

        let outcome = engine.score(&table, &params(1, Weights::new(100, 0, 0, 0))).unwrap();
        let order = &outcome.scored.orders[0];
        let a = order.score_for("A").unwrap();
        let b = order.score_for("B").unwrap();

        assert_eq!(a.cost, 1.0);
        assert_eq!(b.cost, 0.5);
        assert_eq!(a.total, 100.0);
        assert_eq!(b.total, 50.0);
        assert_eq!(order.best_price, 10.0);
        assert_eq!(order.max_total(), Some(100.0));
    }

    #[test]
    fn test_subscores_from_catalog() {
        let catalog = VendorCatalog::from_profiles([
            ("Fast", VendorProfile::new(80, 0, 100)),
            ("Slow", VendorProfile::new(20, 7, 0)),
        ]);
        let engine = ScoringEngine::new(&catalog, ["Fast", "Slow", "Unknown"]);
        let table = table(vec![part(
            "P1",
            "3",
            &[("Fast", 10.0), ("Slow", 10.0), ("Unknown", 10.0)],
        )]);

        let outcome = engine.score(&table, &params(1, Weights::new(45, 40, 5, 10))).unwrap();
        let order = &outcome.scored.orders[0];

        let fast = order.score_for("Fast").unwrap();
        assert_eq!(fast.shipping, 1.0);
        assert_eq!(fast.trust, 0.8);
        assert_eq!(fast.returnability, 1.0);

        let slow = order.score_for("Slow").unwrap();
        assert_eq!(slow.shipping, 0.0);
        assert_eq!(slow.trust, 0.2);
        assert_eq!(slow.returnability, 0.0);

        let unknown = order.score_for("Unknown").unwrap();
        assert_eq!(unknown.shipping, 0.0);
        assert_eq!(unknown.trust, 0.0);
        assert_eq!(unknown.returnability, 0.0);
        assert_eq!(unknown.total, 45.0);
    }

    #[test]
    fn test_sample_size_and_reshape() {
        let catalog = VendorCatalog::builtin();
        let engine = ScoringEngine::new(catalog, ["Marcone", "Reliable"]);
        let table = table(vec![
            part("P1", "10", &[("Marcone", 5.0), ("Reliable", 4.0)]),
            part("P2", "1", &[("Marcone", 7.5), ("Reliable", 9.0)]),
        ]);

        let outcome = engine.score(&table, &params(12, Weights::new(45, 40, 5, 10))).unwrap();
        assert_eq!(outcome.scored.len(), 12);
        assert_eq!(outcome.report.len(), 24);
        assert_eq!(outcome.report[0].order, 1);
        assert_eq!(outcome.report[0].vendor, "Marcone");
        assert_eq!(outcome.report[1].order, 1);
        assert_eq!(outcome.report[1].vendor, "Reliable");
        assert!(BATCH_ID_RANGE.contains(&outcome.batch.batch_id));
    }

    #[test]
    fn test_same_seed_is_reproducible() {
        let catalog = VendorCatalog::builtin();
        let engine = ScoringEngine::new(catalog, ["Marcone", "Encompass"]);
        let table = table(vec![
            part("P1", "10", &[("Marcone", 5.0), ("Encompass", 4.0)]),
            part("P2", "20", &[("Marcone", 7.5), ("Encompass", 9.0)]),
            part("P3", "5", &[("Marcone", 1.0), ("Encompass", 1.5)]),
        ]);
        let p = params(30, Weights::new(45, 40, 5, 10));
        assert_eq!(engine.score(&table, &p).unwrap(), engine.score(&table, &p).unwrap());
    }

    #[test]
    fn test_zero_weight_rows_never_sampled() {
        let catalog = VendorCatalog::builtin();
        let engine = ScoringEngine::new(catalog, ["Marcone"]);
        let table = table(vec![
            part("P1", "0", &[("Marcone", 5.0)]),
            part("P2", "4", &[("Marcone", 6.0)]),
        ]);
        let outcome = engine.score(&table, &params(40, Weights::new(100, 0, 0, 0))).unwrap();
        assert!(outcome.scored.orders.iter().all(|o| o.part_id == "P2"));
        assert!(outcome.scored.orders.iter().all(|o| o.source_row == 2));
    }

    #[test]
    fn test_weights_above_one_hundred_exceed_one_hundred() {
        let catalog = VendorCatalog::builtin();
        let engine = ScoringEngine::new(catalog, ["Encompass"]);
        let table = table(vec![part("P1", "1", &[("Encompass", 3.0)])]);
        let outcome = engine.score(&table, &params(1, Weights::new(100, 50, 0, 0))).unwrap();
        // Encompass ships in 3 days: 1.0 * 100 + 0.25 * 50
        assert_eq!(outcome.scored.orders[0].scores[0].total, 112.5);
    }

    #[test]
    fn test_non_positive_price_fails() {
        let catalog = VendorCatalog::builtin();
        let engine = ScoringEngine::new(catalog, ["Marcone", "Reliable"]);
        let table = table(vec![
            part("P1", "1", &[("Marcone", 5.0), ("Reliable", 4.0)]),
            part("P2", "0", &[("Marcone", 0.0), ("Reliable", 4.0)]),
        ]);
        let err = engine.score(&table, &params(3, Weights::new(100, 0, 0, 0))).unwrap_err();
        match err {
            EngineError::Scoring {
                source: ScoringErrorKind::NonPositivePrice { part, vendor, .. },
                ..
            } => {
                assert_eq!(part, "P2");
                assert_eq!(vendor, "Marcone");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_sample_above_maximum_rejected() {
        let catalog = VendorCatalog::builtin();
        let engine = ScoringEngine::new(catalog, ["Marcone"]).with_max_orders(5);
        let table = table(vec![part("P1", "1", &[("Marcone", 5.0)])]);
        let err = engine.score(&table, &params(6, Weights::new(100, 0, 0, 0))).unwrap_err();
        assert!(err.as_validation().is_some_and(|f| f.mentions("orders")));
    }

    #[test]
    fn test_check_table_reports_everything() {
        let catalog = VendorCatalog::builtin();
        let engine = ScoringEngine::new(catalog, ["Marcone", "Amazon"]);
        let rows = vec![PartRow::new()
            .with("Part Number", "P1")
            .with("Installs", "many")
            .with("Marcone", "$5.00")];
        let table = PartsTable::new(
            vec!["Part Number".into(), "Installs".into(), "Marcone".into()],
            rows,
        );
        let fields: Vec<_> = engine.check_table(&table).into_iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            ["columns.title", "columns.weight", "prices.Marcone", "prices.Amazon"]
        );
    }

    #[test]
    fn test_weight_checks() {
        let catalog = VendorCatalog::builtin();
        let engine = ScoringEngine::new(catalog, ["Marcone"]);

        let negative = table(vec![part("P1", "-2", &[("Marcone", 5.0)])]);
        assert!(engine.check_table(&negative)[0].message.contains("negative"));

        let all_zero = table(vec![
            part("P1", "0", &[("Marcone", 5.0)]),
            part("P2", " 0 ", &[("Marcone", 5.0)]),
        ]);
        assert!(engine.check_table(&all_zero)[0].message.contains("positive"));
    }

    #[test]
    fn test_weights_overflowing_their_sum_rejected() {
        let catalog = VendorCatalog::builtin();
        let engine = ScoringEngine::new(catalog, ["Marcone"]);
        let huge = table(vec![
            part("P1", "1e308", &[("Marcone", 5.0)]),
            part("P2", "1e308", &[("Marcone", 6.0)]),
        ]);

        let issues = engine.check_table(&huge);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "columns.weight");
        assert!(issues[0].message.contains("too large"));

        let err = engine
            .prepare(&huge, &RawParameters::suggested().orders(3))
            .unwrap_err();
        assert!(err.as_validation().unwrap().mentions("columns.weight"));

        let err = engine.score(&huge, &params(3, Weights::new(45, 40, 5, 10))).unwrap_err();
        assert!(err.as_validation().is_some());
    }

    #[test]
    fn test_empty_vendor_list_rejected() {
        let catalog = VendorCatalog::builtin();
        let engine = ScoringEngine::new(catalog, Vec::<String>::new());
        let table = table(vec![part("P1", "1", &[])]);
        assert!(engine
            .check_table(&table)
            .iter()
            .any(|e| e.field == "vendors"));
    }

    #[test]
    fn test_prepare_aggregates_parameter_and_table_issues() {
        let catalog = VendorCatalog::builtin();
        let engine = ScoringEngine::new(catalog, ["Marcone", "Amazon"]);
        let table = table(vec![part("P1", "1", &[("Marcone", 5.0)])]);
        let raw = RawParameters::suggested().orders("nope").weights("", "40", "5", "10");

        let err = engine.prepare(&table, &raw).unwrap_err();
        let failure = err.as_validation().unwrap();
        assert!(failure.mentions("orders"));
        assert!(failure.mentions("weights.cost"));
        assert!(failure.mentions("prices.Amazon"));
        assert_eq!(failure.issues.len(), 3);
    }

    #[test]
    fn test_prepare_accepts_valid_input() {
        let catalog = VendorCatalog::builtin();
        let engine = ScoringEngine::new(catalog, ["Marcone"]);
        let table = table(vec![part("P1", "1", &[("Marcone", 5.0)])]);
        let params = engine
            .prepare(&table, &RawParameters::suggested().orders(3))
            .unwrap();
        assert_eq!(params.sample_size, 3);
    }

    #[test]
    fn test_weighted_total() {
        let weights = Weights::new(45, 40, 5, 10);
        assert_eq!(weighted_total(1.0, 1.0, 1.0, 1.0, &weights), 100.0);
        assert_eq!(weighted_total(0.0, 0.0, 0.0, 0.0, &weights), 0.0);
    }
}
