//! Summary and table report generators for shell output.
//!
//! Provides compact, human-readable output for terminal usage. Column
//! fitting uses display width, so part titles with wide characters still
//! line up.

use super::{ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::model::PartsTable;
use crate::scoring::{ScoredOrder, ScoringOutcome, Winners};
use std::collections::HashSet;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Apply ANSI color formatting if colored output is enabled.
fn ansi_color(text: &str, color: &str, colored: bool) -> String {
    if colored {
        match color {
            "red" => format!("\x1b[31m{text}\x1b[0m"),
            "green" => format!("\x1b[32m{text}\x1b[0m"),
            "green-bold" => format!("\x1b[1;32m{text}\x1b[0m"),
            "yellow" => format!("\x1b[33m{text}\x1b[0m"),
            "cyan" => format!("\x1b[36m{text}\x1b[0m"),
            "bold" => format!("\x1b[1m{text}\x1b[0m"),
            "dim" => format!("\x1b[2m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    } else {
        text.to_string()
    }
}

fn plural(count: usize, one: &str, many: &str) -> String {
    format!("{count} {}", if count == 1 { one } else { many })
}

// ============================================================================
// Summary
// ============================================================================

/// Summary reporter for shell output
pub struct SummaryReporter {
    /// Use colored output
    colored: bool,
}

impl SummaryReporter {
    /// Create a new summary reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }
}

impl Default for SummaryReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for SummaryReporter {
    fn generate_score_report(
        &self,
        outcome: &ScoringOutcome,
        winners: &Winners,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut lines = Vec::new();
        let scored = &outcome.scored;
        let weights = &outcome.parameters.weights;

        // Header
        lines.push(self.color(
            config.title.as_deref().unwrap_or("Multisource Scoring Summary"),
            "bold",
        ));
        lines.push(self.color("─".repeat(40).as_str(), "dim"));

        lines.push(format!(
            "{}  {} (seed {})",
            self.color("Batch:", "cyan"),
            outcome.batch.batch_id,
            outcome.batch.seed
        ));
        let distinct: HashSet<usize> = scored.orders.iter().map(|o| o.source_row).collect();
        lines.push(format!(
            "{}  {} across {}",
            self.color("Orders:", "cyan"),
            scored.len(),
            plural(distinct.len(), "distinct part", "distinct parts")
        ));
        lines.push(format!(
            "{}  {}",
            self.color("Vendors:", "cyan"),
            scored.vendors.join(", ")
        ));
        lines.push(format!(
            "{}  cost {}, shipping {}, returnability {}, trust {}",
            self.color("Weights:", "cyan"),
            weights.cost,
            weights.shipping,
            weights.returnability,
            weights.trust
        ));

        lines.push(String::new());
        lines.push(self.color("Wins:", "bold"));

        let wins = winners.wins_by_vendor(&scored.vendors);
        let best = wins.values().copied().max().unwrap_or(0);
        let name_width = scored
            .vendors
            .iter()
            .map(|v| v.width())
            .max()
            .unwrap_or(0);

        for (position, vendor) in scored.vendors.iter().enumerate() {
            let count = wins.get(vendor).copied().unwrap_or(0);
            let share = if scored.is_empty() {
                0.0
            } else {
                count as f64 * 100.0 / scored.len() as f64
            };
            let average = if scored.is_empty() {
                0.0
            } else {
                scored
                    .orders
                    .iter()
                    .filter_map(|o| o.scores.get(position))
                    .map(|s| s.total)
                    .sum::<f64>()
                    / scored.len() as f64
            };
            let count_text = format!("{count:>4}");
            lines.push(format!(
                "  {}  {} ({share:5.1}%)  avg {average:.2}",
                pad(vendor, name_width),
                if count == best && count > 0 {
                    self.color(&count_text, "green")
                } else {
                    count_text
                }
            ));
        }

        let ties = winners.tie_count();
        if ties > 0 {
            lines.push(String::new());
            lines.push(format!(
                "{}  {} won by more than one vendor",
                self.color("Ties:", "yellow"),
                plural(ties, "order", "orders")
            ));
        }

        Ok(lines.join("\n"))
    }

    fn generate_preview_report(
        &self,
        table: &PartsTable,
        _config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut lines = Vec::new();

        lines.push(self.color("Uploaded File", "bold"));
        lines.push(self.color("─".repeat(40).as_str(), "dim"));
        lines.push(format!(
            "{}  {}",
            self.color("Rows:", "cyan"),
            table.row_count()
        ));
        lines.push(format!(
            "{}  {}",
            self.color("Columns:", "cyan"),
            table.headers().join(", ")
        ));

        Ok(lines.join("\n"))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Summary
    }
}

// ============================================================================
// Table
// ============================================================================

/// Maximum display width of a free-text column.
const MAX_TEXT_WIDTH: usize = 32;

/// Width of the numeric breakdown columns.
const NUMBER_WIDTH: usize = 8;

/// Table reporter for compact terminal output
pub struct TableReporter {
    /// Use colored output
    colored: bool,
}

impl TableReporter {
    /// Create a new table reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }

    /// One line per shown order and vendor with the sub-scores behind each total.
    fn breakdown(
        &self,
        shown: &[ScoredOrder],
        labels: &[String],
        vendors: &[String],
        winners: &Winners,
    ) -> Vec<String> {
        let order_width = column_width("ORDER", labels.iter().map(String::as_str));
        let vendor_width = column_width("VENDOR", vendors.iter().map(String::as_str));

        let mut header = vec![
            ("ORDER".to_string(), order_width, Some("bold")),
            ("VENDOR".to_string(), vendor_width, Some("bold")),
        ];
        header.extend(
            ["PRICE", "COST", "SHIP", "TRUST", "RET", "TOTAL"]
                .map(|h| (h.to_string(), NUMBER_WIDTH, Some("bold"))),
        );
        let total_width: usize =
            header.iter().map(|(_, w, _)| *w).sum::<usize>() + 2 * (header.len() - 1);
        let mut lines = vec![self.row(&header), "─".repeat(total_width)];

        for (index, (order, label)) in shown.iter().zip(labels).enumerate() {
            for score in &order.scores {
                let mut cells = vec![
                    (label.clone(), order_width, None),
                    (truncate(&score.vendor, vendor_width), vendor_width, None),
                    (format!("{:.2}", score.price), NUMBER_WIDTH, None),
                ];
                for part in [score.cost, score.shipping, score.trust, score.returnability] {
                    cells.push((format!("{part:.3}"), NUMBER_WIDTH, None));
                }
                if winners.is_winner(index, &score.vendor) {
                    cells.push((format!("{:.2}*", score.total), NUMBER_WIDTH, Some("green-bold")));
                } else {
                    cells.push((format!("{:.2}", score.total), NUMBER_WIDTH, None));
                }
                lines.push(self.row(&cells));
            }
        }
        lines
    }

    /// Join cells padded to their widths, coloring after padding so escape
    /// codes do not count toward alignment.
    fn row(&self, cells: &[(String, usize, Option<&str>)]) -> String {
        cells
            .iter()
            .map(|(text, width, color)| {
                let padded = pad(text, *width);
                match color {
                    Some(color) => self.color(&padded, color),
                    None => padded,
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    }
}

impl Default for TableReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for TableReporter {
    fn generate_score_report(
        &self,
        outcome: &ScoringOutcome,
        winners: &Winners,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut lines = Vec::new();
        let scored = &outcome.scored;
        let limit = config.max_rows.unwrap_or(usize::MAX);
        let shown = &scored.orders[..scored.len().min(limit)];

        let labels: Vec<String> = shown
            .iter()
            .map(|o| outcome.batch.order_label(o.order))
            .collect();
        let order_width = column_width("ORDER", labels.iter().map(String::as_str));
        let part_width = column_width("PART", shown.iter().map(|o| o.part_id.as_str()));
        let title_width = column_width("TITLE", shown.iter().map(|o| o.title.as_str()));
        let best_width = column_width("BEST", shown.iter().map(|_| "0000.00"));
        let vendor_widths: Vec<usize> = scored
            .vendors
            .iter()
            .map(|v| v.width().max("000.00*".len()))
            .collect();

        // Header
        let mut header = vec![
            ("ORDER".to_string(), order_width, Some("bold")),
            ("PART".to_string(), part_width, Some("bold")),
            ("TITLE".to_string(), title_width, Some("bold")),
            ("BEST".to_string(), best_width, Some("bold")),
        ];
        header.extend(
            scored
                .vendors
                .iter()
                .zip(&vendor_widths)
                .map(|(v, w)| (v.clone(), *w, Some("bold"))),
        );
        let total_width: usize =
            header.iter().map(|(_, w, _)| *w).sum::<usize>() + 2 * (header.len() - 1);
        lines.push(self.row(&header));
        lines.push("─".repeat(total_width));

        for (index, (order, label)) in shown.iter().zip(&labels).enumerate() {
            let mut cells = vec![
                (label.clone(), order_width, None),
                (truncate(&order.part_id, part_width), part_width, None),
                (truncate(&order.title, title_width), title_width, None),
                (format!("{:.2}", order.best_price), best_width, None),
            ];
            for (score, width) in order.scores.iter().zip(&vendor_widths) {
                if winners.is_winner(index, &score.vendor) {
                    cells.push((format!("{:.2}*", score.total), *width, Some("green-bold")));
                } else {
                    cells.push((format!("{:.2}", score.total), *width, None));
                }
            }
            lines.push(self.row(&cells));
        }

        if scored.len() > shown.len() {
            lines.push(self.color(
                &format!("... and {} more orders", scored.len() - shown.len()),
                "dim",
            ));
        }

        if config.breakdown {
            lines.push(String::new());
            lines.extend(self.breakdown(shown, &labels, &scored.vendors, winners));
        }

        // Summary footer
        lines.push(String::new());
        let wins = winners.wins_by_vendor(&scored.vendors);
        let wins_text: Vec<String> = wins
            .iter()
            .map(|(vendor, count)| format!("{vendor} {count}"))
            .collect();
        lines.push(format!(
            "Batch {} | {} | Wins: {} | * highest total for the order",
            outcome.batch.batch_id,
            plural(scored.len(), "order", "orders"),
            wins_text.join(", ")
        ));

        Ok(lines.join("\n"))
    }

    fn generate_preview_report(
        &self,
        table: &PartsTable,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut lines = Vec::new();
        let limit = config.max_rows.unwrap_or(usize::MAX);
        let rows = &table.rows()[..table.row_count().min(limit)];

        let texts: Vec<Vec<String>> = rows
            .iter()
            .map(|row| table.headers().iter().map(|h| row.text(h)).collect())
            .collect();
        let widths: Vec<usize> = table
            .headers()
            .iter()
            .enumerate()
            .map(|(col, header)| column_width(header, texts.iter().map(|r| r[col].as_str())))
            .collect();

        let header: Vec<_> = table
            .headers()
            .iter()
            .zip(&widths)
            .map(|(h, w)| (truncate(h, *w), *w, Some("bold")))
            .collect();
        let total_width: usize =
            widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
        lines.push(self.row(&header));
        lines.push("─".repeat(total_width));

        for row in &texts {
            let cells: Vec<_> = row
                .iter()
                .zip(&widths)
                .map(|(text, w)| (truncate(text, *w), *w, None))
                .collect();
            lines.push(self.row(&cells));
        }

        lines.push(String::new());
        lines.push(format!(
            "Showing {} of {}",
            rows.len(),
            plural(table.row_count(), "row", "rows")
        ));

        Ok(lines.join("\n"))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Table
    }
}

/// Display width of a column: its widest value, capped for free text.
fn column_width<'a>(header: &str, values: impl Iterator<Item = &'a str>) -> usize {
    values
        .map(UnicodeWidthStr::width)
        .max()
        .unwrap_or(0)
        .min(MAX_TEXT_WIDTH)
        .max(header.width())
}

/// Right-pad `text` with spaces to `width` display columns.
fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{text}{}", " ".repeat(fill))
}

/// Truncate a string to fit within `max_width` display columns
fn truncate(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let (budget, suffix) = if max_width > 3 {
        (max_width - 3, "...")
    } else {
        (max_width, "")
    };
    let mut used = 0;
    let mut out = String::new();
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push_str(suffix);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::test_support;

    #[test]
    fn test_table_marks_winners() {
        let (outcome, winners) = test_support::outcome();
        let table = TableReporter::new()
            .no_color()
            .generate_score_report(&outcome, &winners, &ReportConfig::default())
            .unwrap();

        let lines: Vec<&str> = table.lines().collect();
        assert!(lines[0].starts_with("ORDER"));
        assert!(lines[0].contains("Encompass"));
        // Every order row has at least one winner marker
        for line in &lines[2..8] {
            assert!(line.contains('*'), "no winner on: {line}");
        }
        assert!(lines.last().unwrap().contains("Wins:"));
        assert!(!table.contains("\x1b["));
    }

    #[test]
    fn test_table_colors_winners() {
        let (outcome, winners) = test_support::outcome();
        let table = TableReporter::new()
            .generate_score_report(&outcome, &winners, &ReportConfig::default())
            .unwrap();
        assert!(table.contains("\x1b[1;32m"));
    }

    #[test]
    fn test_table_row_limit() {
        let (outcome, winners) = test_support::outcome();
        let table = TableReporter::new()
            .no_color()
            .generate_score_report(&outcome, &winners, &ReportConfig::default().with_max_rows(2))
            .unwrap();
        assert!(table.contains("... and 4 more orders"));
    }

    #[test]
    fn test_table_breakdown_is_opt_in() {
        let (outcome, winners) = test_support::outcome();
        let reporter = TableReporter::new().no_color();
        let plain = reporter
            .generate_score_report(&outcome, &winners, &ReportConfig::default())
            .unwrap();
        assert!(!plain.contains("VENDOR"));

        let detailed = reporter
            .generate_score_report(&outcome, &winners, &ReportConfig::default().with_breakdown())
            .unwrap();
        let header = detailed
            .lines()
            .find(|line| line.starts_with("ORDER") && line.contains("VENDOR"))
            .expect("breakdown header");
        for column in ["PRICE", "COST", "SHIP", "TRUST", "RET", "TOTAL"] {
            assert!(header.contains(column), "missing {column}");
        }

        let first = &outcome.scored.orders[0];
        let marcone = first.score_for("Marcone").unwrap();
        let label = outcome.batch.order_label(first.order);
        let row = detailed
            .lines()
            .find(|line| line.starts_with(&label) && line.contains("Marcone"))
            .expect("breakdown row for the first order");
        for part in [marcone.cost, marcone.shipping, marcone.trust, marcone.returnability] {
            assert!(row.contains(&format!("{part:.3}")), "missing {part:.3} on: {row}");
        }

        // 6 orders with 3 vendors each, under a header and a rule
        let breakdown_rows = detailed
            .lines()
            .skip_while(|line| !line.contains("VENDOR"))
            .skip(2)
            .take_while(|line| !line.is_empty())
            .count();
        assert_eq!(breakdown_rows, 18);
        assert!(detailed.lines().last().unwrap().contains("Wins:"));
    }

    #[test]
    fn test_table_output_is_stable() {
        let (outcome, winners) = test_support::outcome();
        let reporter = TableReporter::new().no_color();
        let a = reporter
            .generate_score_report(&outcome, &winners, &ReportConfig::default())
            .unwrap();
        let (outcome, winners) = test_support::outcome();
        let b = reporter
            .generate_score_report(&outcome, &winners, &ReportConfig::default())
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_summary_lists_every_vendor() {
        let (outcome, winners) = test_support::outcome();
        let summary = SummaryReporter::new()
            .no_color()
            .generate_score_report(&outcome, &winners, &ReportConfig::default())
            .unwrap();
        assert!(summary.starts_with("Multisource Scoring Summary"));
        assert!(summary.contains("Orders:  6 across"));
        for vendor in ["Encompass", "Marcone", "Reliable"] {
            assert!(summary.contains(&format!("  {vendor}")), "missing {vendor}");
        }
    }

    #[test]
    fn test_preview_table() {
        let table = TableReporter::new()
            .no_color()
            .generate_preview_report(
                &test_support::parts(),
                &ReportConfig::default().with_max_rows(2),
            )
            .unwrap();
        assert!(table.starts_with("Part Number"));
        assert!(table.contains("WR55X10025"));
        assert!(!table.contains("DC47-00019A"));
        assert!(table.ends_with("Showing 2 of 3 rows"));
    }

    #[test]
    fn test_summary_preview() {
        let summary = SummaryReporter::new()
            .no_color()
            .generate_preview_report(&test_support::parts(), &ReportConfig::default())
            .unwrap();
        assert!(summary.contains("Rows:  3"));
    }

    #[test]
    fn test_truncate_uses_display_width() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 8), "abcde...");
        assert_eq!(truncate("部品部品部品", 7), "部品...");
        assert_eq!(truncate("abcdef", 2), "ab");
    }

    #[test]
    fn test_pad_counts_wide_chars() {
        assert_eq!(pad("部品", 6), "部品  ");
        assert_eq!(pad("toolong", 3), "toolong");
    }
}
