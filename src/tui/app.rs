//! TUI application state.
//!
//! Holds the scored run plus navigation state. Nothing here touches the
//! terminal, so key handling can be tested directly.

use crate::pipeline::ScoredRun;
use crate::scoring::{ReportRow, ScoredOrder};

/// Rows moved by page up/down.
pub const PAGE_SIZE: usize = 10;

/// Tabs of the score view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    /// One row per order, vendor totals side by side
    Orders,
    /// Long-form (order, vendor, total) rows
    Report,
}

impl Tab {
    pub const ALL: [Self; 2] = [Self::Orders, Self::Report];

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Orders => "Scored Orders",
            Self::Report => "Report",
        }
    }

    #[must_use]
    pub const fn shortcut(self) -> &'static str {
        match self {
            Self::Orders => "1",
            Self::Report => "2",
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::Orders => 0,
            Self::Report => 1,
        }
    }
}

/// State of the interactive score view.
#[derive(Debug)]
pub struct ScoreApp {
    pub run: ScoredRun,
    /// Label of the uploaded file, shown in the header
    pub source: String,
    pub active_tab: Tab,
    /// Selected row on each tab
    selected: [usize; 2],
    /// Show the sub-score breakdown of the selected order
    pub show_detail: bool,
    pub should_quit: bool,
    pub tick: u64,
}

impl ScoreApp {
    pub fn new(run: ScoredRun, source: impl Into<String>) -> Self {
        Self {
            run,
            source: source.into(),
            active_tab: Tab::Orders,
            selected: [0; 2],
            show_detail: false,
            should_quit: false,
            tick: 0,
        }
    }

    /// Rows on the active tab.
    #[must_use]
    pub fn row_count(&self) -> usize {
        match self.active_tab {
            Tab::Orders => self.run.outcome.scored.len(),
            Tab::Report => self.run.outcome.report.len(),
        }
    }

    /// Selected row on the active tab.
    #[must_use]
    pub const fn selected(&self) -> usize {
        self.selected[self.active_tab.index()]
    }

    /// The order the selection refers to, on either tab.
    #[must_use]
    pub fn selected_order(&self) -> Option<&ScoredOrder> {
        let orders = &self.run.outcome.scored.orders;
        match self.active_tab {
            Tab::Orders => orders.get(self.selected()),
            Tab::Report => {
                let row = self.selected_report_row()?;
                orders.iter().find(|o| o.order == row.order)
            }
        }
    }

    #[must_use]
    pub fn selected_report_row(&self) -> Option<&ReportRow> {
        self.run.outcome.report.get(self.selected[Tab::Report.index()])
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    pub fn select_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
    }

    pub fn next_tab(&mut self) {
        let next = (self.active_tab.index() + 1) % Tab::ALL.len();
        self.active_tab = Tab::ALL[next];
    }

    pub fn prev_tab(&mut self) {
        let prev = (self.active_tab.index() + Tab::ALL.len() - 1) % Tab::ALL.len();
        self.active_tab = Tab::ALL[prev];
    }

    pub fn select_next(&mut self) {
        self.move_selection(1);
    }

    pub fn select_prev(&mut self) {
        self.move_selection(-1);
    }

    pub fn page_down(&mut self) {
        self.move_selection(PAGE_SIZE as isize);
    }

    pub fn page_up(&mut self) {
        self.move_selection(-(PAGE_SIZE as isize));
    }

    pub fn select_first(&mut self) {
        self.selected[self.active_tab.index()] = 0;
    }

    pub fn select_last(&mut self) {
        self.selected[self.active_tab.index()] = self.row_count().saturating_sub(1);
    }

    fn move_selection(&mut self, delta: isize) {
        let last = self.row_count().saturating_sub(1);
        let slot = &mut self.selected[self.active_tab.index()];
        *slot = slot.saturating_add_signed(delta).min(last);
    }

    pub fn toggle_detail(&mut self) {
        self.show_detail = !self.show_detail;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}
