//! Interactive terminal UI using ratatui.
//!
//! Shows a scored run as two tabs: the scored orders with one total per
//! vendor, and the long-form report. Winning cells are highlighted and the
//! selected order can be expanded into its sub-score breakdown.

mod app;
mod events;
pub mod theme;
mod ui;

pub use app::{ScoreApp, Tab, PAGE_SIZE};
pub use events::{handle_key_event, Event, EventHandler};
pub use theme::{colors, current_theme, set_theme, toggle_theme, ColorScheme, Styles, Theme};
pub use ui::run_tui;
