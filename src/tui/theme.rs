//! Centralized theme and color scheme for TUI.
//!
//! This module provides consistent styling across the score views.

use ratatui::prelude::*;
use std::sync::RwLock;

/// Color scheme for the TUI application.
#[derive(Debug, Clone, Copy)]
pub struct ColorScheme {
    pub primary: Color,
    pub accent: Color,
    pub muted: Color,
    pub border: Color,
    pub border_focused: Color,
    pub text: Color,
    pub text_muted: Color,
    /// Winning vendor cells
    pub winner: Color,
    /// Tied winner cells
    pub tie: Color,
    pub selection_bg: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::dark()
    }
}

impl ColorScheme {
    /// Dark theme (default)
    pub const fn dark() -> Self {
        Self {
            primary: Color::Cyan,
            accent: Color::Yellow,
            muted: Color::DarkGray,
            border: Color::DarkGray,
            border_focused: Color::Cyan,
            text: Color::White,
            text_muted: Color::Gray,
            winner: Color::Green,
            tie: Color::LightGreen,
            selection_bg: Color::Rgb(60, 60, 80),
        }
    }

    /// High contrast theme (accessibility)
    pub const fn high_contrast() -> Self {
        Self {
            primary: Color::LightCyan,
            accent: Color::LightYellow,
            muted: Color::Gray,
            border: Color::White,
            border_focused: Color::LightCyan,
            text: Color::White,
            text_muted: Color::White,
            winner: Color::LightGreen,
            tie: Color::LightGreen,
            selection_bg: Color::Blue,
        }
    }
}

/// Available themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    HighContrast,
}

impl Theme {
    #[must_use]
    pub const fn colors(self) -> ColorScheme {
        match self {
            Self::Dark => ColorScheme::dark(),
            Self::HighContrast => ColorScheme::high_contrast(),
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::HighContrast => "high-contrast",
        }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::HighContrast,
            Self::HighContrast => Self::Dark,
        }
    }
}

static THEME: RwLock<Theme> = RwLock::new(Theme::Dark);

/// Colors of the current theme.
pub fn colors() -> ColorScheme {
    current_theme().colors()
}

pub fn current_theme() -> Theme {
    THEME.read().map(|t| *t).unwrap_or_default()
}

pub fn set_theme(theme: Theme) {
    if let Ok(mut current) = THEME.write() {
        *current = theme;
    }
}

/// Switch between the dark and high-contrast themes.
pub fn toggle_theme() {
    set_theme(current_theme().toggled());
}

/// Shared styles built from the current theme.
pub struct Styles;

impl Styles {
    pub fn header() -> Style {
        Style::default()
            .fg(colors().primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn winner() -> Style {
        Style::default()
            .fg(colors().winner)
            .add_modifier(Modifier::BOLD)
    }

    pub fn tie() -> Style {
        Style::default()
            .fg(colors().tie)
            .add_modifier(Modifier::BOLD | Modifier::ITALIC)
    }

    pub fn selected_row() -> Style {
        Style::default()
            .bg(colors().selection_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn shortcut_key() -> Style {
        Style::default().fg(colors().accent).bold()
    }

    pub fn shortcut_desc() -> Style {
        Style::default().fg(colors().text_muted)
    }
}

/// Render footer shortcut hints as styled spans.
pub fn render_footer_hints(hints: &[(&str, &str)]) -> Vec<Span<'static>> {
    let mut spans = Vec::new();

    for (i, (key, desc)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(format!("[{key}]"), Styles::shortcut_key()));
        spans.push(Span::styled(desc.to_string(), Styles::shortcut_desc()));
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_toggle_round_trips() {
        assert_eq!(Theme::Dark.toggled(), Theme::HighContrast);
        assert_eq!(Theme::HighContrast.toggled(), Theme::Dark);
        assert_eq!(Theme::HighContrast.name(), "high-contrast");
    }

    #[test]
    fn test_footer_hints() {
        let spans = render_footer_hints(&[("q", "quit"), ("Tab", "switch")]);
        assert_eq!(spans.len(), 5);
        assert_eq!(spans[0].content, "[q]");
        assert_eq!(spans[4].content, "switch");
    }
}
