//! Main UI rendering.

use super::app::{ScoreApp, Tab};
use super::events::{handle_key_event, Event, EventHandler};
use super::theme::{colors, current_theme, render_footer_hints, Styles};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Tabs},
};
use std::io::{self, stdout};

/// Width of the vendor total columns.
const SCORE_WIDTH: u16 = 10;

/// Run the TUI application
pub fn run_tui(app: &mut ScoreApp) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::default();

    // Main loop
    let result = loop {
        if let Err(err) = terminal.draw(|frame| render(frame, app)) {
            break Err(err);
        }

        match events.next() {
            Ok(Event::Key(key)) => handle_key_event(app, key),
            Ok(Event::Resize(_, _)) => {}
            Ok(Event::Tick) => app.tick += 1,
            Err(err) => break Err(err),
        }

        if app.should_quit {
            break Ok(());
        }
    };

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Main render function
pub(crate) fn render(frame: &mut Frame, app: &ScoreApp) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Header
            Constraint::Length(3), // Tabs
            Constraint::Min(6),    // Content
            Constraint::Length(1), // Footer
        ])
        .split(frame.area());

    render_header(frame, chunks[0], app);
    render_tabs(frame, chunks[1], app);

    let content = if app.show_detail {
        let split = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
            .split(chunks[2]);
        render_detail(frame, split[1], app);
        split[0]
    } else {
        chunks[2]
    };

    match app.active_tab {
        Tab::Orders => render_orders(frame, content, app),
        Tab::Report => render_report(frame, content, app),
    }

    render_footer(frame, chunks[3], app);
}

fn render_header(frame: &mut Frame, area: Rect, app: &ScoreApp) {
    let outcome = &app.run.outcome;
    let scheme = colors();
    let line = Line::from(vec![
        Span::styled(" multisource ", Styles::header()),
        Span::styled("│ ", Style::default().fg(scheme.muted)),
        Span::styled(
            format!("batch {}", outcome.batch.batch_id),
            Style::default().fg(scheme.accent).bold(),
        ),
        Span::styled(
            format!("  seed {}", outcome.batch.seed),
            Style::default().fg(scheme.text_muted),
        ),
        Span::styled(
            format!("  {} orders", outcome.scored.len()),
            Style::default().fg(scheme.text),
        ),
        Span::styled(
            format!("  {}", app.source),
            Style::default().fg(scheme.text_muted),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_tabs(frame: &mut Frame, area: Rect, app: &ScoreApp) {
    let scheme = colors();
    let titles: Vec<Line> = Tab::ALL
        .iter()
        .map(|tab| Line::from(format!("[{}] {}", tab.shortcut(), tab.title())))
        .collect();
    let selected = Tab::ALL
        .iter()
        .position(|t| *t == app.active_tab)
        .unwrap_or(0);

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(scheme.border)),
        )
        .select(selected)
        .highlight_style(Style::default().fg(scheme.accent).bold());
    frame.render_widget(tabs, area);
}

fn render_orders(frame: &mut Frame, area: Rect, app: &ScoreApp) {
    let outcome = &app.run.outcome;
    let vendors = &outcome.scored.vendors;
    let scheme = colors();

    let mut header_cells = vec![
        Cell::from("Order"),
        Cell::from("Part"),
        Cell::from("Title"),
        Cell::from("Best"),
    ];
    header_cells.extend(vendors.iter().map(|v| Cell::from(v.as_str())));
    let header = Row::new(header_cells).style(Styles::header());

    let rows = outcome.scored.orders.iter().enumerate().map(|(i, order)| {
        let tied = app
            .run
            .winners
            .orders
            .get(i)
            .is_some_and(|w| w.vendors.len() > 1);
        let mut cells = vec![
            Cell::from(outcome.batch.order_label(order.order)),
            Cell::from(order.part_id.clone()),
            Cell::from(order.title.clone()),
            Cell::from(format!("{:.2}", order.best_price)),
        ];
        cells.extend(vendors.iter().map(|vendor| {
            let total = order.score_for(vendor).map_or(0.0, |s| s.total);
            if app.run.winners.is_winner(i, vendor) {
                let style = if tied { Styles::tie() } else { Styles::winner() };
                Cell::from(format!("{total:.2}*")).style(style)
            } else {
                Cell::from(format!("{total:.2}")).style(Style::default().fg(scheme.text))
            }
        }));
        Row::new(cells)
    });

    let mut widths = vec![
        Constraint::Length(9),
        Constraint::Length(12),
        Constraint::Min(12),
        Constraint::Length(8),
    ];
    widths.extend(vendors.iter().map(|_| Constraint::Length(SCORE_WIDTH)));

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(format!(" {} ", Tab::Orders.title()))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(scheme.border_focused)),
        )
        .row_highlight_style(Styles::selected_row());

    let mut state = TableState::default().with_selected(Some(app.selected()));
    frame.render_stateful_widget(table, area, &mut state);
}

fn render_report(frame: &mut Frame, area: Rect, app: &ScoreApp) {
    let outcome = &app.run.outcome;
    let scheme = colors();

    let header = Row::new(vec!["Order", "Part", "Title", "Vendor", "Total Score"])
        .style(Styles::header());

    let rows = outcome.report.iter().map(|row| {
        let won = app
            .run
            .winners
            .orders
            .get(row.order.saturating_sub(1))
            .is_some_and(|w| w.vendors.contains(&row.vendor));
        let total = Cell::from(format!("{:.2}", row.total));
        Row::new(vec![
            Cell::from(outcome.batch.order_label(row.order)),
            Cell::from(row.part_id.clone()),
            Cell::from(row.title.clone()),
            Cell::from(row.vendor.clone()),
            if won { total.style(Styles::winner()) } else { total },
        ])
    });

    let widths = [
        Constraint::Length(9),
        Constraint::Length(12),
        Constraint::Min(12),
        Constraint::Length(12),
        Constraint::Length(12),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(format!(" {} ", Tab::Report.title()))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(scheme.border_focused)),
        )
        .row_highlight_style(Styles::selected_row());

    let mut state = TableState::default().with_selected(Some(app.selected()));
    frame.render_stateful_widget(table, area, &mut state);
}

/// Sub-score breakdown of the selected order.
fn render_detail(frame: &mut Frame, area: Rect, app: &ScoreApp) {
    let scheme = colors();
    let block = Block::default()
        .title(" Breakdown ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(scheme.border));

    let Some(order) = app.selected_order() else {
        frame.render_widget(Paragraph::new("No order selected").block(block), area);
        return;
    };

    let weights = app.run.outcome.parameters.weights;
    let mut lines = vec![
        Line::from(Span::styled(
            format!("{}  {}", order.part_id, order.title),
            Styles::header(),
        )),
        Line::from(Span::styled(
            format!(
                "row {}  best ${:.2}  weights {}/{}/{}/{}",
                order.source_row,
                order.best_price,
                weights.cost,
                weights.shipping,
                weights.returnability,
                weights.trust
            ),
            Style::default().fg(scheme.text_muted),
        )),
        Line::from(""),
    ];

    let index = order.order.saturating_sub(1);
    for score in &order.scores {
        let style = if app.run.winners.is_winner(index, &score.vendor) {
            Styles::winner()
        } else {
            Style::default().fg(scheme.text)
        };
        lines.push(Line::from(Span::styled(
            format!("{}  {:.2}", score.vendor, score.total),
            style,
        )));
        lines.push(Line::from(Span::styled(
            format!(
                "  ${:.2}  cost {:.2}  ship {:.2}  trust {:.2}  ret {:.2}",
                score.price, score.cost, score.shipping, score.trust, score.returnability
            ),
            Style::default().fg(scheme.text_muted),
        )));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_footer(frame: &mut Frame, area: Rect, app: &ScoreApp) {
    let position = format!(
        " {}/{}  theme {} ",
        app.selected() + 1,
        app.row_count(),
        current_theme().name()
    );
    let mut spans = vec![Span::styled(position, Style::default().fg(colors().muted))];
    spans.extend(render_footer_hints(&[
        ("↑↓", "move"),
        ("Tab", "switch"),
        ("Enter", "breakdown"),
        ("t", "theme"),
        ("q", "quit"),
    ]));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::app::tests::app;
    use ratatui::backend::TestBackend;

    fn draw(app: &ScoreApp) -> String {
        let backend = TestBackend::new(120, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|line| line.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_renders_orders_tab() {
        let app = app(3);
        let screen = draw(&app);
        assert!(screen.contains("Scored Orders"));
        assert!(screen.contains("Encompass"));
        assert!(screen.contains(&app.run.outcome.batch.order_label(1)));
        assert!(screen.contains('*'));
    }

    #[test]
    fn test_renders_report_and_detail() {
        let mut app = app(2);
        app.select_tab(Tab::Report);
        app.toggle_detail();
        let screen = draw(&app);
        assert!(screen.contains("Total Score"));
        assert!(screen.contains("Breakdown"));
        assert!(screen.contains("cost"));
    }
}
