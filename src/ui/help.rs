use tui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table},
    Frame,
};

use crate::theme::Theme;

pub const BINDINGS: &[(&str, &str)] = &[
    ("Enter", "Start a test"),
    ("Esc", "Close help / abandon test"),
    ("Ctrl-C", "Quit"),
    ("1 / 2", "Test by time / words"),
    ("Left / Right", "Change time or word count"),
    ("p", "Toggle punctuation"),
    ("n", "Toggle numbers"),
    ("l", "Toggle live WPM"),
    ("r", "Toggle reversible mistakes"),
    ("Backspace", "Delete previous character"),
    ("Ctrl-W", "Delete previous word"),
    ("?", "Toggle this help"),
];

/// Centered popup listing the key bindings.
pub fn draw_help<B: Backend>(f: &mut Frame<B>, theme: &Theme) {
    let area = f.size();
    let w = (area.width as f32 * 0.6) as u16;
    let h = (area.height as f32 * 0.6) as u16;
    let x = (area.width.saturating_sub(w)) / 2;
    let y = (area.height.saturating_sub(h)) / 2;
    let rect = Rect::new(x, y, w, h);

    f.render_widget(Clear, rect);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border.to_tui_color()))
        .style(Style::default().bg(theme.background.to_tui_color()));
    let inner = block.inner(rect);
    f.render_widget(block, rect);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Length(2), Constraint::Min(4), Constraint::Length(1)])
        .split(inner);

    let title = Paragraph::new(Span::styled(
        "Help · Keybindings",
        Style::default()
            .fg(theme.title_accent.to_tui_color())
            .add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center);
    f.render_widget(title, chunks[0]);

    let rows: Vec<Row> = BINDINGS
        .iter()
        .map(|&(key, desc)| {
            Row::new(vec![
                Cell::from(Span::styled(
                    key,
                    Style::default()
                        .fg(theme.title_accent.to_tui_color())
                        .add_modifier(Modifier::BOLD),
                )),
                Cell::from(Span::styled(desc, Style::default().fg(theme.foreground.to_tui_color()))),
            ])
        })
        .collect();

    let table = Table::new(rows)
        .widths(&[Constraint::Length(14), Constraint::Min(10)])
        .column_spacing(2);
    f.render_widget(table, chunks[1]);

    let footer = Paragraph::new(Span::styled(
        "Press Esc or ? to close",
        Style::default()
            .fg(theme.stats_label.to_tui_color())
            .add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center);
    f.render_widget(footer, chunks[2]);
}
