use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, Paragraph, Tabs, Wrap},
    Frame,
};

use crate::app::config::{Include, TestBy};
use crate::app::state::{App, Mode};
use crate::graph;
use crate::letters::LetterState;
use crate::theme::Theme;
use crate::tracker::ErrorPolicy;
use crate::ui::help::draw_help;

fn titled<'a>(marker: &'a str, title: &'a str, theme: &Theme) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border.to_tui_color()))
        .title(Spans::from(vec![
            Span::styled(marker, Style::default().fg(theme.title_accent.to_tui_color())),
            Span::raw(" "),
            Span::raw(title),
        ]))
}

/// Main screen: config row, live row and the passage.
pub fn draw<B: Backend>(f: &mut Frame<B>, app: &App, theme: &Theme) {
    if app.mode == Mode::Finished {
        draw_finished(f, app, theme);
    } else {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Length(3), Constraint::Min(3)])
            .split(f.size());

        draw_config_row(f, app, theme, rows[0]);
        draw_live_row(f, app, theme, rows[1]);
        draw_text(f, app, theme, rows[2]);
    }

    if app.show_help {
        draw_help(f, theme);
    }
}

fn draw_config_row<B: Backend>(f: &mut Frame<B>, app: &App, theme: &Theme, area: Rect) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(35),
            Constraint::Percentage(40),
        ])
        .split(area);

    let active = Style::default()
        .fg(theme.tab_active.to_tui_color())
        .add_modifier(Modifier::BOLD);
    let inactive = Style::default().fg(theme.tab_inactive.to_tui_color());

    let titles = ["Time", "Words"].iter().map(|t| Spans::from(*t)).collect::<Vec<_>>();
    let selected = match app.config.test_by {
        TestBy::Time => 0,
        TestBy::Words => 1,
    };
    let tabs = Tabs::new(titles)
        .block(titled("¹²", "Test by", theme))
        .select(selected)
        .style(inactive)
        .highlight_style(active)
        .divider(Span::raw(" "));
    f.render_widget(tabs, cols[0]);

    let mut spans = vec![Span::raw("| ")];
    for &v in app.config.options() {
        let label = match app.config.test_by {
            TestBy::Time => format!("{v}s"),
            TestBy::Words => v.to_string(),
        };
        spans.push(if v == app.config.value {
            Span::styled(label, active)
        } else {
            Span::styled(label, inactive)
        });
        spans.push(Span::raw(" "));
    }
    f.render_widget(
        Paragraph::new(Spans::from(spans)).block(titled("←→", "Value", theme)),
        cols[1],
    );

    let flag = |on: bool, label: &'static str| {
        Span::styled(format!("{label} "), if on { active } else { inactive })
    };
    let flags = Spans::from(vec![
        flag(app.config.includes(Include::Punctuation), "punctuation"),
        flag(app.config.includes(Include::Numbers), "numbers"),
        flag(app.config.live_wpm, "live"),
        flag(app.config.error_policy == ErrorPolicy::Reversible, "reversible"),
    ]);
    f.render_widget(
        Paragraph::new(flags).block(titled("pnlr", "Include", theme)),
        cols[2],
    );
}

fn draw_live_row<B: Backend>(f: &mut Frame<B>, app: &App, theme: &Theme, area: Rect) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let value = Style::default()
        .fg(theme.stats_value.to_tui_color())
        .add_modifier(Modifier::BOLD);

    let state_txt = match app.mode {
        Mode::View => "View",
        Mode::Insert => "Typing",
        Mode::Finished => "Finished",
    };
    f.render_widget(Paragraph::new(state_txt).block(titled("•", "State", theme)), cols[0]);

    f.render_widget(
        Paragraph::new(Span::styled(app.live_timer.clone(), value))
            .block(titled("•", "Timer", theme)),
        cols[1],
    );

    let speed = if app.config.live_wpm {
        Span::styled(format!("WPM: {}", app.live_wpm), value)
    } else {
        Span::raw("WPM: --")
    };
    f.render_widget(Paragraph::new(speed).block(titled("•", "Speed", theme)), cols[2]);

    let words = match app.config.test_by {
        TestBy::Words => format!("{}/{}", app.words_completed, app.config.value),
        TestBy::Time => format!("{}/{}", app.words_completed, app.tracker.passage().word_count()),
    };
    f.render_widget(Paragraph::new(words).block(titled("•", "Words", theme)), cols[3]);
}

fn draw_text<B: Backend>(f: &mut Frame<B>, app: &App, theme: &Theme, area: Rect) {
    let cursor = app.tracker.cursor();
    let typing = app.mode == Mode::Insert;

    let letter_spans: Vec<Span> = app
        .tracker
        .passage()
        .letters()
        .iter()
        .enumerate()
        .map(|(i, l)| {
            let base = match l.state {
                LetterState::Pending if typing => Style::default().fg(theme.letter_pending.to_tui_color()),
                LetterState::Pending => Style::default().fg(theme.overlay.to_tui_color()),
                LetterState::Correct => Style::default().fg(theme.letter_correct.to_tui_color()),
                LetterState::Wrong => Style::default().fg(theme.letter_wrong.to_tui_color()),
            };
            let style = if typing && i == cursor {
                base.bg(theme.cursor_bg.to_tui_color())
                    .fg(theme.cursor_fg.to_tui_color())
                    .add_modifier(Modifier::BOLD)
            } else {
                base
            };
            // a wrong space is invisible unless it is drawn as something
            let ch = if l.state == LetterState::Wrong && l.ch == ' ' { '·' } else { l.ch };
            Span::styled(ch.to_string(), style)
        })
        .collect();

    let mut lines = Vec::new();
    if !typing {
        let hint = app
            .notice
            .clone()
            .unwrap_or_else(|| "Press Enter to start · ? for help".to_string());
        lines.push(Spans::from(Span::styled(
            hint,
            Style::default().fg(theme.title_accent.to_tui_color()).add_modifier(Modifier::ITALIC),
        )));
        lines.push(Spans::from(""));
    }
    lines.push(Spans::from(letter_spans));

    f.render_widget(
        Paragraph::new(lines)
            .block(titled("⏎", "Text", theme))
            .wrap(Wrap { trim: false }),
        area,
    );
}

/// Draw the “finished” summary: left = WPM chart, right = stats.
pub fn draw_finished<B: Backend>(f: &mut Frame<B>, app: &App, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(f.size());

    graph::draw_wpm_chart(f, chunks[0], &app.samples, &app.error_secs, theme);

    let Some(summary) = app.summary.as_ref() else {
        return;
    };

    let label = Style::default().fg(theme.stats_label.to_tui_color());
    let value = Style::default()
        .fg(theme.stats_value.to_tui_color())
        .add_modifier(Modifier::BOLD);
    let row = |name: &'static str, v: String, highlight: bool| {
        Spans::from(vec![
            Span::styled(name, label),
            if highlight { Span::styled(v, value) } else { Span::raw(v) },
        ])
    };

    let mut items = vec![
        row("WPM  ", summary.result.wpm.to_string(), true),
        row("ACC  ", format!("{}%", summary.result.accuracy), true),
        row("RAW  ", format!("{:.0}", summary.raw_wpm), false),
        row("ERR  ", summary.wrong.to_string(), false),
        row("TIME ", summary.elapsed_label.clone(), false),
        row(
            "CONS ",
            summary.consistency.map(|c| format!("{c:.0}%")).unwrap_or_else(|| "--%".into()),
            false,
        ),
        Spans::from(""),
    ];
    items.extend(summary.test_type.iter().map(|t| Spans::from(Span::raw(t.clone()))));
    items.push(Spans::from(""));
    items.push(Spans::from(Span::styled(
        format!("finished {}", summary.finished_at.format("%H:%M:%S")),
        label,
    )));
    items.push(Spans::from(Span::styled("Enter=Again  Esc=Back", label)));

    let stats = Paragraph::new(items)
        .block(titled("•", "Summary", theme))
        .wrap(Wrap { trim: true });
    f.render_widget(stats, chunks[1]);
}
