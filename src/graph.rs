// src/graph.rs

use std::collections::BTreeMap;

use tui::{
    backend::Backend,
    layout::Rect,
    style::{Modifier, Style},
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

use crate::theme::Theme;

/// Mistakes per second, scaled so the busiest second sits at `top`.
pub fn error_points(errors: &[u64], top: f64) -> Vec<(f64, f64)> {
    let mut per_sec: BTreeMap<u64, usize> = BTreeMap::new();
    for &t in errors {
        *per_sec.entry(t).or_insert(0) += 1;
    }
    let max = per_sec.values().copied().max().unwrap_or(0);
    if max == 0 {
        return Vec::new();
    }
    let step = top / max as f64;
    per_sec
        .into_iter()
        .map(|(sec, count)| (sec as f64, step * count as f64))
        .collect()
}

fn fmt_time_label(secs: f64) -> String {
    if !secs.is_finite() || secs <= 0.0 {
        return "0s".into();
    }
    if secs >= 60.0 {
        let m = (secs / 60.0).floor() as u64;
        let s = (secs % 60.0).round() as u64;
        if s == 0 { format!("{m}m") } else { format!("{m}m{s}s") }
    } else {
        format!("{}s", secs.round() as u64)
    }
}

/// Draw WPM over time with mistake markers.
/// `data`: (elapsed_seconds, wpm); `errors`: elapsed second of each mistake.
pub fn draw_wpm_chart<B: Backend>(
    f: &mut Frame<B>,
    area: Rect,
    data: &[(u64, f64)],
    errors: &[u64],
    theme: &Theme,
) {
    let pts: Vec<(f64, f64)> = data.iter().map(|&(t, w)| (t as f64, w)).collect();
    let max_t = data
        .last()
        .map(|&(t, _)| t as f64)
        .unwrap_or(1.0)
        .max(errors.iter().copied().max().unwrap_or(0) as f64)
        .max(1.0);
    let max_w = data.iter().map(|&(_, w)| w).fold(0.0, f64::max).max(1.0) * 1.1;
    let err_pts = error_points(errors, max_w * 0.25);

    let mut datasets = vec![Dataset::default()
        .name("WPM")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(theme.chart_line.to_tui_color()))
        .data(&pts)];
    if !err_pts.is_empty() {
        datasets.push(
            Dataset::default()
                .name("Errors")
                .marker(symbols::Marker::Block)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(theme.error.to_tui_color()).add_modifier(Modifier::BOLD))
                .data(&err_pts),
        );
    }

    let axis = Style::default().fg(theme.chart_axis.to_tui_color());
    let x_labels = vec![
        Span::styled(fmt_time_label(0.0), axis.add_modifier(Modifier::BOLD)),
        Span::styled(fmt_time_label(max_t / 2.0), axis),
        Span::styled(fmt_time_label(max_t), axis.add_modifier(Modifier::BOLD)),
    ];
    let y_labels = vec![
        Span::styled("0", axis.add_modifier(Modifier::BOLD)),
        Span::styled(format!("{}", (max_w / 2.0).round()), axis),
        Span::styled(format!("{}", max_w.round()), axis.add_modifier(Modifier::BOLD)),
    ];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title(Span::styled(
                    "WPM Over Time",
                    Style::default().fg(theme.stats_value.to_tui_color()).add_modifier(Modifier::BOLD),
                ))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border.to_tui_color())),
        )
        .style(
            Style::default()
                .bg(theme.background.to_tui_color())
                .fg(theme.foreground.to_tui_color()),
        )
        .x_axis(
            Axis::default()
                .title(Span::styled("Seconds", Style::default().fg(theme.stats_label.to_tui_color())))
                .style(axis)
                .bounds([0.0, max_t])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled("WPM", Style::default().fg(theme.stats_label.to_tui_color())))
                .style(axis)
                .bounds([0.0, max_w])
                .labels(y_labels),
        );

    f.render_widget(chart, area);
}
