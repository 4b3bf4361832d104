//! Overview rendering: severity histogram, top services, signal feed.

use chrono::Utc;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;

use super::common::format_age;

/// Width of the severity label column in the histogram.
const LABEL_WIDTH: usize = 8;

/// Render the Overview view.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let columns = Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let left = Layout::vertical([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(columns[0]);

    render_severity(frame, app, left[0]);
    render_top_services(frame, app, left[1]);
    render_signal_feed(frame, app, columns[1]);
}

fn render_severity(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Incident Severity ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type);

    let Some(ref stats) = app.stats else {
        let text = placeholder_text(app, "Loading incident stats...");
        frame.render_widget(Paragraph::new(text).block(block), area);
        return;
    };

    let bar_width = (area.width as usize).saturating_sub(LABEL_WIDTH + 10).max(4);
    let max = stats.severity.max().max(1);

    let lines: Vec<Line> = stats
        .severity
        .buckets()
        .map(|(severity, count)| {
            let filled = ((count as f64 / max as f64) * bar_width as f64).round() as usize;
            let bar: String = "█".repeat(filled);
            Line::from(vec![
                Span::styled(
                    format!(" {:<width$}", severity.label(), width = LABEL_WIDTH),
                    app.theme.severity_style(Some(severity)),
                ),
                Span::styled(bar, app.theme.severity_style(Some(severity))),
                Span::raw(format!(" {}", count)),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_top_services(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Top Affected Services ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type);

    let Some(ref stats) = app.stats else {
        let text = placeholder_text(app, "Loading incident stats...");
        frame.render_widget(Paragraph::new(text).block(block), area);
        return;
    };

    let top = stats.top_services();
    if top.is_empty() {
        let text = vec![Line::from(Span::styled(
            " No service data available",
            Style::default().add_modifier(Modifier::DIM),
        ))];
        frame.render_widget(Paragraph::new(text).block(block), area);
        return;
    }

    let name_width = top.iter().map(|(name, _)| name.len()).max().unwrap_or(0).min(24);
    let bar_width = (area.width as usize).saturating_sub(name_width + 10).max(4);
    let max = top.iter().map(|(_, c)| *c).max().unwrap_or(1).max(1);

    let lines: Vec<Line> = top
        .iter()
        .map(|(name, count)| {
            let filled = ((*count as f64 / max as f64) * bar_width as f64).round() as usize;
            Line::from(vec![
                Span::raw(format!(" {:<width$} ", name, width = name_width)),
                Span::styled("█".repeat(filled), Style::default().fg(app.theme.highlight)),
                Span::raw(format!(" {}", count)),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_signal_feed(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Live Signal Feed ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type);

    if app.recent_signals.is_empty() {
        let text = vec![Line::from(Span::styled(
            " Listening for incoming signals...",
            Style::default().add_modifier(Modifier::DIM),
        ))];
        frame.render_widget(Paragraph::new(text).block(block), area);
        return;
    }

    let now = Utc::now();
    let mut lines = Vec::new();
    for signal in &app.recent_signals {
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {:<6}", signal.kind().label()),
                Style::default().fg(app.theme.highlight),
            ),
            Span::styled(
                signal.service_name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}", format_age(signal.timestamp, now)),
                Style::default().add_modifier(Modifier::DIM),
            ),
        ]));
        lines.push(Line::from(Span::styled(
            format!("   {}", signal.payload.summary()),
            Style::default().add_modifier(Modifier::DIM),
        )));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn placeholder_text(app: &App, loading: &str) -> Vec<Line<'static>> {
    match app.stats_error {
        Some(ref err) => vec![Line::from(Span::styled(
            format!(" Error: {}", err),
            Style::default().fg(app.theme.critical),
        ))],
        None => vec![Line::from(Span::styled(
            format!(" {}", loading),
            Style::default().add_modifier(Modifier::DIM),
        ))],
    }
}
