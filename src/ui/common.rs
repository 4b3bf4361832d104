//! Common UI components shared across views.
//!
//! This module contains the header bar, tab bar, status bar, and help overlay.

use chrono::{DateTime, Utc};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

use crate::app::{App, View};

/// Render the header bar with liveness and incident totals.
///
/// Displays: liveness pill, last-signal age, total incident count, critical
/// count from the aggregated window.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let liveness = app.liveness();

    let mut spans = vec![
        Span::styled(" ● ", app.theme.liveness_style(liveness)),
        Span::styled("SENTINEL ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("│ "),
        Span::styled(liveness.label(), app.theme.liveness_style(liveness)),
    ];

    let last_signal = app.freshness.as_ref().and_then(|s| s.signal.as_ref());
    if let Some(signal) = last_signal {
        spans.push(Span::raw(" │ last signal "));
        spans.push(Span::raw(format_age(signal.timestamp, Utc::now())));
    }

    if let Some(ref stats) = app.stats {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(
            format!("{}", stats.total),
            Style::default().add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(" incidents"));

        let critical = stats.severity.count(crate::api::IncidentSeverity::Critical);
        if critical > 0 {
            spans.push(Span::raw(" │ "));
            spans.push(Span::styled(
                format!("{} critical", critical),
                Style::default().fg(app.theme.critical).add_modifier(Modifier::BOLD),
            ));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the tab bar showing available views.
///
/// Highlights the currently active view.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = vec![
        Line::from(" 1:Overview "),
        Line::from(" 2:Incidents "),
        Line::from(" 3:Analysis "),
    ];

    let selected = match app.current_view {
        View::Overview => 0,
        View::Incidents => 1,
        View::Analysis => 2,
    };

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(app.theme.tab_inactive)
        .highlight_style(app.theme.tab_active)
        .divider("|");

    frame.render_widget(tabs, area);
}

/// Render the status bar at the bottom.
///
/// Shows available controls for the current view, temporary status messages
/// and fetch errors.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    // Check for temporary status message first
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let status = if let Some(ref err) = app.incidents_error {
        format!(" Error: {} | r:retry q:quit", err)
    } else if app.incidents_loading && app.incidents.is_none() {
        " Loading... | q:quit".to_string()
    } else {
        let controls = match app.current_view {
            View::Overview => "Tab:switch r:refresh ?:help q:quit",
            View::Incidents => "↑↓:select n/p:page Enter:analysis r:refresh ?:help q:quit",
            View::Analysis => "Esc:back Tab:switch r:refresh ?:help q:quit",
        };
        let paging = match &app.incidents {
            Some(p) if app.current_view == View::Incidents => {
                format!("page {} ({} total) | ", app.page, p.total)
            }
            _ => String::new(),
        };
        format!(" {} | {}{}", app.current_view.label(), paging, controls)
    };

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));

    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current view.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Navigation",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  ←/→ h/l     Switch views"),
        Line::from("  ↑/↓ j/k     Navigate incidents"),
        Line::from("  PgUp/PgDn   Jump 10 items"),
        Line::from("  Home/End    Jump to first/last"),
        Line::from("  Enter       Open analysis"),
        Line::from("  Esc         Go back"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Incidents",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  n         Next page"),
        Line::from("  p         Previous page"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " General",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  r         Refetch data"),
        Line::from("  q         Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 42u16.min(area.width.saturating_sub(4));
    let help_height = 22u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    // Clear the area behind the help
    frame.render_widget(ratatui::widgets::Clear, help_area);
    frame.render_widget(paragraph, help_area);
}

/// Format how long ago a timestamp was, relative to `now`.
///
/// Future-dated timestamps (clock skew) read as "just now".
pub fn format_age(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = now.signed_duration_since(then).num_seconds();
    if secs < 5 {
        "just now".to_string()
    } else if secs < 60 {
        format!("{}s ago", secs)
    } else if secs < 3600 {
        format!("{}m ago", secs / 60)
    } else if secs < 86_400 {
        format!("{}h ago", secs / 3600)
    } else {
        format!("{}d ago", secs / 86_400)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn test_format_age() {
        assert_eq!(format_age(at(0), at(2)), "just now");
        assert_eq!(format_age(at(0), at(45)), "45s ago");
        assert_eq!(format_age(at(0), at(120)), "2m ago");
        assert_eq!(format_age(at(0), at(7200)), "2h ago");
        assert_eq!(format_age(at(0), at(200_000)), "2d ago");
    }

    #[test]
    fn test_format_age_future_timestamp() {
        // Negative age from clock skew must not panic or render garbage
        assert_eq!(format_age(at(100), at(0)), "just now");
    }
}
