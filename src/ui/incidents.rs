//! Incident table rendering.
//!
//! Displays one page of incidents with status, severity, trace id, error
//! count, affected services and detection time.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::api::Incident;
use crate::app::App;

/// Render the Incidents view as a selectable table.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(format!(" Incidents — page {} ", app.page))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type);

    if app.incidents_loading && app.incidents.is_none() {
        let text = Span::styled(" Loading incidents...", Style::default().add_modifier(Modifier::DIM));
        frame.render_widget(Paragraph::new(text).block(block), area);
        return;
    }

    let incidents = app.page_incidents();
    if incidents.is_empty() {
        // Distinguishable all-clear state, not an error
        let text = Span::styled(
            " All systems operational — no active incidents.",
            Style::default().fg(app.theme.live),
        );
        frame.render_widget(Paragraph::new(text).block(block), area);
        return;
    }

    let header = Row::new(vec![
        Cell::from("Status"),
        Cell::from("Severity"),
        Cell::from("Trace"),
        Cell::from("Errors"),
        Cell::from("Services"),
        Cell::from("Detected"),
    ])
    .height(1)
    .style(app.theme.header);

    let rows: Vec<Row> = incidents.iter().map(|incident| incident_row(app, incident)).collect();

    let widths = [
        Constraint::Min(14),
        Constraint::Min(10),
        Constraint::Fill(1),
        Constraint::Min(7),
        Constraint::Fill(2),
        Constraint::Min(17),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(app.selected_index.min(incidents.len().saturating_sub(1))));

    frame.render_stateful_widget(table, area, &mut state);
}

fn incident_row<'a>(app: &App, incident: &'a Incident) -> Row<'a> {
    let status_label = incident
        .status()
        .map(|s| s.label().to_string())
        // Unknown statuses are shown raw rather than dropped
        .unwrap_or_else(|| incident.status.to_uppercase());

    let severity = incident.severity();
    let severity_label = severity
        .map(|s| s.label().to_string())
        .unwrap_or_else(|| incident.severity.to_uppercase());

    let trace = if incident.trace_id.chars().count() > 8 {
        let head: String = incident.trace_id.chars().take(8).collect();
        format!("{}…", head)
    } else {
        incident.trace_id.clone()
    };

    Row::new(vec![
        Cell::from(status_label),
        Cell::from(severity_label).style(app.theme.severity_style(severity)),
        Cell::from(trace),
        Cell::from(incident.error_count.to_string()),
        Cell::from(incident.affected_services.join(", ")),
        Cell::from(incident.detected_at.format("%Y-%m-%d %H:%M:%S").to_string()),
    ])
}
