//! Analysis view rendering.
//!
//! Shows the AI root-cause narrative, normalized confidence, evidence
//! signal ids and generation metadata for the selected incident. The three
//! remote states (loading, not yet generated, failed) each render
//! distinctly.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::api::AnalysisResult;
use crate::app::{AnalysisState, App};
use crate::data::normalize_confidence;

/// Render the Analysis view.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    match &app.analysis {
        AnalysisState::Idle => {
            render_message(
                frame,
                app,
                area,
                "Select an incident and press Enter to load its analysis.",
                Style::default().add_modifier(Modifier::DIM),
            );
        }
        AnalysisState::Loading => {
            render_message(
                frame,
                app,
                area,
                "Loading analysis...",
                Style::default().add_modifier(Modifier::DIM),
            );
        }
        AnalysisState::NotGenerated => {
            // Expected state, distinct from failure
            render_message(
                frame,
                app,
                area,
                "AI analysis has not yet been generated for this incident.",
                Style::default().fg(app.theme.medium),
            );
        }
        AnalysisState::Failed(err) => {
            render_message(
                frame,
                app,
                area,
                &format!("Failed to load analysis: {}", err),
                Style::default().fg(app.theme.critical),
            );
        }
        AnalysisState::Ready(analysis) => render_analysis(frame, app, analysis, area),
    }
}

fn render_message(frame: &mut Frame, app: &App, area: Rect, message: &str, style: Style) {
    let block = Block::default()
        .title(analysis_title(app))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type);

    let text = Line::from(Span::styled(format!(" {}", message), style));
    frame.render_widget(Paragraph::new(text).block(block).wrap(Wrap { trim: false }), area);
}

fn render_analysis(frame: &mut Frame, app: &App, analysis: &AnalysisResult, area: Rect) {
    let rows = Layout::vertical([Constraint::Min(6), Constraint::Length(10)]).split(area);

    render_root_cause(frame, app, analysis, rows[0]);

    let columns = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);
    render_evidence(frame, app, analysis, columns[0]);
    render_metadata(frame, app, analysis, columns[1]);
}

fn render_root_cause(frame: &mut Frame, app: &App, analysis: &AnalysisResult, area: Rect) {
    let confidence = normalize_confidence(analysis.confidence_score);

    let block = Block::default()
        .title(analysis_title(app))
        .title_top(
            Line::from(format!(" Confidence: {:.0}% ", confidence))
                .right_aligned()
                .style(Style::default().fg(app.theme.highlight)),
        )
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let mut lines: Vec<Line> = analysis.root_cause.lines().map(render_narrative_line).collect();

    if let Some(explanation) = analysis.explanation_text() {
        lines.push(Line::from(""));
        for line in explanation.lines() {
            lines.push(Line::from(Span::styled(
                line.to_string(),
                Style::default().add_modifier(Modifier::DIM),
            )));
        }
    }

    frame.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: false }), area);
}

/// Light markdown-ish treatment: headings and bullets get emphasis, the
/// rest renders as plain text.
fn render_narrative_line(line: &str) -> Line<'static> {
    let trimmed = line.trim_start();
    if trimmed.starts_with('#') {
        Line::from(Span::styled(
            trimmed.trim_start_matches('#').trim().to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ))
    } else if trimmed.starts_with("- ") || trimmed.starts_with("* ") {
        Line::from(format!(" • {}", &trimmed[2..]))
    } else {
        Line::from(line.to_string())
    }
}

fn render_evidence(frame: &mut Frame, app: &App, analysis: &AnalysisResult, area: Rect) {
    let block = Block::default()
        .title(" Evidence Signals ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type);

    let lines: Vec<Line> = if analysis.evidence_signals.is_empty() {
        vec![Line::from(Span::styled(
            " No specific signals cited.",
            Style::default().add_modifier(Modifier::DIM),
        ))]
    } else {
        analysis
            .evidence_signals
            .iter()
            .enumerate()
            .map(|(idx, id)| {
                Line::from(vec![
                    Span::styled(
                        format!(" {:>2} ", idx + 1),
                        Style::default().add_modifier(Modifier::DIM),
                    ),
                    Span::styled(id.clone(), Style::default().fg(app.theme.highlight)),
                ])
            })
            .collect()
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_metadata(frame: &mut Frame, app: &App, analysis: &AnalysisResult, area: Rect) {
    let block = Block::default()
        .title(" Metadata ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type);

    let lines = vec![
        Line::from(vec![
            Span::styled(" Analysis id  ", Style::default().add_modifier(Modifier::DIM)),
            Span::raw(analysis.id.clone()),
        ]),
        Line::from(vec![
            Span::styled(" Incident     ", Style::default().add_modifier(Modifier::DIM)),
            Span::raw(analysis.incident_id.clone()),
        ]),
        Line::from(vec![
            Span::styled(" Generated at ", Style::default().add_modifier(Modifier::DIM)),
            Span::raw(analysis.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string()),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn analysis_title(app: &App) -> String {
    match app.analysis_incident {
        Some(ref incident) => {
            let short: String = incident.id.chars().take(8).collect();
            format!(" Root Cause Analysis #{} ", short)
        }
        None => " Root Cause Analysis ".to_string(),
    }
}
