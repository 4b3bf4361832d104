//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

use crate::api::IncidentSeverity;
use crate::data::Liveness;

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and active elements.
    pub highlight: Color,
    /// Color for critical severity.
    pub critical: Color,
    /// Color for high severity.
    pub high: Color,
    /// Color for medium severity.
    pub medium: Color,
    /// Color for low severity.
    pub low: Color,
    /// Color for the live-connection indicator.
    pub live: Color,
    /// Color for the standby indicator and dimmed chrome.
    pub standby: Color,
    /// Style for header rows in tables.
    pub header: Style,
    /// Style for selected/highlighted rows.
    pub selected: Style,
    /// Style for the active tab.
    pub tab_active: Style,
    /// Style for inactive tabs.
    pub tab_inactive: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            critical: Color::Red,
            high: Color::LightRed,
            medium: Color::Yellow,
            low: Color::Blue,
            live: Color::Green,
            standby: Color::DarkGray,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::Gray),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            critical: Color::Red,
            high: Color::LightRed,
            medium: Color::Yellow,
            low: Color::Blue,
            live: Color::Green,
            standby: Color::Gray,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::LightBlue).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::DarkGray),
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        // Use terminal-light crate to detect background luminance
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Get style for a severity level
    pub fn severity_style(&self, severity: Option<IncidentSeverity>) -> Style {
        match severity {
            Some(IncidentSeverity::Critical) => {
                Style::default().fg(self.critical).add_modifier(Modifier::BOLD)
            }
            Some(IncidentSeverity::High) => Style::default().fg(self.high),
            Some(IncidentSeverity::Medium) => Style::default().fg(self.medium),
            Some(IncidentSeverity::Low) => Style::default().fg(self.low),
            None => Style::default().add_modifier(Modifier::DIM),
        }
    }

    /// Get style for the liveness pill
    pub fn liveness_style(&self, liveness: Liveness) -> Style {
        match liveness {
            Liveness::Live => Style::default().fg(self.live).add_modifier(Modifier::BOLD),
            Liveness::Standby => Style::default().fg(self.standby),
        }
    }
}
