//! Application state and navigation logic.

use chrono::Utc;

use crate::api::{Incident, Paginated, Signal};
use crate::data::{liveness, IncidentStats, Liveness};
use crate::poll::{Fetched, Fetcher, FreshnessSample, SignalMonitor};
use crate::ui::Theme;

/// The current view/tab in the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Aggregated dashboard: liveness, severity histogram, top services.
    Overview,
    /// Paginated incident table.
    Incidents,
    /// Root-cause analysis for the selected incident.
    Analysis,
}

impl View {
    /// Cycle to the next view.
    pub fn next(self) -> Self {
        match self {
            View::Overview => View::Incidents,
            View::Incidents => View::Analysis,
            View::Analysis => View::Overview,
        }
    }

    /// Cycle to the previous view.
    pub fn prev(self) -> Self {
        match self {
            View::Overview => View::Analysis,
            View::Incidents => View::Overview,
            View::Analysis => View::Incidents,
        }
    }

    /// Returns the display label for this view.
    pub fn label(&self) -> &'static str {
        match self {
            View::Overview => "Overview",
            View::Incidents => "Incidents",
            View::Analysis => "Analysis",
        }
    }
}

/// Display state of the analysis view.
///
/// Loading, "not yet generated" and generic failure are deliberately
/// separate variants; the view must never conflate them.
#[derive(Debug)]
pub enum AnalysisState {
    /// No incident opened yet.
    Idle,
    /// Request in flight.
    Loading,
    /// Analysis fetched.
    Ready(Box<crate::api::AnalysisResult>),
    /// The server has not generated an analysis for this incident yet.
    NotGenerated,
    /// Generic fetch failure.
    Failed(String),
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub current_view: View,
    pub show_help: bool,
    pub theme: Theme,

    // Remote data plumbing
    fetcher: Fetcher,
    monitor: SignalMonitor,
    pub page_size: u64,
    pub stale_after: chrono::Duration,

    // Overview
    pub stats: Option<IncidentStats>,
    pub stats_error: Option<String>,
    pub recent_signals: Vec<Signal>,
    pub freshness: Option<FreshnessSample>,

    // Incident table
    pub page: u64,
    pub incidents: Option<Paginated<Incident>>,
    pub incidents_loading: bool,
    pub incidents_error: Option<String>,
    pub selected_index: usize,

    // Analysis
    pub analysis: AnalysisState,
    pub analysis_incident: Option<Incident>,

    // Status message (temporary feedback)
    pub status_message: Option<(String, std::time::Instant)>,
}

impl App {
    /// Create a new App over the given fetcher and freshness monitor.
    pub fn new(
        fetcher: Fetcher,
        monitor: SignalMonitor,
        page_size: u64,
        stale_after: chrono::Duration,
    ) -> Self {
        Self {
            running: true,
            current_view: View::Overview,
            show_help: false,
            theme: Theme::auto_detect(),
            fetcher,
            monitor,
            page_size,
            stale_after,
            stats: None,
            stats_error: None,
            recent_signals: Vec::new(),
            freshness: None,
            page: 1,
            incidents: None,
            incidents_loading: false,
            incidents_error: None,
            selected_index: 0,
            analysis: AnalysisState::Idle,
            analysis_incident: None,
            status_message: None,
        }
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, std::time::Instant::now()));
    }

    /// Get the current status message if it hasn't expired (3 seconds).
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < std::time::Duration::from_secs(3) {
                return Some(msg);
            }
        }
        None
    }

    /// Issue fresh queries for everything the views display.
    pub fn refresh(&mut self) {
        self.fetcher.request_overview();
        self.fetcher.request_signal_feed();
        self.request_page(self.page);
    }

    fn request_page(&mut self, page: u64) {
        self.page = page;
        self.incidents_loading = true;
        self.fetcher.request_incidents(page, self.page_size);
    }

    /// Drain completed queries and the freshness monitor.
    ///
    /// Called once per frame from the event loop.
    pub fn pump(&mut self) {
        self.freshness = self.monitor.sample();
        for fetched in self.fetcher.poll() {
            self.apply(fetched);
        }
    }

    fn apply(&mut self, fetched: Fetched) {
        match fetched {
            Fetched::IncidentPage { page, result } => {
                self.incidents_loading = false;
                match result {
                    Ok(data) => {
                        self.page = page;
                        self.incidents = Some(data);
                        self.incidents_error = None;
                        self.clamp_selection();
                    }
                    Err(e) => {
                        self.incidents_error = Some(e.to_string());
                    }
                }
            }
            Fetched::OverviewPage { result } => match result {
                Ok(data) => {
                    self.stats = Some(IncidentStats::from_incidents(&data.items, data.total));
                    self.stats_error = None;
                }
                Err(e) => {
                    self.stats_error = Some(e.to_string());
                }
            },
            Fetched::SignalFeed { result } => {
                // A failed feed refresh keeps the previous signals on screen
                if let Ok(signals) = result {
                    self.recent_signals = signals;
                }
            }
            Fetched::Analysis {
                incident_id,
                result,
            } => {
                // Ignore a completion for an incident we navigated away from
                let current = self.analysis_incident.as_ref().map(|i| i.id.as_str());
                if current != Some(incident_id.as_str()) {
                    return;
                }
                self.analysis = match result {
                    Ok(analysis) => AnalysisState::Ready(Box::new(analysis)),
                    Err(e) if e.is_not_found() => AnalysisState::NotGenerated,
                    Err(e) => AnalysisState::Failed(e.to_string()),
                };
            }
        }
    }

    /// Current liveness, derived from the freshest sample and the wall clock.
    pub fn liveness(&self) -> Liveness {
        let last = self
            .freshness
            .as_ref()
            .and_then(|s| s.signal.as_ref())
            .map(|s| s.timestamp);
        liveness(last, Utc::now(), self.stale_after)
    }

    /// Incidents on the current page.
    pub fn page_incidents(&self) -> &[Incident] {
        self.incidents.as_ref().map(|p| p.items.as_slice()).unwrap_or(&[])
    }

    /// The incident under the cursor, if any.
    pub fn selected_incident(&self) -> Option<&Incident> {
        self.page_incidents().get(self.selected_index)
    }

    fn clamp_selection(&mut self) {
        let len = self.page_incidents().len();
        if self.selected_index >= len {
            self.selected_index = len.saturating_sub(1);
        }
    }

    /// Whether a later page exists according to the server-reported total.
    pub fn has_next_page(&self) -> bool {
        match &self.incidents {
            Some(p) => p.offset + (p.items.len() as u64) < p.total,
            None => false,
        }
    }

    /// Fetch the next incident page.
    pub fn next_page(&mut self) {
        if self.has_next_page() {
            self.selected_index = 0;
            self.request_page(self.page + 1);
        }
    }

    /// Fetch the previous incident page.
    pub fn prev_page(&mut self) {
        if self.page > 1 {
            self.selected_index = 0;
            self.request_page(self.page - 1);
        }
    }

    /// Open the analysis view for the incident under the cursor.
    pub fn open_analysis(&mut self) {
        let Some(incident) = self.selected_incident().cloned() else {
            return;
        };
        self.analysis = AnalysisState::Loading;
        self.analysis_incident = Some(incident.clone());
        self.fetcher.request_analysis(incident.id);
        self.current_view = View::Analysis;
    }

    /// Move selection down by one incident.
    pub fn select_next(&mut self) {
        self.select_next_n(1);
    }

    /// Move selection up by one incident.
    pub fn select_prev(&mut self) {
        self.select_prev_n(1);
    }

    /// Move selection down by n incidents.
    pub fn select_next_n(&mut self, n: usize) {
        let max = self.page_incidents().len().saturating_sub(1);
        self.selected_index = (self.selected_index + n).min(max);
    }

    /// Move selection up by n incidents.
    pub fn select_prev_n(&mut self, n: usize) {
        self.selected_index = self.selected_index.saturating_sub(n);
    }

    /// Jump to the first incident on the page.
    pub fn select_first(&mut self) {
        self.selected_index = 0;
    }

    /// Jump to the last incident on the page.
    pub fn select_last(&mut self) {
        self.selected_index = self.page_incidents().len().saturating_sub(1);
    }

    /// Switch to the next view.
    pub fn next_view(&mut self) {
        self.current_view = self.current_view.next();
    }

    /// Switch to the previous view.
    pub fn prev_view(&mut self) {
        self.current_view = self.current_view.prev();
    }

    /// Switch to a specific view.
    pub fn set_view(&mut self, view: View) {
        self.current_view = view;
    }

    /// Navigate back: close help first, then Analysis falls back to the
    /// incident table, everything else to the overview.
    pub fn go_back(&mut self) {
        if self.show_help {
            self.show_help = false;
            return;
        }
        match self.current_view {
            View::Analysis => self.current_view = View::Incidents,
            View::Incidents => self.current_view = View::Overview,
            View::Overview => {}
        }
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
        self.monitor.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, QueryClient};
    use std::time::Duration;

    fn test_app() -> App {
        let client = QueryClient::builder().base_url("http://127.0.0.1:1").build().unwrap();
        let fetcher = Fetcher::new(client.clone());
        let monitor = SignalMonitor::spawn(client, Duration::from_secs(3600));
        App::new(fetcher, monitor, 50, crate::data::DEFAULT_STALE_AFTER)
    }

    fn incident(id: &str) -> Incident {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "trace_id": "trace",
            "status": "open",
            "severity": "high",
            "detected_at": "2026-08-01T12:00:00Z",
            "affected_services": ["payments"],
            "error_count": 3
        }))
        .unwrap()
    }

    fn page(items: Vec<Incident>, total: u64, offset: u64) -> Paginated<Incident> {
        Paginated {
            items,
            total,
            limit: 50,
            offset,
        }
    }

    #[tokio::test]
    async fn test_incident_page_applied_and_selection_clamped() {
        let mut app = test_app();
        app.selected_index = 10;

        app.apply(Fetched::IncidentPage {
            page: 1,
            result: Ok(page(vec![incident("a"), incident("b")], 2, 0)),
        });

        assert_eq!(app.page_incidents().len(), 2);
        assert_eq!(app.selected_index, 1);
        assert!(app.incidents_error.is_none());
        assert!(!app.has_next_page());
    }

    #[tokio::test]
    async fn test_short_page_with_larger_total_enables_next_page() {
        let mut app = test_app();
        app.apply(Fetched::IncidentPage {
            page: 2,
            result: Ok(page(vec![incident("a"), incident("b"), incident("c")], 120, 50)),
        });

        assert!(app.has_next_page());
        assert_eq!(app.page, 2);
    }

    #[tokio::test]
    async fn test_failed_page_keeps_previous_data() {
        let mut app = test_app();
        app.apply(Fetched::IncidentPage {
            page: 1,
            result: Ok(page(vec![incident("a")], 1, 0)),
        });
        app.apply(Fetched::IncidentPage {
            page: 2,
            result: Err(ApiError::Network("status 502".to_string())),
        });

        assert_eq!(app.page_incidents().len(), 1);
        assert!(app.incidents_error.is_some());
    }

    #[tokio::test]
    async fn test_prev_page_stops_at_first() {
        let mut app = test_app();
        assert_eq!(app.page, 1);
        app.prev_page();
        assert_eq!(app.page, 1);
    }

    #[tokio::test]
    async fn test_analysis_not_found_is_not_a_failure() {
        let mut app = test_app();
        app.analysis_incident = Some(incident("inc-1"));
        app.analysis = AnalysisState::Loading;

        app.apply(Fetched::Analysis {
            incident_id: "inc-1".to_string(),
            result: Err(ApiError::NotFound("inc-1".to_string())),
        });
        assert!(matches!(app.analysis, AnalysisState::NotGenerated));

        app.apply(Fetched::Analysis {
            incident_id: "inc-1".to_string(),
            result: Err(ApiError::Network("status 502".to_string())),
        });
        assert!(matches!(app.analysis, AnalysisState::Failed(_)));
    }

    #[tokio::test]
    async fn test_analysis_for_other_incident_is_ignored() {
        let mut app = test_app();
        app.analysis_incident = Some(incident("inc-2"));
        app.analysis = AnalysisState::Loading;

        app.apply(Fetched::Analysis {
            incident_id: "inc-1".to_string(),
            result: Err(ApiError::Network("late".to_string())),
        });
        assert!(matches!(app.analysis, AnalysisState::Loading));
    }

    #[tokio::test]
    async fn test_failed_feed_refresh_keeps_previous_signals() {
        let mut app = test_app();
        let signal: Signal = serde_json::from_value(serde_json::json!({
            "id": "sig-1",
            "signal_type": "log",
            "service_name": "payments",
            "timestamp": "2026-08-01T12:00:00Z",
            "payload": {"message": "boom"}
        }))
        .unwrap();

        app.apply(Fetched::SignalFeed {
            result: Ok(vec![signal]),
        });
        assert_eq!(app.recent_signals.len(), 1);

        app.apply(Fetched::SignalFeed {
            result: Err(ApiError::Network("down".to_string())),
        });
        assert_eq!(app.recent_signals.len(), 1);
    }

    #[tokio::test]
    async fn test_go_back_order() {
        let mut app = test_app();
        app.set_view(View::Analysis);
        app.go_back();
        assert_eq!(app.current_view, View::Incidents);
        app.go_back();
        assert_eq!(app.current_view, View::Overview);
        app.go_back();
        assert_eq!(app.current_view, View::Overview);
    }
}
