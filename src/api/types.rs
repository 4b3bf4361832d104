//! Wire types for the ProdSentinel query API.
//!
//! These types match the JSON produced by the query service. Payloads are
//! weakly typed on the wire, so enum-like fields (`status`, `severity`) are
//! carried as strings and parsed on demand; the defined tolerance policies
//! for unknown values live in the consumers, not here.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Lifecycle status of an incident.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncidentStatus {
    Open,
    Investigating,
    Resolved,
    Closed,
}

impl IncidentStatus {
    /// Parse a wire status string, case-insensitively.
    ///
    /// Returns `None` for values outside the known set.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("open") {
            Some(IncidentStatus::Open)
        } else if s.eq_ignore_ascii_case("investigating") {
            Some(IncidentStatus::Investigating)
        } else if s.eq_ignore_ascii_case("resolved") {
            Some(IncidentStatus::Resolved)
        } else if s.eq_ignore_ascii_case("closed") {
            Some(IncidentStatus::Closed)
        } else {
            None
        }
    }

    /// Short label for display.
    pub fn label(&self) -> &'static str {
        match self {
            IncidentStatus::Open => "OPEN",
            IncidentStatus::Investigating => "INVESTIGATING",
            IncidentStatus::Resolved => "RESOLVED",
            IncidentStatus::Closed => "CLOSED",
        }
    }
}

/// Impact severity of an incident, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum IncidentSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl IncidentSeverity {
    /// Parse a wire severity string, case-insensitively.
    ///
    /// Returns `None` for values outside the known set.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("low") {
            Some(IncidentSeverity::Low)
        } else if s.eq_ignore_ascii_case("medium") {
            Some(IncidentSeverity::Medium)
        } else if s.eq_ignore_ascii_case("high") {
            Some(IncidentSeverity::High)
        } else if s.eq_ignore_ascii_case("critical") {
            Some(IncidentSeverity::Critical)
        } else {
            None
        }
    }

    /// Short label for display.
    pub fn label(&self) -> &'static str {
        match self {
            IncidentSeverity::Low => "LOW",
            IncidentSeverity::Medium => "MEDIUM",
            IncidentSeverity::High => "HIGH",
            IncidentSeverity::Critical => "CRITICAL",
        }
    }
}

/// A grouped production issue spanning one or more signals.
#[derive(Debug, Clone, Deserialize)]
pub struct Incident {
    pub id: String,
    pub trace_id: String,
    pub status: String,
    pub severity: String,
    pub detected_at: DateTime<Utc>,
    #[serde(default)]
    pub resolved_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub affected_services: Vec<String>,
    #[serde(default)]
    pub error_count: u64,
}

impl Incident {
    /// The parsed status, if the wire value is one of the known states.
    pub fn status(&self) -> Option<IncidentStatus> {
        IncidentStatus::parse(&self.status)
    }

    /// The parsed severity, if the wire value is one of the known levels.
    pub fn severity(&self) -> Option<IncidentSeverity> {
        IncidentSeverity::parse(&self.severity)
    }
}

/// Kind of observability signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalKind {
    Log,
    Trace,
    Metric,
}

impl SignalKind {
    pub fn label(&self) -> &'static str {
        match self {
            SignalKind::Log => "LOG",
            SignalKind::Trace => "TRACE",
            SignalKind::Metric => "METRIC",
        }
    }
}

/// Kind-specific signal payload.
///
/// The wire carries a `signal_type` discriminator next to a `payload` object
/// whose shape is determined solely by the kind, so this is modeled as an
/// adjacently tagged enum rather than an open-ended JSON value.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "signal_type", content = "payload", rename_all = "lowercase")]
pub enum SignalPayload {
    Log {
        message: String,
    },
    Metric {
        metric_name: String,
        value: f64,
        #[serde(default)]
        unit: Option<String>,
    },
    Trace {
        #[serde(default)]
        span_id: Option<String>,
    },
}

impl SignalPayload {
    pub fn kind(&self) -> SignalKind {
        match self {
            SignalPayload::Log { .. } => SignalKind::Log,
            SignalPayload::Metric { .. } => SignalKind::Metric,
            SignalPayload::Trace { .. } => SignalKind::Trace,
        }
    }

    /// One-line payload summary for the signal feed.
    pub fn summary(&self) -> String {
        match self {
            SignalPayload::Log { message } => message.clone(),
            SignalPayload::Metric {
                metric_name,
                value,
                unit,
            } => format!("{}: {}{}", metric_name, value, unit.as_deref().unwrap_or("")),
            SignalPayload::Trace { span_id } => {
                format!("Span: {}", span_id.as_deref().unwrap_or("unnamed"))
            }
        }
    }
}

/// A single observability event ingested by the pipeline.
#[derive(Debug, Clone, Deserialize)]
pub struct Signal {
    pub id: String,
    pub service_name: String,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub payload: SignalPayload,
}

impl Signal {
    pub fn kind(&self) -> SignalKind {
        self.payload.kind()
    }
}

/// AI-generated root-cause analysis for one incident.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisResult {
    pub id: String,
    pub incident_id: String,
    pub root_cause: String,
    pub confidence_score: f64,
    #[serde(default)]
    pub evidence_signals: Vec<String>,
    #[serde(default)]
    pub ai_explanation: Option<serde_json::Value>,
    pub generated_at: DateTime<Utc>,
}

impl AnalysisResult {
    /// The free-form explanation rendered as text.
    ///
    /// Strings pass through untouched; structured data is pretty-printed.
    pub fn explanation_text(&self) -> Option<String> {
        match self.ai_explanation.as_ref()? {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(serde_json::to_string_pretty(other).unwrap_or_default()),
        }
    }
}

/// One page of a paginated query result.
///
/// `items` keeps the page-local order returned by the server. The
/// `offset + items.len() <= total` relationship is expected but not verified
/// here; a short page with a mismatched total is accepted as-is.
#[derive(Debug, Clone, Deserialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub limit: u64,
    pub offset: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_incident_page() {
        let json = r#"{
            "items": [
                {
                    "id": "inc-1",
                    "trace_id": "trace-abc",
                    "status": "open",
                    "severity": "critical",
                    "detected_at": "2026-08-01T12:00:00Z",
                    "affected_services": ["payments", "checkout"],
                    "error_count": 42
                }
            ],
            "total": 120,
            "limit": 50,
            "offset": 50
        }"#;

        let page: Paginated<Incident> = serde_json::from_str(json).unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total, 120);
        assert_eq!(page.offset, 50);

        let incident = &page.items[0];
        assert_eq!(incident.status(), Some(IncidentStatus::Open));
        assert_eq!(incident.severity(), Some(IncidentSeverity::Critical));
        assert!(incident.resolved_at.is_none());
        assert_eq!(incident.error_count, 42);
    }

    #[test]
    fn test_short_page_with_larger_total_is_accepted() {
        // 3 items against total=120 regardless of the offset/total relationship
        let json = r#"{
            "items": [
                {"id": "a", "trace_id": "t", "status": "resolved", "severity": "low",
                 "detected_at": "2026-08-01T12:00:00Z"},
                {"id": "b", "trace_id": "t", "status": "closed", "severity": "medium",
                 "detected_at": "2026-08-01T12:01:00Z"},
                {"id": "c", "trace_id": "t", "status": "open", "severity": "high",
                 "detected_at": "2026-08-01T12:02:00Z"}
            ],
            "total": 120,
            "limit": 50,
            "offset": 50
        }"#;

        let page: Paginated<Incident> = serde_json::from_str(json).unwrap();
        assert_eq!(page.items.len(), 3);
        assert_eq!(page.total, 120);
    }

    #[test]
    fn test_severity_parse_case_insensitive() {
        assert_eq!(
            IncidentSeverity::parse("CRITICAL"),
            Some(IncidentSeverity::Critical)
        );
        assert_eq!(IncidentSeverity::parse("High"), Some(IncidentSeverity::High));
        assert_eq!(IncidentSeverity::parse("medium"), Some(IncidentSeverity::Medium));
        assert_eq!(IncidentSeverity::parse("catastrophic"), None);
        assert_eq!(IncidentSeverity::parse(""), None);
    }

    #[test]
    fn test_severity_ordering() {
        assert!(IncidentSeverity::Critical > IncidentSeverity::High);
        assert!(IncidentSeverity::High > IncidentSeverity::Medium);
        assert!(IncidentSeverity::Medium > IncidentSeverity::Low);
    }

    #[test]
    fn test_deserialize_log_signal() {
        let json = r#"{
            "id": "sig-1",
            "signal_type": "log",
            "service_name": "payments",
            "timestamp": "2026-08-01T12:00:00Z",
            "payload": {"message": "connection refused"}
        }"#;

        let signal: Signal = serde_json::from_str(json).unwrap();
        assert_eq!(signal.kind(), SignalKind::Log);
        assert_eq!(signal.payload.summary(), "connection refused");
    }

    #[test]
    fn test_deserialize_metric_signal_without_unit() {
        let json = r#"{
            "id": "sig-2",
            "signal_type": "metric",
            "service_name": "checkout",
            "timestamp": "2026-08-01T12:00:00Z",
            "payload": {"metric_name": "cpu_usage", "value": 93.5}
        }"#;

        let signal: Signal = serde_json::from_str(json).unwrap();
        assert_eq!(signal.kind(), SignalKind::Metric);
        assert_eq!(signal.payload.summary(), "cpu_usage: 93.5");
    }

    #[test]
    fn test_deserialize_trace_signal() {
        let json = r#"{
            "id": "sig-3",
            "signal_type": "trace",
            "service_name": "gateway",
            "timestamp": "2026-08-01T12:00:00Z",
            "payload": {"span_id": "span-77"}
        }"#;

        let signal: Signal = serde_json::from_str(json).unwrap();
        assert_eq!(signal.kind(), SignalKind::Trace);
        assert_eq!(signal.payload.summary(), "Span: span-77");

        // Missing span id renders as unnamed
        let json = r#"{
            "id": "sig-4",
            "signal_type": "trace",
            "service_name": "gateway",
            "timestamp": "2026-08-01T12:00:00Z",
            "payload": {}
        }"#;
        let signal: Signal = serde_json::from_str(json).unwrap();
        assert_eq!(signal.payload.summary(), "Span: unnamed");
    }

    #[test]
    fn test_analysis_explanation_text() {
        let json = r###"{
            "id": "an-1",
            "incident_id": "inc-1",
            "root_cause": "## Root cause\nPool exhaustion",
            "confidence_score": 0.87,
            "evidence_signals": ["sig-1", "sig-2"],
            "ai_explanation": "verbatim text",
            "generated_at": "2026-08-01T12:05:00Z"
        }"###;

        let analysis: AnalysisResult = serde_json::from_str(json).unwrap();
        assert_eq!(analysis.explanation_text().as_deref(), Some("verbatim text"));

        let json = r#"{
            "id": "an-2",
            "incident_id": "inc-1",
            "root_cause": "x",
            "confidence_score": 87,
            "generated_at": "2026-08-01T12:05:00Z",
            "ai_explanation": {"steps": [1, 2]}
        }"#;

        let analysis: AnalysisResult = serde_json::from_str(json).unwrap();
        let text = analysis.explanation_text().unwrap();
        assert!(text.contains("steps"));
        assert!(analysis.evidence_signals.is_empty());
    }
}
