//! Incident aggregation for the overview dashboard.
//!
//! Pure reductions over one fetched page of incidents (typically the first
//! 100, a bounded working set rather than a global aggregate). No I/O.

use crate::api::{Incident, IncidentSeverity};

/// Number of services shown in the top-services chart.
pub const TOP_SERVICES: usize = 5;

/// Service names excluded from the frequency table.
const SERVICE_PLACEHOLDER: &str = "unknown";

/// Fixed display order of severity buckets, most severe first.
pub const SEVERITY_BUCKETS: [IncidentSeverity; 4] = [
    IncidentSeverity::Critical,
    IncidentSeverity::High,
    IncidentSeverity::Medium,
    IncidentSeverity::Low,
];

/// Incident counts per severity bucket, in [`SEVERITY_BUCKETS`] order.
///
/// Wire severities are matched case-insensitively against the known levels;
/// anything else is silently dropped from the histogram. That is the defined
/// tolerance policy for a display-only reduction, not an omission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeverityHistogram {
    counts: [u64; 4],
}

impl SeverityHistogram {
    /// Count of incidents in one bucket.
    pub fn count(&self, severity: IncidentSeverity) -> u64 {
        self.counts[Self::bucket_index(severity)]
    }

    /// Buckets with their counts, most severe first.
    pub fn buckets(&self) -> impl Iterator<Item = (IncidentSeverity, u64)> + '_ {
        SEVERITY_BUCKETS.iter().map(|&s| (s, self.count(s)))
    }

    /// Sum across all buckets (incidents with unknown severity excluded).
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Largest bucket count, used for scaling bars.
    pub fn max(&self) -> u64 {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    fn record(&mut self, severity: IncidentSeverity) {
        self.counts[Self::bucket_index(severity)] += 1;
    }

    fn bucket_index(severity: IncidentSeverity) -> usize {
        match severity {
            IncidentSeverity::Critical => 0,
            IncidentSeverity::High => 1,
            IncidentSeverity::Medium => 2,
            IncidentSeverity::Low => 3,
        }
    }
}

/// Occurrence counts per affected service, preserving first-seen order.
///
/// Insertion order is tracked so that ties in the top-N ranking resolve
/// deterministically to the service encountered first.
#[derive(Debug, Clone, Default)]
pub struct ServiceFrequency {
    entries: Vec<(String, u64)>,
}

impl ServiceFrequency {
    /// Record one occurrence of a service name.
    ///
    /// Empty names and the literal "unknown" placeholder are skipped; kept
    /// names are compared for exact, case-sensitive equality.
    pub fn record(&mut self, name: &str) {
        if name.is_empty() || name == SERVICE_PLACEHOLDER {
            return;
        }
        if let Some(entry) = self.entries.iter_mut().find(|(n, _)| n == name) {
            entry.1 += 1;
        } else {
            self.entries.push((name.to_string(), 1));
        }
    }

    /// Number of distinct services recorded.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The `n` most frequent services, descending by count.
    ///
    /// Ties keep first-seen order (stable sort over the insertion-ordered
    /// entries).
    pub fn top(&self, n: usize) -> Vec<(&str, u64)> {
        let mut ranked: Vec<(&str, u64)> =
            self.entries.iter().map(|(name, count)| (name.as_str(), *count)).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(n);
        ranked
    }
}

/// Aggregated view-model values for one page of incidents.
#[derive(Debug, Clone, Default)]
pub struct IncidentStats {
    /// Total incident count reported by the server (across all pages).
    pub total: u64,
    /// Severity histogram over the aggregated page.
    pub severity: SeverityHistogram,
    /// Per-service occurrence counts over the aggregated page.
    pub services: ServiceFrequency,
}

impl IncidentStats {
    /// Reduce a page of incidents into display aggregates.
    pub fn from_incidents(incidents: &[Incident], total: u64) -> Self {
        let mut severity = SeverityHistogram::default();
        let mut services = ServiceFrequency::default();

        for incident in incidents {
            if let Some(level) = incident.severity() {
                severity.record(level);
            }
            for service in &incident.affected_services {
                services.record(service);
            }
        }

        Self {
            total,
            severity,
            services,
        }
    }

    /// The top services for the chart, truncated to [`TOP_SERVICES`].
    pub fn top_services(&self) -> Vec<(&str, u64)> {
        self.services.top(TOP_SERVICES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn incident(severity: &str, services: &[&str]) -> Incident {
        let json = serde_json::json!({
            "id": "inc",
            "trace_id": "trace",
            "status": "open",
            "severity": severity,
            "detected_at": "2026-08-01T12:00:00Z",
            "affected_services": services,
            "error_count": 1
        });
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_histogram_counts_sum_to_known_severities() {
        let incidents = vec![
            incident("critical", &[]),
            incident("CRITICAL", &[]),
            incident("high", &[]),
            incident("medium", &[]),
            incident("low", &[]),
            incident("whimsical", &[]), // unknown, dropped from histogram
        ];

        let stats = IncidentStats::from_incidents(&incidents, incidents.len() as u64);
        assert_eq!(stats.severity.count(IncidentSeverity::Critical), 2);
        assert_eq!(stats.severity.count(IncidentSeverity::High), 1);
        assert_eq!(stats.severity.count(IncidentSeverity::Medium), 1);
        assert_eq!(stats.severity.count(IncidentSeverity::Low), 1);
        assert_eq!(stats.severity.total(), 5);
        // The unknown severity still counts toward the page total
        assert_eq!(stats.total, 6);
    }

    #[test]
    fn test_bucket_order_is_fixed() {
        let order: Vec<IncidentSeverity> =
            SeverityHistogram::default().buckets().map(|(s, _)| s).collect();
        assert_eq!(order, SEVERITY_BUCKETS);
    }

    #[test]
    fn test_service_frequency_filters_and_counts() {
        let incidents = vec![
            incident("low", &["a", "b"]),
            incident("low", &["a", "", "unknown"]),
        ];

        let stats = IncidentStats::from_incidents(&incidents, 2);
        assert_eq!(stats.services.len(), 2);

        let top = stats.top_services();
        assert_eq!(top, vec![("a", 2), ("b", 1)]);
    }

    #[test]
    fn test_service_filter_is_case_sensitive_once_filtered() {
        let mut freq = ServiceFrequency::default();
        freq.record("Payments");
        freq.record("payments");
        // "Unknown" is not the literal placeholder, so it is kept
        freq.record("Unknown");

        assert_eq!(freq.len(), 3);
    }

    #[test]
    fn test_top_n_tiebreak_is_first_seen_order() {
        let mut freq = ServiceFrequency::default();
        for name in ["gateway", "checkout", "payments", "checkout", "search", "auth", "ledger"] {
            freq.record(name);
        }

        // checkout=2, then five services tied at 1; the tie resolves in
        // first-seen order and truncates to five entries total
        let top = freq.top(5);
        assert_eq!(
            top,
            vec![
                ("checkout", 2),
                ("gateway", 1),
                ("payments", 1),
                ("search", 1),
                ("auth", 1),
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        let stats = IncidentStats::from_incidents(&[], 0);
        assert_eq!(stats.severity.total(), 0);
        assert_eq!(stats.severity.max(), 0);
        assert!(stats.top_services().is_empty());
    }
}
