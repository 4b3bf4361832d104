//! Background polling against the query API.
//!
//! The TUI loop is synchronous, so all remote calls run as spawned tokio
//! tasks that publish completions through channels; the loop drains them
//! non-blockingly each frame.
//!
//! Two shapes of polling exist, matching how the data is consumed:
//!
//! - [`SignalMonitor`]: a time-based loop that refetches the single most
//!   recent signal on a fixed cadence and feeds the liveness pill.
//! - [`Fetcher`]: navigation-triggered queries (incident pages, the overview
//!   window, the signal feed, analyses) issued on demand.
//!
//! Both tag every request with a monotonically increasing sequence number
//! and discard completions that arrive after a newer request for the same
//! query key has already been published, so a slow response can never
//! overwrite a fresher one.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use crate::api::{AnalysisResult, ApiError, Incident, Paginated, QueryClient, Signal};

/// Page size of the bounded working set aggregated for the overview.
pub const OVERVIEW_WINDOW: u64 = 100;

/// Number of signals shown in the overview feed.
pub const SIGNAL_FEED_LIMIT: u64 = 10;

/// Sequence gate enforcing last-request-wins for one query key.
///
/// A completion may only be published if its sequence number is newer than
/// the last one published for the same key.
#[derive(Debug, Default)]
pub struct LatestWins {
    published: Option<u64>,
}

impl LatestWins {
    /// Accept a completion, returning false if a newer one already won.
    pub fn accept(&mut self, seq: u64) -> bool {
        match self.published {
            Some(last) if seq <= last => false,
            _ => {
                self.published = Some(seq);
                true
            }
        }
    }
}

/// One observation from the freshness poll.
#[derive(Debug, Clone)]
pub struct FreshnessSample {
    /// The most recent signal, if the pipeline has produced any.
    pub signal: Option<Signal>,
    /// When this observation was made (the "now" injected into liveness).
    pub observed_at: DateTime<Utc>,
    /// Poll failure, if the observation could not be refreshed.
    pub error: Option<String>,
}

/// Polls the latest-signal endpoint on a fixed cadence.
///
/// Publishes [`FreshnessSample`]s into a watch channel; the UI reads the
/// newest sample without blocking. The liveness decision itself is the pure
/// predicate in [`crate::data::liveness`].
#[derive(Debug)]
pub struct SignalMonitor {
    rx: watch::Receiver<Option<FreshnessSample>>,
    handle: JoinHandle<()>,
}

impl SignalMonitor {
    /// Spawn the polling task. Must be called within a tokio runtime.
    pub fn spawn(client: QueryClient, interval: Duration) -> Self {
        let (tx, rx) = watch::channel(None);
        let handle = tokio::spawn(run_monitor(client, interval, tx));
        Self { rx, handle }
    }

    /// The most recent sample, if a poll has completed yet.
    pub fn sample(&self) -> Option<FreshnessSample> {
        self.rx.borrow().clone()
    }

    /// Stop the polling task.
    pub fn abort(&self) {
        self.handle.abort();
    }
}

async fn run_monitor(
    client: QueryClient,
    interval: Duration,
    tx: watch::Sender<Option<FreshnessSample>>,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let (done_tx, mut done_rx) = mpsc::unbounded_channel();
    let mut seq: u64 = 0;
    let mut gate = LatestWins::default();

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                seq += 1;
                let client = client.clone();
                let done = done_tx.clone();
                let this_seq = seq;
                tokio::spawn(async move {
                    let result = client.latest_signal().await;
                    let _ = done.send((this_seq, result));
                });
            }
            Some((done_seq, result)) = done_rx.recv() => {
                if !gate.accept(done_seq) {
                    debug!(seq = done_seq, "discarding stale freshness result");
                    continue;
                }
                let sample = match result {
                    Ok(signal) => FreshnessSample {
                        signal,
                        observed_at: Utc::now(),
                        error: None,
                    },
                    Err(e) => {
                        warn!(error = %e, "freshness poll failed");
                        // Keep the previous signal so a transient failure
                        // does not blank the last-seen timestamp
                        let previous = tx.borrow().as_ref().and_then(|s| s.signal.clone());
                        FreshnessSample {
                            signal: previous,
                            observed_at: Utc::now(),
                            error: Some(e.to_string()),
                        }
                    }
                };
                if tx.send(Some(sample)).is_err() {
                    break;
                }
            }
        }
    }
}

/// A completed navigation-triggered query.
#[derive(Debug)]
pub enum Fetched {
    /// One page of the incident table.
    IncidentPage {
        page: u64,
        result: Result<Paginated<Incident>, ApiError>,
    },
    /// The first [`OVERVIEW_WINDOW`] incidents, for aggregation.
    OverviewPage {
        result: Result<Paginated<Incident>, ApiError>,
    },
    /// The recent-signal feed.
    SignalFeed {
        result: Result<Vec<Signal>, ApiError>,
    },
    /// The analysis for one incident.
    Analysis {
        incident_id: String,
        result: Result<AnalysisResult, ApiError>,
    },
}

/// Issues on-demand queries and collects their completions.
///
/// Each query key (incident page, overview window, signal feed, analysis)
/// has its own [`LatestWins`] gate; requesting again before the previous
/// completion arrives supersedes it.
#[derive(Debug)]
pub struct Fetcher {
    client: QueryClient,
    tx: mpsc::UnboundedSender<(u64, Fetched)>,
    rx: mpsc::UnboundedReceiver<(u64, Fetched)>,
    next_seq: u64,
    incidents_gate: LatestWins,
    overview_gate: LatestWins,
    signals_gate: LatestWins,
    analysis_gate: LatestWins,
}

impl Fetcher {
    pub fn new(client: QueryClient) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            client,
            tx,
            rx,
            next_seq: 0,
            incidents_gate: LatestWins::default(),
            overview_gate: LatestWins::default(),
            signals_gate: LatestWins::default(),
            analysis_gate: LatestWins::default(),
        }
    }

    fn next_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    /// Request one page of incidents (1-based page number).
    pub fn request_incidents(&mut self, page: u64, page_size: u64) {
        let seq = self.next_seq();
        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = client.fetch_incidents(page, page_size).await;
            let _ = tx.send((seq, Fetched::IncidentPage { page, result }));
        });
    }

    /// Request the overview aggregation window.
    pub fn request_overview(&mut self) {
        let seq = self.next_seq();
        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = client.fetch_incidents(1, OVERVIEW_WINDOW).await;
            let _ = tx.send((seq, Fetched::OverviewPage { result }));
        });
    }

    /// Request the recent-signal feed.
    pub fn request_signal_feed(&mut self) {
        let seq = self.next_seq();
        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = client.fetch_signals(SIGNAL_FEED_LIMIT).await.map(|page| page.items);
            let _ = tx.send((seq, Fetched::SignalFeed { result }));
        });
    }

    /// Request the analysis for an incident.
    pub fn request_analysis(&mut self, incident_id: String) {
        let seq = self.next_seq();
        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = client.fetch_analysis(&incident_id).await;
            let _ = tx.send((seq, Fetched::Analysis { incident_id, result }));
        });
    }

    /// Drain completed queries without blocking.
    ///
    /// Completions superseded by a newer request for the same key are
    /// silently dropped here.
    pub fn poll(&mut self) -> Vec<Fetched> {
        let mut out = Vec::new();
        while let Ok((seq, fetched)) = self.rx.try_recv() {
            let gate = match &fetched {
                Fetched::IncidentPage { .. } => &mut self.incidents_gate,
                Fetched::OverviewPage { .. } => &mut self.overview_gate,
                Fetched::SignalFeed { .. } => &mut self.signals_gate,
                Fetched::Analysis { .. } => &mut self.analysis_gate,
            };
            if gate.accept(seq) {
                out.push(fetched);
            } else {
                debug!(seq, "discarding superseded fetch result");
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> QueryClient {
        QueryClient::builder().base_url("http://127.0.0.1:1").build().unwrap()
    }

    fn incident_page(page: u64, offset: u64) -> Fetched {
        Fetched::IncidentPage {
            page,
            result: Ok(Paginated {
                items: vec![],
                total: 0,
                limit: 50,
                offset,
            }),
        }
    }

    #[test]
    fn test_latest_wins_rejects_stale() {
        let mut gate = LatestWins::default();
        assert!(gate.accept(1));
        assert!(gate.accept(3));
        // An older in-flight request completing late is rejected
        assert!(!gate.accept(2));
        assert!(!gate.accept(3));
        assert!(gate.accept(4));
    }

    #[test]
    fn test_fetcher_drops_superseded_completion() {
        let mut fetcher = Fetcher::new(test_client());

        // A newer request's result arrives first, then the older one
        fetcher.tx.send((5, incident_page(2, 50))).unwrap();
        fetcher.tx.send((3, incident_page(1, 0))).unwrap();

        let results = fetcher.poll();
        assert_eq!(results.len(), 1);
        match &results[0] {
            Fetched::IncidentPage { page, .. } => assert_eq!(*page, 2),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_fetcher_gates_are_per_query_key() {
        let mut fetcher = Fetcher::new(test_client());

        fetcher.tx.send((5, incident_page(2, 50))).unwrap();
        // Older sequence but a different key, so it is not superseded
        fetcher
            .tx
            .send((
                2,
                Fetched::SignalFeed {
                    result: Ok(vec![]),
                },
            ))
            .unwrap();

        let results = fetcher.poll();
        assert_eq!(results.len(), 2);
    }

    #[tokio::test]
    async fn test_fetcher_requests_complete_with_errors_offline() {
        let mut fetcher = Fetcher::new(test_client());
        fetcher.request_incidents(2, 50);

        // The connection to the unroutable endpoint fails quickly; wait for
        // the spawned task to deliver its completion
        let mut results = Vec::new();
        for _ in 0..50 {
            results = fetcher.poll();
            if !results.is_empty() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }

        assert_eq!(results.len(), 1);
        match &results[0] {
            Fetched::IncidentPage { page, result } => {
                assert_eq!(*page, 2);
                assert!(result.is_err());
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_signal_monitor_publishes_error_sample() {
        let monitor = SignalMonitor::spawn(test_client(), Duration::from_millis(10));

        let mut sample = None;
        for _ in 0..50 {
            sample = monitor.sample();
            if sample.is_some() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        monitor.abort();

        let sample = sample.expect("monitor should publish a sample");
        assert!(sample.signal.is_none());
        assert!(sample.error.is_some());
    }
}
