//! Ingestion liveness derived from signal freshness.
//!
//! There is no push channel from the pipeline, so "is the system receiving
//! signals?" is answered by comparing the most recent signal's timestamp
//! against the wall clock. The comparison itself is a pure function of
//! `(last_timestamp, now)`; the poll that produces the timestamp lives in
//! [`crate::poll`].

use chrono::{DateTime, Duration, Utc};

/// Default staleness threshold: a live system must have produced a signal
/// within the last minute.
pub const DEFAULT_STALE_AFTER: Duration = Duration::milliseconds(60_000);

/// True when the last signal is fresh enough for the system to count as live.
///
/// `is_live(t, now)` holds iff `now - t < stale_after`; an age of exactly
/// `stale_after` is stale. A future-dated signal (`now < t`, clock skew)
/// yields a negative age, which is below any positive threshold, so the
/// system deliberately reads as live rather than flapping on skewed clocks.
pub fn is_live(last_signal: DateTime<Utc>, now: DateTime<Utc>, stale_after: Duration) -> bool {
    now.signed_duration_since(last_signal) < stale_after
}

/// Liveness derived from an optional last-signal timestamp.
///
/// No observed signal at all means the pipeline is not live.
pub fn liveness(
    last_signal: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    stale_after: Duration,
) -> Liveness {
    match last_signal {
        Some(ts) if is_live(ts, now, stale_after) => Liveness::Live,
        Some(_) => Liveness::Standby,
        None => Liveness::Standby,
    }
}

/// Derived liveness flag for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Liveness {
    /// A signal arrived within the staleness threshold.
    Live,
    /// No signal, or the latest one is stale.
    Standby,
}

impl Liveness {
    pub fn is_live(&self) -> bool {
        matches!(self, Liveness::Live)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Liveness::Live => "LIVE",
            Liveness::Standby => "STANDBY",
        }
    }
}
