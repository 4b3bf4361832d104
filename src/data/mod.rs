//! Pure view-model computations over fetched API data.
//!
//! Everything in this module is a side-effect-free function of its inputs:
//! no I/O, no clocks, no channels. The pollers in [`crate::poll`] feed these
//! reductions and the UI renders their outputs.
//!
//! ## Submodules
//!
//! - [`aggregate`]: severity histogram and top-N affected services
//! - [`confidence`]: scale heuristic for analysis confidence scores
//! - [`liveness`]: signal freshness predicate behind the LIVE/STANDBY pill
//!
//! These operate on already-fetched, read-only data, so they never fail:
//! unknown severities are dropped, missing fields fall back to zero counts,
//! and ambiguous confidence scales are resolved heuristically. Failing here
//! would degrade the whole view for a cosmetic defect.

pub mod aggregate;
pub mod confidence;
pub mod liveness;

pub use aggregate::{IncidentStats, ServiceFrequency, SeverityHistogram, SEVERITY_BUCKETS};
pub use confidence::normalize_confidence;
pub use liveness::{is_live, liveness, Liveness, DEFAULT_STALE_AFTER};
