// Library crate: public API items may not be used by the binary
#![allow(unused)]

//! # sentinel-console
//!
//! An operator console and library for browsing production incidents and
//! their AI-generated root-cause analyses.
//!
//! The console talks to a sentinel query API over HTTP, keeps a background
//! watch on the live signal stream, and renders everything in an interactive
//! terminal UI.
//!
//! ## Architecture
//!
//! The crate is organized into five main modules:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        Application                           │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌──────────┐ │
//! │  │  app    │───▶│   data   │───▶│   ui    │───▶│ Terminal │ │
//! │  │ (state) │    │(reductions)   │(rendering)   │          │ │
//! │  └────┬────┘    └──────────┘    └─────────┘    └──────────┘ │
//! │       │                                                      │
//! │       ▼                                                      │
//! │  ┌─────────┐       ┌─────────┐                               │
//! │  │  poll   │──────▶│   api   │◀── HTTP query endpoints      │
//! │  │ (tasks) │       │ (client)│                               │
//! │  └─────────┘       └─────────┘                               │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`api`]**: Typed HTTP client for the query endpoints, wire types, and
//!   the [`ApiError`] taxonomy (network, not-found, malformed payload)
//! - **[`poll`]**: Background fetch tasks bridging the async client to the
//!   synchronous render loop, with last-request-wins sequencing and the
//!   periodic signal freshness monitor
//! - **[`data`]**: Pure reductions over fetched data: severity histograms,
//!   service frequency ranking, confidence normalization, and the liveness
//!   predicate
//! - **[`app`]**: Application state, view navigation, and user interaction
//! - **[`ui`]**: Terminal rendering using ratatui
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Point the console at a query API
//! sentinel-console --api-url http://localhost:8000
//!
//! # Or via the environment
//! SENTINEL_API_URL=http://sentinel.internal:8000 sentinel-console
//! ```
//!
//! ### As a library
//!
//! ```no_run
//! use sentinel_console::{QueryClient, page_offset};
//!
//! # fn main() -> Result<(), sentinel_console::ApiError> {
//! let client = QueryClient::builder()
//!     .base_url("http://localhost:8000")
//!     .build()?;
//!
//! // Page 3 at 50 per page starts at offset 100
//! assert_eq!(page_offset(3, 50), 100);
//! # Ok(())
//! # }
//! ```
//!
//! ### Pure reductions without a client
//!
//! ```
//! use chrono::{Duration, TimeZone, Utc};
//! use sentinel_console::data::{is_live, normalize_confidence, DEFAULT_STALE_AFTER};
//!
//! let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
//! let recent = now - Duration::seconds(30);
//! assert!(is_live(recent, now, DEFAULT_STALE_AFTER));
//!
//! assert_eq!(normalize_confidence(0.87), 87.0);
//! ```

pub mod api;
pub mod app;
pub mod data;
pub mod events;
pub mod poll;
pub mod ui;

// Re-export main types for convenience
pub use api::{
    page_offset, AnalysisResult, ApiError, Incident, IncidentSeverity, IncidentStatus, Paginated,
    QueryClient, Signal, SignalKind, SignalPayload,
};
pub use app::{AnalysisState, App, View};
pub use data::{IncidentStats, Liveness};
pub use poll::{Fetcher, FreshnessSample, SignalMonitor};
