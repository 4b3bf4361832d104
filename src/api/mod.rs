//! Query API client layer.
//!
//! Typed, read-only access to the ProdSentinel query service. This layer
//! issues single requests and propagates every failure unmodified; display
//! fallbacks and tolerance policies live in [`crate::data`].

mod client;
mod error;
mod types;

pub use client::{page_offset, QueryClient, QueryClientBuilder};
pub use error::ApiError;
pub use types::{
    AnalysisResult, Incident, IncidentSeverity, IncidentStatus, Paginated, Signal, SignalKind,
    SignalPayload,
};
