//! Error types for the query client.

use thiserror::Error;

/// Errors surfaced by query operations.
///
/// `NotFound` is an expected, non-fatal condition (an analysis that has not
/// been generated yet) and must stay distinguishable from generic failure so
/// the view can render it as its own state.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure or non-2xx response.
    #[error("request failed: {0}")]
    Network(String),

    /// The server reported no analysis exists for this incident yet.
    #[error("no analysis generated for incident {0}")]
    NotFound(String),

    /// Response body does not match the expected data model.
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl ApiError {
    /// True for the expected "analysis not yet generated" condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Malformed(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_is_distinguishable() {
        let err = ApiError::NotFound("inc-1".to_string());
        assert!(err.is_not_found());
        assert!(!ApiError::Network("timeout".to_string()).is_not_found());
        assert!(!ApiError::Malformed("bad json".to_string()).is_not_found());
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            ApiError::NotFound("inc-1".to_string()).to_string(),
            "no analysis generated for incident inc-1"
        );
        assert_eq!(
            ApiError::Network("status 502".to_string()).to_string(),
            "request failed: status 502"
        );
    }
}
