//! Error types for Wireloft
//!
//! This module defines all error types used throughout the library.
//! WireError implements Serialize so callers can emit it as JSON.

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Failure at the transport boundary, tagged with the endpoint that was hit
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{endpoint}: {kind}")]
pub struct TransportError {
    /// Endpoint path and query that failed (e.g. "v4/getShowPage?slug=x")
    pub endpoint: String,
    /// What went wrong
    pub kind: TransportErrorKind,
}

impl TransportError {
    pub fn new(endpoint: impl Into<String>, kind: TransportErrorKind) -> Self {
        Self {
            endpoint: endpoint.into(),
            kind,
        }
    }
}

/// Cause of a transport failure
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// Connection, timeout or body read failure
    #[error("network error: {0}")]
    Network(String),

    /// Non-2xx response
    #[error("HTTP error {status}: {body}")]
    Status { status: u16, body: String },

    /// Server kept answering 429 after all retries
    #[error("rate limited - too many requests")]
    RateLimited,

    /// Body was not valid JSON
    #[error("failed to parse JSON response: {0}")]
    InvalidJson(String),

    /// Body parsed but was not a JSON object
    #[error("response is not a JSON object")]
    NotAnObject,
}

/// Error type for Wireloft operations
#[derive(Error, Debug)]
pub enum WireError {
    /// A single fetch failed
    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),

    /// No show-shaped object in the response
    #[error("Show not found: {0}")]
    ShowNotFound(String),

    /// No episode-shaped object in the response
    #[error("Episode not found: {0}")]
    EpisodeNotFound(String),

    /// The initial page of a crawl could not be fetched
    #[error("Discovery failed for show {show}: {source}")]
    Discovery {
        show: String,
        #[source]
        source: TransportError,
    },

    /// Blank show or episode identifier
    #[error("Invalid slug: {0}")]
    InvalidSlug(String),

    /// Client configuration cannot be used (e.g. a malformed access token)
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

/// Serialize WireError as its display string
impl Serialize for WireError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Result type alias for Wireloft operations
pub type Result<T> = std::result::Result<T, WireError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn status_error() -> TransportError {
        TransportError::new(
            "v4/getShowPage?slug=missing",
            TransportErrorKind::Status {
                status: 404,
                body: "not found".to_string(),
            },
        )
    }

    #[test]
    fn test_transport_error_display_includes_endpoint() {
        let error = status_error();
        assert_eq!(
            error.to_string(),
            "v4/getShowPage?slug=missing: HTTP error 404: not found"
        );
    }

    #[test]
    fn test_transport_error_display_not_an_object() {
        let error = TransportError::new("v4/getEpisode?slug=x", TransportErrorKind::NotAnObject);
        assert_eq!(
            error.to_string(),
            "v4/getEpisode?slug=x: response is not a JSON object"
        );
    }

    #[test]
    fn test_wire_error_display_show_not_found() {
        let error = WireError::ShowNotFound("what-we-saw".to_string());
        assert_eq!(error.to_string(), "Show not found: what-we-saw");
    }

    #[test]
    fn test_wire_error_discovery_keeps_source() {
        let error = WireError::Discovery {
            show: "missing".to_string(),
            source: status_error(),
        };
        assert!(error.to_string().starts_with("Discovery failed for show missing"));

        let source = std::error::Error::source(&error).unwrap();
        assert!(source.to_string().contains("HTTP error 404"));
    }

    #[test]
    fn test_wire_error_from_transport() {
        let error: WireError = status_error().into();
        assert!(matches!(error, WireError::Transport(_)));
    }

    #[test]
    fn test_wire_error_serialize() {
        let error = WireError::InvalidSlug("   ".to_string());
        let json = serde_json::to_string(&error).unwrap();
        assert_eq!(json, "\"Invalid slug:    \"");
    }
}
