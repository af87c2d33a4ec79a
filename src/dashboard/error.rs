//! Dashboard error types
//!
//! Errors raised by the host seams. The controller never propagates them:
//! each one is logged and aborts only the unit of work that hit it.

use thiserror::Error;

/// Errors that can occur while fetching a JSON resource
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Server answered with a non-success status
    #[error("GET {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// Request never completed (connection refused, DNS, CORS, ...)
    #[error("GET {url} failed: {message}")]
    Transport { url: String, message: String },

    /// Body was not valid JSON
    #[error("GET {url} returned an unreadable body: {message}")]
    Decode { url: String, message: String },
}

impl FetchError {
    /// URL of the request that failed
    pub fn url(&self) -> &str {
        match self {
            FetchError::Status { url, .. }
            | FetchError::Transport { url, .. }
            | FetchError::Decode { url, .. } => url,
        }
    }

    /// HTTP status, when the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Errors that can occur while binding a chart to its target
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MountError {
    /// Target exists but cannot host a chart
    #[error("Element '{0}' is not a canvas")]
    NotACanvas(String),

    /// Charting backend rejected the configuration or is unavailable
    #[error("Chart backend error: {0}")]
    Backend(String),
}
