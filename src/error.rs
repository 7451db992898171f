//! Munin error types

use std::time::Duration;

/// Munin error types
///
/// Every per-request failure surfaces as one of these tagged values; nothing
/// escapes [`ExtractionGateway::fetch_extraction`](crate::ExtractionGateway::fetch_extraction)
/// as a panic or an opaque fault.
///
/// The enum is `Clone` because a single in-flight computation fans its
/// outcome out to every caller coalesced onto it.
#[derive(Debug, Clone, thiserror::Error)]
pub enum MuninError {
    /// Source content absent for the requested key.
    ///
    /// Client-visible "not found"; never retried automatically and never
    /// reaches the upstream transformer.
    #[error("source content not found for key '{key}'")]
    NotFound { key: String },

    /// Transformer responded with a non-success status.
    ///
    /// Carries the status code and a truncated response body for
    /// diagnostics. Not cached; the caller may retry.
    #[error("upstream returned status {status}: {body}")]
    Upstream { status: u16, body: String },

    /// Upstream call exceeded the configured deadline.
    ///
    /// Classified as an upstream failure: not cached, released to every
    /// waiter on the in-flight computation.
    #[error("upstream request timed out after {0:?}")]
    Timeout(Duration),

    // Transport-level failures below the status-code layer
    #[error("HTTP error: {0}")]
    Http(String),

    /// Cleaned response was not a JSON object or array, or the completion
    /// envelope was malformed.
    ///
    /// `raw` preserves the offending text for debugging. This indicates a
    /// prompt/model quality issue rather than a system bug, so it is
    /// reported, not retried.
    #[error("failed to parse model response: {reason}")]
    Parse { reason: String, raw: String },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Source storage failed in a way that is not plain absence
    /// (permissions, encoding, I/O).
    #[error("storage error: {0}")]
    Storage(String),

    // Configuration errors are fatal at startup, not per-request
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl MuninError {
    /// Build a `Parse` error, keeping the raw text for diagnostics.
    pub(crate) fn parse(reason: impl Into<String>, raw: impl Into<String>) -> Self {
        MuninError::Parse {
            reason: reason.into(),
            raw: raw.into(),
        }
    }
}

/// Result type alias for Munin operations
pub type Result<T> = std::result::Result<T, MuninError>;
