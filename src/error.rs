//! Error types for `trackline`.
//!
//! The engines in `trackline-lib` are total, so every failure mode lives at
//! this crate's I/O boundary: configuration, transport, upstream API status
//! and bridge input validation. No retries are performed anywhere; a failed
//! load is surfaced and the user re-runs.

use thiserror::Error;

/// Primary error type for trackline operations.
#[derive(Error, Debug)]
pub enum TracklineError {
    // === Configuration Errors ===
    /// Configuration error (missing URL/key, malformed base URL).
    #[error("Configuration error: {0}")]
    Config(String),

    // === Transport Errors ===
    /// The request never produced an upstream response.
    #[error("Tracker request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The tracker answered with a non-success status.
    #[error("Tracker API error: HTTP {status}: {body}")]
    Api { status: u16, body: String },

    /// The response body did not match the expected payload shape.
    #[error("Unexpected tracker response for {endpoint}: {reason}")]
    Payload { endpoint: String, reason: String },

    // === Bridge Errors ===
    /// Structurally invalid tool arguments, rejected before dispatch.
    #[error("Invalid tool arguments: {reason}")]
    InvalidParams { reason: String },

    // === I/O Errors ===
    /// Transport I/O error on the bridge's stdio channel.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TracklineError {
    #[must_use]
    pub fn payload(endpoint: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Payload {
            endpoint: endpoint.into(),
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn invalid_params(reason: impl Into<String>) -> Self {
        Self::InvalidParams {
            reason: reason.into(),
        }
    }
}

/// Result type using `TracklineError`.
pub type Result<T> = std::result::Result<T, TracklineError>;
