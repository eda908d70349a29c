//! Error types for pawprint-ai
//!
//! Per-bucket failures are recovered inside the fusion engine and never
//! reach its caller. Configuration faults use `pawprint_common::Error::Config`.

use thiserror::Error;

/// Bucket scorer failure
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScorerError {
    /// Provider data failed validation; the bucket is treated as absent
    #[error("Malformed {field}: {reason}")]
    Malformed { field: &'static str, reason: String },

    /// Unexpected fault inside a scorer; the whole analysis is reported as failed
    #[error("Internal scorer fault: {0}")]
    Internal(String),
}

impl ScorerError {
    pub fn malformed(field: &'static str, reason: impl Into<String>) -> Self {
        ScorerError::Malformed {
            field,
            reason: reason.into(),
        }
    }
}

/// Evidence provider failure (recovered as absent evidence)
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Provider did not answer within the per-call timeout
    #[error("{provider} timed out after {timeout_ms}ms")]
    Timeout {
        provider: &'static str,
        timeout_ms: u64,
    },

    /// Provider is not configured (e.g. missing credentials)
    #[error("{0} is not configured")]
    Unavailable(&'static str),

    /// Provider returned an unusable response
    #[error("{provider} returned an invalid response: {reason}")]
    InvalidResponse {
        provider: &'static str,
        reason: String,
    },

    /// Generic provider error
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
