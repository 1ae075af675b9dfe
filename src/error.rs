//! Error types for the session crate.
//!
//! ERROR HANDLING
//! ==============
//! `SessionError` covers construction-time failures and is the only error
//! a caller of this crate has to handle. Everything that can go wrong while
//! a submission is in flight (`StorageError`, `TransportError`) is caught by
//! the request controller and turned into its `last_error` text.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Failure reading or writing a persistence scope.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The backing file could not be read or written.
    #[error("storage io failed for {path}: {message}")]
    Io { path: String, message: String },

    /// The stored document is not a JSON object of strings.
    #[error("storage document is corrupt: {0}")]
    Corrupt(String),

    /// An internal lock was poisoned by a panicking writer.
    #[error("storage lock poisoned")]
    Poisoned,
}

/// Failure of a single outbound chat request.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The request could not be completed (DNS, connect, reset, ...).
    #[error("request failed: {0}")]
    Request(String),

    /// No response arrived within the configured request timeout.
    #[error("request timed out after {secs}s")]
    Timeout { secs: u64 },

    /// The proxy answered with a non-2xx status.
    #[error("{}", status_message(*status, body))]
    Status { status: u16, body: String },

    /// A 2xx body was not valid JSON.
    #[error("response parse failed: {0}")]
    Parse(String),
}

impl TransportError {
    /// Whether a manual re-submit has a reasonable chance of succeeding.
    ///
    /// Classification only; the controller never retries on its own.
    #[must_use]
    pub fn retryable(&self) -> bool {
        matches!(self, Self::Request(_) | Self::Timeout { .. } | Self::Status { status: 429 | 500..=599, .. })
    }
}

pub(crate) fn status_message(status: u16, body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        format!("server responded with status {status}")
    } else {
        format!("server responded with status {status}: {body}")
    }
}

/// Construction-time failures of the session components.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// A persistence scope could not be read or written while resolving identifiers.
    #[error("identity storage failed: {0}")]
    Storage(#[from] StorageError),

    /// The configured endpoint is not an absolute http(s) URL.
    #[error("invalid endpoint URL '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}
