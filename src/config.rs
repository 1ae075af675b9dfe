//! Session configuration parsed from environment variables.

use crate::error::SessionError;

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:3000/api/chat";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for RequestTimeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

impl RequestTimeouts {
    /// Read `CHAT_REQUEST_TIMEOUT_SECS` and `CHAT_CONNECT_TIMEOUT_SECS`.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            request_secs: env_parse_secs("CHAT_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse_secs("CHAT_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Absolute URL of the same-origin proxy route.
    pub endpoint: String,
    pub timeouts: RequestTimeouts,
}

impl SessionConfig {
    /// Config for `endpoint` with default timeouts.
    ///
    /// # Errors
    ///
    /// Returns an error if `endpoint` is not an absolute http(s) URL.
    pub fn new(endpoint: &str) -> Result<Self, SessionError> {
        Ok(Self { endpoint: validate_endpoint(endpoint)?, timeouts: RequestTimeouts::default() })
    }

    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `CHAT_ENDPOINT`: proxy URL (default `http://127.0.0.1:3000/api/chat`)
    /// - `CHAT_REQUEST_TIMEOUT_SECS`: default 60
    /// - `CHAT_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns an error if `CHAT_ENDPOINT` is set to something that is not an
    /// absolute http(s) URL.
    pub fn from_env() -> Result<Self, SessionError> {
        let endpoint = std::env::var("CHAT_ENDPOINT").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_owned());
        Ok(Self { endpoint: validate_endpoint(&endpoint)?, timeouts: RequestTimeouts::from_env() })
    }

    #[must_use]
    pub fn with_timeouts(mut self, timeouts: RequestTimeouts) -> Self {
        self.timeouts = timeouts;
        self
    }
}

pub(crate) fn validate_endpoint(raw: &str) -> Result<String, SessionError> {
    let trimmed = raw.trim();
    let invalid = |reason: String| SessionError::InvalidEndpoint { url: trimmed.to_owned(), reason };

    let url = reqwest::Url::parse(trimmed).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(trimmed.to_owned()),
        other => Err(invalid(format!("unsupported scheme '{other}'"))),
    }
}

/// Zero would make every request time out immediately, so it falls back too.
fn env_parse_secs(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|secs| *secs > 0)
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
