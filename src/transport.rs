//! Outbound call to the chat proxy.
//!
//! DESIGN
//! ======
//! `ChatTransport` is the seam between the request controller and the
//! network so the controller can be driven by scripted replies in tests.
//! `HttpTransport` is the production implementation: one JSON POST per
//! call, no retries, bounded by the configured timeouts.

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use std::time::Duration;

use tracing::debug;

use crate::config::SessionConfig;
use crate::error::{SessionError, TransportError};
use crate::types::{ChatRequest, parse_agent_reply};

/// Sends one request and returns the agent's reply text.
#[async_trait::async_trait]
pub trait ChatTransport: Send + Sync {
    /// Deliver `request` and resolve the agent reply.
    ///
    /// A 2xx response without content resolves to the fallback reply
    /// rather than an error.
    async fn send(&self, request: &ChatRequest) -> Result<String, TransportError>;
}

pub struct HttpTransport {
    http: reqwest::Client,
    endpoint: String,
    request_timeout_secs: u64,
}

impl HttpTransport {
    /// Build a transport posting to `config.endpoint`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &SessionConfig) -> Result<Self, SessionError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| SessionError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, endpoint: config.endpoint.clone(), request_timeout_secs: config.timeouts.request_secs })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn classify(&self, err: &reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout { secs: self.request_timeout_secs }
        } else {
            TransportError::Request(err.to_string())
        }
    }
}

#[async_trait::async_trait]
impl ChatTransport for HttpTransport {
    async fn send(&self, request: &ChatRequest) -> Result<String, TransportError> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| self.classify(&e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.classify(&e))?;
        debug!(status = status.as_u16(), body_len = body.len(), "transport: response received");

        if !status.is_success() {
            return Err(TransportError::Status { status: status.as_u16(), body });
        }
        parse_agent_reply(&body)
    }
}
