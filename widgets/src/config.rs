//! Static widget configuration.
//!
//! SYSTEM CONTEXT
//! ==============
//! The configuration surface is consumed by presentation code only. The
//! request controller never sees titles or suggestions; it receives a
//! `SessionConfig` derived from the endpoint here (or from the environment
//! when the file does not name one).

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::Path;
use std::time::Duration;

use chat_session::{RequestTimeouts, SessionConfig, SessionError};
use serde::{Deserialize, Serialize};

pub const DEFAULT_TITLE: &str = "Chat with our agent";
pub const DEFAULT_DESCRIPTION: &str = "Ask anything and the agent will reply here.";
pub const DEFAULT_PLACEHOLDER: &str = "Type your message...";
pub const DEFAULT_ROTATION_INTERVAL_MS: u64 = 4_000;
/// Rotation faster than this reads as flicker; shorter intervals are raised to it.
pub const MIN_ROTATION_INTERVAL_MS: u64 = 250;

#[derive(Debug, thiserror::Error)]
pub enum WidgetConfigError {
    #[error("failed to read widget config {path}: {message}")]
    Io { path: String, message: String },

    #[error("invalid widget config: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Proxy URL. `None` defers to `CHAT_ENDPOINT`.
    pub endpoint: Option<String>,
    pub title: String,
    pub description: String,
    pub placeholder: String,
    pub suggestions: Vec<String>,
    pub rotation_interval_ms: u64,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            title: DEFAULT_TITLE.to_owned(),
            description: DEFAULT_DESCRIPTION.to_owned(),
            placeholder: DEFAULT_PLACEHOLDER.to_owned(),
            suggestions: vec![
                "What can you help me with?".to_owned(),
                "Summarize the latest updates".to_owned(),
                "How do I get started?".to_owned(),
            ],
            rotation_interval_ms: DEFAULT_ROTATION_INTERVAL_MS,
        }
    }
}

impl WidgetConfig {
    /// Parse YAML; missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid YAML for this shape.
    pub fn from_yaml_str(raw: &str) -> Result<Self, WidgetConfigError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(raw).map_err(|e| WidgetConfigError::Parse(e.to_string()))?;
        Ok(config.normalized())
    }

    /// Read and parse a YAML config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, WidgetConfigError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| WidgetConfigError::Io { path: path.display().to_string(), message: e.to_string() })?;
        Self::from_yaml_str(&raw)
    }

    #[must_use]
    pub fn rotation_interval(&self) -> Duration {
        Duration::from_millis(self.rotation_interval_ms.max(MIN_ROTATION_INTERVAL_MS))
    }

    /// Session config for the configured endpoint, or from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is not an absolute http(s) URL.
    pub fn session_config(&self) -> Result<SessionConfig, SessionError> {
        match &self.endpoint {
            Some(endpoint) => Ok(SessionConfig::new(endpoint)?.with_timeouts(RequestTimeouts::from_env())),
            None => SessionConfig::from_env(),
        }
    }

    fn normalized(mut self) -> Self {
        self.suggestions = self
            .suggestions
            .into_iter()
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty())
            .collect();
        self.endpoint = self.endpoint.filter(|e| !e.trim().is_empty());
        self
    }
}
