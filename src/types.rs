//! Conversation messages and the proxy wire schema.
//!
//! SYSTEM CONTEXT
//! ==============
//! The proxy forwards the outbound payload verbatim to the inference
//! service, which keeps conversation state keyed by `(user_id, session_id)`.
//! Only the newest user message travels; the local conversation log is a
//! display mirror.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::TransportError;
use crate::identity::Identifier;

/// Agent text used when a successful response carries no content.
pub const FALLBACK_REPLY: &str = "No valid response received from agent.";

// =============================================================================
// MESSAGE
// =============================================================================

/// Author of a conversation entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Agent,
}

/// One conversation entry. Fields are read-only once constructed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    role: Role,
    content: String,
}

impl Message {
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }

    #[must_use]
    pub fn agent(content: impl Into<String>) -> Self {
        Self { role: Role::Agent, content: content.into() }
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }
}

// =============================================================================
// OUTBOUND PAYLOAD
// =============================================================================

/// Body of the POST sent to the proxy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub data: RequestData,
    pub stateful: bool,
    pub stream: bool,
    pub user_id: Identifier,
    pub session_id: Identifier,
    pub verbose: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RequestData {
    pub message: Message,
}

impl ChatRequest {
    /// Stateful, non-streaming, non-verbose request carrying one message.
    #[must_use]
    pub fn new(message: Message, user_id: Identifier, session_id: Identifier) -> Self {
        Self { data: RequestData { message }, stateful: true, stream: false, user_id, session_id, verbose: false }
    }
}

// =============================================================================
// INBOUND RESPONSE
// =============================================================================

/// Extract the agent reply from a 2xx response body.
///
/// The expected shape is `{ "output_data": { "content": "..." } }`. A body
/// that is valid JSON but lacks a string `output_data.content` is a degraded
/// success and yields [`FALLBACK_REPLY`].
///
/// # Errors
///
/// Returns [`TransportError::Parse`] when the body is not JSON at all.
pub fn parse_agent_reply(body: &str) -> Result<String, TransportError> {
    let value: Value = serde_json::from_str(body).map_err(|e| TransportError::Parse(e.to_string()))?;
    match agent_content(&value) {
        Some(content) => Ok(content.to_owned()),
        None => {
            debug!("response: output_data.content missing, using fallback reply");
            Ok(FALLBACK_REPLY.to_owned())
        }
    }
}

fn agent_content(value: &Value) -> Option<&str> {
    value
        .get("output_data")
        .and_then(|output| output.get("content"))
        .and_then(Value::as_str)
}
