//! Request controller: the single-flight submission lifecycle.
//!
//! ARCHITECTURE
//! ============
//! `submit` runs one cycle:
//!
//! 1. trim the input; blank input is ignored without touching any state,
//! 2. claim the in-flight slot (`loading = true`, `last_error = None`) or
//!    report `Busy` if another cycle holds it,
//! 3. append the user message (optimistic; it is never rolled back),
//! 4. resolve identifiers, POST the newest message through the transport,
//! 5. append the agent reply on success, or record `last_error` on failure.
//!
//! Observable state lives in a `watch` channel so presentation code can
//! re-render on every transition without polling.
//!
//! TRADE-OFFS
//! ==========
//! A second submission while one is in flight is rejected rather than
//! queued. The presentation layer already disables input while loading, so
//! a queued message would be one the user never saw accepted.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use std::fmt::Display;
use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::SessionConfig;
use crate::conversation::ConversationStore;
use crate::error::SessionError;
use crate::identity::IdentityStore;
use crate::transport::{ChatTransport, HttpTransport};
use crate::types::{ChatRequest, Message};

/// Flags observed by the presentation layer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ControllerState {
    /// True only while a submission is in flight.
    pub loading: bool,
    /// Description of the most recent failure; cleared when a new submission starts.
    pub last_error: Option<String>,
    /// Incremented on every conversation append.
    pub revision: u64,
}

/// Result of one `submit` call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Input was blank after trimming; nothing happened.
    Ignored,
    /// Another submission is in flight; nothing happened.
    Busy,
    /// The agent replied and its message was appended.
    Answered(Message),
    /// The exchange failed; the text equals the new `last_error`.
    Failed(String),
}

pub struct RequestController {
    identity: IdentityStore,
    conversation: Arc<ConversationStore>,
    transport: Arc<dyn ChatTransport>,
    state: watch::Sender<ControllerState>,
}

impl RequestController {
    /// Assemble a controller from its collaborators.
    ///
    /// Both identifiers are resolved once here so an unusable storage scope
    /// fails construction instead of the first submission.
    ///
    /// # Errors
    ///
    /// Returns an error if either identity scope cannot be read or written.
    pub fn new(
        identity: IdentityStore,
        conversation: Arc<ConversationStore>,
        transport: Arc<dyn ChatTransport>,
    ) -> Result<Self, SessionError> {
        identity.session_id()?;
        identity.user_id()?;
        let (state, _) = watch::channel(ControllerState::default());
        Ok(Self { identity, conversation, transport, state })
    }

    /// Controller posting over HTTP to `config.endpoint` with an empty conversation.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built or identity storage fails.
    pub fn from_config(config: &SessionConfig, identity: IdentityStore) -> Result<Self, SessionError> {
        let transport = HttpTransport::new(config)?;
        Self::new(identity, Arc::new(ConversationStore::new()), Arc::new(transport))
    }

    #[must_use]
    pub fn conversation(&self) -> &Arc<ConversationStore> {
        &self.conversation
    }

    #[must_use]
    pub fn identity(&self) -> &IdentityStore {
        &self.identity
    }

    /// Snapshot of the conversation log.
    #[must_use]
    pub fn messages(&self) -> Vec<Message> {
        self.conversation.all()
    }

    #[must_use]
    pub fn state(&self) -> ControllerState {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    #[must_use]
    pub fn last_error(&self) -> Option<String> {
        self.state.borrow().last_error.clone()
    }

    /// Receiver that wakes on every state transition.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ControllerState> {
        self.state.subscribe()
    }

    /// Run one submission cycle for `input`.
    pub async fn submit(&self, input: &str) -> SubmitOutcome {
        let text = input.trim();
        if text.is_empty() {
            debug!("submit: blank input ignored");
            return SubmitOutcome::Ignored;
        }

        let Some(in_flight) = InFlight::claim(&self.state) else {
            warn!("submit: rejected, a request is already in flight");
            return SubmitOutcome::Busy;
        };

        let message = Message::user(text);
        let len = self.conversation.append(message.clone());
        self.state.send_modify(|s| s.revision += 1);
        info!(input_len = text.len(), conversation_len = len, "submit: user message appended");

        match self.exchange(message).await {
            Ok(reply) => {
                let agent = Message::agent(reply);
                let len = self.conversation.append(agent.clone());
                in_flight.release(|s| {
                    s.revision += 1;
                    s.last_error = None;
                });
                info!(reply_len = agent.content().len(), conversation_len = len, "submit: agent reply appended");
                SubmitOutcome::Answered(agent)
            }
            Err(description) => {
                in_flight.release(|s| s.last_error = Some(description.clone()));
                SubmitOutcome::Failed(description)
            }
        }
    }

    /// Fire-and-forget variant of [`submit`](Self::submit).
    ///
    /// Completion is observable through [`subscribe`](Self::subscribe); the
    /// returned handle may be dropped.
    pub fn spawn_submit(self: &Arc<Self>, input: impl Into<String>) -> JoinHandle<SubmitOutcome> {
        let controller = Arc::clone(self);
        let input = input.into();
        tokio::spawn(async move { controller.submit(&input).await })
    }

    async fn exchange(&self, message: Message) -> Result<String, String> {
        let user_id = self.identity.user_id().map_err(|e| failure_message(&e))?;
        let session_id = self.identity.session_id().map_err(|e| failure_message(&e))?;
        let request = ChatRequest::new(message, user_id, session_id);

        debug!(user_id = %request.user_id, session_id = %request.session_id, "submit: request issued");
        self.transport.send(&request).await.map_err(|e| {
            warn!(error = %e, retryable = e.retryable(), "submit: request failed");
            failure_message(&e)
        })
    }
}

pub(crate) fn failure_message(cause: &impl Display) -> String {
    format!("Failed to get a response: {cause}")
}

// =============================================================================
// IN-FLIGHT GUARD
// =============================================================================

/// Holds the single submission slot. Dropping it without `release` still
/// clears `loading`, which covers cancelled futures and unwinding.
struct InFlight<'a> {
    state: &'a watch::Sender<ControllerState>,
    released: bool,
}

impl<'a> InFlight<'a> {
    fn claim(state: &'a watch::Sender<ControllerState>) -> Option<Self> {
        let claimed = state.send_if_modified(|s| {
            if s.loading {
                return false;
            }
            s.loading = true;
            s.last_error = None;
            true
        });
        claimed.then_some(Self { state, released: false })
    }

    /// Apply the final update and clear `loading` in one transition.
    fn release(mut self, update: impl FnOnce(&mut ControllerState)) {
        self.state.send_modify(|s| {
            update(s);
            s.loading = false;
        });
        self.released = true;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.released {
            self.state.send_if_modified(|s| std::mem::replace(&mut s.loading, false));
        }
    }
}
