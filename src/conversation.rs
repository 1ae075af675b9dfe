//! Append-only conversation log.
//!
//! The log is created empty for each widget instance and never persisted.
//! `append` is the only mutator; readers get owned snapshots taken under the
//! read lock, so a renderer sees either the state before an append or the
//! state after it.

#[cfg(test)]
#[path = "conversation_test.rs"]
mod conversation_test;

use std::sync::RwLock;

use crate::types::Message;

#[derive(Debug, Default)]
pub struct ConversationStore {
    messages: RwLock<Vec<Message>>,
}

impl ConversationStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `message` at the end of the log and return the new length.
    pub fn append(&self, message: Message) -> usize {
        let mut messages = self.messages.write().unwrap_or_else(std::sync::PoisonError::into_inner);
        messages.push(message);
        messages.len()
    }

    /// Snapshot of every message in insertion order.
    #[must_use]
    pub fn all(&self) -> Vec<Message> {
        self.read().clone()
    }

    /// Snapshot of messages from index `start` onward.
    #[must_use]
    pub fn since(&self, start: usize) -> Vec<Message> {
        self.read().get(start..).map(<[Message]>::to_vec).unwrap_or_default()
    }

    #[must_use]
    pub fn last(&self) -> Option<Message> {
        self.read().last().cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Vec<Message>> {
        // A push cannot leave the Vec half-written, so a poisoned lock still
        // guards a consistent log.
        self.messages.read().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
