//! Session and user identifiers.
//!
//! DESIGN
//! ======
//! Each identifier is bound to one persistence scope: the session id to the
//! per-session scope, the user id to the durable scope. A read returns the
//! stored value when it is usable and otherwise generates, stores and
//! returns a fresh one, so repeated reads within a scope are idempotent.
//!
//! A scope that is `None` models "no client storage attached yet"; reads
//! then return an empty identifier instead of failing.

#[cfg(test)]
#[path = "identity_test.rs"]
mod identity_test;

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::StorageError;
use crate::storage::{KeyValueStore, MemoryStore, SESSION_ID_KEY, USER_ID_KEY};

/// Longest identifier accepted from storage or produced by generation.
pub const MAX_IDENTIFIER_LEN: usize = 32;

// =============================================================================
// IDENTIFIER
// =============================================================================

/// Opaque bounded-length token. Consumers must not assume any structure.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    /// Generate a fresh identifier from 128 bits of randomness (hex, no hyphens).
    #[must_use]
    pub fn generate() -> Self {
        let raw = uuid::Uuid::new_v4().simple().to_string();
        Self(raw.chars().take(MAX_IDENTIFIER_LEN).collect())
    }

    /// Accept a stored value if it can serve as an identifier.
    ///
    /// Empty values and values longer than [`MAX_IDENTIFIER_LEN`] characters
    /// are rejected so the caller regenerates.
    #[must_use]
    pub fn from_stored(raw: &str) -> Option<Self> {
        let len = raw.chars().count();
        (len > 0 && len <= MAX_IDENTIFIER_LEN).then(|| Self(raw.to_owned()))
    }

    /// The identifier returned when no storage scope is attached.
    #[must_use]
    pub fn empty() -> Self {
        Self(String::new())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// IDENTITY STORE
// =============================================================================

/// Resolves the session and user identifiers against their scopes.
#[derive(Clone)]
pub struct IdentityStore {
    session: Option<Arc<dyn KeyValueStore>>,
    durable: Option<Arc<dyn KeyValueStore>>,
}

impl IdentityStore {
    #[must_use]
    pub fn new(session: Option<Arc<dyn KeyValueStore>>, durable: Option<Arc<dyn KeyValueStore>>) -> Self {
        Self { session, durable }
    }

    /// Both scopes backed by fresh in-memory maps.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Some(Arc::new(MemoryStore::new())), Some(Arc::new(MemoryStore::new())))
    }

    /// No storage attached; every read yields an empty identifier.
    #[must_use]
    pub fn detached() -> Self {
        Self::new(None, None)
    }

    /// Identifier for the current session scope.
    ///
    /// # Errors
    ///
    /// Returns an error if the session scope cannot be read or written.
    pub fn session_id(&self) -> Result<Identifier, StorageError> {
        resolve(self.session.as_deref(), SESSION_ID_KEY)
    }

    /// Identifier for the durable user scope.
    ///
    /// # Errors
    ///
    /// Returns an error if the durable scope cannot be read or written.
    pub fn user_id(&self) -> Result<Identifier, StorageError> {
        resolve(self.durable.as_deref(), USER_ID_KEY)
    }

    /// Drop the stored session identifier; the next read regenerates it.
    ///
    /// # Errors
    ///
    /// Returns an error if the session scope cannot be written.
    pub fn forget_session(&self) -> Result<(), StorageError> {
        forget(self.session.as_deref(), SESSION_ID_KEY)
    }

    /// Drop the stored user identifier; the next read regenerates it.
    ///
    /// # Errors
    ///
    /// Returns an error if the durable scope cannot be written.
    pub fn forget_user(&self) -> Result<(), StorageError> {
        forget(self.durable.as_deref(), USER_ID_KEY)
    }
}

fn resolve(scope: Option<&dyn KeyValueStore>, key: &str) -> Result<Identifier, StorageError> {
    let Some(store) = scope else {
        return Ok(Identifier::empty());
    };

    if let Some(stored) = store.get(key)? {
        if let Some(id) = Identifier::from_stored(&stored) {
            return Ok(id);
        }
        debug!(key, stored_len = stored.chars().count(), "identity: stored value rejected");
    }

    let fresh = Identifier::generate();
    store.set(key, fresh.as_str())?;
    info!(key, "identity: generated new identifier");
    Ok(fresh)
}

fn forget(scope: Option<&dyn KeyValueStore>, key: &str) -> Result<(), StorageError> {
    match scope {
        Some(store) => store.remove(key),
        None => Ok(()),
    }
}
