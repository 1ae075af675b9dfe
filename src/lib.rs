//! Client conversation session for the chat widgets.
//!
//! This crate owns everything the widget variants share: the identifiers
//! sent with every request, the local conversation log, and the request
//! controller that drives one submission at a time through the chat proxy.
//! Presentation (layout, markdown, suggestion rotation) lives in `widgets`.

pub mod config;
pub mod controller;
pub mod conversation;
pub mod error;
pub mod identity;
pub mod storage;
pub mod transport;
pub mod types;

pub use config::{RequestTimeouts, SessionConfig};
pub use controller::{ControllerState, RequestController, SubmitOutcome};
pub use conversation::ConversationStore;
pub use error::{SessionError, StorageError, TransportError};
pub use identity::{Identifier, IdentityStore, MAX_IDENTIFIER_LEN};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use transport::{ChatTransport, HttpTransport};
pub use types::{ChatRequest, FALLBACK_REPLY, Message, Role};
