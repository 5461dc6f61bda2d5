//! Session message store with busy tracking
//!
//! The store owns the ordered message list of one session and the busy flag
//! that gates submissions. Every mutation is published on a `watch` channel so
//! a presentation layer can observe the session without polling.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tokio::sync::watch;
use uuid::Uuid;

/// Author of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Typed or dictated by the person using the session
    User,
    /// Produced by the responder
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Assistant => write!(f, "assistant"),
        }
    }
}

/// A single chat message
///
/// Messages are immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    role: Role,
    content: String,
}

impl Message {
    /// Creates a new user message
    ///
    /// # Examples
    ///
    /// ```
    /// use edcare::session::{Message, Role};
    ///
    /// let msg = Message::user("What is photosynthesis?");
    /// assert_eq!(msg.role(), Role::User);
    /// ```
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Creates a new assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    /// Role of the author
    pub fn role(&self) -> Role {
        self.role
    }

    /// Text of the message
    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Point-in-time view of a session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionState {
    messages: Vec<Message>,
    busy: bool,
    /// Bumped by every clear; replies scheduled before a clear are dropped
    #[serde(skip)]
    epoch: u64,
}

impl SessionState {
    /// Messages in display order
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// True while a user message is waiting for its reply
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Number of messages
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// True when no message has been appended
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Number of times the session has been cleared
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    fn push(&mut self, message: Message) {
        self.busy = message.role == Role::User;
        self.messages.push(message);
    }
}

/// Shared handle to one session's state
///
/// Cloning the handle shares the same session. Construct one store per
/// session and hand clones to whatever needs to read or append.
#[derive(Debug, Clone)]
pub struct SessionStore {
    id: Uuid,
    state: Arc<watch::Sender<SessionState>>,
}

impl SessionStore {
    /// Creates an empty, idle session
    ///
    /// # Examples
    ///
    /// ```
    /// use edcare::session::SessionStore;
    ///
    /// let store = SessionStore::new();
    /// assert!(store.snapshot().is_empty());
    /// assert!(!store.is_busy());
    /// ```
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(SessionState::default());
        let store = Self {
            id: Uuid::new_v4(),
            state: Arc::new(tx),
        };
        tracing::debug!(session_id = %store.id, "Session store created");
        store
    }

    /// Identifier used to correlate log lines for this session
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Appends a message
    ///
    /// A user message marks the session busy; an assistant message marks it
    /// idle. Content is not validated here.
    pub fn append(&self, message: Message) {
        let role = message.role;
        self.state.send_modify(|state| state.push(message));
        tracing::trace!(session_id = %self.id, %role, "Message appended");
    }

    /// Appends a user message only if the session is idle
    ///
    /// The check and the append happen under the same lock, so two
    /// concurrent callers can never both be admitted.
    ///
    /// # Returns
    ///
    /// Returns true if the message was appended
    pub fn append_if_idle(&self, content: impl Into<String>) -> bool {
        self.admit(content).is_some()
    }

    /// Appends a user message only if the session is idle
    ///
    /// # Returns
    ///
    /// The epoch the message was admitted in, or None if the session was
    /// busy. Pass the epoch to [`SessionStore::append_reply_if_epoch`].
    pub fn admit(&self, content: impl Into<String>) -> Option<u64> {
        let content = content.into();
        let mut epoch = None;
        self.state.send_if_modified(|state| {
            if state.busy {
                return false;
            }
            state.push(Message::user(content));
            epoch = Some(state.epoch);
            true
        });
        if epoch.is_some() {
            tracing::trace!(session_id = %self.id, "User message admitted");
        }
        epoch
    }

    /// Appends an assistant reply unless the session was cleared since
    /// `epoch`
    ///
    /// # Returns
    ///
    /// Returns true if the reply was appended
    pub fn append_reply_if_epoch(&self, epoch: u64, content: impl Into<String>) -> bool {
        let content = content.into();
        let appended = self.state.send_if_modified(|state| {
            if state.epoch != epoch {
                return false;
            }
            state.push(Message::assistant(content));
            true
        });
        if !appended {
            tracing::debug!(session_id = %self.id, epoch, "Stale reply dropped");
        }
        appended
    }

    /// Removes every message and clears the busy flag
    ///
    /// Replies still pending for the old messages are never appended.
    pub fn clear(&self) {
        self.state.send_modify(|state| {
            state.messages.clear();
            state.busy = false;
            state.epoch += 1;
        });
        tracing::debug!(session_id = %self.id, "Session cleared");
    }

    /// Returns a copy of the current state
    pub fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Returns a copy of the current messages
    pub fn messages(&self) -> Vec<Message> {
        self.state.borrow().messages.clone()
    }

    /// True while a reply is outstanding
    pub fn is_busy(&self) -> bool {
        self.state.borrow().busy
    }

    /// Subscribes to state changes
    ///
    /// The receiver sees the latest state; intermediate states may be
    /// skipped if the observer is slow.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Waits until no reply is outstanding
    pub async fn wait_until_idle(&self) {
        let mut rx = self.state.subscribe();
        // The sender lives in `self`, so the channel can not close here.
        let _ = rx.wait_for(|state| !state.busy).await;
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
