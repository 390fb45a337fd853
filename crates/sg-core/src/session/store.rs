//! In-memory session store
//!
//! Thread-safe storage using DashMap, one async mutex per user. Sessions live
//! for the lifetime of the process; nothing is evicted.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::info;

use super::Session;

/// Shared, lockable session of one user.
///
/// Hold the lock for the whole read-fetch-commit sequence of an operation.
pub type SessionHandle = Arc<Mutex<Session>>;

/// Process-wide mapping from user id to session
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<DashMap<String, SessionHandle>>,
}

impl SessionStore {
    /// Create a new session store
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
        }
    }

    /// Get a session if it exists
    pub fn get(&self, user_id: &str) -> Option<SessionHandle> {
        self.sessions.get(user_id).map(|s| Arc::clone(s.value()))
    }

    /// Get or create a session for a user
    pub fn get_or_create(&self, user_id: &str) -> SessionHandle {
        if let Some(session) = self.get(user_id) {
            return session;
        }

        let entry = self.sessions.entry(user_id.to_string()).or_insert_with(|| {
            info!("Creating new session for user: {}", user_id);
            Arc::new(Mutex::new(Session::new(user_id)))
        });
        Arc::clone(entry.value())
    }

    /// Get session count
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
