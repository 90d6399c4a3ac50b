use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use parking_lot::RwLock;

pub type SessionToken = String;

/// A previously established authenticated identity, keyed by its opaque
/// token. Sessions are created and destroyed by the owning store; the gate
/// only ever reads them. Absence is `None`, never a zero-valued `Session`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: SessionToken,
    pub user_id: i64,
}

/// Lookup capability over the session store. Implementations are expected to
/// be reentrant; the gate calls them once per request with no retries.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn lookup_by_token(&self, token: &str) -> Result<Option<Session>>;
}

/// Token-keyed in-memory store used by the demo server and tests.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<SessionToken, Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, session: Session) {
        let mut m = self.sessions.write();
        m.insert(session.token.clone(), session);
    }

    pub fn remove(&self, token: &str) -> bool {
        self.sessions.write().remove(token).is_some()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn lookup_by_token(&self, token: &str) -> Result<Option<Session>> {
        Ok(self.sessions.read().get(token).cloned())
    }
}
