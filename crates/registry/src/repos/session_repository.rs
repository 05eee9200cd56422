//! In-memory registry of live bearer-token sessions.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::entities::session::Session;

#[derive(Clone)]
pub struct SessionRepository {
    sessions: Arc<RwLock<Vec<Session>>>,
}

impl SessionRepository {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub async fn insert(&self, session: Session) {
        let mut sessions = self.sessions.write().await;
        sessions.push(session);
    }

    pub async fn find(&self, token: &str) -> Option<Session> {
        let sessions = self.sessions.read().await;
        sessions.iter().find(|s| s.token == token).cloned()
    }

    /// Remove the session for a token. Returns whether a session was actually
    /// removed, which keeps logout idempotent but observable.
    pub async fn remove(&self, token: &str) -> bool {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|s| s.token != token);
        sessions.len() < before
    }

    pub async fn len(&self) -> usize {
        let sessions = self.sessions.read().await;
        sessions.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for SessionRepository {
    fn default() -> Self {
        Self::new()
    }
}
