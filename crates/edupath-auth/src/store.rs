//! Session storage.
//!
//! Sessions are keyed by token *hash*, never by the raw token. The
//! in-memory store is the default deployment; the trait leaves room
//! for a shared store when the service runs more than one instance.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::error::AuthError;

/// One active admin session.
#[derive(Debug, Clone)]
pub struct SessionRecord {
    /// Email of the authenticated admin.
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Storage for active sessions, keyed by token hash.
pub trait SessionStore: Send + Sync {
    fn insert(
        &self,
        token_hash: String,
        record: SessionRecord,
    ) -> impl Future<Output = Result<(), AuthError>> + Send;
    /// Look up a session. `None` means unknown token.
    fn get(
        &self,
        token_hash: &str,
    ) -> impl Future<Output = Result<Option<SessionRecord>, AuthError>> + Send;
    /// Remove a session. Removing an unknown token is not an error.
    fn remove(&self, token_hash: &str) -> impl Future<Output = Result<(), AuthError>> + Send;
    /// Drop every session past its expiry and return how many went.
    fn purge_expired(&self, now: DateTime<Utc>)
    -> impl Future<Output = Result<usize, AuthError>> + Send;
}

/// Process-local session store.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, SessionRecord>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemorySessionStore {
    async fn insert(&self, token_hash: String, record: SessionRecord) -> Result<(), AuthError> {
        self.sessions.write().await.insert(token_hash, record);
        Ok(())
    }

    async fn get(&self, token_hash: &str) -> Result<Option<SessionRecord>, AuthError> {
        Ok(self.sessions.read().await.get(token_hash).cloned())
    }

    async fn remove(&self, token_hash: &str) -> Result<(), AuthError> {
        self.sessions.write().await.remove(token_hash);
        Ok(())
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, AuthError> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, record| record.expires_at > now);
        Ok(before - sessions.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn record(expires_in_secs: i64) -> SessionRecord {
        let now = Utc::now();
        SessionRecord {
            email: "admin@example.com".into(),
            created_at: now,
            expires_at: now + Duration::seconds(expires_in_secs),
        }
    }

    #[tokio::test]
    async fn insert_get_remove_round_trip() {
        let store = InMemorySessionStore::new();
        store.insert("h1".into(), record(60)).await.unwrap();

        let found = store.get("h1").await.unwrap().unwrap();
        assert_eq!(found.email, "admin@example.com");

        store.remove("h1").await.unwrap();
        assert!(store.get("h1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn remove_unknown_token_is_a_no_op() {
        let store = InMemorySessionStore::new();
        store.remove("never-inserted").await.unwrap();
    }

    #[tokio::test]
    async fn purge_drops_only_expired_sessions() {
        let store = InMemorySessionStore::new();
        store.insert("live".into(), record(3600)).await.unwrap();
        store.insert("dead".into(), record(-1)).await.unwrap();

        let purged = store.purge_expired(Utc::now()).await.unwrap();
        assert_eq!(purged, 1);
        assert!(store.get("live").await.unwrap().is_some());
        assert!(store.get("dead").await.unwrap().is_none());
    }
}
