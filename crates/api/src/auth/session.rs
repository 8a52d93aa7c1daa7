//! Live admin sessions.
//!
//! A process-wide map from token digest to expiry. Sessions do not survive
//! a restart; the admin simply logs in again.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use clubsite_core::types::Timestamp;
use serde::Serialize;
use tokio::sync::RwLock;

use super::token::{generate_session_token, hash_session_token};

/// A freshly issued session, returned once to the client.
#[derive(Debug, Clone, Serialize)]
pub struct IssuedSession {
    pub token: String,
    pub expires_at: Timestamp,
}

/// Store of active admin sessions keyed by token digest.
pub struct SessionStore {
    ttl: chrono::Duration,
    sessions: RwLock<HashMap<String, Timestamp>>,
}

impl SessionStore {
    pub fn new(ttl: chrono::Duration) -> Self {
        Self {
            ttl,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Issue a new session valid for the configured TTL.
    pub async fn issue(&self) -> IssuedSession {
        self.issue_at(Utc::now()).await
    }

    /// Returns `true` if `token` belongs to a live session.
    ///
    /// An expired session is removed as a side effect.
    pub async fn validate(&self, token: &str) -> bool {
        self.validate_at(token, Utc::now()).await
    }

    /// End a session. Returns `true` if it existed.
    pub async fn revoke(&self, token: &str) -> bool {
        let hash = hash_session_token(token);
        self.sessions.write().await.remove(&hash).is_some()
    }

    /// Drop every expired session, returning how many were removed.
    pub async fn purge_expired(&self) -> usize {
        self.purge_expired_at(Utc::now()).await
    }

    /// Number of sessions currently held (expired ones included until purged).
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    async fn issue_at(&self, now: Timestamp) -> IssuedSession {
        let (token, hash) = generate_session_token();
        let expires_at = now
            .checked_add_signed(self.ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        self.sessions.write().await.insert(hash, expires_at);
        IssuedSession { token, expires_at }
    }

    async fn validate_at(&self, token: &str, now: Timestamp) -> bool {
        let hash = hash_session_token(token);
        let expires_at = match self.sessions.read().await.get(&hash) {
            Some(expires_at) => *expires_at,
            None => return false,
        };
        if expires_at > now {
            return true;
        }
        self.sessions.write().await.remove(&hash);
        false
    }

    async fn purge_expired_at(&self, now: Timestamp) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, expires_at| *expires_at > now);
        before - sessions.len()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    #[tokio::test]
    async fn issued_token_validates() {
        let store = SessionStore::new(Duration::hours(1));
        let session = store.issue().await;
        assert!(store.validate(&session.token).await);
        assert!(session.expires_at > Utc::now());
    }

    #[tokio::test]
    async fn oversized_ttl_saturates_instead_of_overflowing() {
        let store = SessionStore::new(Duration::MAX);
        let session = store.issue().await;
        assert_eq!(session.expires_at, DateTime::<Utc>::MAX_UTC);
        assert!(store.validate(&session.token).await);
    }

    #[tokio::test]
    async fn unknown_token_rejected() {
        let store = SessionStore::new(Duration::hours(1));
        store.issue().await;
        assert!(!store.validate("not-a-real-token").await);
    }

    #[tokio::test]
    async fn expired_token_rejected_and_evicted() {
        let store = SessionStore::new(Duration::hours(1));
        let now = Utc::now();
        let session = store.issue_at(now).await;

        assert!(store.validate_at(&session.token, now + Duration::minutes(59)).await);
        assert!(!store.validate_at(&session.token, now + Duration::hours(2)).await);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn revoke_ends_session() {
        let store = SessionStore::new(Duration::hours(1));
        let session = store.issue().await;

        assert!(store.revoke(&session.token).await);
        assert!(!store.validate(&session.token).await);
        assert!(!store.revoke(&session.token).await);
    }

    #[tokio::test]
    async fn purge_removes_only_expired() {
        let store = SessionStore::new(Duration::hours(1));
        let now = Utc::now();
        store.issue_at(now - Duration::hours(3)).await;
        store.issue_at(now - Duration::hours(2)).await;
        let live = store.issue_at(now).await;

        assert_eq!(store.purge_expired_at(now).await, 2);
        assert_eq!(store.len().await, 1);
        assert!(store.validate_at(&live.token, now).await);
    }
}
