use chrono::Utc;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;

use super::random_token;
use crate::common::{UserProfile, STATE_TTL};
use crate::server::models::{PendingLogin, UserSession};

const SESSION_ID_BYTES: usize = 32;

/// In-memory store for logins in progress and logged-in sessions.
///
/// Both maps are swept by a background task; reads also treat stale
/// entries as absent so a sweep never has to have run.
pub struct SessionStore {
    pending: Arc<DashMap<String, PendingLogin>>,
    sessions: Arc<DashMap<String, UserSession>>,
    state_ttl: Duration,
    session_ttl: Duration,
}

impl SessionStore {
    pub fn new(session_ttl_seconds: u64) -> Self {
        let store = Self {
            pending: Arc::new(DashMap::new()),
            sessions: Arc::new(DashMap::new()),
            state_ttl: STATE_TTL.to_std().unwrap_or(Duration::from_secs(300)),
            session_ttl: Duration::from_secs(session_ttl_seconds),
        };

        // Spawn background cleanup task
        let pending_clone = store.pending.clone();
        let sessions_clone = store.sessions.clone();
        let state_ttl = store.state_ttl;
        let session_ttl = store.session_ttl;
        tokio::spawn(async move {
            cleanup_expired(pending_clone, sessions_clone, state_ttl, session_ttl).await;
        });

        tracing::info!(
            "Session store initialized with session TTL of {} seconds",
            session_ttl_seconds
        );
        store
    }

    /// Remember a login started with `state`, and where to go once it completes
    pub fn begin_login(&self, state: String, redirect: Option<String>) {
        self.pending.insert(
            state,
            PendingLogin {
                redirect,
                created_at: Utc::now(),
            },
        );
    }

    /// Remove and return the pending login for `state`, unless it has expired
    pub fn take_pending(&self, state: &str) -> Option<PendingLogin> {
        let (_, pending) = self.pending.remove(state)?;
        if is_expired(pending.created_at, self.state_ttl) {
            tracing::debug!("Pending login expired");
            return None;
        }
        Some(pending)
    }

    /// Create a session for `user` and return its identifier
    pub fn create_session(&self, user: UserProfile, discord_token: String) -> String {
        let session_id = random_token(SESSION_ID_BYTES);
        let user_id = user.id.clone();
        self.sessions.insert(
            session_id.clone(),
            UserSession {
                user,
                discord_token,
                created_at: Utc::now(),
            },
        );
        tracing::debug!(user_id = %user_id, "Created session");
        session_id
    }

    /// Get a live session by ID
    pub fn get_session(&self, session_id: &str) -> Option<UserSession> {
        let session = self.sessions.get(session_id).map(|s| s.clone())?;
        if is_expired(session.created_at, self.session_ttl) {
            self.sessions.remove(session_id);
            return None;
        }
        Some(session)
    }

    /// Delete a session, returning whether it existed
    pub fn delete_session(&self, session_id: &str) -> bool {
        let removed = self.sessions.remove(session_id).is_some();
        if removed {
            tracing::debug!("Session deleted");
        }
        removed
    }

    /// Get session count (for monitoring)
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

fn is_expired(created_at: chrono::DateTime<Utc>, ttl: Duration) -> bool {
    Utc::now()
        .signed_duration_since(created_at)
        .to_std()
        .unwrap_or(Duration::ZERO)
        >= ttl
}

/// Background task that periodically cleans up expired logins and sessions
async fn cleanup_expired(
    pending: Arc<DashMap<String, PendingLogin>>,
    sessions: Arc<DashMap<String, UserSession>>,
    state_ttl: Duration,
    session_ttl: Duration,
) {
    let mut interval = tokio::time::interval(Duration::from_secs(60));
    loop {
        interval.tick().await;
        let initial_count = pending.len() + sessions.len();

        pending.retain(|_, login| !is_expired(login.created_at, state_ttl));
        sessions.retain(|_, session| {
            if is_expired(session.created_at, session_ttl) {
                tracing::debug!(user_id = %session.user.id, "Cleaning up expired session");
                false
            } else {
                true
            }
        });

        let cleaned = initial_count.saturating_sub(pending.len() + sessions.len());
        if cleaned > 0 {
            tracing::info!(
                "Cleaned up {} expired entries, {} sessions remaining",
                cleaned,
                sessions.len()
            );
        }
    }
}
