use chrono::{DateTime, Utc};

use crate::common::UserProfile;

/// Login started at `/auth/discord` and not yet completed, keyed by state token
#[derive(Debug, Clone)]
pub struct PendingLogin {
    pub redirect: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Server-held session, keyed by the `yuri_session` cookie
#[derive(Debug, Clone)]
pub struct UserSession {
    pub user: UserProfile,
    pub discord_token: String,
    pub created_at: DateTime<Utc>,
}
