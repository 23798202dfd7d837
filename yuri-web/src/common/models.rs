use serde::{Deserialize, Serialize};

/// Discord profile as exposed to the browser and the `/api/auth/check` endpoint.
///
/// The Discord access token is deliberately not part of this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub discriminator: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// Unix timestamp in milliseconds
    pub logged_in_at: i64,
}

impl UserProfile {
    /// Uppercased first character of the username, used as a text avatar
    pub fn initial(&self) -> String {
        self.username
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default()
    }
}

/// Body of `GET /api/auth/check`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthStatus {
    pub logged_in: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserProfile>,
}

impl AuthStatus {
    pub fn logged_out() -> Self {
        Self {
            logged_in: false,
            user: None,
        }
    }

    pub fn logged_in(user: UserProfile) -> Self {
        Self {
            logged_in: true,
            user: Some(user),
        }
    }
}

/// Body of `POST /api/auth/logout`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub success: bool,
}
