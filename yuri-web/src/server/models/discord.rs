use serde::Deserialize;

use crate::common::UserProfile;

/// Fields read from Discord's `GET /users/@me`
#[derive(Debug, Clone, Deserialize)]
pub struct DiscordUser {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub discriminator: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl DiscordUser {
    pub fn into_profile(self, logged_in_at: i64) -> UserProfile {
        UserProfile {
            id: self.id,
            username: self.username,
            discriminator: self.discriminator,
            avatar: self.avatar,
            email: self.email,
            logged_in_at,
        }
    }
}
