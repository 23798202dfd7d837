use reqwest::Client;
use std::time::Duration;

use crate::server::config::OAuthConfiguration;
use crate::server::error::ServerError;
use crate::server::models::DiscordUser;

/// Reads the logged-in user's profile from the Discord REST API
pub struct DiscordClient {
    http_client: Client,
    api_base_url: String,
}

impl DiscordClient {
    pub fn new(config: &OAuthConfiguration) -> Result<Self, ServerError> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| ServerError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            api_base_url: config.api_base_url.clone(),
        })
    }

    /// `GET /users/@me` with the user's bearer token
    pub async fn fetch_current_user(&self, access_token: &str) -> Result<DiscordUser, ServerError> {
        let url = format!("{}/users/@me", self.api_base_url);

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(access_token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, body = %body, "User fetch failed");
            return Err(ServerError::OAuth(format!("User fetch failed: {}", status.as_u16())));
        }

        let user = response.json::<DiscordUser>().await?;
        tracing::debug!(user_id = %user.id, "Fetched Discord user");

        Ok(user)
    }
}
