pub mod config;
pub mod cookies;
pub mod error;
pub mod handlers;
pub mod models;
pub mod pages;
pub mod router;
pub mod services;

pub use self::config::Configuration;
pub use error::ServerError;
pub use router::router;

use self::config::ServerConfiguration;
use services::{DiscordClient, OAuthClient, SessionStore};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub session_store: Arc<SessionStore>,
    pub oauth_client: Arc<OAuthClient>,
    pub discord_client: Arc<DiscordClient>,
    pub config: Arc<ServerConfiguration>,
}

impl AppState {
    /// Build the services described by `configuration`.
    ///
    /// Must be called inside a tokio runtime: the session store spawns its
    /// cleanup task.
    pub fn new(configuration: &Configuration) -> Result<Self, ServerError> {
        Ok(Self {
            session_store: Arc::new(SessionStore::new(
                configuration.server.session_ttl_seconds,
            )),
            oauth_client: Arc::new(OAuthClient::new(&configuration.oauth)?),
            discord_client: Arc::new(DiscordClient::new(&configuration.oauth)?),
            config: Arc::new(configuration.server.clone()),
        })
    }

    pub fn session_ttl(&self) -> chrono::Duration {
        self.config.session_ttl()
    }
}
