mod config;
mod login_state;
pub mod navbar;
pub mod site_client;
mod storage;

pub use self::config::Settings;
pub use login_state::{LoginState, Navigation};
pub use site_client::SiteClient;
pub use storage::{BrowserStorage, MemoryStorage};

use crate::error::AuthError;

/// Build a [`SiteClient`] from `client.toml` / `YURI_WEB__*` settings
pub fn connect() -> Result<SiteClient, AuthError> {
    let settings = Settings::new()?;

    settings.validate().map_err(|e| {
        tracing::error!("Configuration validation failed: {}", e);
        AuthError::Configuration(e)
    })?;

    Ok(SiteClient::new(settings.server_url)?)
}
