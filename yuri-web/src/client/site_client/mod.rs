mod models;

use crate::common::{AuthStatus, LogoutResponse, SESSION_COOKIE};
pub use models::SiteClientError;
use reqwest::{header, Client, RequestBuilder};
use std::time::Duration;

/// Client for the site's JSON auth API (`/api/auth/*`)
pub struct SiteClient {
    http_client: Client,
    server_url: String,
    session_id: Option<String>,
}

impl SiteClient {
    pub fn new(server_url: impl Into<String>) -> Result<Self, SiteClientError> {
        let http_client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            http_client,
            server_url: server_url.into().trim_end_matches('/').to_string(),
            session_id: None,
        })
    }

    /// Send `session_id` as the session cookie on subsequent calls
    pub fn with_session(mut self, session_id: impl Into<String>) -> Result<Self, SiteClientError> {
        let session_id = session_id.into();
        if session_id
            .chars()
            .any(|c| c == ';' || c == ',' || c.is_whitespace() || c.is_control())
        {
            return Err(SiteClientError::InvalidSession);
        }
        self.session_id = Some(session_id);
        Ok(self)
    }

    pub async fn check_auth(&self) -> Result<AuthStatus, SiteClientError> {
        let url = format!("{}/api/auth/check", self.server_url);

        let status = self
            .with_cookie(self.http_client.get(&url))
            .send()
            .await?
            .error_for_status()?
            .json::<AuthStatus>()
            .await?;

        Ok(status)
    }

    /// End the server-side session
    pub async fn logout(&self) -> Result<(), SiteClientError> {
        let url = format!("{}/api/auth/logout", self.server_url);

        let resp = self
            .with_cookie(self.http_client.post(&url))
            .send()
            .await?
            .error_for_status()?
            .json::<LogoutResponse>()
            .await?;

        if !resp.success {
            return Err(SiteClientError::ServerError("Logout was not acknowledged".into()));
        }

        Ok(())
    }

    fn with_cookie(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.session_id {
            Some(id) => builder.header(header::COOKIE, format!("{}={}", SESSION_COOKIE, id)),
            None => builder,
        }
    }
}
