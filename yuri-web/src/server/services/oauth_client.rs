use oauth2::{
    basic::BasicClient, AuthType, AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken,
    EndpointNotSet, EndpointSet, HttpRequest, HttpResponse, RedirectUrl, Scope, TokenResponse,
    TokenUrl,
};

use std::time::Duration;

use super::random_token;
use crate::server::config::OAuthConfiguration;
use crate::server::error::ServerError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// oauth2 speaks its own http types; forward them through the shared reqwest client
async fn send_request(
    client: reqwest::Client,
    request: HttpRequest,
) -> Result<HttpResponse, reqwest::Error> {
    let mut builder = client
        .request(request.method().clone(), request.uri().to_string())
        .body(request.body().clone());

    for (name, value) in request.headers() {
        builder = builder.header(name.as_str(), value.as_bytes());
    }

    let response = builder.send().await?;
    let status = response.status();
    let body = response.bytes().await?.to_vec();

    let mut http_response = HttpResponse::new(body);
    *http_response.status_mut() = status;

    Ok(http_response)
}

const SCOPES: [&str; 2] = ["identify", "email"];
const STATE_BYTES: usize = 24;

type DiscordOAuthClient =
    BasicClient<EndpointSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;

pub struct OAuthClient {
    http_client: reqwest::Client,
    client_id: String,
    client_secret: String,
    auth_url: AuthUrl,
    token_url: TokenUrl,
    redirect_url: RedirectUrl,
}

impl OAuthClient {
    pub fn new(config: &OAuthConfiguration) -> Result<Self, ServerError> {
        let auth_url = AuthUrl::new(format!("{}/oauth2/authorize", config.api_base_url))
            .map_err(|e| ServerError::Configuration(format!("Invalid auth URL: {}", e)))?;

        let token_url = TokenUrl::new(format!("{}/oauth2/token", config.api_base_url))
            .map_err(|e| ServerError::Configuration(format!("Invalid token URL: {}", e)))?;

        let redirect_url = RedirectUrl::new(config.redirect_uri.clone())
            .map_err(|e| ServerError::Configuration(format!("Invalid redirect URI: {}", e)))?;

        let http_client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ServerError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            auth_url,
            token_url,
            redirect_url,
        })
    }

    // Discord expects the client credentials in the form body
    fn client(&self) -> DiscordOAuthClient {
        BasicClient::new(ClientId::new(self.client_id.clone()))
            .set_client_secret(ClientSecret::new(self.client_secret.clone()))
            .set_auth_uri(self.auth_url.clone())
            .set_token_uri(self.token_url.clone())
            .set_redirect_uri(self.redirect_url.clone())
            .set_auth_type(AuthType::RequestBody)
    }

    /// Build the Discord authorize URL carrying `state` for CSRF protection
    pub fn build_authorization_url(&self, state: &str) -> String {
        let csrf_token = CsrfToken::new(state.to_string());
        let (auth_url, _) = self
            .client()
            .authorize_url(|| csrf_token)
            .add_scopes(SCOPES.iter().map(|s| Scope::new(s.to_string())))
            .add_extra_param("prompt", "consent")
            .url();
        auth_url.to_string()
    }

    /// Exchange an authorization code for an access token
    pub async fn exchange_code_for_token(&self, code: &str) -> Result<String, ServerError> {
        let send = |request| send_request(self.http_client.clone(), request);
        let token_result = self
            .client()
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .request_async(&send)
            .await?;

        tracing::debug!(
            expires_in = ?token_result.expires_in(),
            "Successfully exchanged code for access token"
        );

        Ok(token_result.access_token().secret().to_string())
    }

    /// Generate a random CSRF state token
    pub fn generate_state_token() -> String {
        random_token(STATE_BYTES)
    }
}
