use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use super::pages;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("State mismatch or missing")]
    StateMismatch,

    #[error("Not found")]
    NotFound,

    #[error("OAuth error: {0}")]
    OAuth(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, page) = match &self {
            ServerError::StateMismatch => (StatusCode::BAD_REQUEST, pages::auth_error_page()),
            ServerError::NotFound => (StatusCode::NOT_FOUND, pages::not_found_page()),
            ServerError::OAuth(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                pages::login_error_page(msg),
            ),
            ServerError::Configuration(_) | ServerError::Internal(_) => {
                tracing::error!("Server error: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    pages::server_error_page(),
                )
            }
        };

        (status, Html(page)).into_response()
    }
}

impl
    From<
        oauth2::RequestTokenError<
            reqwest::Error,
            oauth2::StandardErrorResponse<oauth2::basic::BasicErrorResponseType>,
        >,
    > for ServerError
{
    fn from(
        err: oauth2::RequestTokenError<
            reqwest::Error,
            oauth2::StandardErrorResponse<oauth2::basic::BasicErrorResponseType>,
        >,
    ) -> Self {
        let detail = match &err {
            oauth2::RequestTokenError::ServerResponse(resp) => resp.to_string(),
            oauth2::RequestTokenError::Parse(e, _) => e.to_string(),
            other => other.to_string(),
        };
        ServerError::OAuth(format!("Token exchange failed: {}", detail))
    }
}

impl From<reqwest::Error> for ServerError {
    fn from(err: reqwest::Error) -> Self {
        ServerError::OAuth(format!("Discord request failed: {}", err))
    }
}

impl From<config::ConfigError> for ServerError {
    fn from(err: config::ConfigError) -> Self {
        ServerError::Configuration(format!("Configuration error: {}", err))
    }
}
