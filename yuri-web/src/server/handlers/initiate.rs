use axum::{
    extract::{Query, State},
    http::header::SET_COOKIE,
    response::{IntoResponse, Redirect, Response},
};

use crate::common::{sanitize_redirect, STATE_COOKIE};
use crate::server::{
    cookies::{self, CookieOptions},
    error::ServerError,
    models::LoginParams,
    services::OAuthClient,
    AppState,
};

/// `GET /auth/discord`: start a login and send the browser to Discord
pub async fn discord_login(
    State(state): State<AppState>,
    Query(params): Query<LoginParams>,
) -> Result<Response, ServerError> {
    // Generate CSRF state token
    let csrf_state = OAuthClient::generate_state_token();

    let redirect = params
        .redirect
        .as_deref()
        .map(|target| sanitize_redirect(Some(target)));

    state
        .session_store
        .begin_login(csrf_state.clone(), redirect.clone());

    let cookie = cookies::set_cookie(
        STATE_COOKIE,
        &csrf_state,
        CookieOptions::state(state.config.secure_cookies),
    )?;

    let auth_url = state.oauth_client.build_authorization_url(&csrf_state);

    tracing::info!(
        redirect = redirect.as_deref().unwrap_or("/"),
        "Redirecting to Discord authorization"
    );

    Ok(([(SET_COOKIE, cookie)], Redirect::to(&auth_url)).into_response())
}
