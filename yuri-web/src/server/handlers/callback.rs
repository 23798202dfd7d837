use axum::{
    extract::{Query, State},
    http::{header::SET_COOKIE, HeaderMap},
    response::{AppendHeaders, Html, IntoResponse, Response},
};
use chrono::Utc;
use tracing::Instrument;

use crate::common::{sanitize_redirect, UserProfile, SESSION_COOKIE, STATE_COOKIE};
use crate::server::{
    cookies::{self, CookieOptions},
    error::ServerError,
    models::CallbackParams,
    pages, AppState,
};

/// `GET /auth/discord/callback`: finish the login Discord redirected back from
pub async fn discord_callback(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<CallbackParams>,
) -> Result<Response, ServerError> {
    let span = tracing::info_span!("oauth_callback");
    handle_callback(state, headers, params)
        .instrument(span)
        .await
}

async fn handle_callback(
    state: AppState,
    headers: HeaderMap,
    params: CallbackParams,
) -> Result<Response, ServerError> {
    // Validate state against the cookie set by /auth/discord
    let saved_state = cookies::read_cookie(&headers, STATE_COOKIE);
    let csrf_state = match (params.state.as_deref(), saved_state) {
        (Some(received), Some(saved)) if !received.is_empty() && received == saved => {
            received.to_string()
        }
        (received, saved) => {
            tracing::warn!(
                state_present = received.is_some(),
                cookie_present = saved.is_some(),
                "State mismatch or missing"
            );
            return Err(ServerError::StateMismatch);
        }
    };

    let secure = state.config.secure_cookies;
    let clear_state = cookies::clear_cookie(STATE_COOKIE, secure)?;

    let pending = state.session_store.take_pending(&csrf_state);
    let redirect = sanitize_redirect(
        pending
            .as_ref()
            .and_then(|p| p.redirect.as_deref())
            .or(params.redirect.as_deref()),
    );

    let outcome = complete_login(&state, params).await;

    // The state cookie is spent whether or not the login succeeded
    let response = match outcome {
        Ok((session_id, user)) => {
            let session_cookie = cookies::set_cookie(
                SESSION_COOKIE,
                &session_id,
                CookieOptions::session(state.session_ttl(), secure),
            )?;
            let page = pages::login_success_page(&user, &redirect)
                .map_err(|e| ServerError::Internal(format!("Failed to render page: {}", e)))?;

            tracing::info!(user_id = %user.id, redirect = %redirect, "Login successful");

            (
                AppendHeaders([(SET_COOKIE, clear_state), (SET_COOKIE, session_cookie)]),
                Html(page),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "OAuth callback failed");
            (AppendHeaders([(SET_COOKIE, clear_state)]), e).into_response()
        }
    };

    Ok(response)
}

/// Code exchange, profile fetch and session creation
async fn complete_login(
    state: &AppState,
    params: CallbackParams,
) -> Result<(String, UserProfile), ServerError> {
    // Check for OAuth errors
    if let Some(error) = params.error {
        let detail = params.error_description.unwrap_or(error);
        return Err(ServerError::OAuth(format!(
            "Discord returned an error: {}",
            detail
        )));
    }

    // Get authorization code
    let code = params
        .code
        .filter(|c| !c.is_empty())
        .ok_or_else(|| ServerError::OAuth("Missing authorization code".to_string()))?;

    tracing::debug!("Exchanging code for token");
    let access_token = state.oauth_client.exchange_code_for_token(&code).await?;

    let discord_user = state
        .discord_client
        .fetch_current_user(&access_token)
        .await?;

    let user = discord_user.into_profile(Utc::now().timestamp_millis());
    let session_id = state
        .session_store
        .create_session(user.clone(), access_token);

    Ok((session_id, user))
}
