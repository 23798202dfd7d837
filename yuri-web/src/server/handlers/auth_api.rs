use axum::{
    extract::State,
    http::{header::SET_COOKIE, HeaderMap},
    response::IntoResponse,
    Json,
};

use crate::common::{AuthStatus, LogoutResponse, SESSION_COOKIE};
use crate::server::{cookies, error::ServerError, AppState};

/// `GET /api/auth/check`
pub async fn check_auth(State(state): State<AppState>, headers: HeaderMap) -> Json<AuthStatus> {
    let session = cookies::read_cookie(&headers, SESSION_COOKIE)
        .and_then(|id| state.session_store.get_session(id));

    match session {
        Some(session) => Json(AuthStatus::logged_in(session.user)),
        None => Json(AuthStatus::logged_out()),
    }
}

/// `POST /api/auth/logout`
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ServerError> {
    if let Some(session_id) = cookies::read_cookie(&headers, SESSION_COOKIE) {
        state.session_store.delete_session(session_id);
    }

    let cleared = cookies::clear_cookie(SESSION_COOKIE, state.config.secure_cookies)?;

    Ok(([(SET_COOKIE, cleared)], Json(LogoutResponse { success: true })))
}
