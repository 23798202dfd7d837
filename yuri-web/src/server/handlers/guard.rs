use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::common::{is_protected_page, SESSION_COOKIE};
use crate::server::{cookies, AppState};

/// Send visitors without a session away from protected pages.
///
/// The original path and query travel along as `/login?redirect=...` so the
/// login can return there.
pub async fn require_login(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let path = request.uri().path();
    if !is_protected_page(path) {
        return next.run(request).await;
    }

    let logged_in = cookies::read_cookie(request.headers(), SESSION_COOKIE)
        .and_then(|id| state.session_store.get_session(id))
        .is_some();
    if logged_in {
        return next.run(request).await;
    }

    let target = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or(path);
    let encoded: String = url::form_urlencoded::byte_serialize(target.as_bytes()).collect();

    tracing::debug!(page = %path, "Protected page requested without session");

    Redirect::to(&format!("/login?redirect={}", encoded)).into_response()
}
