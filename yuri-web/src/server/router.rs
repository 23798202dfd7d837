use axum::{
    handler::HandlerWithoutStateExt,
    middleware,
    routing::{get, get_service, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    limit::RequestBodyLimitLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use super::{handlers, AppState};

/// Largest request body accepted; the only body the site reads is the logout POST
pub const MAX_REQUEST_BODY_SIZE: usize = 16 * 1024;

/// All routes of the site.
///
/// Paths without a route are served from the static directory; anything not
/// found there gets the 404 page.
pub fn router(state: AppState) -> Router {
    let static_dir = state.config.static_dir.clone();

    let static_files =
        ServeDir::new(&static_dir).not_found_service(handlers::not_found.into_service());

    Router::new()
        .route(
            "/",
            get_service(ServeFile::new(static_dir.join("index.html"))),
        )
        .route(
            "/login",
            get_service(ServeFile::new(static_dir.join("login.html"))),
        )
        .route("/auth/discord", get(handlers::discord_login))
        .route("/auth/discord/callback", get(handlers::discord_callback))
        .route("/api/auth/check", get(handlers::check_auth))
        .route("/api/auth/logout", post(handlers::logout))
        .route("/health", get(handlers::health_check))
        .fallback_service(static_files)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            handlers::require_login,
        ))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CatchPanicLayer::custom(handlers::panic_page))
                .layer(RequestBodyLimitLayer::new(MAX_REQUEST_BODY_SIZE)),
        )
        .with_state(state)
}
