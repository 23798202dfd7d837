mod auth_api;
mod callback;
mod guard;
mod initiate;

pub use auth_api::{check_auth, logout};
pub use callback::discord_callback;
pub use guard::require_login;
pub use initiate::discord_login;

use crate::server::{error::ServerError, models::HealthResponse, pages};
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use std::any::Any;

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Fallback for paths with no route and no static file
pub async fn not_found() -> ServerError {
    ServerError::NotFound
}

/// Render a handler panic as the generic 500 page
pub fn panic_page(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(panic = %detail, "Handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html(pages::server_error_page()),
    )
        .into_response()
}
