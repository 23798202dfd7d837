#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, HeaderMap, Request, Response, StatusCode},
    response::IntoResponse,
    routing,
    Form, Json, Router,
};
use serde_json::json;
use std::collections::HashMap;
use std::path::PathBuf;
use tower::ServiceExt;

use yuri_web::server::{
    config::{OAuthConfiguration, ServerConfiguration},
    router, AppState, Configuration,
};

pub const CLIENT_ID: &str = "1234567890";
pub const CLIENT_SECRET: &str = "test-secret";
pub const REDIRECT_URI: &str = "http://localhost:3000/auth/discord/callback";
pub const ACCESS_TOKEN: &str = "mock-access-token";

/// Authorization codes understood by the mock Discord
pub const GOOD_CODE: &str = "good-code";
pub const BAD_CODE: &str = "bad-code";
pub const REVOKED_CODE: &str = "revoked-code";

async fn mock_token(Form(form): Form<HashMap<String, String>>) -> axum::response::Response {
    let credentials_ok = form.get("client_id").map(String::as_str) == Some(CLIENT_ID)
        && form.get("client_secret").map(String::as_str) == Some(CLIENT_SECRET)
        && form.get("grant_type").map(String::as_str) == Some("authorization_code")
        && form.get("redirect_uri").map(String::as_str) == Some(REDIRECT_URI);

    let access_token = match form.get("code").map(String::as_str) {
        Some(GOOD_CODE) if credentials_ok => ACCESS_TOKEN,
        Some(REVOKED_CODE) if credentials_ok => "revoked-token",
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "invalid_grant",
                    "error_description": "Invalid \"code\" in request."
                })),
            )
                .into_response()
        }
    };

    Json(json!({
        "access_token": access_token,
        "token_type": "Bearer",
        "expires_in": 604800,
        "refresh_token": "mock-refresh-token",
        "scope": "identify email"
    }))
    .into_response()
}

async fn mock_users_me(headers: HeaderMap) -> axum::response::Response {
    let authorized = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        == Some(format!("Bearer {}", ACCESS_TOKEN).as_str());

    if !authorized {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "401: Unauthorized", "code": 0 })),
        )
            .into_response();
    }

    Json(json!({
        "id": "80351110224678912",
        "username": "Nelly",
        "discriminator": "0",
        "avatar": "8342729096ea3675442027381ff50dfe",
        "verified": true,
        "email": "nelly@discord.com"
    }))
    .into_response()
}

/// Serve a stand-in for the Discord API and return its base URL
pub async fn spawn_mock_discord() -> String {
    let app = Router::new()
        .route("/oauth2/token", routing::post(mock_token))
        .route("/users/@me", routing::get(mock_users_me));

    spawn(app).await
}

/// Serve `app` on an ephemeral local port and return its base URL
pub async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

pub fn configuration(api_base_url: &str) -> Configuration {
    Configuration {
        server: ServerConfiguration {
            host: "127.0.0.1".to_string(),
            port: 0,
            static_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("public"),
            secure_cookies: false,
            session_ttl_seconds: 7 * 24 * 60 * 60,
        },
        oauth: OAuthConfiguration {
            client_id: CLIENT_ID.to_string(),
            client_secret: CLIENT_SECRET.to_string(),
            redirect_uri: REDIRECT_URI.to_string(),
            api_base_url: api_base_url.to_string(),
        },
    }
}

/// Site router backed by a fresh mock Discord
pub async fn test_app() -> (Router, AppState) {
    let discord = spawn_mock_discord().await;
    let state = AppState::new(&configuration(&discord)).unwrap();
    (router(state.clone()), state)
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    send(
        app,
        Request::builder().uri(uri).body(Body::empty()).unwrap(),
    )
    .await
}

pub async fn get_with_cookie(app: &Router, uri: &str, cookie: &str) -> Response<Body> {
    send(
        app,
        Request::builder()
            .uri(uri)
            .header(header::COOKIE, cookie)
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

pub fn set_cookies(response: &Response<Body>) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect()
}

/// Value of cookie `name` in the response's `Set-Cookie` headers
pub fn cookie_value(response: &Response<Body>, name: &str) -> Option<String> {
    set_cookies(response).into_iter().find_map(|c| {
        c.split(';')
            .next()
            .and_then(|pair| pair.split_once('='))
            .filter(|(key, _)| *key == name)
            .map(|(_, value)| value.to_string())
    })
}

pub fn location(response: &Response<Body>) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string()
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_str(&body_string(response).await).unwrap()
}

/// Start a login and return the state token from the cookie
pub async fn begin_login(app: &Router, uri: &str) -> String {
    let response = get(app, uri).await;
    cookie_value(&response, "oauth_state").unwrap()
}
