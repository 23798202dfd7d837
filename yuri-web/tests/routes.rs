#![cfg(feature = "server")]

mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use yuri_web::server::{handlers, router::MAX_REQUEST_BODY_SIZE};
use yuri_web::UserProfile;

use common::*;

fn user() -> UserProfile {
    UserProfile {
        id: "1".to_string(),
        username: "yuri".to_string(),
        discriminator: None,
        avatar: None,
        email: None,
        logged_in_at: 0,
    }
}

#[tokio::test]
async fn serves_home_and_login_pages() {
    let (app, _) = test_app().await;

    let home = get(&app, "/").await;
    assert_eq!(home.status(), StatusCode::OK);
    assert!(body_string(home).await.contains("<title>YURI BOT</title>"));

    let login = get(&app, "/login").await;
    assert_eq!(login.status(), StatusCode::OK);
    assert!(body_string(login).await.contains("/auth/discord"));
}

#[tokio::test]
async fn serves_static_assets() {
    let (app, _) = test_app().await;

    let script = get(&app, "/js/auth.js").await;
    assert_eq!(script.status(), StatusCode::OK);
    assert!(body_string(script).await.contains("redirectAfterLogin"));
}

#[tokio::test]
async fn unknown_paths_get_the_404_page() {
    let (app, _) = test_app().await;

    let response = get(&app, "/does-not-exist.html").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_string(response)
        .await
        .contains("404 - Page Not Found"));
}

#[tokio::test]
async fn protected_page_redirects_to_login_with_destination() {
    let (app, _) = test_app().await;

    let response = get(&app, "/premium.html?plan=gold").await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        location(&response),
        "/login?redirect=%2Fpremium.html%3Fplan%3Dgold"
    );
}

#[tokio::test]
async fn protected_page_served_with_valid_session() {
    let (app, state) = test_app().await;
    let session_id = state
        .session_store
        .create_session(user(), "token".to_string());

    let response = get_with_cookie(
        &app,
        "/premium.html",
        &format!("theme=dark; yuri_session={}", session_id),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("YURI BOT Premium"));
}

#[tokio::test]
async fn protected_page_cannot_be_reached_through_encoded_paths() {
    let (app, _) = test_app().await;

    for path in [
        "/premium%2Ehtml",
        "/premium.htm%6C",
        "/%70remium.html",
        "/premium.html/.",
        "//premium.html",
    ] {
        let response = get(&app, path).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{}", path);
        assert!(location(&response).starts_with("/login?redirect="), "{}", path);
    }
}

#[tokio::test]
async fn protected_page_rejects_unknown_session() {
    let (app, _) = test_app().await;

    let response = get_with_cookie(&app, "/premium.html", "yuri_session=made-up").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn auth_check_without_session_reports_logged_out() {
    let (app, _) = test_app().await;

    let response = get(&app, "/api/auth/check").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({ "loggedIn": false })
    );
}

#[tokio::test]
async fn logout_without_session_still_succeeds() {
    let (app, _) = test_app().await;

    let response = send(
        &app,
        Request::builder()
            .method("POST")
            .uri("/api/auth/logout")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get(header::SET_COOKIE)
        .is_some());
    assert_eq!(body_json(response).await["success"], true);
}

#[tokio::test]
async fn oversized_request_bodies_are_refused() {
    let (app, _) = test_app().await;
    let body = vec![b'x'; MAX_REQUEST_BODY_SIZE + 1];

    let response = send(
        &app,
        Request::builder()
            .method("POST")
            .uri("/api/auth/logout")
            .header(header::CONTENT_LENGTH, body.len())
            .body(Body::from(body))
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn health_reports_version() {
    let (app, _) = test_app().await;

    let body = body_json(get(&app, "/health").await).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[test]
fn panics_render_the_500_page() {
    let response = handlers::panic_page(Box::new("boom"));
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
