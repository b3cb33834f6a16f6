mod helpers;

use std::sync::Arc;

use axum::{
    body::{Body, to_bytes},
    http::{Request, StatusCode, header::COOKIE},
};
use tower::ServiceExt;
use wiremock::MockServer;

use repurpose::completion::GeminiClient;

async fn test_app() -> (axum::Router, MockServer) {
    let gemini = MockServer::start().await;
    let backend = Arc::new(GeminiClient::new(
        "test-key",
        gemini.uri(),
        "gemini-1.5-flash-latest",
    ));
    (helpers::test_app(backend), gemini)
}

#[tokio::test]
async fn me_returns_the_session_email() {
    let (app, _gemini) = test_app().await;

    let request = Request::builder()
        .uri("/api/me")
        .header(COOKIE, helpers::session_cookie("alice@example.com"))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["email"], "alice@example.com");
}

#[tokio::test]
async fn me_without_session_is_unauthorized() {
    let (app, _gemini) = test_app().await;

    let request = Request::builder()
        .uri("/api/me")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn me_with_forged_session_is_unauthorized() {
    let (app, _gemini) = test_app().await;

    let request = Request::builder()
        .uri("/api/me")
        .header(COOKIE, "session=forged.session.token")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
