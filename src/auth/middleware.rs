use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, header::COOKIE, request::Parts},
    response::{IntoResponse, Response},
};

use crate::{app_state::AppState, auth::dtos::ErrorResponse};

/// Cookie the auth provider stores the session token in.
pub const SESSION_COOKIE: &str = "session";

/// The caller's identity as the auth provider asserted it. The rest of the
/// system only ever looks at presence (gate) and email (display).
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub email: Option<String>,
}

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AuthError;

    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let token = session_cookie(parts);
        let sessions = state.sessions.clone();

        async move {
            let token = token.ok_or(AuthError::MissingSession)?;

            let claims = sessions
                .verify(&token)
                .map_err(|_| AuthError::InvalidSession)?;

            Ok(AuthenticatedUser {
                user_id: claims.sub,
                email: claims.email,
            })
        }
    }
}

fn session_cookie(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|header| header.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.to_string())
}

#[derive(Debug)]
pub enum AuthError {
    MissingSession,
    InvalidSession,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::MissingSession => (StatusCode::UNAUTHORIZED, "Missing session cookie"),
            AuthError::InvalidSession => (StatusCode::UNAUTHORIZED, "Invalid or expired session"),
        };

        (
            status,
            Json(ErrorResponse {
                error: message.to_string(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::session::{SessionClaims, SessionVerifier};
    use crate::completion::MockCompletionBackend;
    use axum::{
        Router,
        body::{Body, to_bytes},
        http::Request,
        response::Json as ResponseJson,
        routing::get,
    };
    use chrono::{Duration, Utc};
    use jsonwebtoken::{EncodingKey, Header, encode};
    use serde_json::{Value, json};
    use std::sync::Arc;
    use tower::ServiceExt;
    use uuid::Uuid;

    const TEST_SECRET: &str = "test-auth-secret";

    fn create_test_app() -> Router {
        let state = AppState {
            completions: Arc::new(MockCompletionBackend::new()),
            sessions: Arc::new(SessionVerifier::new(TEST_SECRET)),
        };

        Router::new()
            .route("/protected", get(protected_handler))
            .with_state(state)
    }

    async fn protected_handler(user: AuthenticatedUser) -> ResponseJson<Value> {
        Json(json!({
            "user_id": user.user_id,
            "email": user.email,
        }))
    }

    fn mint_session_token(user_id: &str, email: Option<&str>, expires_in: Duration) -> String {
        let now = Utc::now();
        let claims = SessionClaims {
            sub: user_id.to_string(),
            email: email.map(str::to_string),
            exp: (now + expires_in).timestamp() as usize,
            iat: now.timestamp() as usize,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(TEST_SECRET.as_ref()),
        )
        .expect("Failed to mint session token")
    }

    fn request_with_cookie(cookie: &str) -> Request<Body> {
        Request::builder()
            .method("GET")
            .uri("/protected")
            .header(COOKIE, cookie)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn missing_cookie_is_unauthorized() {
        let app = create_test_app();
        let request = Request::builder()
            .method("GET")
            .uri("/protected")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn unrelated_cookies_are_unauthorized() {
        let app = create_test_app();
        let response = app
            .oneshot(request_with_cookie("theme=dark; lang=en"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn tampered_token_is_unauthorized() {
        let app = create_test_app();
        let response = app
            .oneshot(request_with_cookie("session=not.a.real.token"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn expired_token_is_unauthorized() {
        let app = create_test_app();
        let token = mint_session_token(
            &Uuid::new_v4().to_string(),
            None,
            Duration::hours(-2), // already expired, past the leeway
        );
        let response = app
            .oneshot(request_with_cookie(&format!("session={token}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn valid_session_reaches_the_handler() {
        let app = create_test_app();
        let user_id = Uuid::new_v4().to_string();
        let token = mint_session_token(&user_id, Some("user@example.com"), Duration::hours(1));

        let response = app
            .oneshot(request_with_cookie(&format!(
                "theme=dark; session={token}; lang=en"
            )))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["user_id"], user_id);
        assert_eq!(json["email"], "user@example.com");
    }
}
