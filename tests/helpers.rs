use std::sync::Arc;

use axum::Router;
use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};

use repurpose::{
    app,
    app_state::AppState,
    auth::session::{SessionClaims, SessionVerifier},
    completion::CompletionBackend,
};

pub const TEST_AUTH_SECRET: &str = "integration-test-secret";

/// The real router with a caller-supplied completion backend.
pub fn test_app(completions: Arc<dyn CompletionBackend + Send + Sync>) -> Router {
    let state = AppState {
        completions,
        sessions: Arc::new(SessionVerifier::new(TEST_AUTH_SECRET)),
    };
    app::router(state)
}

/// A `Cookie` header value carrying a freshly minted provider session.
pub fn session_cookie(email: &str) -> String {
    let now = Utc::now();
    let claims = SessionClaims {
        sub: uuid::Uuid::new_v4().to_string(),
        email: Some(email.to_string()),
        exp: (now + Duration::hours(1)).timestamp() as usize,
        iat: now.timestamp() as usize,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_AUTH_SECRET.as_ref()),
    )
    .expect("Failed to mint session token");
    format!("session={token}")
}
