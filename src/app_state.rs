use std::sync::Arc;

use crate::auth::session::SessionVerifier;
use crate::completion::{CompletionBackend, GeminiClient};
use crate::config::Config;

/// Process-wide shared state. Both members are stateless and constructed
/// once at startup; the completion backend sits behind a trait object so
/// tests can swap in a mock.
#[derive(Clone)]
pub struct AppState {
    pub completions: Arc<dyn CompletionBackend + Send + Sync>,
    pub sessions: Arc<SessionVerifier>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            completions: Arc::new(GeminiClient::from_config(config)),
            sessions: Arc::new(SessionVerifier::new(config.auth_jwt_secret())),
        }
    }
}
