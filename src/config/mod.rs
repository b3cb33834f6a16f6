//! Configuration handling for the application.
//!
//! Everything comes from environment variables. The two credentials
//! (`GEMINI_API_KEY` for the model provider, `AUTH_JWT_SECRET` for the auth
//! provider) have no defaults: their absence makes `Config::from_env` fail,
//! which the server binary treats as a fatal startup condition rather than a
//! per-request error.

use std::env;

use thiserror::Error;

/// Environment variable names. Keeping them public lets tests and deployment
/// tooling refer to them without restating the strings.
pub const ENV_BIND_ADDR: &str = "BIND_ADDR";
pub const ENV_GEMINI_API_KEY: &str = "GEMINI_API_KEY";
pub const ENV_GEMINI_BASE_URL: &str = "GEMINI_BASE_URL";
pub const ENV_GEMINI_MODEL: &str = "GEMINI_MODEL";
pub const ENV_AUTH_JWT_SECRET: &str = "AUTH_JWT_SECRET";

/// Default development values used when the optional variables are absent.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash-latest";

/// Application runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    bind_addr: String,
    gemini_api_key: String,
    gemini_base_url: String,
    gemini_model: String,
    auth_jwt_secret: String,
}

impl Config {
    /// Create a new config explicitly.
    pub fn new(
        bind_addr: impl Into<String>,
        gemini_api_key: impl Into<String>,
        gemini_base_url: impl Into<String>,
        gemini_model: impl Into<String>,
        auth_jwt_secret: impl Into<String>,
    ) -> Self {
        Self {
            bind_addr: bind_addr.into(),
            gemini_api_key: gemini_api_key.into(),
            gemini_base_url: gemini_base_url.into(),
            gemini_model: gemini_model.into(),
            auth_jwt_secret: auth_jwt_secret.into(),
        }
    }

    /// Load from environment variables.
    ///
    /// The bind address, provider base URL and model id fall back to
    /// development defaults; the credentials do not.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr = env::var(ENV_BIND_ADDR).unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let gemini_api_key = require(ENV_GEMINI_API_KEY)?;
        let gemini_base_url =
            env::var(ENV_GEMINI_BASE_URL).unwrap_or_else(|_| DEFAULT_GEMINI_BASE_URL.to_string());
        let gemini_model =
            env::var(ENV_GEMINI_MODEL).unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string());
        let auth_jwt_secret = require(ENV_AUTH_JWT_SECRET)?;

        Ok(Self {
            bind_addr,
            gemini_api_key,
            gemini_base_url,
            gemini_model,
            auth_jwt_secret,
        })
    }

    /// TCP bind address (host:port) for the HTTP server.
    pub fn bind_addr(&self) -> &str {
        &self.bind_addr
    }
    /// Model provider API key.
    pub fn gemini_api_key(&self) -> &str {
        &self.gemini_api_key
    }
    /// Model provider endpoint root (overridable for proxies and tests).
    pub fn gemini_base_url(&self) -> &str {
        &self.gemini_base_url
    }
    /// Fixed model identifier used for every completion.
    pub fn gemini_model(&self) -> &str {
        &self.gemini_model
    }
    /// Secret the auth provider signs session tokens with.
    pub fn auth_jwt_secret(&self) -> &str {
        &self.auth_jwt_secret
    }
}

fn require(key: &'static str) -> Result<String, ConfigError> {
    match env::var(key) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(ConfigError::Missing { var: key }),
    }
}

/// Errors that can occur while building a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("required environment variable '{var}' is not set")]
    Missing { var: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Ensure environment-variable manipulating tests run serially.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        for key in [
            ENV_BIND_ADDR,
            ENV_GEMINI_API_KEY,
            ENV_GEMINI_BASE_URL,
            ENV_GEMINI_MODEL,
            ENV_AUTH_JWT_SECRET,
        ] {
            unsafe {
                env::remove_var(key);
            }
        }
    }

    fn set_required() {
        unsafe {
            env::set_var(ENV_GEMINI_API_KEY, "test-api-key");
            env::set_var(ENV_AUTH_JWT_SECRET, "test-auth-secret");
        }
    }

    #[test]
    fn fails_without_model_credential() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        unsafe {
            env::set_var(ENV_AUTH_JWT_SECRET, "test-auth-secret");
        }
        let err = Config::from_env().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Missing {
                var: ENV_GEMINI_API_KEY
            }
        ));
    }

    #[test]
    fn fails_without_auth_secret() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        unsafe {
            env::set_var(ENV_GEMINI_API_KEY, "test-api-key");
        }
        let err = Config::from_env().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Missing {
                var: ENV_AUTH_JWT_SECRET
            }
        ));
    }

    #[test]
    fn empty_credential_counts_as_missing() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        set_required();
        unsafe {
            env::set_var(ENV_GEMINI_API_KEY, "");
        }
        assert!(Config::from_env().is_err());
    }

    #[test]
    fn defaults_when_optional_env_missing() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        set_required();
        let cfg = Config::from_env().unwrap();
        assert_eq!(cfg.bind_addr(), super::DEFAULT_BIND_ADDR);
        assert_eq!(cfg.gemini_base_url(), super::DEFAULT_GEMINI_BASE_URL);
        assert_eq!(cfg.gemini_model(), super::DEFAULT_GEMINI_MODEL);
        assert_eq!(cfg.gemini_api_key(), "test-api-key");
    }

    #[test]
    fn overrides_when_env_present() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        set_required();
        unsafe {
            env::set_var(ENV_BIND_ADDR, "0.0.0.0:9000");
            env::set_var(ENV_GEMINI_BASE_URL, "http://localhost:4010/v1beta");
            env::set_var(ENV_GEMINI_MODEL, "gemini-exp");
        }
        let cfg = Config::from_env().unwrap();
        assert_eq!(cfg.bind_addr(), "0.0.0.0:9000");
        assert_eq!(cfg.gemini_base_url(), "http://localhost:4010/v1beta");
        assert_eq!(cfg.gemini_model(), "gemini-exp");
    }
}
