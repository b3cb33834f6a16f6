//! Verification of provider-issued session tokens.
//!
//! Sign-in, sign-up and sign-out live entirely at the auth provider; this
//! process only checks the HS256 signature on the token the provider put in
//! the session cookie. Tokens are never issued here.

use anyhow::Result;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

/// Claims the auth provider puts in a session token. `sub` is the
/// provider's opaque user id; `email` is carried for display only.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
    pub exp: usize,
    #[serde(default)]
    pub iat: usize,
}

pub struct SessionVerifier {
    decoding_key: DecodingKey,
}

impl SessionVerifier {
    pub fn new(secret: &str) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_ref()),
        }
    }

    pub fn verify(&self, token: &str) -> Result<SessionClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 60; // Allow 60 seconds clock skew

        let token_data = decode::<SessionClaims>(token, &self.decoding_key, &validation)?;
        Ok(token_data.claims)
    }
}
