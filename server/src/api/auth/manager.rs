//! Authentication manager

use anyhow::Result;

use super::jwt::{self, AuthMethod, JwtError, SessionClaims};
use crate::core::config::AuthConfig;
use crate::core::constants::{DEFAULT_USER_ID, ENV_JWT_SECRET};
use crate::utils::crypto;

/// Holds the signing key and the one-time bootstrap token printed at startup
#[derive(Debug)]
pub struct AuthManager {
    signing_key: Vec<u8>,
    bootstrap_token: String,
    enabled: bool,
}

impl AuthManager {
    pub fn init(config: &AuthConfig) -> Self {
        let signing_key = match &config.jwt_secret {
            Some(secret) => secret.as_bytes().to_vec(),
            None => {
                if config.enabled {
                    tracing::warn!(
                        "No JWT secret configured ({}); tokens will not survive a restart",
                        ENV_JWT_SECRET
                    );
                }
                crypto::generate_key(crypto::SIGNING_KEY_LEN)
            }
        };
        let bootstrap_token = crypto::generate_token(32);

        if config.enabled {
            tracing::debug!("Authentication enabled");
        } else {
            tracing::warn!("Authentication DISABLED");
        }

        Self {
            signing_key,
            bootstrap_token,
            enabled: config.enabled,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn bootstrap_token(&self) -> &str {
        &self.bootstrap_token
    }

    /// Exchange the bootstrap token for a signed session token
    pub fn exchange_token(&self, token: &str) -> Result<(String, SessionClaims)> {
        if !self.enabled {
            return jwt::issue(&self.signing_key, DEFAULT_USER_ID, AuthMethod::Disabled);
        }

        if !crypto::constant_time_eq(&self.bootstrap_token, token) {
            anyhow::bail!("Invalid bootstrap token");
        }

        jwt::issue(&self.signing_key, DEFAULT_USER_ID, AuthMethod::Bootstrap)
    }

    /// Validate a bearer token
    pub fn validate_session(&self, jwt: &str) -> Result<SessionClaims, JwtError> {
        SessionClaims::verify(jwt, &self.signing_key)
    }
}
