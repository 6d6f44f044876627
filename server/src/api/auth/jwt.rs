//! Bearer tokens: HS256 JWTs signed with the shared secret

use anyhow::Context;
use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::core::constants::DEFAULT_SESSION_TTL_HOURS;

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("token has expired")]
    Expired,
    #[error("token signature does not match")]
    InvalidSignature,
    #[error("malformed token: {0}")]
    Invalid(String),
}

impl From<jsonwebtoken::errors::Error> for JwtError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        match e.kind() {
            ErrorKind::ExpiredSignature => Self::Expired,
            ErrorKind::InvalidSignature => Self::InvalidSignature,
            _ => Self::Invalid(e.to_string()),
        }
    }
}

/// How the bearer obtained its token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMethod {
    /// Exchanged the bootstrap token printed at startup
    Bootstrap,
    /// Issued while auth checks were switched off
    Disabled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
    pub auth_method: AuthMethod,
}

impl SessionClaims {
    pub fn new(user_id: &str, auth_method: AuthMethod) -> Self {
        let issued = Utc::now();
        let ttl = Duration::hours(i64::from(DEFAULT_SESSION_TTL_HOURS));
        Self {
            sub: user_id.to_string(),
            iat: issued.timestamp(),
            exp: (issued + ttl).timestamp(),
            jti: Uuid::new_v4().to_string(),
            auth_method,
        }
    }

    pub fn user_id(&self) -> &str {
        &self.sub
    }

    pub fn sign(&self, key: &[u8]) -> anyhow::Result<String> {
        jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            self,
            &EncodingKey::from_secret(key),
        )
        .context("Failed to sign session token")
    }

    /// Decode `token`, checking signature and expiry
    pub fn verify(token: &str, key: &[u8]) -> Result<Self, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        let data = jsonwebtoken::decode::<Self>(token, &DecodingKey::from_secret(key), &validation)?;
        Ok(data.claims)
    }
}

/// Fresh claims for `user_id`, signed
pub fn issue(key: &[u8], user_id: &str, method: AuthMethod) -> anyhow::Result<(String, SessionClaims)> {
    let claims = SessionClaims::new(user_id, method);
    let token = claims.sign(key)?;
    Ok((token, claims))
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &[u8] = b"0123456789abcdef0123456789abcdef";

    #[test]
    fn issued_token_verifies() {
        let (token, issued) = issue(KEY, "budtender-1", AuthMethod::Bootstrap).unwrap();
        let claims = SessionClaims::verify(&token, KEY).unwrap();
        assert_eq!(claims, issued);
        assert_eq!(claims.user_id(), "budtender-1");
        assert_eq!(claims.exp - claims.iat, 3600 * i64::from(DEFAULT_SESSION_TTL_HOURS));
    }

    #[test]
    fn wrong_key_is_invalid_signature() {
        let (token, _) = issue(&[0u8; 32], "local", AuthMethod::Bootstrap).unwrap();
        assert!(matches!(
            SessionClaims::verify(&token, &[1u8; 32]),
            Err(JwtError::InvalidSignature)
        ));
    }

    #[test]
    fn past_expiry_is_expired() {
        let mut claims = SessionClaims::new("local", AuthMethod::Bootstrap);
        claims.exp = Utc::now().timestamp() - 60;
        let token = claims.sign(KEY).unwrap();
        assert!(matches!(
            SessionClaims::verify(&token, KEY),
            Err(JwtError::Expired)
        ));
    }

    #[test]
    fn garbage_is_malformed() {
        assert!(matches!(
            SessionClaims::verify("not-a-jwt", KEY),
            Err(JwtError::Invalid(_))
        ));
    }

    #[test]
    fn auth_method_serializes_lowercase() {
        let claims = SessionClaims::new("local", AuthMethod::Disabled);
        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["auth_method"], "disabled");
        assert_ne!(claims.jti, SessionClaims::new("local", AuthMethod::Disabled).jti);
    }
}
