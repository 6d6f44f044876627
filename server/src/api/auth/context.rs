//! Authenticated identity attached to each request

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use super::jwt::SessionClaims;
use crate::api::types::ApiError;

/// Identity established by the auth middleware
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: String,
    /// Decoded token claims; `None` for the local identity in no-auth mode
    pub claims: Option<SessionClaims>,
}

impl AuthContext {
    pub fn from_claims(claims: SessionClaims) -> Self {
        Self {
            user_id: claims.sub.clone(),
            claims: Some(claims),
        }
    }

    pub fn local(user_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            claims: None,
        }
    }
}

/// Handler extractor for the current [`AuthContext`]
///
/// Fails with 500 when `require_auth` was not applied to the route.
#[derive(Debug, Clone)]
pub struct Auth {
    pub ctx: AuthContext,
}

impl Auth {
    pub fn user_id(&self) -> &str {
        &self.ctx.user_id
    }
}

impl<S> FromRequestParts<S> for Auth
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let ctx = parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| ApiError::internal("Auth context not available"))?;

        Ok(Self { ctx })
    }
}
