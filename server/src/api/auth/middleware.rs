//! Bearer token authentication middleware

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use super::context::AuthContext;
use super::jwt::JwtError;
use super::manager::AuthManager;
use crate::api::types::ApiError;
use crate::core::constants::DEFAULT_USER_ID;

/// Authentication error response
///
/// Every variant is a 401; the code tells the client why.
#[derive(Debug)]
pub struct AuthError {
    pub code: &'static str,
    pub message: &'static str,
}

impl AuthError {
    pub fn header_missing() -> Self {
        Self {
            code: "AUTH_HEADER_MISSING",
            message: "Authorization header is required",
        }
    }

    pub fn header_malformed() -> Self {
        Self {
            code: "AUTH_HEADER_MALFORMED",
            message: "Authorization header must be 'Bearer <token>'",
        }
    }

    pub fn token_empty() -> Self {
        Self {
            code: "TOKEN_EMPTY",
            message: "Bearer token is empty",
        }
    }

    pub fn expired() -> Self {
        Self {
            code: "TOKEN_EXPIRED",
            message: "Token has expired, please log in again",
        }
    }

    pub fn invalid() -> Self {
        Self {
            code: "TOKEN_INVALID",
            message: "Invalid token",
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        ApiError::unauthorized(e.code, e.message)
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}

/// Shared auth state for middleware
#[derive(Clone)]
pub struct AuthState {
    pub auth_manager: Arc<AuthManager>,
}

/// Split `Bearer <token>` into the token
fn bearer_token(value: &str) -> Result<&str, AuthError> {
    let value = value.trim();
    let (scheme, token) = value.split_once(' ').unwrap_or((value, ""));
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthError::header_malformed());
    }
    let token = token.trim();
    if token.is_empty() {
        return Err(AuthError::token_empty());
    }
    Ok(token)
}

/// Authentication middleware
///
/// Injects an [`AuthContext`] into request extensions. With auth disabled the
/// local default identity is injected without looking at headers.
pub async fn require_auth(
    State(state): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    if !state.auth_manager.is_enabled() {
        request
            .extensions_mut()
            .insert(AuthContext::local(DEFAULT_USER_ID));
        return Ok(next.run(request).await);
    }

    let header_value = request
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(AuthError::header_missing)?;
    let header_str = header_value
        .to_str()
        .map_err(|_| AuthError::header_malformed())?;
    let token = bearer_token(header_str)?;

    let claims = state
        .auth_manager
        .validate_session(token)
        .map_err(|e| {
            tracing::debug!(error = %e, "Rejected bearer token");
            match e {
                JwtError::Expired => AuthError::expired(),
                _ => AuthError::invalid(),
            }
        })?;

    request
        .extensions_mut()
        .insert(AuthContext::from_claims(claims));

    Ok(next.run(request).await)
}
