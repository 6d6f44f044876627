//! Authentication API endpoints

use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::auth::AuthManager;
use crate::api::extractors::ValidatedJson;
use crate::api::types::ApiError;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ExchangeRequest {
    #[validate(length(min = 1, message = "Token cannot be empty"))]
    pub token: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ExchangeResponse {
    /// Signed JWT to send as `Authorization: Bearer <token>`
    pub token: String,
    pub token_type: &'static str,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Create auth routes
pub fn routes(auth_manager: Arc<AuthManager>) -> Router {
    Router::new()
        .route("/exchange", post(exchange_token))
        .with_state(auth_manager)
}

/// Exchange the bootstrap token printed at startup for a bearer token
#[utoipa::path(
    post,
    path = "/api/v1/auth/exchange",
    tag = "auth",
    request_body = ExchangeRequest,
    responses(
        (status = 200, description = "Token exchanged successfully", body = ExchangeResponse),
        (status = 401, description = "Invalid bootstrap token")
    )
)]
pub async fn exchange_token(
    State(auth_manager): State<Arc<AuthManager>>,
    ValidatedJson(request): ValidatedJson<ExchangeRequest>,
) -> Result<Json<ExchangeResponse>, ApiError> {
    let (token, claims) = auth_manager.exchange_token(&request.token).map_err(|e| {
        tracing::debug!(error = %e, "Bootstrap exchange rejected");
        ApiError::unauthorized("BOOTSTRAP_INVALID", "Invalid bootstrap token")
    })?;

    tracing::info!(user_id = %claims.sub, "Issued session token");

    Ok(Json(ExchangeResponse {
        token,
        token_type: "Bearer",
        expires_at: DateTime::from_timestamp(claims.exp, 0),
    }))
}
