//! HTTP middleware (CORS, request debugging, 404 handler)

use std::time::Instant;

use axum::body::to_bytes;
use axum::extract::Request;
use axum::http::{HeaderValue, Method, header};
use axum::middleware::Next;
use axum::response::Response;
use tower_http::cors::{AllowOrigin, CorsLayer};

use super::types::ApiError;
use crate::core::config::CorsConfig;
use crate::core::constants::DEFAULT_BODY_LIMIT;

/// Create CORS layer
///
/// With no configured origins, or with `*` among them, the request's Origin is
/// mirrored back; a literal `*` cannot be combined with credentials. Otherwise
/// only the listed origins are allowed. Preflight requests are answered by the
/// layer itself with an empty 200.
pub fn cors(config: &CorsConfig) -> CorsLayer {
    let wildcard = config.allowed_origins.iter().any(|o| o == "*");
    let allow_origin = if config.allowed_origins.is_empty() || wildcard {
        AllowOrigin::mirror_request()
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| match o.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
            header::ORIGIN,
            header::CACHE_CONTROL,
        ])
        .allow_credentials(true)
}

/// Log every request with its Origin and outcome (debug mode)
pub async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let origin = request
        .headers()
        .get(header::ORIGIN)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    let allowed_origin = response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");
    tracing::debug!(
        %method,
        %path,
        %origin,
        allowed_origin,
        status = response.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Request"
    );

    response
}

/// Bytes of an unmatched request's body shown in the debug log
const NOT_FOUND_BODY_PREVIEW: usize = 1024;

/// Fallback for unmatched routes
///
/// At debug level the request is logged with header names only (values may
/// carry credentials) and a short lossy preview of the body.
pub async fn handle_404(req: Request) -> ApiError {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    if tracing::enabled!(tracing::Level::DEBUG) {
        let query = req.uri().query().unwrap_or("").to_string();
        let headers = req
            .headers()
            .keys()
            .map(|name| name.as_str())
            .collect::<Vec<_>>()
            .join(",");

        match to_bytes(req.into_body(), DEFAULT_BODY_LIMIT).await {
            Ok(body) => {
                let preview = &body[..body.len().min(NOT_FOUND_BODY_PREVIEW)];
                tracing::debug!(
                    %method,
                    %path,
                    query,
                    headers,
                    body_len = body.len(),
                    body = %String::from_utf8_lossy(preview),
                    "Unmatched route"
                );
            }
            Err(e) => tracing::debug!(%method, %path, error = %e, "Unmatched route, unreadable body"),
        }
    }

    ApiError::not_found("ROUTE_NOT_FOUND", format!("No route for {} {}", method, path))
}
