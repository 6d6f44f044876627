//! API server initialization

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use super::auth::{AuthManager, AuthState, require_auth};
use super::middleware;
use super::openapi::{openapi_json, swagger_ui_html};
use super::routes::{auth, health, strains};
use crate::core::CoreApp;
use crate::core::config::CorsConfig;
use crate::core::constants::{AUTH_BODY_LIMIT, DEFAULT_BODY_LIMIT};
use crate::data::DatabaseService;

pub struct ApiServer {
    app: CoreApp,
}

impl ApiServer {
    pub fn new(app: CoreApp) -> Self {
        Self { app }
    }

    /// Returns CoreApp for graceful shutdown
    pub async fn start(self) -> Result<CoreApp> {
        let Self { app } = self;

        let shutdown = app.shutdown.clone();

        let router = build_router(
            app.database.clone(),
            app.auth.clone(),
            &app.config.cors,
            app.config.debug,
        );

        // Hostnames such as `localhost` resolve here
        let listener =
            TcpListener::bind((app.config.server.host.as_str(), app.config.server.port)).await?;
        tracing::debug!(addr = %listener.local_addr()?, "Listening");
        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown.wait())
        .await?;

        Ok(app)
    }
}

/// Assemble the full HTTP router
///
/// Strain routes sit behind bearer auth; health, docs and the token exchange
/// stay open. In debug mode every request is logged with its Origin after
/// CORS has run, so the logged allow-origin is what the browser receives.
fn build_router(
    database: Arc<DatabaseService>,
    auth_manager: Arc<AuthManager>,
    cors: &CorsConfig,
    debug: bool,
) -> Router {
    let auth_routes =
        auth::routes(auth_manager.clone()).layer(DefaultBodyLimit::max(AUTH_BODY_LIMIT));

    let strains_routes = strains::routes(database.clone()).layer(
        axum::middleware::from_fn_with_state(AuthState { auth_manager }, require_auth),
    );

    let router = Router::new()
        .route(
            "/api/v1/health",
            get(health::health).with_state(database),
        )
        .route("/api/openapi.json", get(openapi_json))
        .route("/api/docs", get(swagger_ui_html))
        .route("/api/docs/", get(swagger_ui_html))
        .nest("/api/v1/auth", auth_routes)
        .nest("/api/v1/strains", strains_routes)
        .fallback(middleware::handle_404)
        .layer(middleware::cors(cors));

    let router = if debug {
        router.layer(axum::middleware::from_fn(middleware::log_request))
    } else {
        router
    };

    router
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(DEFAULT_BODY_LIMIT))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Method, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::core::config::AuthConfig;
    use crate::data::types::{Category, NewStrain, StrainType};

    struct TestApp {
        router: Router,
        database: Arc<DatabaseService>,
        auth: Arc<AuthManager>,
    }

    async fn test_app(auth_enabled: bool) -> TestApp {
        let database = Arc::new(DatabaseService::in_memory().await);
        let auth = Arc::new(AuthManager::init(&AuthConfig {
            enabled: auth_enabled,
            jwt_secret: Some("router-test-secret-value".to_string()),
        }));
        let router = build_router(
            database.clone(),
            auth.clone(),
            &CorsConfig::default(),
            true,
        );
        TestApp {
            router,
            database,
            auth,
        }
    }

    async fn seed(
        db: &DatabaseService,
        category: Category,
        name: &str,
        thc: f64,
        price: f64,
        medical_uses: Option<&str>,
    ) -> i64 {
        db.repository()
            .create_strain(NewStrain {
                category,
                strain_name: name.to_string(),
                strain_type: StrainType::Hybrid,
                thc_content: thc,
                cbd_content: 1.0,
                price,
                store_location: Some("Downtown".to_string()),
                is_special: false,
                medical_uses: medical_uses.map(str::to_string),
            })
            .await
            .unwrap()
            .id
    }

    async fn send(
        app: &TestApp,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = axum::http::Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    fn names(body: &Value) -> Vec<String> {
        body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["strain_name"].as_str().unwrap().to_string())
            .collect()
    }

    #[tokio::test]
    async fn health_reports_backend() {
        let app = test_app(true).await;
        let (status, body) = send(&app, Method::GET, "/api/v1/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["database"], "sqlite");
    }

    #[tokio::test]
    async fn openapi_document_is_served() {
        let app = test_app(true).await;
        let (status, body) = send(&app, Method::GET, "/api/openapi.json", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["paths"]["/api/v1/strains"].is_object());
    }

    #[tokio::test]
    async fn list_applies_filters_sort_and_limit() {
        let app = test_app(false).await;
        seed(&app.database, Category::Medical, "Harlequin", 18.0, 40.0, None).await;
        seed(&app.database, Category::Medical, "Cannatonic", 20.0, 60.0, None).await;
        seed(&app.database, Category::Medical, "ACDC", 5.0, 30.0, None).await;
        seed(&app.database, Category::Flower, "Sour Diesel", 25.0, 50.0, None).await;

        let (status, body) = send(
            &app,
            Method::GET,
            "/api/v1/strains?category=medical&thc_min=15&sort_by=price&sort_dir=desc&limit=10",
            None,
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(names(&body), vec!["Cannatonic", "Harlequin"]);
        assert_eq!(body["total_count"], 2);
        assert_eq!(body["filters"]["category"], "medical");
        assert_eq!(body["filters"]["thc_min"], 15.0);
        assert_eq!(body["filters"]["sort_by"], "price");
        assert_eq!(body["filters"]["sort_dir"], "desc");
        assert_eq!(body["filters"]["limit"], 10);
        assert!(body["filters"].get("offset").is_none());
    }

    #[tokio::test]
    async fn total_count_ignores_pagination() {
        let app = test_app(false).await;
        for (name, price) in [("A", 10.0), ("B", 20.0), ("C", 30.0), ("D", 40.0)] {
            seed(&app.database, Category::Flower, name, 10.0, price, None).await;
        }

        let (status, body) = send(
            &app,
            Method::GET,
            "/api/v1/strains?sort_by=price&limit=2&offset=1",
            None,
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(names(&body), vec!["B", "C"]);
        assert_eq!(body["total_count"], 4);
    }

    #[tokio::test]
    async fn offset_without_limit_returns_everything() {
        let app = test_app(false).await;
        for name in ["A", "B", "C"] {
            seed(&app.database, Category::Edibles, name, 10.0, 5.0, None).await;
        }

        let (status, body) = send(&app, Method::GET, "/api/v1/strains?offset=2", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(names(&body), vec!["A", "B", "C"]);
        assert_eq!(body["total_count"], 3);
    }

    #[tokio::test]
    async fn list_rejects_invalid_filters() {
        let app = test_app(false).await;

        let (status, body) =
            send(&app, Method::GET, "/api/v1/strains?category=beverages", None, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_FILTER");

        let (status, _) = send(&app, Method::GET, "/api/v1/strains?limit=500", None, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn get_strain_by_id() {
        let app = test_app(false).await;
        let id = seed(&app.database, Category::Vapes, "Blue Dream", 22.0, 35.0, None).await;

        let (status, body) =
            send(&app, Method::GET, &format!("/api/v1/strains/{}", id), None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["strain_name"], "Blue Dream");
        assert_eq!(body["category"], "vapes");

        let (status, body) = send(&app, Method::GET, "/api/v1/strains/9999", None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "STRAIN_NOT_FOUND");

        let (status, body) = send(&app, Method::GET, "/api/v1/strains/abc", None, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_STRAIN_ID");
    }

    #[tokio::test]
    async fn condition_search_returns_medical_matches() {
        let app = test_app(false).await;
        seed(&app.database, Category::Medical, "Harlequin", 8.0, 45.0, Some("Anxiety, pain")).await;
        seed(&app.database, Category::Flower, "Sour Diesel", 24.0, 40.0, Some("anxiety")).await;

        let (status, body) = send(
            &app,
            Method::GET,
            "/api/v1/strains/condition/anxiety",
            None,
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(names(&body), vec!["Harlequin"]);

        let (status, body) =
            send(&app, Method::GET, "/api/v1/strains/condition/%20", None, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_CONDITION");
    }

    #[tokio::test]
    async fn create_update_delete_lifecycle() {
        let app = test_app(false).await;

        let (status, created) = send(
            &app,
            Method::POST,
            "/api/v1/strains",
            Some(json!({
                "category": "medical",
                "strain_name": "  Harlequin ",
                "strain_type": "Sativa",
                "thc_content": 8.0,
                "cbd_content": 12.0,
                "price": 45.0,
                "medical_uses": "Chronic pain"
            })),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["strain_name"], "Harlequin");
        let id = created["id"].as_i64().unwrap();
        let uri = format!("/api/v1/strains/{}", id);

        let (status, updated) =
            send(&app, Method::PUT, &uri, Some(json!({ "price": 55.0 })), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["price"], 55.0);
        assert_eq!(updated["thc_content"], 8.0);

        let (status, body) = send(&app, Method::PUT, &uri, Some(json!({})), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "EMPTY_UPDATE");

        let (status, body) = send(&app, Method::DELETE, &uri, None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["deleted"], true);

        let (status, _) = send(&app, Method::GET, &uri, None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn create_rejects_invalid_body() {
        let app = test_app(false).await;
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/strains",
            Some(json!({
                "category": "flower",
                "strain_name": "Too Strong",
                "strain_type": "Indica",
                "thc_content": 140.0,
                "cbd_content": 0.0,
                "price": 10.0
            })),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn blank_strain_name_never_reaches_storage() {
        let app = test_app(false).await;
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/strains",
            Some(json!({
                "category": "flower",
                "strain_name": "   ",
                "strain_type": "Indica",
                "thc_content": 18.0,
                "cbd_content": 0.0,
                "price": 10.0
            })),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");

        let id = seed(&app.database, Category::Flower, "OG Kush", 20.0, 40.0, None).await;
        let (status, body) = send(
            &app,
            Method::PUT,
            &format!("/api/v1/strains/{}", id),
            Some(json!({ "strain_name": " " })),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn category_scope_guards_update_and_delete() {
        let app = test_app(false).await;
        let id = seed(&app.database, Category::Medical, "ACDC", 1.0, 30.0, None).await;

        let (status, body) = send(
            &app,
            Method::PUT,
            &format!("/api/v1/strains/{}?category=flower", id),
            Some(json!({ "price": 10.0 })),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "STRAIN_NOT_FOUND");

        let (status, body) = send(
            &app,
            Method::DELETE,
            &format!("/api/v1/strains/{}?category=beverages", id),
            None,
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");

        let (status, _) = send(
            &app,
            Method::DELETE,
            &format!("/api/v1/strains/{}?category=flower", id),
            None,
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(
            &app,
            Method::DELETE,
            &format!("/api/v1/strains/{}?category=medical", id),
            None,
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn strains_require_bearer_token_when_auth_enabled() {
        let app = test_app(true).await;

        let (status, body) = send(&app, Method::GET, "/api/v1/strains", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], "AUTH_HEADER_MISSING");

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/auth/exchange",
            Some(json!({ "token": "wrong" })),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], "BOOTSTRAP_INVALID");

        let bootstrap = app.auth.bootstrap_token().to_string();
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/auth/exchange",
            Some(json!({ "token": bootstrap })),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["token_type"], "Bearer");
        let token = body["token"].as_str().unwrap().to_string();

        let (status, body) =
            send(&app, Method::GET, "/api/v1/strains", None, Some(&token)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_count"], 0);
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let app = test_app(false).await;
        let (status, _) = send(&app, Method::GET, "/api/v1/nope", None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
