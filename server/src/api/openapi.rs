//! OpenAPI specification and Swagger UI

use axum::http::header;
use axum::response::{Html, IntoResponse, Json};
use utoipa::OpenApi;

use crate::api::routes::{auth, health, strains};
use crate::data::filters::{SortColumn, SortDirection, StrainFilter};
use crate::data::types::{Category, StrainType};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Dispensary API",
        version = env!("CARGO_PKG_VERSION"),
        description = "Strain catalog for dispensary storefronts"
    ),
    tags(
        (name = "health", description = "Health check endpoint"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "strains", description = "Strain catalog")
    ),
    paths(
        // Health
        health::health,
        // Auth
        auth::exchange_token,
        // Strains
        strains::list_strains,
        strains::get_strain,
        strains::get_strains_by_condition,
        strains::create_strain,
        strains::update_strain,
        strains::delete_strain,
    ),
    components(schemas(
        // Health
        health::HealthResponse,
        // Auth
        auth::ExchangeRequest,
        auth::ExchangeResponse,
        // Strains
        strains::types::StrainDto,
        strains::types::ListStrainsResponse,
        strains::types::ConditionStrainsResponse,
        strains::types::DeleteStrainResponse,
        strains::types::CreateStrainRequest,
        strains::types::UpdateStrainRequest,
        // Filters
        StrainFilter,
        SortColumn,
        SortDirection,
        Category,
        StrainType,
    ))
)]
pub struct ApiDoc;

/// Serve OpenAPI JSON specification
pub async fn openapi_json() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/json")],
        Json(ApiDoc::openapi()),
    )
}

/// Serve Swagger UI from CDN
pub async fn swagger_ui_html() -> Html<&'static str> {
    Html(SWAGGER_UI_HTML)
}

const SWAGGER_UI_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Dispensary API Documentation</title>
    <link rel="stylesheet" type="text/css" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css">
    <style>
        html { box-sizing: border-box; overflow-y: scroll; }
        *, *:before, *:after { box-sizing: inherit; }
        body { margin: 0; background: #fafafa; }
    </style>
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-standalone-preset.js"></script>
    <script>
        window.onload = () => {
            window.ui = SwaggerUIBundle({
                url: "/api/openapi.json",
                dom_id: '#swagger-ui',
                presets: [
                    SwaggerUIBundle.presets.apis,
                    SwaggerUIStandalonePreset
                ],
                layout: "StandaloneLayout",
                deepLinking: true
            });
        };
    </script>
</body>
</html>"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_strain_routes() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;
        assert!(paths.contains_key("/api/v1/health"));
        assert!(paths.contains_key("/api/v1/auth/exchange"));
        assert!(paths.contains_key("/api/v1/strains"));
        assert!(paths.contains_key("/api/v1/strains/{id}"));
        assert!(paths.contains_key("/api/v1/strains/condition/{condition}"));
    }
}
