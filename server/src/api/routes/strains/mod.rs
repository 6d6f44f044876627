//! Strain catalog API endpoints

pub mod types;

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::auth::Auth;
use crate::api::extractors::{QueryMap, StrainPath, ValidatedJson, ValidatedQuery};
use crate::api::types::ApiError;
use crate::data::DatabaseService;
use crate::data::filters::parse_strain_filter;
use crate::data::types::StrainUpdate;

use types::{
    CategoryScopeQuery, ConditionStrainsResponse, CreateStrainRequest, DeleteStrainResponse,
    ListStrainsResponse, StrainDto, UpdateStrainRequest,
};

/// Longest condition term accepted by the condition search
const MAX_CONDITION_LEN: usize = 100;

/// Shared state for strain endpoints
#[derive(Clone)]
pub struct StrainsApiState {
    pub database: Arc<DatabaseService>,
}

/// Build strain routes
pub fn routes(database: Arc<DatabaseService>) -> Router<()> {
    let state = StrainsApiState { database };

    Router::new()
        .route("/", get(list_strains).post(create_strain))
        .route("/condition/{condition}", get(get_strains_by_condition))
        .route(
            "/{id}",
            get(get_strain).put(update_strain).delete(delete_strain),
        )
        .with_state(state)
}

fn strain_not_found(id: i64) -> ApiError {
    ApiError::not_found("STRAIN_NOT_FOUND", format!("Strain not found: {}", id))
}

/// List strains matching the optional filters
#[utoipa::path(
    get,
    path = "/api/v1/strains",
    tag = "strains",
    params(
        ("category" = Option<String>, Query, description = "Category (flower, pre_rolls, vapes, concentrates, edibles, tinctures, topicals, medical)"),
        ("thc_min" = Option<f64>, Query, description = "Minimum THC percent (0-100)"),
        ("thc_max" = Option<f64>, Query, description = "Maximum THC percent (0-100)"),
        ("cbd_min" = Option<f64>, Query, description = "Minimum CBD percent (0-100)"),
        ("cbd_max" = Option<f64>, Query, description = "Maximum CBD percent (0-100)"),
        ("strain_type" = Option<String>, Query, description = "Sativa, Indica or Hybrid"),
        ("location" = Option<String>, Query, description = "Store location"),
        ("special" = Option<bool>, Query, description = "Only specials when exactly `true`"),
        ("min_price" = Option<f64>, Query, description = "Minimum price"),
        ("max_price" = Option<f64>, Query, description = "Maximum price"),
        ("sort_by" = Option<String>, Query, description = "strain_name (default), thc_content, cbd_content, price, strain_type"),
        ("sort_dir" = Option<String>, Query, description = "asc (default) or desc"),
        ("limit" = Option<u32>, Query, description = "Page size (1-100)"),
        ("offset" = Option<u32>, Query, description = "Rows to skip; ignored without limit")
    ),
    responses(
        (status = 200, description = "Matching strains with total count", body = ListStrainsResponse),
        (status = 400, description = "Invalid filter"),
        (status = 401, description = "Missing or invalid bearer token")
    )
)]
pub async fn list_strains(
    State(state): State<StrainsApiState>,
    QueryMap(raw): QueryMap,
) -> Result<Json<ListStrainsResponse>, ApiError> {
    let filter = parse_strain_filter(&raw)?;
    tracing::debug!(filter = ?filter, "Listing strains");

    let page = state
        .database
        .repository()
        .list_strains(&filter)
        .await
        .map_err(ApiError::storage("list_strains"))?;

    Ok(Json(ListStrainsResponse {
        data: page.rows.into_iter().map(StrainDto::from).collect(),
        total_count: page.total_count,
        filters: page.filters,
    }))
}

/// Get a single strain by ID
#[utoipa::path(
    get,
    path = "/api/v1/strains/{id}",
    tag = "strains",
    params(
        ("id" = i64, Path, description = "Strain ID")
    ),
    responses(
        (status = 200, description = "Strain details", body = StrainDto),
        (status = 404, description = "Strain not found")
    )
)]
pub async fn get_strain(
    State(state): State<StrainsApiState>,
    path: StrainPath,
) -> Result<Json<StrainDto>, ApiError> {
    let row = state
        .database
        .repository()
        .get_strain(path.id)
        .await
        .map_err(ApiError::storage("get_strain"))?
        .ok_or_else(|| strain_not_found(path.id))?;

    Ok(Json(StrainDto::from(row)))
}

/// Medical strains whose medical uses mention a condition
#[utoipa::path(
    get,
    path = "/api/v1/strains/condition/{condition}",
    tag = "strains",
    params(
        ("condition" = String, Path, description = "Condition to search for, e.g. anxiety")
    ),
    responses(
        (status = 200, description = "Matching medical strains", body = ConditionStrainsResponse),
        (status = 400, description = "Invalid condition")
    )
)]
pub async fn get_strains_by_condition(
    State(state): State<StrainsApiState>,
    Path(condition): Path<String>,
) -> Result<Json<ConditionStrainsResponse>, ApiError> {
    let condition = condition.trim();
    if condition.is_empty() || condition.chars().count() > MAX_CONDITION_LEN {
        return Err(ApiError::bad_request(
            "INVALID_CONDITION",
            format!("Condition must be 1-{} characters", MAX_CONDITION_LEN),
        ));
    }

    let rows = state
        .database
        .repository()
        .get_strains_by_condition(condition)
        .await
        .map_err(ApiError::storage("get_strains_by_condition"))?;

    Ok(Json(ConditionStrainsResponse {
        data: rows.into_iter().map(StrainDto::from).collect(),
    }))
}

/// Create a new strain
#[utoipa::path(
    post,
    path = "/api/v1/strains",
    tag = "strains",
    request_body = CreateStrainRequest,
    responses(
        (status = 201, description = "Strain created", body = StrainDto),
        (status = 400, description = "Invalid request")
    )
)]
pub async fn create_strain(
    State(state): State<StrainsApiState>,
    auth: Auth,
    ValidatedJson(body): ValidatedJson<CreateStrainRequest>,
) -> Result<(StatusCode, Json<StrainDto>), ApiError> {
    let row = state
        .database
        .repository()
        .create_strain(body.into())
        .await
        .map_err(ApiError::storage("create_strain"))?;

    tracing::info!(
        user_id = %auth.user_id(),
        strain_id = row.id,
        category = %row.category,
        "Strain created"
    );

    Ok((StatusCode::CREATED, Json(StrainDto::from(row))))
}

/// Update a strain; `?category=` restricts the update to that category
#[utoipa::path(
    put,
    path = "/api/v1/strains/{id}",
    tag = "strains",
    params(
        ("id" = i64, Path, description = "Strain ID"),
        ("category" = Option<String>, Query, description = "Only update when the strain is in this category")
    ),
    request_body = UpdateStrainRequest,
    responses(
        (status = 200, description = "Strain updated", body = StrainDto),
        (status = 400, description = "Invalid request or empty update"),
        (status = 404, description = "Strain not found in scope")
    )
)]
pub async fn update_strain(
    State(state): State<StrainsApiState>,
    auth: Auth,
    path: StrainPath,
    ValidatedQuery(query): ValidatedQuery<CategoryScopeQuery>,
    ValidatedJson(body): ValidatedJson<UpdateStrainRequest>,
) -> Result<Json<StrainDto>, ApiError> {
    let update = StrainUpdate::from(body);
    if update.is_empty() {
        return Err(ApiError::bad_request(
            "EMPTY_UPDATE",
            "Request body must contain at least one field to update",
        ));
    }

    let repo = state.database.repository();
    let updated = repo
        .update_strain(path.id, query.scope(), &update)
        .await
        .map_err(ApiError::storage("update_strain"))?;
    if !updated {
        return Err(strain_not_found(path.id));
    }

    // Deleted by a concurrent request between the update and this read
    let row = repo
        .get_strain(path.id)
        .await
        .map_err(ApiError::storage("get_strain"))?
        .ok_or_else(|| strain_not_found(path.id))?;

    tracing::info!(user_id = %auth.user_id(), strain_id = path.id, "Strain updated");

    Ok(Json(StrainDto::from(row)))
}

/// Delete a strain; `?category=` restricts the delete to that category
#[utoipa::path(
    delete,
    path = "/api/v1/strains/{id}",
    tag = "strains",
    params(
        ("id" = i64, Path, description = "Strain ID"),
        ("category" = Option<String>, Query, description = "Only delete when the strain is in this category")
    ),
    responses(
        (status = 200, description = "Strain deleted", body = DeleteStrainResponse),
        (status = 404, description = "Strain not found in scope")
    )
)]
pub async fn delete_strain(
    State(state): State<StrainsApiState>,
    auth: Auth,
    path: StrainPath,
    ValidatedQuery(query): ValidatedQuery<CategoryScopeQuery>,
) -> Result<Json<DeleteStrainResponse>, ApiError> {
    let deleted = state
        .database
        .repository()
        .delete_strain(path.id, query.scope())
        .await
        .map_err(ApiError::storage("delete_strain"))?;
    if !deleted {
        return Err(strain_not_found(path.id));
    }

    tracing::info!(user_id = %auth.user_id(), strain_id = path.id, "Strain deleted");

    Ok(Json(DeleteStrainResponse { deleted: true }))
}
