//! Category handler implementations

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    authorization::require_admin,
    error::AppResult,
    middleware::auth::OptionalAuth,
    services::CategoryService,
    state::AppState,
};

use super::{
    request::{CreateCategoryRequest, UpdateCategoryRequest},
    response::{CategoriesListResponse, CategoryResponse},
};

/// List categories visible to the caller
pub async fn list_categories(
    State(state): State<AppState>,
    auth: OptionalAuth,
) -> AppResult<Json<CategoriesListResponse>> {
    let categories = CategoryService::list_categories(state.db(), auth.principal()).await?;
    Ok(Json(CategoriesListResponse { categories }))
}

/// Create a category
pub async fn create_category(
    State(state): State<AppState>,
    auth: OptionalAuth,
    Json(payload): Json<CreateCategoryRequest>,
) -> AppResult<(StatusCode, Json<CategoryResponse>)> {
    require_admin(auth.principal())?;
    payload.validate()?;

    let category = CategoryService::create_category(state.db(), payload).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// Update a category
pub async fn update_category(
    State(state): State<AppState>,
    auth: OptionalAuth,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCategoryRequest>,
) -> AppResult<Json<CategoryResponse>> {
    require_admin(auth.principal())?;
    payload.validate()?;

    let category = CategoryService::update_category(state.db(), &id, payload).await?;
    Ok(Json(category))
}
