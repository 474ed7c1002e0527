//! User administration handler implementations

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use crate::{
    authorization::require_admin,
    error::AppResult,
    handlers::auth::response::UserResponse,
    middleware::auth::OptionalAuth,
    services::UserService,
    state::AppState,
    utils::Page,
};

use super::{
    request::{ListUsersQuery, UpdateRoleRequest, UpdateStatusRequest},
    response::UsersListResponse,
};

/// List users (paginated)
pub async fn list_users(
    State(state): State<AppState>,
    auth: OptionalAuth,
    Query(query): Query<ListUsersQuery>,
) -> AppResult<Json<UsersListResponse>> {
    require_admin(auth.principal())?;

    let page = Page::new(query.page, query.per_page);
    let (users, total) =
        UserService::list_users(state.db(), page, query.search.as_deref(), query.role).await?;

    Ok(Json(UsersListResponse {
        users: users.into_iter().map(UserResponse::from).collect(),
        total,
        page: page.page,
        per_page: page.per_page,
    }))
}

/// Get a specific user
pub async fn get_user(
    State(state): State<AppState>,
    auth: OptionalAuth,
    Path(id): Path<Uuid>,
) -> AppResult<Json<UserResponse>> {
    require_admin(auth.principal())?;

    let user = UserService::get_user_by_id(state.db(), &id).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Change a user's role
pub async fn update_role(
    State(state): State<AppState>,
    auth: OptionalAuth,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateRoleRequest>,
) -> AppResult<Json<UserResponse>> {
    let admin = require_admin(auth.principal())?;

    let user = UserService::change_role(state.db(), admin, &id, payload.role).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Disable or re-enable an account
pub async fn update_status(
    State(state): State<AppState>,
    auth: OptionalAuth,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStatusRequest>,
) -> AppResult<Json<UserResponse>> {
    let admin = require_admin(auth.principal())?;

    let user = UserService::change_status(state.db(), admin, &id, payload.status).await?;
    Ok(Json(UserResponse::from(user)))
}
