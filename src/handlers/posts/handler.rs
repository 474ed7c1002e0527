//! Post handler implementations

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    authorization::{require_any_user, require_editor},
    error::AppResult,
    middleware::auth::OptionalAuth,
    services::PostService,
    state::AppState,
    utils::Page,
};

use super::{
    request::{CreatePostRequest, ListPostsQuery, ManagePostsQuery, UpdatePostRequest},
    response::{LikeResponse, PostResponse, PostsListResponse},
};

/// List published posts (paginated)
pub async fn list_posts(
    State(state): State<AppState>,
    auth: OptionalAuth,
    Query(query): Query<ListPostsQuery>,
) -> AppResult<Json<PostsListResponse>> {
    let page = Page::new(query.page, query.per_page);

    let (posts, total) =
        PostService::list_published(state.db(), &query, page, auth.principal()).await?;

    Ok(Json(PostsListResponse {
        posts,
        total,
        page: page.page,
        per_page: page.per_page,
    }))
}

/// List every post for the editor dashboard
pub async fn manage_posts(
    State(state): State<AppState>,
    auth: OptionalAuth,
    Query(query): Query<ManagePostsQuery>,
) -> AppResult<Json<PostsListResponse>> {
    require_editor(auth.principal())?;

    let page = Page::new(query.page, query.per_page);
    let (posts, total) = PostService::list_all(state.db(), &query, page).await?;

    Ok(Json(PostsListResponse {
        posts,
        total,
        page: page.page,
        per_page: page.per_page,
    }))
}

/// Create a new post
pub async fn create_post(
    State(state): State<AppState>,
    auth: OptionalAuth,
    Json(payload): Json<CreatePostRequest>,
) -> AppResult<(StatusCode, Json<PostResponse>)> {
    let author = require_editor(auth.principal())?;
    payload.validate()?;

    let post =
        PostService::create_post(state.db(), &state.config().posts, author, payload).await?;

    Ok((StatusCode::CREATED, Json(post)))
}

/// Get a specific post
pub async fn get_post(
    State(state): State<AppState>,
    auth: OptionalAuth,
    Path(id): Path<Uuid>,
) -> AppResult<Json<PostResponse>> {
    let post = PostService::get_post(state.db(), &id, auth.principal()).await?;
    Ok(Json(post))
}

/// Update a post
pub async fn update_post(
    State(state): State<AppState>,
    auth: OptionalAuth,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePostRequest>,
) -> AppResult<Json<PostResponse>> {
    require_editor(auth.principal())?;
    payload.validate()?;

    let post = PostService::update_post(state.db(), &state.config().posts, &id, payload).await?;
    Ok(Json(post))
}

/// Publish a post
pub async fn publish_post(
    State(state): State<AppState>,
    auth: OptionalAuth,
    Path(id): Path<Uuid>,
) -> AppResult<Json<PostResponse>> {
    require_editor(auth.principal())?;

    let post = PostService::publish_post(state.db(), &state.config().posts, &id).await?;
    Ok(Json(post))
}

/// Schedule a draft
pub async fn schedule_post(
    State(state): State<AppState>,
    auth: OptionalAuth,
    Path(id): Path<Uuid>,
) -> AppResult<Json<PostResponse>> {
    require_editor(auth.principal())?;

    let post = PostService::schedule_post(state.db(), &state.config().posts, &id).await?;
    Ok(Json(post))
}

/// Soft delete a post
pub async fn delete_post(
    State(state): State<AppState>,
    auth: OptionalAuth,
    Path(id): Path<Uuid>,
) -> AppResult<Json<PostResponse>> {
    require_editor(auth.principal())?;

    let post = PostService::delete_post(state.db(), &id).await?;
    Ok(Json(post))
}

/// Restore a soft-deleted post
pub async fn restore_post(
    State(state): State<AppState>,
    auth: OptionalAuth,
    Path(id): Path<Uuid>,
) -> AppResult<Json<PostResponse>> {
    require_editor(auth.principal())?;

    let post = PostService::restore_post(state.db(), &id).await?;
    Ok(Json(post))
}

/// Like a post
pub async fn like_post(
    State(state): State<AppState>,
    auth: OptionalAuth,
    Path(id): Path<Uuid>,
) -> AppResult<Json<LikeResponse>> {
    let user = require_any_user(auth.principal())?;

    let likes_count = PostService::like_post(state.db(), &id, user).await?;
    Ok(Json(LikeResponse { id, likes_count }))
}
