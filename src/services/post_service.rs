//! Post service

use chrono::Utc;
use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    authorization::{can_view_hidden, require_editor},
    config::PostConfig,
    db::repositories::{CategoryRepository, PostFilter, PostRepository},
    error::{AppError, AppResult},
    handlers::posts::{
        request::{CreatePostRequest, ListPostsQuery, ManagePostsQuery, UpdatePostRequest},
        response::{PostResponse, PostSummary},
    },
    lifecycle::{self, ValidationFailed},
    models::{Post, PostStatus, Principal},
    utils::{sanitize_string, Page},
};

/// Post service for business logic
pub struct PostService;

impl PostService {
    /// Create a new post
    pub async fn create_post(
        pool: &PgPool,
        config: &PostConfig,
        author: &Principal,
        payload: CreatePostRequest,
    ) -> AppResult<PostResponse> {
        let now = Utc::now();
        let mut post = Post::new(author.id, now);

        post.title = sanitize_string(&payload.title);
        post.anime_name = sanitize_string(&payload.anime_name);
        post.category_id = payload.category_id;
        post.content = payload.content;
        post.excerpt = payload.excerpt;
        post.reading_time_minutes = payload.reading_time_minutes;
        post.season_number = payload.season_number;
        post.episode_number = payload.episode_number;
        post.tags = payload.tags.unwrap_or_default();
        if let Some(status) = payload.status.as_deref() {
            post.status = parse_initial_status(status)
                .map_err(|invalid| with_field_problems(&post, invalid))?;
        }

        lifecycle::prepare_for_save(&mut post, config, now)?;
        Self::ensure_category_exists(pool, post.category_id).await?;

        let post = PostRepository::insert(pool, &post).await?;

        info!(post_id = %post.id, author_id = %author.id, status = %post.status, "Post created");

        Ok(PostResponse::from(post))
    }

    /// Get a post by ID.
    ///
    /// Public posts are visible to everyone and count a view. Editors may
    /// also read drafts, scheduled and deleted posts, which never count.
    pub async fn get_post(
        pool: &PgPool,
        id: &Uuid,
        principal: Option<&Principal>,
    ) -> AppResult<PostResponse> {
        let mut post = Self::find_post(pool, id).await?;

        if !Self::category_visible(pool, post.category_id, principal).await? {
            return Err(post_not_found());
        }

        if post.is_public() {
            if let Some(views) = PostRepository::increment_views(pool, id).await? {
                post.views = views;
            }
            return Ok(PostResponse::from(post));
        }

        if is_editor(principal) {
            debug!(post_id = %post.id, status = %post.status, "Serving non-public post to editor");
            Ok(PostResponse::from(post))
        } else {
            Err(post_not_found())
        }
    }

    /// Update a post. Omitted fields are left as they are.
    pub async fn update_post(
        pool: &PgPool,
        config: &PostConfig,
        id: &Uuid,
        payload: UpdatePostRequest,
    ) -> AppResult<PostResponse> {
        let mut post = Self::find_post(pool, id).await?;
        let original_category = post.category_id;

        if let Some(title) = payload.title {
            post.title = sanitize_string(&title);
        }
        if let Some(anime_name) = payload.anime_name {
            post.anime_name = sanitize_string(&anime_name);
        }
        if let Some(category_id) = payload.category_id {
            post.category_id = Some(category_id);
        }
        if let Some(content) = payload.content {
            lifecycle::replace_content(&mut post, content, config);
        }
        if let Some(excerpt) = payload.excerpt {
            post.excerpt = Some(excerpt).filter(|e| !e.trim().is_empty());
        }
        if let Some(minutes) = payload.reading_time_minutes {
            post.reading_time_minutes = Some(minutes);
        }
        if let Some(season) = payload.season_number {
            post.season_number = Some(season);
        }
        if let Some(episode) = payload.episode_number {
            post.episode_number = Some(episode);
        }
        if let Some(tags) = payload.tags {
            post.tags = tags;
        }
        if let Some(status) = payload.status.as_deref() {
            let next = parse_status(status)?;
            lifecycle::check_transition(post.status, next)?;
            post.status = next;
        }

        lifecycle::prepare_for_save(&mut post, config, Utc::now())?;
        if post.category_id != original_category {
            Self::ensure_category_exists(pool, post.category_id).await?;
        }

        let post = PostRepository::update(pool, &post).await?;

        info!(post_id = %post.id, status = %post.status, "Post updated");

        Ok(PostResponse::from(post))
    }

    /// Move a post to `published`
    pub async fn publish_post(
        pool: &PgPool,
        config: &PostConfig,
        id: &Uuid,
    ) -> AppResult<PostResponse> {
        Self::change_status(pool, config, id, PostStatus::Published).await
    }

    /// Move a draft to `scheduled`
    pub async fn schedule_post(
        pool: &PgPool,
        config: &PostConfig,
        id: &Uuid,
    ) -> AppResult<PostResponse> {
        Self::change_status(pool, config, id, PostStatus::Scheduled).await
    }

    /// Soft delete a post
    pub async fn delete_post(pool: &PgPool, id: &Uuid) -> AppResult<PostResponse> {
        Self::find_post(pool, id).await?;
        let post = PostRepository::set_deleted(pool, id, true).await?;

        info!(post_id = %post.id, "Post deleted");

        Ok(PostResponse::from(post))
    }

    /// Undo a soft delete
    pub async fn restore_post(pool: &PgPool, id: &Uuid) -> AppResult<PostResponse> {
        Self::find_post(pool, id).await?;
        let post = PostRepository::set_deleted(pool, id, false).await?;

        info!(post_id = %post.id, "Post restored");

        Ok(PostResponse::from(post))
    }

    /// Add a like to a public post, returning the new count
    pub async fn like_post(
        pool: &PgPool,
        id: &Uuid,
        principal: &Principal,
    ) -> AppResult<i64> {
        let post = Self::find_post(pool, id).await?;
        if !Self::category_visible(pool, post.category_id, Some(principal)).await? {
            return Err(post_not_found());
        }

        let likes = PostRepository::increment_likes(pool, id)
            .await?
            .ok_or_else(post_not_found)?;

        debug!(post_id = %id, user_id = %principal.id, likes, "Post liked");

        Ok(likes)
    }

    /// Public listing of published posts
    pub async fn list_published(
        pool: &PgPool,
        query: &ListPostsQuery,
        page: Page,
        principal: Option<&Principal>,
    ) -> AppResult<(Vec<PostSummary>, i64)> {
        let filter = PostFilter {
            category_id: query.category_id,
            tags: query.tag_list(),
            anime_name: query.anime_name.clone(),
            created_by: query.author_id,
            include_hidden_categories: can_view_hidden(principal),
        };

        let (posts, total) =
            PostRepository::find_published(pool, &filter, query.sort, page.offset(), page.limit())
                .await?;

        Ok((posts.into_iter().map(PostSummary::from).collect(), total))
    }

    /// Every post regardless of status, for the editor dashboard
    pub async fn list_all(
        pool: &PgPool,
        query: &ManagePostsQuery,
        page: Page,
    ) -> AppResult<(Vec<PostSummary>, i64)> {
        let status = query.status.as_deref().map(parse_status).transpose()?;

        let (posts, total) = PostRepository::list_all(
            pool,
            status,
            query.include_deleted,
            page.offset(),
            page.limit(),
        )
        .await?;

        Ok((posts.into_iter().map(PostSummary::from).collect(), total))
    }

    async fn change_status(
        pool: &PgPool,
        config: &PostConfig,
        id: &Uuid,
        next: PostStatus,
    ) -> AppResult<PostResponse> {
        let mut post = Self::find_post(pool, id).await?;

        lifecycle::check_transition(post.status, next)?;
        post.status = next;
        lifecycle::prepare_for_save(&mut post, config, Utc::now())?;

        let post = PostRepository::update(pool, &post).await?;

        info!(post_id = %post.id, status = %post.status, "Post status changed");

        Ok(PostResponse::from(post))
    }

    async fn find_post(pool: &PgPool, id: &Uuid) -> AppResult<Post> {
        PostRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(post_not_found)
    }

    async fn ensure_category_exists(pool: &PgPool, category_id: Option<Uuid>) -> AppResult<()> {
        let Some(category_id) = category_id else {
            return Ok(());
        };

        match CategoryRepository::find_by_id(pool, &category_id).await? {
            Some(_) => Ok(()),
            None => Err(ValidationFailed::single("category_id", "does not exist").into()),
        }
    }

    async fn category_visible(
        pool: &PgPool,
        category_id: Option<Uuid>,
        principal: Option<&Principal>,
    ) -> AppResult<bool> {
        if can_view_hidden(principal) {
            return Ok(true);
        }

        let Some(category_id) = category_id else {
            return Ok(true);
        };

        let category = CategoryRepository::find_by_id(pool, &category_id).await?;
        Ok(category.is_none_or(|c| !c.is_hidden))
    }
}

fn parse_status(value: &str) -> Result<PostStatus, ValidationFailed> {
    value
        .parse::<PostStatus>()
        .map_err(|e| ValidationFailed::single("status", e.to_string()))
}

/// New posts start as `draft` or `published`; `scheduled` is reached from a draft
fn parse_initial_status(value: &str) -> Result<PostStatus, ValidationFailed> {
    match parse_status(value)? {
        PostStatus::Scheduled => Err(ValidationFailed::single(
            "status",
            "a new post must be draft or published",
        )),
        status => Ok(status),
    }
}

/// Put a status problem alongside whatever else is wrong with the post
fn with_field_problems(post: &Post, invalid_status: ValidationFailed) -> ValidationFailed {
    match lifecycle::validate(post) {
        Ok(()) => invalid_status,
        Err(mut failed) => {
            failed.problems.extend(invalid_status.problems);
            failed
        }
    }
}

fn is_editor(principal: Option<&Principal>) -> bool {
    require_editor(principal).is_ok()
}

fn post_not_found() -> AppError {
    AppError::NotFound("Post not found".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountStatus, Role};

    fn principal(role: Role, status: AccountStatus) -> Principal {
        Principal {
            id: Uuid::new_v4(),
            username: "reviewer".to_string(),
            role,
            status,
        }
    }

    #[test]
    fn test_parse_status_reports_field() {
        assert_eq!(parse_status("draft").unwrap(), PostStatus::Draft);

        let err = parse_status("archived").unwrap_err();
        assert_eq!(err.fields(), vec!["status"]);
    }

    #[test]
    fn test_new_post_cannot_start_scheduled() {
        assert_eq!(parse_initial_status("draft").unwrap(), PostStatus::Draft);
        assert_eq!(parse_initial_status("published").unwrap(), PostStatus::Published);

        let err = parse_initial_status("scheduled").unwrap_err();
        assert_eq!(err.fields(), vec!["status"]);

        let mut post = Post::new(Uuid::new_v4(), Utc::now());
        post.anime_name = "Frieren".to_string();
        post.content = "Episode notes".to_string();
        let failed = with_field_problems(&post, err);
        assert_eq!(failed.fields(), vec!["title", "category_id", "status"]);
    }

    #[test]
    fn test_invalid_status_reported_with_missing_fields() {
        let mut post = Post::new(Uuid::new_v4(), Utc::now());
        post.anime_name = "Frieren".to_string();
        post.content = "Episode notes".to_string();

        let invalid = parse_status("archived").unwrap_err();
        let failed = with_field_problems(&post, invalid);
        assert_eq!(failed.fields(), vec!["title", "category_id", "status"]);
    }

    #[test]
    fn test_only_active_editors_see_unpublished_posts() {
        assert!(is_editor(Some(&principal(Role::Editor, AccountStatus::Active))));
        assert!(is_editor(Some(&principal(Role::Admin, AccountStatus::Active))));
        assert!(!is_editor(Some(&principal(Role::Paid, AccountStatus::Active))));
        assert!(!is_editor(Some(&principal(Role::Admin, AccountStatus::Disabled))));
        assert!(!is_editor(None));
    }
}
