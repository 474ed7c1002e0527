//! Post repository

use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Post, PostOrder, PostStatus},
    utils::text::normalize_tags,
};

/// Extra constraints for published-post queries.
///
/// Every populated field narrows the result; fields are combined with AND.
#[derive(Debug, Clone, Default)]
pub struct PostFilter {
    pub category_id: Option<Uuid>,
    /// Match posts carrying at least one of these tags
    pub tags: Vec<String>,
    /// Case-insensitive exact match
    pub anime_name: Option<String>,
    pub created_by: Option<Uuid>,
    /// Include posts whose category is hidden
    pub include_hidden_categories: bool,
}

/// Repository for post database operations
pub struct PostRepository;

impl PostRepository {
    /// Insert a prepared post, derived fields included, in one statement
    pub async fn insert(pool: &PgPool, post: &Post) -> AppResult<Post> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (
                id, title, anime_name, category_id, content, excerpt,
                reading_time_minutes, status, published_at, is_deleted,
                season_number, episode_number, tags, created_by, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            RETURNING *
            "#,
        )
        .bind(post.id)
        .bind(&post.title)
        .bind(&post.anime_name)
        .bind(post.category_id)
        .bind(&post.content)
        .bind(&post.excerpt)
        .bind(post.reading_time_minutes)
        .bind(post.status.as_str())
        .bind(post.published_at)
        .bind(post.is_deleted)
        .bind(post.season_number)
        .bind(post.episode_number)
        .bind(&post.tags)
        .bind(post.created_by)
        .bind(post.created_at)
        .bind(post.updated_at)
        .fetch_one(pool)
        .await?;

        Ok(post)
    }

    /// Find post by ID, deleted or not
    pub async fn find_by_id(pool: &PgPool, id: &Uuid) -> AppResult<Option<Post>> {
        let post = sqlx::query_as::<_, Post>(r#"SELECT * FROM posts WHERE id = $1"#)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(post)
    }

    /// Write back the editable and derived fields of a prepared post.
    ///
    /// Counters are left alone so concurrent view and like increments
    /// are never overwritten by an edit.
    pub async fn update(pool: &PgPool, post: &Post) -> AppResult<Post> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            UPDATE posts
            SET
                title = $2,
                anime_name = $3,
                category_id = $4,
                content = $5,
                excerpt = $6,
                reading_time_minutes = $7,
                status = $8,
                published_at = $9,
                season_number = $10,
                episode_number = $11,
                tags = $12,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(post.id)
        .bind(&post.title)
        .bind(&post.anime_name)
        .bind(post.category_id)
        .bind(&post.content)
        .bind(&post.excerpt)
        .bind(post.reading_time_minutes)
        .bind(post.status.as_str())
        .bind(post.published_at)
        .bind(post.season_number)
        .bind(post.episode_number)
        .bind(&post.tags)
        .fetch_one(pool)
        .await?;

        Ok(post)
    }

    /// Set or clear the soft-delete flag
    pub async fn set_deleted(pool: &PgPool, id: &Uuid, is_deleted: bool) -> AppResult<Post> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            UPDATE posts
            SET is_deleted = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(is_deleted)
        .fetch_one(pool)
        .await?;

        Ok(post)
    }

    /// Add one view. The increment happens in SQL, so concurrent readers
    /// never lose each other's updates. Returns the new count.
    pub async fn increment_views(pool: &PgPool, id: &Uuid) -> AppResult<Option<i64>> {
        let views: Option<i64> = sqlx::query_scalar(
            r#"UPDATE posts SET views = views + 1 WHERE id = $1 RETURNING views"#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(views)
    }

    /// Add one like to a public post. Returns the new count.
    pub async fn increment_likes(pool: &PgPool, id: &Uuid) -> AppResult<Option<i64>> {
        let likes: Option<i64> = sqlx::query_scalar(
            r#"
            UPDATE posts SET likes_count = likes_count + 1
            WHERE id = $1 AND status = 'published' AND is_deleted = FALSE
            RETURNING likes_count
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(likes)
    }

    /// Published, non-deleted posts matching `filter`
    pub async fn find_published(
        pool: &PgPool,
        filter: &PostFilter,
        order: PostOrder,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Post>, i64)> {
        let mut query = published_query(filter, order, offset, limit);
        let posts = query.build_query_as::<Post>().fetch_all(pool).await?;

        let mut count_query = published_count_query(filter);
        let total = count_query
            .build_query_scalar::<i64>()
            .fetch_one(pool)
            .await?;

        Ok((posts, total))
    }

    /// Every post, for editors. Optionally narrowed by status, deleted posts opt-in.
    pub async fn list_all(
        pool: &PgPool,
        status: Option<PostStatus>,
        include_deleted: bool,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Post>, i64)> {
        let status = status.map(|s| s.as_str());

        let posts = sqlx::query_as::<_, Post>(
            r#"
            SELECT * FROM posts
            WHERE
                ($1::text IS NULL OR status = $1)
                AND ($2 OR is_deleted = FALSE)
            ORDER BY updated_at DESC
            OFFSET $3 LIMIT $4
            "#,
        )
        .bind(status)
        .bind(include_deleted)
        .bind(offset)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM posts
            WHERE
                ($1::text IS NULL OR status = $1)
                AND ($2 OR is_deleted = FALSE)
            "#,
        )
        .bind(status)
        .bind(include_deleted)
        .fetch_one(pool)
        .await?;

        Ok((posts, count))
    }
}

fn published_query(
    filter: &PostFilter,
    order: PostOrder,
    offset: i64,
    limit: i64,
) -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::new("SELECT * FROM posts");
    push_published_conditions(&mut query, filter);
    query.push(" ORDER BY ").push(order.sql());
    query.push(" OFFSET ").push_bind(offset);
    query.push(" LIMIT ").push_bind(limit);
    query
}

fn published_count_query(filter: &PostFilter) -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::new("SELECT COUNT(*) FROM posts");
    push_published_conditions(&mut query, filter);
    query
}

/// The published/non-deleted base condition always comes first; caller
/// constraints can only narrow it.
fn push_published_conditions(query: &mut QueryBuilder<'static, Postgres>, filter: &PostFilter) {
    query.push(" WHERE status = 'published' AND is_deleted = FALSE");

    if let Some(category_id) = filter.category_id {
        query.push(" AND category_id = ").push_bind(category_id);
    }

    let tags = normalize_tags(&filter.tags);
    if !tags.is_empty() {
        query.push(" AND tags && ").push_bind(tags);
    }

    let anime_name = filter
        .anime_name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty());
    if let Some(anime_name) = anime_name {
        query
            .push(" AND LOWER(anime_name) = LOWER(")
            .push_bind(anime_name.to_string())
            .push(")");
    }

    if let Some(created_by) = filter.created_by {
        query.push(" AND created_by = ").push_bind(created_by);
    }

    if !filter.include_hidden_categories {
        query.push(
            " AND (category_id IS NULL OR category_id NOT IN \
             (SELECT id FROM categories WHERE is_hidden = TRUE))",
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "WHERE status = 'published' AND is_deleted = FALSE";

    #[test]
    fn test_published_base_condition_always_present() {
        let query = published_query(&PostFilter::default(), PostOrder::Newest, 0, 20);
        assert!(query.sql().starts_with(&format!("SELECT * FROM posts {BASE}")));

        let filter = PostFilter {
            category_id: Some(Uuid::new_v4()),
            tags: vec!["Action".to_string()],
            anime_name: Some("Frieren".to_string()),
            created_by: Some(Uuid::new_v4()),
            include_hidden_categories: true,
        };
        let query = published_query(&filter, PostOrder::MostViewed, 0, 20);
        let sql = query.sql();
        assert!(sql.contains(BASE));
        assert!(sql.contains("AND category_id = $1"));
        assert!(sql.contains("AND tags && $2"));
        assert!(sql.contains("AND LOWER(anime_name) = LOWER($3)"));
        assert!(sql.contains("AND created_by = $4"));
        assert!(sql.contains("ORDER BY views DESC"));
        assert!(!sql.contains("is_hidden"));
    }

    #[test]
    fn test_hidden_categories_excluded_by_default() {
        let query = published_count_query(&PostFilter::default());
        assert!(query.sql().contains("SELECT id FROM categories WHERE is_hidden = TRUE"));
    }

    #[test]
    fn test_blank_filters_are_ignored() {
        let filter = PostFilter {
            tags: vec!["   ".to_string()],
            anime_name: Some("  ".to_string()),
            include_hidden_categories: true,
            ..PostFilter::default()
        };
        let query = published_count_query(&filter);
        assert_eq!(query.sql(), format!("SELECT COUNT(*) FROM posts {BASE}"));
    }
}
