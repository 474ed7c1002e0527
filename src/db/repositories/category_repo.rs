//! Category repository

use sqlx::PgPool;
use uuid::Uuid;

use crate::{error::AppResult, models::Category};

/// Repository for category database operations
pub struct CategoryRepository;

impl CategoryRepository {
    /// Create a new category
    pub async fn create(
        pool: &PgPool,
        name: &str,
        slug: &str,
        description: Option<&str>,
        is_hidden: bool,
    ) -> AppResult<Category> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name, slug, description, is_hidden)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(slug)
        .bind(description)
        .bind(is_hidden)
        .fetch_one(pool)
        .await?;

        Ok(category)
    }

    /// Find category by ID
    pub async fn find_by_id(pool: &PgPool, id: &Uuid) -> AppResult<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(r#"SELECT * FROM categories WHERE id = $1"#)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(category)
    }

    /// Update category
    pub async fn update(
        pool: &PgPool,
        id: &Uuid,
        name: Option<&str>,
        slug: Option<&str>,
        description: Option<&str>,
        is_hidden: Option<bool>,
    ) -> AppResult<Category> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            UPDATE categories
            SET
                name = COALESCE($2, name),
                slug = COALESCE($3, slug),
                description = COALESCE($4, description),
                is_hidden = COALESCE($5, is_hidden),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(slug)
        .bind(description)
        .bind(is_hidden)
        .fetch_one(pool)
        .await?;

        Ok(category)
    }

    /// List categories ordered by name, hidden ones only on request
    pub async fn list(pool: &PgPool, include_hidden: bool) -> AppResult<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT * FROM categories
            WHERE $1 OR is_hidden = FALSE
            ORDER BY name
            "#,
        )
        .bind(include_hidden)
        .fetch_all(pool)
        .await?;

        Ok(categories)
    }
}
