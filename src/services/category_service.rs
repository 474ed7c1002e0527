//! Category service

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::{
    authorization::can_view_hidden,
    db::repositories::CategoryRepository,
    error::{AppError, AppResult},
    handlers::categories::{
        request::{CreateCategoryRequest, UpdateCategoryRequest},
        response::CategoryResponse,
    },
    models::{slugify, Principal},
    utils::sanitize_string,
};

/// Category service for business logic
pub struct CategoryService;

impl CategoryService {
    /// Categories the caller may see, hidden ones only for paid members and up
    pub async fn list_categories(
        pool: &PgPool,
        principal: Option<&Principal>,
    ) -> AppResult<Vec<CategoryResponse>> {
        let categories = CategoryRepository::list(pool, can_view_hidden(principal)).await?;
        Ok(categories.into_iter().map(CategoryResponse::from).collect())
    }

    /// Create a category; the slug is derived from the name
    pub async fn create_category(
        pool: &PgPool,
        payload: CreateCategoryRequest,
    ) -> AppResult<CategoryResponse> {
        let name = sanitize_string(&payload.name);
        let slug = Self::slug_for(&name)?;

        let category = CategoryRepository::create(
            pool,
            &name,
            &slug,
            payload.description.as_deref(),
            payload.is_hidden,
        )
        .await?;

        info!(category_id = %category.id, slug = %category.slug, hidden = category.is_hidden, "Category created");

        Ok(CategoryResponse::from(category))
    }

    /// Update a category. Renaming also changes the slug.
    pub async fn update_category(
        pool: &PgPool,
        id: &Uuid,
        payload: UpdateCategoryRequest,
    ) -> AppResult<CategoryResponse> {
        CategoryRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Category not found".to_string()))?;

        let name = payload.name.as_deref().map(sanitize_string);
        let slug = name.as_deref().map(Self::slug_for).transpose()?;

        let category = CategoryRepository::update(
            pool,
            id,
            name.as_deref(),
            slug.as_deref(),
            payload.description.as_deref(),
            payload.is_hidden,
        )
        .await?;

        info!(category_id = %category.id, hidden = category.is_hidden, "Category updated");

        Ok(CategoryResponse::from(category))
    }

    fn slug_for(name: &str) -> AppResult<String> {
        let slug = slugify(name);
        if slug.is_empty() {
            return Err(AppError::Validation(
                "Category name must contain letters or digits".to_string(),
            ));
        }
        Ok(slug)
    }
}
