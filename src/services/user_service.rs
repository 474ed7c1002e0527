//! User administration service

use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    db::repositories::UserRepository,
    error::{AppError, AppResult},
    models::{AccountStatus, Principal, Role, User},
    utils::Page,
};

/// User service for business logic
pub struct UserService;

impl UserService {
    /// Get user by ID
    pub async fn get_user_by_id(pool: &PgPool, id: &Uuid) -> AppResult<User> {
        UserRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// List users with pagination
    pub async fn list_users(
        pool: &PgPool,
        page: Page,
        search: Option<&str>,
        role: Option<Role>,
    ) -> AppResult<(Vec<User>, i64)> {
        let search = search.map(str::trim).filter(|s| !s.is_empty());
        UserRepository::list(pool, page.offset(), page.limit(), search, role).await
    }

    /// Change a user's role. Admins cannot demote themselves.
    pub async fn change_role(
        pool: &PgPool,
        admin: &Principal,
        target_id: &Uuid,
        role: Role,
    ) -> AppResult<User> {
        if admin.id == *target_id && role != admin.role {
            warn!(user_id = %admin.id, "Admin attempted to change own role");
            return Err(AppError::Forbidden("Cannot change your own role".to_string()));
        }

        Self::get_user_by_id(pool, target_id).await?;
        let user = UserRepository::update_role(pool, target_id, role).await?;

        info!(admin_id = %admin.id, user_id = %user.id, role = %user.role, "User role changed");

        Ok(user)
    }

    /// Disable or re-enable an account. Admins cannot disable themselves.
    pub async fn change_status(
        pool: &PgPool,
        admin: &Principal,
        target_id: &Uuid,
        status: AccountStatus,
    ) -> AppResult<User> {
        if admin.id == *target_id && status == AccountStatus::Disabled {
            warn!(user_id = %admin.id, "Admin attempted to disable own account");
            return Err(AppError::Forbidden("Cannot disable your own account".to_string()));
        }

        Self::get_user_by_id(pool, target_id).await?;
        let user = UserRepository::update_status(pool, target_id, status).await?;

        info!(
            admin_id = %admin.id,
            user_id = %user.id,
            status = %user.status,
            "Account status changed"
        );

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::postgres::PgPoolOptions;

    // Never connected: the self-protection checks run before any query.
    fn idle_pool() -> PgPool {
        PgPoolOptions::new()
            .connect_lazy("postgres://aninotion@127.0.0.1:1/aninotion")
            .unwrap()
    }

    fn admin() -> Principal {
        Principal {
            id: Uuid::new_v4(),
            username: "admin".to_string(),
            role: Role::Admin,
            status: AccountStatus::Active,
        }
    }

    #[tokio::test]
    async fn test_admin_cannot_demote_self() {
        let pool = idle_pool();
        let admin = admin();

        let result = UserService::change_role(&pool, &admin, &admin.id, Role::Editor).await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_admin_cannot_disable_self() {
        let pool = idle_pool();
        let admin = admin();

        let result =
            UserService::change_status(&pool, &admin, &admin.id, AccountStatus::Disabled).await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }
}
