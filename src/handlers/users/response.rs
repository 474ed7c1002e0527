//! User administration response DTOs

use serde::Serialize;

use crate::handlers::auth::response::UserResponse;

/// User list response
#[derive(Debug, Serialize)]
pub struct UsersListResponse {
    pub users: Vec<UserResponse>,
    pub total: i64,
    pub page: u32,
    pub per_page: u32,
}
