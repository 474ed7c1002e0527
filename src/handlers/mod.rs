//! HTTP Request Handlers
//!
//! This module contains all HTTP request handlers organized by domain.

pub mod auth;
pub mod categories;
pub mod health;
pub mod posts;
pub mod users;

use axum::{middleware, Router};

use crate::{
    constants::API_BASE_PATH,
    middleware::{logging_middleware, optional_auth_middleware},
    state::AppState,
};

/// Create all API routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .nest("/auth", auth::routes())
        .nest("/users", users::routes())
        .nest("/categories", categories::routes())
        .nest("/posts", posts::routes())
}

/// The full application router with authentication and request logging
pub fn router(state: AppState) -> Router {
    Router::new()
        .nest(API_BASE_PATH, routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            optional_auth_middleware,
        ))
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state)
}
