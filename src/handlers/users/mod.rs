//! User administration handlers

mod handler;
pub mod request;
pub mod response;

use axum::{
    routing::{get, put},
    Router,
};

use crate::state::AppState;

/// User administration routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list_users))
        .route("/{id}", get(handler::get_user))
        .route("/{id}/role", put(handler::update_role))
        .route("/{id}/status", put(handler::update_status))
}
