//! Category handlers

mod handler;
pub mod request;
pub mod response;

use axum::{
    routing::{get, put},
    Router,
};

use crate::state::AppState;

/// Category routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list_categories).post(handler::create_category))
        .route("/{id}", put(handler::update_category))
}
