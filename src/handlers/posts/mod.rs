//! Post handlers

mod handler;
pub mod request;
pub mod response;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// Post routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list_posts).post(handler::create_post))
        .route("/manage", get(handler::manage_posts))
        .route(
            "/{id}",
            get(handler::get_post)
                .put(handler::update_post)
                .delete(handler::delete_post),
        )
        .route("/{id}/publish", post(handler::publish_post))
        .route("/{id}/schedule", post(handler::schedule_post))
        .route("/{id}/restore", post(handler::restore_post))
        .route("/{id}/like", post(handler::like_post))
}
