//! Request logging middleware

use std::time::Instant;

use axum::{
    body::Body,
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use tracing::{info, warn};

use crate::models::Principal;

/// Log method, path, status, caller and duration of every request.
///
/// Runs outside the auth layer, so the caller is read from the response
/// extensions where [`optional_auth_middleware`](super::auth::optional_auth_middleware)
/// copies it.
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    let status = response.status();
    let duration_ms = format!("{:.2}", start.elapsed().as_secs_f64() * 1000.0);
    let user_id = response
        .extensions()
        .get::<Principal>()
        .map(|p| p.id.to_string())
        .unwrap_or_else(|| "anonymous".to_string());

    if status.is_server_error() {
        warn!(%method, %path, status = status.as_u16(), %user_id, %duration_ms, "Request completed with server error");
    } else if status.is_client_error() && status != StatusCode::NOT_FOUND {
        warn!(%method, %path, status = status.as_u16(), %user_id, %duration_ms, "Request completed with client error");
    } else {
        info!(%method, %path, status = status.as_u16(), %user_id, %duration_ms, "Request completed");
    }

    response
}
