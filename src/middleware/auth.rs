//! Authentication middleware
//!
//! Resolves the bearer token, if any, to a [`Principal`]. Requests without
//! a usable token carry on anonymously; handlers decide through the
//! authorization gate whether that is enough.

use axum::{
    body::Body,
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::{
    db::repositories::UserRepository,
    error::AppError,
    models::Principal,
    services::AuthService,
    state::AppState,
};

impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

/// Optional principal wrapper (never fails)
pub struct OptionalAuth(pub Option<Principal>);

impl OptionalAuth {
    pub fn principal(&self) -> Option<&Principal> {
        self.0.as_ref()
    }
}

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(OptionalAuth(parts.extensions.get::<Principal>().cloned()))
    }
}

/// Attach the caller's principal when the request carries a valid token.
///
/// The account is loaded on every request so role changes and disabled
/// accounts take effect without waiting for the token to expire. The
/// principal is also copied onto the response for the request logger.
/// A failed lookup leaves the request anonymous, like an invalid token.
pub async fn optional_auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::to_string);

    let mut principal = None;

    if let Some(token) = token {
        let path = request.uri().path().to_string();

        match resolve_user_id(&token, &state.config().jwt.secret) {
            Some(user_id) => {
                match UserRepository::find_by_id(state.db(), &user_id).await {
                    Ok(Some(user)) => {
                        debug!(
                            path = %path,
                            user_id = %user.id,
                            role = %user.role,
                            "Request authenticated"
                        );
                        principal = Some(user.principal());
                    }
                    Ok(None) => {
                        debug!(path = %path, user_id = %user_id, "Token subject no longer exists");
                    }
                    Err(e) => {
                        warn!(
                            path = %path,
                            user_id = %user_id,
                            error = %e,
                            "Principal lookup failed, continuing anonymously"
                        );
                    }
                }
            }
            None => debug!(path = %path, "Ignoring invalid bearer token"),
        }
    }

    if let Some(principal) = principal.clone() {
        request.extensions_mut().insert(principal);
    }

    let mut response = next.run(request).await;
    if let Some(principal) = principal {
        response.extensions_mut().insert(principal);
    }

    response
}

fn resolve_user_id(token: &str, secret: &str) -> Option<Uuid> {
    let claims = AuthService::verify_token(token, secret).ok()?;
    Uuid::parse_str(&claims.sub).ok()
}
