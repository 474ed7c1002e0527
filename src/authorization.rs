//! Role-based access control.
//!
//! Two independent checks live here:
//!
//! - [`authorize`] and its helpers gate *actions* behind an explicit allow-list
//!   of roles. Membership is exact: an allow-list of `[admin, editor]` admits
//!   those two roles and nothing else, regardless of rank.
//! - [`can_view_hidden`] gates *visibility* of hidden categories on a minimum
//!   rank from the fixed role hierarchy.
//!
//! Both are pure functions of their inputs.

use axum::http::StatusCode;

use crate::{
    constants::roles::HIDDEN_CONTENT_MIN_RANK,
    models::{Principal, Role},
};

/// Why the gate refused a request
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessDenied {
    #[error("Authentication required")]
    Unauthenticated,

    #[error("{0}")]
    Forbidden(String),
}

impl AccessDenied {
    /// HTTP status code for the denial
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
        }
    }
}

/// Roles allowed to manage posts
pub const EDITOR_ROLES: &[Role] = &[Role::Admin, Role::Editor];

/// Roles allowed to administer users and categories
pub const ADMIN_ROLES: &[Role] = &[Role::Admin];

/// Allow the principal only if its role is one of `required_roles`.
///
/// Disabled accounts are refused whatever their role.
pub fn authorize<'a>(
    principal: Option<&'a Principal>,
    required_roles: &[Role],
) -> Result<&'a Principal, AccessDenied> {
    let principal = require_any_user(principal)?;

    if required_roles.contains(&principal.role) {
        Ok(principal)
    } else {
        Err(AccessDenied::Forbidden(denial_message(
            required_roles,
            principal.role.as_str(),
        )))
    }
}

/// Allow admins only
pub fn require_admin(principal: Option<&Principal>) -> Result<&Principal, AccessDenied> {
    authorize(principal, ADMIN_ROLES)
}

/// Allow admins and editors
pub fn require_editor(principal: Option<&Principal>) -> Result<&Principal, AccessDenied> {
    authorize(principal, EDITOR_ROLES)
}

/// Allow any signed-in, active principal
pub fn require_any_user(principal: Option<&Principal>) -> Result<&Principal, AccessDenied> {
    let principal = principal.ok_or(AccessDenied::Unauthenticated)?;

    if principal.is_disabled() {
        return Err(AccessDenied::Forbidden("Account is disabled".to_string()));
    }

    Ok(principal)
}

/// Whether the principal may see hidden categories and their posts
pub fn can_view_hidden(principal: Option<&Principal>) -> bool {
    match principal {
        Some(p) if !p.is_disabled() => p.role.rank() >= HIDDEN_CONTENT_MIN_RANK,
        _ => false,
    }
}

fn denial_message(required_roles: &[Role], actual: &str) -> String {
    let required = required_roles
        .iter()
        .map(Role::as_str)
        .collect::<Vec<_>>()
        .join(" or ");

    format!("Access denied. Required role: {required}. Your role: {actual}")
}
