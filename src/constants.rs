//! Application-wide constants
//!
//! This module contains all constant values used throughout the application.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

// =============================================================================
// DATABASE DEFAULTS
// =============================================================================

/// Default maximum database connections in the pool
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 20;

// =============================================================================
// AUTHENTICATION DEFAULTS
// =============================================================================

/// Default JWT token expiry in hours
pub const DEFAULT_JWT_EXPIRY_HOURS: i64 = 24;

/// Minimum password length
pub const MIN_PASSWORD_LENGTH: u64 = 8;

/// Maximum password length
pub const MAX_PASSWORD_LENGTH: u64 = 128;

/// Username minimum length
pub const MIN_USERNAME_LENGTH: u64 = 3;

/// Username maximum length
pub const MAX_USERNAME_LENGTH: u64 = 32;

// =============================================================================
// POST DERIVATION DEFAULTS
// =============================================================================

/// Target excerpt length in characters before the ellipsis
pub const DEFAULT_EXCERPT_LENGTH: usize = 150;

/// Reading speed used for the reading-time estimate
pub const DEFAULT_WORDS_PER_MINUTE: u32 = 200;

/// Appended to an excerpt that was cut short
pub const EXCERPT_ELLIPSIS: &str = "...";

// =============================================================================
// USER ROLES
// =============================================================================

/// User role identifiers
pub mod roles {
    pub const VIEWER: &str = "viewer";
    pub const PAID: &str = "paid";
    pub const EDITOR: &str = "editor";
    pub const ADMIN: &str = "admin";

    /// All user roles, lowest privilege first
    pub const ALL: &[&str] = &[VIEWER, PAID, EDITOR, ADMIN];

    /// Rank of each role on the tiered-access hierarchy.
    ///
    /// Only the hidden-content gate reads this table. Role gates on actions
    /// use explicit allow-lists instead.
    pub const RANKS: &[(&str, u8)] = &[(VIEWER, 1), (PAID, 2), (EDITOR, 3), (ADMIN, 4)];

    /// Minimum rank needed to see hidden categories and their posts
    pub const HIDDEN_CONTENT_MIN_RANK: u8 = 2;
}

/// Account status identifiers
pub mod account_status {
    pub const ACTIVE: &str = "active";
    pub const DISABLED: &str = "disabled";
}

// =============================================================================
// POST STATUSES
// =============================================================================

/// Post lifecycle statuses
pub mod post_status {
    pub const DRAFT: &str = "draft";
    pub const SCHEDULED: &str = "scheduled";
    pub const PUBLISHED: &str = "published";
}

// =============================================================================
// API VERSIONING
// =============================================================================

/// API base path
pub const API_BASE_PATH: &str = "/api/v1";

// =============================================================================
// PAGINATION
// =============================================================================

/// Default page size for paginated results
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Maximum page size for paginated results
pub const MAX_PAGE_SIZE: u32 = 100;

// =============================================================================
// VALIDATION
// =============================================================================

/// Maximum post title length
pub const MAX_POST_TITLE_LENGTH: u64 = 200;

/// Maximum anime name length
pub const MAX_ANIME_NAME_LENGTH: u64 = 200;

/// Maximum post content length
pub const MAX_POST_CONTENT_LENGTH: u64 = 200_000;

/// Maximum explicit excerpt length
pub const MAX_EXCERPT_LENGTH: u64 = 500;

/// Maximum number of tags on a post
pub const MAX_TAGS_PER_POST: u64 = 20;

/// Maximum category name length
pub const MAX_CATEGORY_NAME_LENGTH: u64 = 64;

/// Maximum category description length
pub const MAX_CATEGORY_DESCRIPTION_LENGTH: u64 = 1000;
