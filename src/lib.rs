//! AniNotion - anime blog backend
//!
//! This library provides the core functionality for the AniNotion blog:
//! role-based access control, the post lifecycle and the HTTP API built
//! on top of them.
//!
//! # Features
//!
//! - Four-tier roles (viewer, paid, editor, admin) with an explicit
//!   allow-list gate and a minimum-rank gate for hidden categories
//! - Posts with derived excerpt, reading time and publish timestamp
//! - Draft, scheduled and published states with soft delete
//! - Atomic view and like counters
//!
//! # Architecture
//!
//! The application follows a layered architecture:
//! - **Handlers**: HTTP request handlers (thin layer)
//! - **Services**: Business logic
//! - **Repositories**: Database access
//! - **Models**: Domain models

pub mod authorization;
pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod handlers;
pub mod lifecycle;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;
