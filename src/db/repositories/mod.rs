//! Database repositories
//!
//! Repositories handle all direct database interactions.

pub mod category_repo;
pub mod post_repo;
pub mod user_repo;

pub use category_repo::CategoryRepository;
pub use post_repo::{PostFilter, PostRepository};
pub use user_repo::UserRepository;
